//! CSV取込モジュール
//!
//! ## 処理フロー
//! 1. 文字コード変換（既定: Shift_JIS）
//! 2. CSV行への分解（ヘッダー解釈なし、列数不揃い可）
//! 3. 1行目（ヘッダー）を捨て、列マッピングに従ってレコード化
//! 4. お客様名・受注番号がともに空の行を除外
//!
//! 変換・分解に失敗した場合はレコードを1件も返さない（部分取込しない）。

use crate::error::{Error, Result};
use crate::mapping::{ColumnMap, RecordDefaults};
use crate::store::IdSequence;
use crate::types::WarrantyRecord;
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use tracing::debug;

/// 既定の文字コード
pub const DEFAULT_ENCODING: &str = "Shift_JIS";

/// 取込オプション
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// 文字コードラベル（WHATWG Encoding準拠: "Shift_JIS", "utf-8" 等）
    pub encoding: String,
    pub column_map: ColumnMap,
    pub defaults: RecordDefaults,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            column_map: ColumnMap::default(),
            defaults: RecordDefaults::default(),
        }
    }
}

/// バイト列を指定の文字コードでテキスト化
///
/// BOMがあればそちらを優先する。不正なバイト列を含む場合はエラー。
pub fn decode_bytes(bytes: &[u8], encoding_label: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding_label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(encoding_label.to_string()))?;

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(Error::Decode { encoding: used.name().to_string() });
    }

    Ok(text.into_owned())
}

/// テキストをCSV行に分解
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// 1行をレコードに変換（idは未採番）
///
/// 列が足りない場合は空文字として扱う。
pub fn map_row(row: &[String], map: &ColumnMap, defaults: &RecordDefaults) -> WarrantyRecord {
    WarrantyRecord {
        order_no: cell(row, map.order_no).to_string(),
        customer_name: first_non_empty(row, &map.customer_name).to_string(),
        construction_address: first_non_empty(row, &map.construction_address).to_string(),
        construction_area: defaults.construction_area.clone(),
        construction_type: defaults.construction_type.clone(),
        construction_method: defaults.construction_method.clone(),
        completion_date: cell(row, map.completion_date).replace('/', "-"),
        warranty_years: defaults.warranty_years.clone(),
        ..Default::default()
    }
}

/// 取込対象かどうか（お客様名か受注番号のどちらかが必要）
pub fn is_meaningful(record: &WarrantyRecord) -> bool {
    !record.customer_name.is_empty() || !record.order_no.is_empty()
}

/// ヘッダー付きの行データからレコードを生成
///
/// 残ったレコードにだけidを採番する。
pub fn import_rows(
    rows: &[Vec<String>],
    map: &ColumnMap,
    defaults: &RecordDefaults,
    ids: &mut IdSequence,
) -> Vec<WarrantyRecord> {
    if rows.len() < 2 {
        return Vec::new();
    }

    let records: Vec<WarrantyRecord> = rows[1..]
        .iter()
        .map(|row| map_row(row, map, defaults))
        .filter(is_meaningful)
        .map(|mut record| {
            record.id = ids.next_id();
            record
        })
        .collect();

    debug!(
        rows = rows.len() - 1,
        kept = records.len(),
        mapping_version = map.version,
        "CSV行をレコード化"
    );

    records
}

/// バイト列からレコードを生成（変換 → 分解 → マッピング）
pub fn read_records(
    bytes: &[u8],
    options: &ImportOptions,
    ids: &mut IdSequence,
) -> Result<Vec<WarrantyRecord>> {
    let text = decode_bytes(bytes, &options.encoding)?;
    let rows = parse_rows(&text)?;
    Ok(import_rows(&rows, &options.column_map, &options.defaults, ids))
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn first_non_empty<'a>(row: &'a [String], candidates: &[usize]) -> &'a str {
    candidates
        .iter()
        .map(|&i| cell(row, i))
        .find(|v| !v.is_empty())
        .unwrap_or("")
}
