pub mod pdf;

use crate::error::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use warranty_cert_common::export::certificate_core::CERTIFICATE_TITLE;
use warranty_cert_common::{PrintScope, Stamp, WarrantyRecord};

/// 出力先（ディレクトリ指定ならファイル名を補う）
pub fn output_path_for_scope(output: &Path, scope: PrintScope, records: &[&WarrantyRecord]) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_file_name(scope, records))
    } else {
        output.to_path_buf()
    }
}

/// 既定のファイル名
///
/// 個別出力は「防水工事保証書_{受注番号}.pdf」、それ以外は「防水工事保証書.pdf」。
pub fn default_file_name(scope: PrintScope, records: &[&WarrantyRecord]) -> String {
    match (scope, records) {
        (PrintScope::Single(_), [record]) => {
            let key = if record.order_no.is_empty() {
                record.id.to_string()
            } else {
                sanitize_file_name(&record.order_no)
            };
            format!("{}_{}.pdf", CERTIFICATE_TITLE, key)
        }
        (PrintScope::Selected, _) => format!("{}_選択分.pdf", CERTIFICATE_TITLE),
        _ => format!("{}.pdf", CERTIFICATE_TITLE),
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect()
}

/// 印刷対象を1つのPDFにまとめて出力し、出力先を返す
pub fn export_certificates(
    records: &[&WarrantyRecord],
    stamp: Option<&Stamp>,
    scope: PrintScope,
    output: &Path,
    font_path: &Path,
    issue_date: NaiveDate,
) -> Result<PathBuf> {
    let output_path = output_path_for_scope(output, scope, records);
    println!("- PDFを生成中... ({}件)", records.len());

    let options = pdf::PdfOptions {
        title: CERTIFICATE_TITLE,
        font_path,
        issue_date,
    };
    pdf::generate_pdf(records, stamp, &output_path, &options)?;

    println!("✔ PDF出力: {}", output_path.display());
    Ok(output_path)
}
