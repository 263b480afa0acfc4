//! 保証書レコードの型定義
//!
//! - RecordId: レコード識別子（取込時に採番、再利用しない）
//! - WarrantyRecord: 保証書1枚分のお客様・工事データ
//! - RecordField: 編集可能なフィールド
//! - Stamp: 社判（角印）画像

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// レコード識別子
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id-{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    /// "id-3" と "3" の両方を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("id-").unwrap_or(s);
        digits
            .parse::<u64>()
            .map(RecordId)
            .map_err(|_| format!("不正なレコードID: {}", s))
    }
}

/// 保証書レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyRecord {
    pub id: RecordId,
    pub order_no: String,             // 受注番号
    pub customer_name: String,        // お客様名
    pub construction_address: String, // 工事場所
    pub construction_area: String,    // 施工箇所
    pub construction_type: String,    // 施工種別
    pub construction_method: String,  // 工法名
    pub completion_date: String,      // 施工完了日
    pub warranty_years: String,       // 保証年数
}

impl WarrantyRecord {
    /// フィールド値を取得
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::OrderNo => &self.order_no,
            RecordField::CustomerName => &self.customer_name,
            RecordField::ConstructionAddress => &self.construction_address,
            RecordField::ConstructionArea => &self.construction_area,
            RecordField::ConstructionType => &self.construction_type,
            RecordField::ConstructionMethod => &self.construction_method,
            RecordField::CompletionDate => &self.completion_date,
            RecordField::WarrantyYears => &self.warranty_years,
        }
    }

    /// フィールド値を書き換え（idは対象外）
    pub fn set_field(&mut self, field: RecordField, value: String) {
        let slot = match field {
            RecordField::OrderNo => &mut self.order_no,
            RecordField::CustomerName => &mut self.customer_name,
            RecordField::ConstructionAddress => &mut self.construction_address,
            RecordField::ConstructionArea => &mut self.construction_area,
            RecordField::ConstructionType => &mut self.construction_type,
            RecordField::ConstructionMethod => &mut self.construction_method,
            RecordField::CompletionDate => &mut self.completion_date,
            RecordField::WarrantyYears => &mut self.warranty_years,
        };
        *slot = value;
    }

    /// 一覧表示用の1行
    pub fn summary(&self) -> String {
        format!("[№:{}] {} 様", self.order_no, self.customer_name)
    }
}

/// 編集可能なフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    OrderNo,
    CustomerName,
    ConstructionAddress,
    ConstructionArea,
    ConstructionType,
    ConstructionMethod,
    CompletionDate,
    WarrantyYears,
}

impl RecordField {
    pub const ALL: [RecordField; 8] = [
        RecordField::OrderNo,
        RecordField::CustomerName,
        RecordField::ConstructionAddress,
        RecordField::ConstructionArea,
        RecordField::ConstructionType,
        RecordField::ConstructionMethod,
        RecordField::CompletionDate,
        RecordField::WarrantyYears,
    ];

    /// camelCaseのキー
    pub fn key(self) -> &'static str {
        match self {
            RecordField::OrderNo => "orderNo",
            RecordField::CustomerName => "customerName",
            RecordField::ConstructionAddress => "constructionAddress",
            RecordField::ConstructionArea => "constructionArea",
            RecordField::ConstructionType => "constructionType",
            RecordField::ConstructionMethod => "constructionMethod",
            RecordField::CompletionDate => "completionDate",
            RecordField::WarrantyYears => "warrantyYears",
        }
    }

    /// 保証書上のラベル
    pub fn label(self) -> &'static str {
        match self {
            RecordField::OrderNo => "№",
            RecordField::CustomerName => "お客様名",
            RecordField::ConstructionAddress => "工事場所",
            RecordField::ConstructionArea => "施工箇所",
            RecordField::ConstructionType => "施工種別",
            RecordField::ConstructionMethod => "工法名",
            RecordField::CompletionDate => "施工完了日",
            RecordField::WarrantyYears => "保証年数",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RecordField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s) || f.label() == s)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// 社判（角印）画像
///
/// エンコード済みの画像バイト列をそのまま保持する。形式の検証は描画側に任せる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Stamp {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }
}
