//! 取込CSVの列マッピング定義
//!
//! 基幹システムの出力列順に依存するため、列番号はコードではなくデータとして持つ。
//! 出力形式が変わった場合は `ColumnMap` を差し替える（設定ファイルで上書き可）。

use serde::{Deserialize, Serialize};

/// 列番号 → フィールドの対応表（0始まり）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMap {
    /// マッピングの版
    pub version: u32,
    /// 受注番号
    pub order_no: usize,
    /// 施工完了日
    pub completion_date: usize,
    /// お客様名（先頭から順に、空でない最初の列を採用）
    pub customer_name: Vec<usize>,
    /// 工事場所（同上）
    pub construction_address: Vec<usize>,
}

impl ColumnMap {
    /// 初版: 受注CSV（Shift_JIS出力）の列順
    pub fn v1() -> Self {
        Self {
            version: 1,
            order_no: 4,
            completion_date: 3,
            customer_name: vec![24, 7],
            construction_address: vec![27, 10],
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::v1()
    }
}

/// 取込時に固定で設定する値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordDefaults {
    pub construction_area: String,
    pub construction_type: String,
    pub construction_method: String,
    pub warranty_years: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            construction_area: "ベランダ".to_string(),
            construction_type: "FRP防水".to_string(),
            construction_method: "FRP".to_string(),
            warranty_years: "5".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_columns() {
        let map = ColumnMap::v1();
        assert_eq!(map.version, 1);
        assert_eq!(map.order_no, 4);
        assert_eq!(map.completion_date, 3);
        assert_eq!(map.customer_name, vec![24, 7]);
        assert_eq!(map.construction_address, vec![27, 10]);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{"version": 2, "orderNo": 5}"#;
        let map: ColumnMap = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(map.version, 2);
        assert_eq!(map.order_no, 5);
        assert_eq!(map.customer_name, vec![24, 7]); // デフォルト値
    }

    #[test]
    fn test_record_defaults() {
        let defaults = RecordDefaults::default();
        assert_eq!(defaults.construction_area, "ベランダ");
        assert_eq!(defaults.construction_type, "FRP防水");
        assert_eq!(defaults.construction_method, "FRP");
        assert_eq!(defaults.warranty_years, "5");
    }
}
