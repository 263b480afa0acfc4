//! 保証書の紙面内容（PDF描画とは独立）
//!
//! レコード1件 + 発行日から、1ページに載せる文字列一式を組み立てる。
//! 描画側はこの構造体だけを見てページを作る。

use crate::period::{format_japanese_date, warranty_period};
use crate::types::{RecordField, WarrantyRecord};
use chrono::NaiveDate;

pub const CERTIFICATE_TITLE: &str = "防水工事保証書";
pub const PERIOD_CAPTION: &str = "Waterproof Warranty Period";
pub const CLOSING_TEXT: &str = "上記の通り、保証いたします。";
pub const HONORIFIC: &str = "様";

/// 保証書に並べるフィールド（2列グリッド、左上から順）
pub const CERTIFICATE_FIELDS: &[RecordField] = &[
    RecordField::CustomerName,
    RecordField::ConstructionAddress,
    RecordField::ConstructionArea,
    RecordField::ConstructionType,
    RecordField::ConstructionMethod,
    RecordField::CompletionDate,
];

pub const COVERAGE_HEADING: &str = "〈保障の内容〉";
pub const COVERAGE_TEXT: &str =
    "保証期間中、万一施工に起因する漏水が発生した場合、防水層の補修を致します。";

pub const EXCLUSIONS_HEADING: &str = "〈免責事項〉";
pub const EXCLUSIONS: &[&str] = &[
    "① 天災地変及び故意の損傷による事故。",
    "② 下地躯体構造に起因する事故。",
    "③ 防水工事施工後の、配管その他の工事等に起因する事故。",
    "④ 当該仕様と異なった条件下の施工に起因する事故。",
    "⑤ 当該施工部位以外での発生事故に起因する事故。",
    "⑥ 本来の用途以外の仕様に起因する事故。",
    "⑦ 施工者以外の施工作業に起因する事故。",
    "⑧ 記載の防水標準仕様と著しく異なる仕様の場合。",
];

pub const OTHER_HEADING: &str = "〈その他〉";
pub const OTHER_TEXT: &str = "トップコートは5年ごとに点検し、再塗装(有償)を実施して下さい。";

pub const STANDARD_SPEC_TITLE: &str = "ピコイFRP防水標準仕様";
pub const STANDARD_SPEC: &[&str] = &[
    "(1) 床の勾配は1/50以上とする。",
    "(2) 下地の合板は耐水合板(T1)厚み12m/mの2枚張りとする。(防火地域内は防火板厚み12m/mを張る)",
    "(3) 根太間隔は300m/m以下とする。",
    "(4) 下張りと上張りの合板及び上張り防火板の目地は重ならないように張る。",
    "(5) 防火層の立上り高さは、開口部の下端で120m/m以上、それ以下の部分は250m/m以上とする。",
    "(6) FRP防水はガラスマット積層を、木下地2PLYとし、他は工法仕様に準ずるものとする。",
    "(7) 排水ドレンはDP-1Bを標準仕様とする。",
    "(8) 根太を用いず直接、床下地板を張る場合、木造住宅工事仕様書(2005年改訂)5.8.7-6項目に準じる。",
    "(9) 特殊部の納まりが適切なものとする。",
];

/// 欄1つ分
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateField {
    pub label: &'static str,
    pub value: String,
    /// お客様名の「様」など
    pub suffix: Option<&'static str>,
    /// 強調表示（お客様名）
    pub emphasized: bool,
}

/// 見出し付きの文章ブロック
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateSection {
    pub heading: &'static str,
    pub lines: Vec<&'static str>,
}

/// 保証書1ページ分の内容
#[derive(Debug, Clone, PartialEq)]
pub struct CertificatePage {
    pub order_line: String,
    pub title: &'static str,
    pub fields: Vec<CertificateField>,
    pub period_caption: &'static str,
    pub period: String,
    pub period_note: String,
    pub sections: Vec<CertificateSection>,
    pub spec_title: &'static str,
    pub spec_items: Vec<&'static str>,
    pub closing: &'static str,
    pub issue_line: String,
}

/// レコードから紙面内容を構築
pub fn build_certificate(record: &WarrantyRecord, issue_date: NaiveDate) -> CertificatePage {
    let fields = CERTIFICATE_FIELDS
        .iter()
        .map(|&field| {
            let value = record.field(field).to_string();
            let is_name = field == RecordField::CustomerName;
            CertificateField {
                label: field.label(),
                suffix: (is_name && !value.is_empty()).then_some(HONORIFIC),
                emphasized: is_name,
                value,
            }
        })
        .collect();

    CertificatePage {
        order_line: format!("№：{}", record.order_no),
        title: CERTIFICATE_TITLE,
        fields,
        period_caption: PERIOD_CAPTION,
        period: warranty_period(&record.completion_date, &record.warranty_years),
        period_note: format!("(施工完了日より満 {} 年間保証)", record.warranty_years),
        sections: vec![
            CertificateSection { heading: COVERAGE_HEADING, lines: vec![COVERAGE_TEXT] },
            CertificateSection { heading: EXCLUSIONS_HEADING, lines: EXCLUSIONS.to_vec() },
            CertificateSection { heading: OTHER_HEADING, lines: vec![OTHER_TEXT] },
        ],
        spec_title: STANDARD_SPEC_TITLE,
        spec_items: STANDARD_SPEC.to_vec(),
        closing: CLOSING_TEXT,
        issue_line: format!("発行日：{}", format_japanese_date(issue_date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::BLANK_PERIOD;

    fn sample() -> WarrantyRecord {
        WarrantyRecord {
            order_no: "A100".to_string(),
            customer_name: "田中".to_string(),
            construction_address: "東京都港区1-1".to_string(),
            construction_area: "ベランダ".to_string(),
            construction_type: "FRP防水".to_string(),
            construction_method: "FRP".to_string(),
            completion_date: "2024-03-10".to_string(),
            warranty_years: "5".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_certificate_contents() {
        let issue = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let page = build_certificate(&sample(), issue);

        assert_eq!(page.order_line, "№：A100");
        assert_eq!(page.title, "防水工事保証書");
        assert_eq!(page.period, "2024年3月10日 〜 2029年3月9日");
        assert_eq!(page.period_note, "(施工完了日より満 5 年間保証)");
        assert_eq!(page.issue_line, "発行日：2026年10月19日");
        assert_eq!(page.fields.len(), CERTIFICATE_FIELDS.len());
        assert_eq!(page.fields[0].label, "お客様名");
        assert_eq!(page.fields[0].suffix, Some("様"));
        assert!(page.fields[0].emphasized);
        assert_eq!(page.sections[1].lines.len(), 8);
        assert_eq!(page.spec_items.len(), 9);
    }

    #[test]
    fn test_empty_name_has_no_honorific() {
        let record = WarrantyRecord { customer_name: String::new(), ..sample() };
        let issue = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let page = build_certificate(&record, issue);
        assert_eq!(page.fields[0].suffix, None);
    }

    #[test]
    fn test_blank_period_for_missing_date() {
        let record = WarrantyRecord { completion_date: String::new(), ..sample() };
        let issue = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(build_certificate(&record, issue).period, BLANK_PERIOD);
    }
}
