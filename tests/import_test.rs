//! CSV取込の統合テスト
//!
//! Shift_JISのファイルを一覧へ追加するまでを検証

use std::path::Path;
use tempfile::tempdir;
use warranty_cert::error::WarrantyError;
use warranty_cert::io::import_csv_file;
use warranty_cert_common::{AppState, ImportOptions, RecordId};

const COLUMNS: usize = 28;

/// 指定列だけ値の入った1行
fn row(cells: &[(usize, &str)]) -> String {
    let mut values = vec![String::new(); COLUMNS];
    for (index, value) in cells {
        values[*index] = value.to_string();
    }
    values.join(",")
}

fn csv_text(rows: &[String]) -> String {
    let header: Vec<String> = (0..COLUMNS).map(|i| format!("列{}", i)).collect();
    let mut lines = vec![header.join(",")];
    lines.extend(rows.iter().cloned());
    lines.join("\r\n") + "\r\n"
}

fn write_sjis(path: &Path, text: &str) {
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors, "Shift_JISに変換できない文字がある");
    std::fs::write(path, bytes).expect("CSV書き込み失敗");
}

#[test]
fn test_import_shift_jis_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("orders.csv");
    write_sjis(
        &path,
        &csv_text(&[
            row(&[(4, "A100"), (7, "田中"), (10, "東京都千代田区1-1"), (3, "2024/03/10")]),
            row(&[(4, "A101"), (24, "鈴木 一郎"), (7, "旧姓"), (27, "大阪府大阪市2-2")]),
        ]),
    );

    let mut state = AppState::default();
    let count = import_csv_file(&mut state, &path).expect("取込失敗");
    assert_eq!(count, 2);

    let records = state.store().records();
    assert_eq!(records[0].order_no, "A100");
    assert_eq!(records[0].customer_name, "田中");
    assert_eq!(records[0].construction_address, "東京都千代田区1-1");
    assert_eq!(records[0].completion_date, "2024-03-10");
    assert_eq!(records[0].construction_area, "ベランダ");
    assert_eq!(records[0].warranty_years, "5");

    assert_eq!(records[1].customer_name, "鈴木 一郎");
    assert_eq!(records[1].construction_address, "大阪府大阪市2-2");
    assert_eq!(records[1].completion_date, "");
}

#[test]
fn test_customer_name_falls_back_to_column_7() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fallback.csv");
    write_sjis(&path, &csv_text(&[row(&[(4, "A100"), (7, "Tanaka")])]));

    let mut state = AppState::default();
    import_csv_file(&mut state, &path).unwrap();

    let record = &state.store().records()[0];
    assert_eq!(record.order_no, "A100");
    assert_eq!(record.customer_name, "Tanaka");
}

#[test]
fn test_rows_without_name_or_order_are_dropped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");
    write_sjis(
        &path,
        &csv_text(&[row(&[(3, "2024/01/01"), (10, "住所のみ")]), row(&[])]),
    );

    let mut state = AppState::default();
    let count = import_csv_file(&mut state, &path).unwrap();
    assert_eq!(count, 0);
    assert!(state.store().is_empty());
}

#[test]
fn test_second_batch_appends() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    write_sjis(&first, &csv_text(&[row(&[(4, "A1")]), row(&[(4, "A2")])]));
    write_sjis(&second, &csv_text(&[row(&[(4, "B1")])]));

    let mut state = AppState::default();
    import_csv_file(&mut state, &first).unwrap();
    let before: Vec<_> = state.store().records().to_vec();

    import_csv_file(&mut state, &second).unwrap();
    let records = state.store().records();

    assert_eq!(records.len(), 3);
    assert_eq!(&records[..2], &before[..]);
    assert_eq!(records[2].order_no, "B1");
    assert_eq!(records[2].id, RecordId::new(3));
}

#[test]
fn test_undecodable_file_leaves_list_unchanged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("good.csv");
    let bad = dir.path().join("bad.csv");
    write_sjis(&good, &csv_text(&[row(&[(4, "A1")])]));
    std::fs::write(&bad, [0x82u8, 0x0a, 0xff, 0xfe, 0x0a]).unwrap();

    let mut state = AppState::default();
    import_csv_file(&mut state, &good).unwrap();

    let result = import_csv_file(&mut state, &bad);
    assert!(matches!(result, Err(WarrantyError::Common(_))));
    assert_eq!(state.store().len(), 1);
    assert_eq!(state.store().records()[0].order_no, "A1");
}

#[test]
fn test_missing_file() {
    let mut state = AppState::default();
    let result = import_csv_file(&mut state, Path::new("/nonexistent/orders.csv"));
    assert!(matches!(result, Err(WarrantyError::FileNotFound(_))));
    assert!(state.store().is_empty());
}

#[test]
fn test_utf8_encoding_option() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("utf8.csv");
    std::fs::write(&path, csv_text(&[row(&[(4, "U1"), (24, "山田")])])).unwrap();

    let options = ImportOptions { encoding: "utf-8".to_string(), ..Default::default() };
    let mut state = AppState::new(options);
    import_csv_file(&mut state, &path).unwrap();

    assert_eq!(state.store().records()[0].customer_name, "山田");
}
