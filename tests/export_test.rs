//! 保証書PDF出力の統合テスト
//!
//! 日本語フォントが見つからない環境ではスキップする

use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::tempdir;
use warranty_cert::config::Config;
use warranty_cert::export::{self, pdf};
use warranty_cert::io::load_stamp;
use warranty_cert_common::{PrintScope, RecordId, WarrantyRecord};

fn find_font() -> Option<PathBuf> {
    let path = Config::default().resolve_font(None).ok()?;
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    (ext == "ttf" || ext == "otf").then_some(path)
}

fn create_test_record(index: u64) -> WarrantyRecord {
    WarrantyRecord {
        id: RecordId::new(index),
        order_no: format!("A{}", 100 + index),
        customer_name: format!("田中 太郎{}", index),
        construction_address: "東京都千代田区丸の内1-1-1 テストビル".to_string(),
        construction_area: "ベランダ".to_string(),
        construction_type: "FRP防水".to_string(),
        construction_method: "FRP".to_string(),
        completion_date: "2024-03-10".to_string(),
        warranty_years: "5".to_string(),
    }
}

fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
}

#[test]
fn test_pdf_generation_without_stamp() {
    let Some(font) = find_font() else {
        eprintln!("日本語フォントが見つからないためスキップ");
        return;
    };
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("certificates.pdf");

    let records: Vec<WarrantyRecord> = (1..=3).map(create_test_record).collect();
    let refs: Vec<&WarrantyRecord> = records.iter().collect();

    let options = pdf::PdfOptions { title: "テスト保証書", font_path: &font, issue_date: issue_date() };
    let result = pdf::generate_pdf(&refs, None, &output_path, &options);

    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "PDFファイルが空");

    println!("PDF size: {} bytes", metadata.len());
}

#[test]
fn test_pdf_generation_with_stamp() {
    let Some(font) = find_font() else {
        eprintln!("日本語フォントが見つからないためスキップ");
        return;
    };
    let dir = tempdir().expect("Failed to create temp dir");

    let stamp_path = dir.path().join("stamp.png");
    let mut rgba = printpdf::image_crate::RgbaImage::new(32, 32);
    for (x, y, pixel) in rgba.enumerate_pixels_mut() {
        let alpha = if (x + y) % 2 == 0 { 255 } else { 0 };
        *pixel = printpdf::image_crate::Rgba([200, 30, 30, alpha]);
    }
    rgba.save(&stamp_path).expect("社判画像の保存失敗");
    let stamp = load_stamp(&stamp_path).expect("社判読込失敗");
    assert_eq!(stamp.file_name, "stamp.png");

    let record = create_test_record(1);
    let output_path = dir.path().join("stamped.pdf");
    let options = pdf::PdfOptions { title: "テスト保証書", font_path: &font, issue_date: issue_date() };
    let result = pdf::generate_pdf(&[&record], Some(&stamp), &output_path, &options);

    assert!(result.is_ok(), "社判付きPDF生成に失敗: {:?}", result.err());
    assert!(output_path.exists());
}

#[test]
fn test_broken_stamp_is_skipped() {
    let Some(font) = find_font() else {
        eprintln!("日本語フォントが見つからないためスキップ");
        return;
    };
    let dir = tempdir().expect("Failed to create temp dir");
    let stamp = warranty_cert_common::Stamp::new("broken.png", b"not an image".to_vec());

    let record = create_test_record(1);
    let output_path = dir.path().join("no-stamp.pdf");
    let options = pdf::PdfOptions { title: "テスト保証書", font_path: &font, issue_date: issue_date() };

    assert!(pdf::generate_pdf(&[&record], Some(&stamp), &output_path, &options).is_ok());
}

#[test]
fn test_export_into_directory_uses_default_name() {
    let Some(font) = find_font() else {
        eprintln!("日本語フォントが見つからないためスキップ");
        return;
    };
    let dir = tempdir().expect("Failed to create temp dir");
    let record = create_test_record(7);

    let path = export::export_certificates(
        &[&record],
        None,
        PrintScope::Single(record.id),
        dir.path(),
        &font,
        issue_date(),
    )
    .expect("出力失敗");

    assert_eq!(path, dir.path().join("防水工事保証書_A107.pdf"));
    assert!(path.exists());
}

#[test]
fn test_pdf_with_blank_fields() {
    let Some(font) = find_font() else {
        eprintln!("日本語フォントが見つからないためスキップ");
        return;
    };
    let dir = tempdir().expect("Failed to create temp dir");
    let record = WarrantyRecord {
        id: RecordId::new(1),
        order_no: "B1".to_string(),
        completion_date: "不明".to_string(),
        ..Default::default()
    };
    let output_path = dir.path().join("blank.pdf");
    let options = pdf::PdfOptions { title: "テスト保証書", font_path: &font, issue_date: issue_date() };

    let result = pdf::generate_pdf(&[&record], None, &output_path, &options);
    assert!(result.is_ok(), "空欄のあるPDF生成に失敗: {:?}", result.err());
}

#[test]
fn test_missing_font_is_reported() {
    let dir = tempdir().expect("Failed to create temp dir");
    let record = create_test_record(1);
    let missing = dir.path().join("missing.ttf");
    let options = pdf::PdfOptions { title: "テスト", font_path: &missing, issue_date: issue_date() };

    let result = pdf::generate_pdf(&[&record], None, &dir.path().join("x.pdf"), &options);
    assert!(result.is_err());
}
