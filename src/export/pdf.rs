//! 保証書PDF生成
//!
//! 印刷対象レコード1件につきA4縦1ページ。日本語フォントは外部ファイルを埋め込む。

use crate::error::{Result, WarrantyError};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, warn};
use warranty_cert_common::export::certificate_core::CertificatePage;
use warranty_cert_common::layout::{
    approx_text_width_mm, line_height_mm, wrap_text, CertificateLayout, BODY_PT, CAPTION_PT,
    CLOSING_PT, CUSTOMER_NAME_PT, DOUBLE_LINE_GAP_MM, HEADING_PT, ISSUE_DATE_PT, LABEL_PT,
    ORDER_NO_PT, PERIOD_PT, SPEC_PT, TITLE_PT, VALUE_PT,
};
use warranty_cert_common::{build_certificate, Stamp, WarrantyRecord};

/// PDF出力オプション
#[derive(Debug, Clone)]
pub struct PdfOptions<'a> {
    /// 文書タイトル（PDFメタデータ）
    pub title: &'a str,
    /// 埋め込むフォント
    pub font_path: &'a Path,
    /// 発行日
    pub issue_date: NaiveDate,
}

const BLACK: (f32, f32, f32) = (0.06, 0.09, 0.16);
const GRAY: (f32, f32, f32) = (0.39, 0.45, 0.55);
const LIGHT_GRAY: (f32, f32, f32) = (0.80, 0.84, 0.88);

/// 保証書PDFを生成
pub fn generate_pdf(
    records: &[&WarrantyRecord],
    stamp: Option<&Stamp>,
    output_path: &Path,
    options: &PdfOptions<'_>,
) -> Result<()> {
    if records.is_empty() {
        return Err(WarrantyError::NothingToPrint("出力するレコードが0件です".into()));
    }

    let layout = CertificateLayout::a4_portrait();
    let (doc, page1, layer1) = PdfDocument::new(
        options.title,
        Mm(layout.page_width_mm),
        Mm(layout.page_height_mm),
        "Layer 1",
    );

    let font = load_font(&doc, options.font_path)?;
    let stamp_image = stamp.and_then(decode_stamp);

    let progress = progress_bar(records.len());

    for (index, record) in records.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (page1, layer1)
        } else {
            doc.add_page(Mm(layout.page_width_mm), Mm(layout.page_height_mm), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        let content = build_certificate(record, options.issue_date);
        draw_certificate(&layer, &font, &layout, &content, stamp_image.as_ref());
        debug!(id = %record.id, order_no = %record.order_no, "ページ描画");

        progress.inc(1);
    }
    progress.finish_and_clear();

    // 保存
    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| WarrantyError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;

    Ok(())
}

fn load_font(doc: &PdfDocumentReference, font_path: &Path) -> Result<IndirectFontRef> {
    let file = File::open(font_path)
        .map_err(|_| WarrantyError::FileNotFound(font_path.display().to_string()))?;
    doc.add_external_font(file)
        .map_err(|e| WarrantyError::FontLoad(format!("{}: {:?}", font_path.display(), e)))
}

fn progress_bar(len: usize) -> ProgressBar {
    if len <= 1 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} ページ")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// 社判画像をデコード（読めなければ社判なしで続行）
fn decode_stamp(stamp: &Stamp) -> Option<DynamicImage> {
    match image_crate::load_from_memory(&stamp.bytes) {
        Ok(image) => Some(flatten_on_white(&image)),
        Err(e) => {
            warn!(file = %stamp.file_name, error = %e, "社判画像を読み込めないため省略します");
            None
        }
    }
}

/// 透過部分を白で塗りつぶしたRGB画像にする
fn flatten_on_white(image: &DynamicImage) -> DynamicImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = image_crate::RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, image_crate::Rgb([blend(r), blend(g), blend(b)]));
    }

    DynamicImage::ImageRgb8(rgb)
}

// ============================================
// 描画
// ============================================

fn draw_certificate(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    layout: &CertificateLayout,
    page: &CertificatePage,
    stamp: Option<&DynamicImage>,
) {
    draw_frame(layer, layout);

    let left = layout.content_left_mm();
    let right = layout.content_right_mm();
    let top = layout.content_top_mm();

    // ヘッダー: №・タイトル・社判
    set_color(layer, BLACK);
    text(layer, font, &page.order_line, ORDER_NO_PT, left, top - 5.0);

    let title_y = top - 14.0;
    let title_x = layout.centered_x_mm(page.title, TITLE_PT);
    text(layer, font, page.title, TITLE_PT, title_x, title_y);
    layer.set_outline_thickness(2.0);
    hline(layer, left + 40.0, right - 40.0, title_y - 3.0);

    if let Some(image) = stamp {
        draw_stamp(layer, layout, image);
    }

    // お客様情報（2列）
    let mut y = top - 34.0;
    let column_gap = 10.0;
    let column_width = (layout.content_width_mm() - column_gap) / 2.0;
    layer.set_outline_thickness(0.5);

    for row in page.fields.chunks(2) {
        for (col, field) in row.iter().enumerate() {
            let x = left + col as f32 * (column_width + column_gap);
            set_color(layer, GRAY);
            text(layer, font, field.label, LABEL_PT, x, y);

            set_color(layer, BLACK);
            let size = if field.emphasized { CUSTOMER_NAME_PT } else { VALUE_PT };
            let value_y = y - 6.0;
            text(layer, font, &field.value, size, x, value_y);
            if let Some(suffix) = field.suffix {
                let suffix_x = x + approx_text_width_mm(&field.value, size) + 1.0;
                text(layer, font, suffix, VALUE_PT, suffix_x, value_y);
            }

            set_outline(layer, GRAY);
            hline(layer, x, x + column_width, value_y - 2.0);
        }
        y -= 13.0;
    }

    // 保証期間
    let box_top = y - 1.0;
    let box_bottom = box_top - 24.0;
    set_outline(layer, LIGHT_GRAY);
    layer.set_outline_thickness(1.5);
    rect(layer, left, box_bottom, right, box_top);

    set_color(layer, GRAY);
    text(layer, font, page.period_caption, CAPTION_PT, layout.centered_x_mm(page.period_caption, CAPTION_PT), box_top - 5.5);
    set_color(layer, BLACK);
    text(layer, font, &page.period, PERIOD_PT, layout.centered_x_mm(&page.period, PERIOD_PT), box_top - 13.5);
    set_color(layer, GRAY);
    text(layer, font, &page.period_note, CAPTION_PT, layout.centered_x_mm(&page.period_note, CAPTION_PT), box_top - 20.0);

    // 保証内容・免責事項・その他
    y = box_bottom - 8.0;
    let body_indent = 4.0;
    let body_width = layout.content_width_mm() - body_indent * 2.0;
    for section in &page.sections {
        set_color(layer, BLACK);
        set_outline(layer, BLACK);
        layer.set_outline_thickness(3.0);
        vline(layer, left + 0.5, y - 1.0, y + 3.5);
        text(layer, font, section.heading, HEADING_PT, left + 2.5, y);
        y -= line_height_mm(HEADING_PT) + 0.5;

        set_color(layer, GRAY);
        for line in &section.lines {
            for wrapped in wrap_text(line, BODY_PT, body_width) {
                text(layer, font, &wrapped, BODY_PT, left + body_indent, y);
                y -= line_height_mm(BODY_PT);
            }
        }
        y -= 2.5;
    }

    draw_footer(layer, font, layout, page);
}

/// 標準仕様の枠と結びの文言（下端から積み上げ）
fn draw_footer(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    layout: &CertificateLayout,
    page: &CertificatePage,
) {
    let left = layout.content_left_mm();
    let right = layout.content_right_mm();
    let bottom = layout.content_bottom_mm();

    // 結び・発行日
    set_color(layer, BLACK);
    text(layer, font, page.closing, CLOSING_PT, left + 2.0, bottom + 3.0);
    let issue_x = layout.right_aligned_x_mm(&page.issue_line, ISSUE_DATE_PT) - 2.0;
    text(layer, font, &page.issue_line, ISSUE_DATE_PT, issue_x, bottom + 3.0);

    set_outline(layer, BLACK);
    layer.set_outline_thickness(3.0);
    hline(layer, left, right, bottom + 12.0);

    // 標準仕様（行数から枠の高さを決める）
    let inner_width = layout.content_width_mm() - 8.0;
    let wrapped: Vec<String> = page
        .spec_items
        .iter()
        .flat_map(|item| wrap_text(item, SPEC_PT, inner_width))
        .collect();

    let spec_line = line_height_mm(SPEC_PT);
    let box_bottom = bottom + 16.0;
    let box_top = box_bottom + 4.0 + wrapped.len() as f32 * spec_line + 10.0;

    set_outline(layer, LIGHT_GRAY);
    layer.set_outline_thickness(1.5);
    rect(layer, left, box_bottom, right, box_top);

    set_color(layer, BLACK);
    let title_y = box_top - 6.0;
    text(layer, font, page.spec_title, HEADING_PT, layout.centered_x_mm(page.spec_title, HEADING_PT), title_y);
    layer.set_outline_thickness(0.8);
    hline(layer, left + 4.0, right - 4.0, title_y - 2.0);

    set_color(layer, GRAY);
    let mut y = title_y - 2.0 - spec_line;
    for line in &wrapped {
        text(layer, font, line, SPEC_PT, left + 4.0, y);
        y -= spec_line;
    }
}

/// 二重線の外枠
fn draw_frame(layer: &PdfLayerReference, layout: &CertificateLayout) {
    let (x1, y1, x2, y2) = layout.frame_rect_mm();

    set_outline(layer, BLACK);
    layer.set_outline_thickness(2.0);
    rect(layer, x1, y1, x2, y2);

    let gap = DOUBLE_LINE_GAP_MM;
    layer.set_outline_thickness(0.6);
    rect(layer, x1 + gap, y1 + gap, x2 - gap, y2 - gap);
}

/// 社判を右上の枠内に縦横比を保って配置
fn draw_stamp(layer: &PdfLayerReference, layout: &CertificateLayout, image: &DynamicImage) {
    let (width, height) = image.dimensions();
    let (width_px, height_px) = (width as f32, height as f32);
    let longest_px = width_px.max(height_px);
    if longest_px <= 0.0 {
        return;
    }

    // 長辺が stamp_size_mm になるDPI
    let dpi = longest_px * 25.4 / layout.stamp_size_mm;
    let width_mm = width_px * 25.4 / dpi;
    let height_mm = height_px * 25.4 / dpi;

    let (origin_x, origin_y) = layout.stamp_origin_mm();
    let x = origin_x + (layout.stamp_size_mm - width_mm) / 2.0;
    let y = origin_y + (layout.stamp_size_mm - height_mm) / 2.0;

    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

// ============================================
// 描画ヘルパー
// ============================================

fn text(layer: &PdfLayerReference, font: &IndirectFontRef, s: &str, size_pt: f32, x_mm: f32, y_mm: f32) {
    if s.is_empty() {
        return;
    }
    layer.use_text(s, size_pt, Mm(x_mm), Mm(y_mm), font);
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn set_color(layer: &PdfLayerReference, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
}

fn set_outline(layer: &PdfLayerReference, color: (f32, f32, f32)) {
    layer.set_outline_color(rgb(color));
}

fn hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    polyline(layer, &[(x1, y), (x2, y)], false);
}

fn vline(layer: &PdfLayerReference, x: f32, y1: f32, y2: f32) {
    polyline(layer, &[(x, y1), (x, y2)], false);
}

fn rect(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    polyline(layer, &[(x1, y1), (x2, y1), (x2, y2), (x1, y2)], true);
}

fn polyline(layer: &PdfLayerReference, points: &[(f32, f32)], is_closed: bool) {
    let line = Line {
        points: points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect(),
        is_closed,
    };
    layer.add_line(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_transparent_pixel_becomes_white() {
        let mut rgba = image_crate::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, image_crate::Rgba([200, 0, 0, 255]));
        rgba.put_pixel(1, 0, image_crate::Rgba([0, 0, 0, 0]));

        let flat = flatten_on_white(&DynamicImage::ImageRgba8(rgba)).to_rgb8();
        assert_eq!(flat.get_pixel(0, 0).0, [200, 0, 0]);
        assert_eq!(flat.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_decode_stamp_invalid_bytes() {
        let stamp = Stamp::new("broken.png", vec![0, 1, 2, 3]);
        assert!(decode_stamp(&stamp).is_none());
    }

    #[test]
    fn test_empty_records_rejected() {
        let options = PdfOptions {
            title: "テスト",
            font_path: Path::new("/nonexistent/font.ttf"),
            issue_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        let result = generate_pdf(&[], None, Path::new("/tmp/never-written.pdf"), &options);
        assert!(matches!(result, Err(WarrantyError::NothingToPrint(_))));
    }
}
