//! レイアウト設定モジュール
//!
//! mm基準のレイアウト定義。PDF座標（左下原点）への変換もここで行う。

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 用紙端から外枠までの余白（mm）
pub const PAGE_MARGIN_MM: f32 = 12.0;
/// 外枠から本文までの余白（mm）
pub const FRAME_PADDING_MM: f32 = 6.0;
/// 二重線の間隔（mm）
pub const DOUBLE_LINE_GAP_MM: f32 = 1.2;

/// 社判の一辺（mm）
pub const STAMP_SIZE_MM: f32 = 24.0;

// ============================================
// 文字サイズ（pt）
// ============================================

pub const TITLE_PT: f32 = 24.0;
pub const ORDER_NO_PT: f32 = 9.0;
pub const LABEL_PT: f32 = 7.5;
pub const VALUE_PT: f32 = 11.0;
pub const CUSTOMER_NAME_PT: f32 = 15.0;
pub const PERIOD_PT: f32 = 15.0;
pub const CAPTION_PT: f32 = 8.0;
pub const HEADING_PT: f32 = 10.0;
pub const BODY_PT: f32 = 9.5;
pub const SPEC_PT: f32 = 8.0;
pub const CLOSING_PT: f32 = 13.0;
pub const ISSUE_DATE_PT: f32 = 9.0;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// 行送り（文字サイズに対する倍率）
pub const LINE_HEIGHT_RATIO: f32 = 1.5;

// ============================================
// レイアウト設定構造体
// ============================================

/// 保証書1ページのレイアウト
#[derive(Debug, Clone)]
pub struct CertificateLayout {
    /// ページ幅（mm）
    pub page_width_mm: f32,
    /// ページ高さ（mm）
    pub page_height_mm: f32,
    /// 外枠までの余白（mm）
    pub margin_mm: f32,
    /// 枠内余白（mm）
    pub padding_mm: f32,
    /// 社判サイズ（mm）
    pub stamp_size_mm: f32,
}

impl CertificateLayout {
    /// A4縦
    pub fn a4_portrait() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: PAGE_MARGIN_MM,
            padding_mm: FRAME_PADDING_MM,
            stamp_size_mm: STAMP_SIZE_MM,
        }
    }

    /// 外枠の左下・右上（mm、左下原点）
    pub fn frame_rect_mm(&self) -> (f32, f32, f32, f32) {
        (
            self.margin_mm,
            self.margin_mm,
            self.page_width_mm - self.margin_mm,
            self.page_height_mm - self.margin_mm,
        )
    }

    /// 本文の左端X（mm）
    pub fn content_left_mm(&self) -> f32 {
        self.margin_mm + self.padding_mm
    }

    /// 本文の右端X（mm）
    pub fn content_right_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm - self.padding_mm
    }

    /// 本文幅（mm）
    pub fn content_width_mm(&self) -> f32 {
        self.content_right_mm() - self.content_left_mm()
    }

    /// 本文の上端Y（mm、左下原点）
    pub fn content_top_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm - self.padding_mm
    }

    /// 本文の下端Y（mm、左下原点）
    pub fn content_bottom_mm(&self) -> f32 {
        self.margin_mm + self.padding_mm
    }

    /// 社判の左下座標（右上に配置）
    pub fn stamp_origin_mm(&self) -> (f32, f32) {
        (
            self.content_right_mm() - self.stamp_size_mm,
            self.content_top_mm() - self.stamp_size_mm,
        )
    }

    /// 中央寄せしたときの左端X（mm）
    pub fn centered_x_mm(&self, text: &str, size_pt: f32) -> f32 {
        let width = approx_text_width_mm(text, size_pt);
        self.content_left_mm() + (self.content_width_mm() - width).max(0.0) / 2.0
    }

    /// 右寄せしたときの左端X（mm）
    pub fn right_aligned_x_mm(&self, text: &str, size_pt: f32) -> f32 {
        (self.content_right_mm() - approx_text_width_mm(text, size_pt)).max(self.content_left_mm())
    }
}

impl Default for CertificateLayout {
    fn default() -> Self {
        Self::a4_portrait()
    }
}

// ============================================
// ヘルパー関数
// ============================================

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// 1行分の高さ（mm）
#[inline]
pub fn line_height_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt) * LINE_HEIGHT_RATIO
}

/// 文字列幅の概算（mm）
///
/// フォントメトリクスを使わず、ASCII・半角カナは0.5em、それ以外は1emで数える。
pub fn approx_text_width_mm(text: &str, size_pt: f32) -> f32 {
    let em_mm = pt_to_mm(size_pt);
    text.chars()
        .map(|c| if is_half_width(c) { 0.5 } else { 1.0 })
        .sum::<f32>()
        * em_mm
}

fn is_half_width(c: char) -> bool {
    c.is_ascii() || ('\u{FF61}'..='\u{FF9F}').contains(&c)
}

/// 指定幅に収まるように文字単位で折り返す
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if approx_text_width_mm(&current, size_pt) > max_width_mm && current.chars().count() > 1 {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
