//! 印刷処理
//!
//! 1. 印刷範囲を設定
//! 2. 一定時間待ってから出力（範囲の反映を待つ）
//! 3. 成否に関わらず範囲を解除（ScopeGuardの破棄で行う）

use crate::error::{Result, WarrantyError};
use crate::export;
use chrono::Local;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use warranty_cert_common::{AppState, PrintScope, RecordId, RecordStore, Stamp, WarrantyRecord};

/// PDF出力の設定
#[derive(Debug, Clone)]
pub struct PrintSettings {
    /// 出力ファイル/ディレクトリ
    pub output: PathBuf,
    /// 埋め込むフォント（未設定なら印刷時にエラー）
    pub font_path: Option<PathBuf>,
    /// 範囲設定から出力までの待ち時間
    pub delay: Duration,
}

/// 印刷範囲を設定して `export` を実行する
///
/// `export` には範囲内のレコード（一覧順）と社判が渡される。
/// 範囲内が0件なら `export` は呼ばずにエラーを返す。
pub async fn print_with_scope<T, F>(
    state: &mut AppState,
    scope: PrintScope,
    delay: Duration,
    export: F,
) -> Result<T>
where
    F: FnOnce(&[&WarrantyRecord], Option<&Stamp>) -> Result<T>,
{
    let guard = state.begin_print(scope);
    tokio::time::sleep(delay).await;

    let targets = guard.targets();
    if targets.is_empty() {
        return Err(WarrantyError::NothingToPrint(scope.to_string()));
    }

    info!(%scope, count = targets.len(), "印刷開始");
    export(&targets, guard.stamp())
}

/// 範囲内のレコードを保証書PDFとして出力
pub async fn print_to_pdf(
    state: &mut AppState,
    scope: PrintScope,
    settings: &PrintSettings,
) -> Result<PathBuf> {
    let font_path = settings.font_path.as_deref().ok_or(WarrantyError::FontNotFound)?;
    let issue_date = Local::now().date_naive();
    print_with_scope(state, scope, settings.delay, |records, stamp| {
        export::export_certificates(records, stamp, scope, &settings.output, font_path, issue_date)
    })
    .await
}

/// 受注番号または "id-N" からレコードを特定
pub fn resolve_record(store: &RecordStore, key: &str) -> Result<RecordId> {
    let key = key.trim();
    if let Some(record) = store.find_by_order_no(key) {
        return Ok(record.id);
    }
    key.parse::<RecordId>()
        .ok()
        .filter(|id| store.contains(*id))
        .ok_or_else(|| WarrantyError::RecordNotFound(key.to_string()))
}
