//! アプリケーション状態
//!
//! 発行リスト・選択・社判・印刷範囲をひとまとめに保持する。
//! 印刷範囲は `begin_print` が返すガードの寿命の間だけ有効で、
//! ガード破棄時（エラー・panic時を含む）に必ず解除される。

use crate::error::Result;
use crate::importer::{read_records, ImportOptions};
use crate::scope::{filter_in_scope, PrintScope};
use crate::store::RecordStore;
use crate::types::{Stamp, WarrantyRecord};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct AppState {
    store: RecordStore,
    stamp: Option<Stamp>,
    print_scope: Option<PrintScope>,
    import_options: ImportOptions,
}

impl AppState {
    pub fn new(import_options: ImportOptions) -> Self {
        Self { import_options, ..Default::default() }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    /// CSVバイト列を取り込んで末尾に追加。追加件数を返す
    ///
    /// 失敗時は一覧を変更しない。
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let records = read_records(bytes, &self.import_options, self.store.ids_mut())?;
        let count = records.len();
        self.store.append(records);
        info!(added = count, total = self.store.len(), "CSV取込完了");
        Ok(count)
    }

    /// 社判を登録（既存のものは置き換え）
    pub fn set_stamp(&mut self, stamp: Stamp) {
        debug!(file = %stamp.file_name, bytes = stamp.bytes.len(), "社判を登録");
        self.stamp = Some(stamp);
    }

    pub fn clear_stamp(&mut self) {
        self.stamp = None;
    }

    pub fn stamp(&self) -> Option<&Stamp> {
        self.stamp.as_ref()
    }

    /// 現在の印刷範囲（印刷中以外は None）
    pub fn print_scope(&self) -> Option<PrintScope> {
        self.print_scope
    }

    /// プレビュー対象: 印刷中はその範囲、それ以外は全件
    pub fn visible_records(&self) -> Vec<&WarrantyRecord> {
        let scope = self.print_scope.unwrap_or(PrintScope::All);
        filter_in_scope(self.store.records(), scope, self.store.selection())
    }

    /// 印刷範囲を設定。返り値のガードを破棄すると解除される
    pub fn begin_print(&mut self, scope: PrintScope) -> ScopeGuard<'_> {
        debug!(%scope, "印刷範囲を設定");
        self.print_scope = Some(scope);
        ScopeGuard { state: self }
    }
}

/// 印刷範囲の有効期間を表すガード
pub struct ScopeGuard<'a> {
    state: &'a mut AppState,
}

impl ScopeGuard<'_> {
    /// 印刷対象レコード（一覧順）
    pub fn targets(&self) -> Vec<&WarrantyRecord> {
        self.state.visible_records()
    }

    pub fn stamp(&self) -> Option<&Stamp> {
        self.state.stamp()
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if let Some(scope) = self.state.print_scope.take() {
            debug!(%scope, "印刷範囲を解除");
        }
    }
}
