//! 印刷対象の判定
//!
//! 印刷対象外のレコードは描画処理に渡さない（非表示ではなく出力しない）。

use crate::types::{RecordId, WarrantyRecord};
use std::collections::HashSet;
use std::fmt;

/// 1回の印刷で出力する範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintScope {
    /// 全件
    All,
    /// 選択中のみ
    Selected,
    /// 指定の1件
    Single(RecordId),
}

impl fmt::Display for PrintScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintScope::All => write!(f, "全件"),
            PrintScope::Selected => write!(f, "選択分"),
            PrintScope::Single(id) => write!(f, "個別({})", id),
        }
    }
}

/// 印刷対象かどうか
pub fn is_in_scope(record: &WarrantyRecord, scope: PrintScope, selection: &HashSet<RecordId>) -> bool {
    match scope {
        PrintScope::All => true,
        PrintScope::Selected => selection.contains(&record.id),
        PrintScope::Single(target) => record.id == target,
    }
}

/// 一覧から印刷対象だけを順序どおりに抽出
pub fn filter_in_scope<'a>(
    records: &'a [WarrantyRecord],
    scope: PrintScope,
    selection: &HashSet<RecordId>,
) -> Vec<&'a WarrantyRecord> {
    records
        .iter()
        .filter(|r| is_in_scope(r, scope, selection))
        .collect()
}
