//! レコード一覧と選択状態
//!
//! 存在しないidへの操作はすべて何もしない（エラーにしない）。

use crate::types::{RecordField, RecordId, WarrantyRecord};
use std::collections::HashSet;

/// レコードid採番器（単調増加、再利用しない）
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn next_id(&mut self) -> RecordId {
        let id = RecordId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

/// 発行リスト
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<WarrantyRecord>,
    selection: HashSet<RecordId>,
    ids: IdSequence,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// id採番器（取込時に使用）
    pub fn ids_mut(&mut self) -> &mut IdSequence {
        &mut self.ids
    }

    /// 末尾に追加（既存レコードと順序は維持）
    pub fn append(&mut self, records: Vec<WarrantyRecord>) {
        self.records.extend(records);
    }

    /// 1フィールドだけ更新。見つからなければ false
    pub fn update_field(&mut self, id: RecordId, field: RecordField, value: impl Into<String>) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.set_field(field, value.into());
                true
            }
            None => false,
        }
    }

    /// 削除。選択状態も外す
    pub fn remove(&mut self, id: RecordId) -> Option<WarrantyRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        self.selection.remove(&id);
        Some(self.records.remove(index))
    }

    /// 選択を反転。新しい状態を返す（存在しないidは None）
    pub fn toggle_selection(&mut self, id: RecordId) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        if self.selection.remove(&id) {
            Some(false)
        } else {
            self.selection.insert(id);
            Some(true)
        }
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selection.contains(&id)
    }

    /// 選択中の件数（一覧に残っているもののみ）
    pub fn selected_count(&self) -> usize {
        self.records.iter().filter(|r| self.selection.contains(&r.id)).count()
    }

    pub fn selection(&self) -> &HashSet<RecordId> {
        &self.selection
    }

    pub fn get(&self, id: RecordId) -> Option<&WarrantyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// 受注番号で検索（先頭一致の1件）
    pub fn find_by_order_no(&self, order_no: &str) -> Option<&WarrantyRecord> {
        self.records.iter().find(|r| !r.order_no.is_empty() && r.order_no == order_no)
    }

    pub fn records(&self) -> &[WarrantyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
