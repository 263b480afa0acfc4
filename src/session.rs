//! 対話式の発行セッション
//!
//! 取込・社判登録・一覧・編集・削除・選択・印刷をメニューから操作する。
//! 状態はセッション中のメモリ上にだけ保持する。

use crate::io::{import_csv_file, load_stamp};
use crate::printing::{print_to_pdf, PrintSettings};
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;
use warranty_cert_common::{warranty_period, AppState, PrintScope, RecordField, RecordId};

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Import,
    LoadStamp,
    List,
    Edit,
    Delete,
    ToggleSelect,
    PrintSelected,
    PrintAll,
    PrintSingle,
    Quit,
}

impl SessionAction {
    const MENU: [SessionAction; 10] = [
        SessionAction::Import,
        SessionAction::LoadStamp,
        SessionAction::List,
        SessionAction::Edit,
        SessionAction::Delete,
        SessionAction::ToggleSelect,
        SessionAction::PrintSelected,
        SessionAction::PrintAll,
        SessionAction::PrintSingle,
        SessionAction::Quit,
    ];

    fn label(self, state: &AppState) -> String {
        let store = state.store();
        match self {
            SessionAction::Import => "CSVを読み込む".to_string(),
            SessionAction::LoadStamp => match state.stamp() {
                Some(stamp) => format!("社判（角印）を登録 [現在: {}]", stamp.file_name),
                None => "社判（角印）を登録".to_string(),
            },
            SessionAction::List => format!("発行リストを表示 ({}件)", store.len()),
            SessionAction::Edit => "項目を編集".to_string(),
            SessionAction::Delete => "削除".to_string(),
            SessionAction::ToggleSelect => "選択を切り替え".to_string(),
            SessionAction::PrintSelected => format!("選択した {} 件を保存", store.selected_count()),
            SessionAction::PrintAll => "まとめて全ページ出力".to_string(),
            SessionAction::PrintSingle => "個別PDF".to_string(),
            SessionAction::Quit => "終了".to_string(),
        }
    }

    /// レコードが必要な操作か
    fn needs_records(self) -> bool {
        !matches!(self, SessionAction::Import | SessionAction::LoadStamp | SessionAction::Quit)
    }
}

pub struct Session {
    state: AppState,
    settings: PrintSettings,
}

impl Session {
    pub fn new(state: AppState, settings: PrintSettings) -> Self {
        Self { state, settings }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("📝 warranty-cert - 発行セッション\n");

        loop {
            let labels: Vec<String> = SessionAction::MENU.iter().map(|a| a.label(&self.state)).collect();
            let choice = Select::new()
                .with_prompt("操作を選択")
                .items(&labels)
                .default(0)
                .interact()
                .context("メニュー選択")?;
            let action = SessionAction::MENU[choice];

            if action.needs_records() && self.state.store().is_empty() {
                println!("CSVを読み込むとここに表示されます\n");
                continue;
            }

            match action {
                SessionAction::Import => self.import()?,
                SessionAction::LoadStamp => self.load_stamp()?,
                SessionAction::List => self.list(),
                SessionAction::Edit => self.edit()?,
                SessionAction::Delete => self.delete()?,
                SessionAction::ToggleSelect => self.toggle_select()?,
                SessionAction::PrintSelected => self.print(PrintScope::Selected).await,
                SessionAction::PrintAll => self.print(PrintScope::All).await,
                SessionAction::PrintSingle => {
                    if let Some(id) = self.pick_record("出力するレコード")? {
                        self.print(PrintScope::Single(id)).await;
                    }
                }
                SessionAction::Quit => {
                    if self.confirm_quit()? {
                        break;
                    }
                }
            }
            println!();
        }

        Ok(())
    }

    fn import(&mut self) -> Result<()> {
        let path: String = Input::new()
            .with_prompt("CSVファイルのパス")
            .interact_text()
            .context("パス入力")?;

        match import_csv_file(&mut self.state, &PathBuf::from(path.trim())) {
            Ok(count) => println!("✔ {}件を追加（合計 {}件）", count, self.state.store().len()),
            Err(e) => println!("✗ 読み込みに失敗しました（一覧は変更していません）: {}", e),
        }
        Ok(())
    }

    fn load_stamp(&mut self) -> Result<()> {
        let path: String = Input::new()
            .with_prompt("社判画像のパス")
            .interact_text()
            .context("パス入力")?;

        match load_stamp(&PathBuf::from(path.trim())) {
            Ok(stamp) => {
                println!("✔ 社判を登録: {}", stamp.file_name);
                self.state.set_stamp(stamp);
            }
            Err(e) => println!("✗ {}", e),
        }
        Ok(())
    }

    fn list(&self) {
        let store = self.state.store();
        for (idx, record) in store.records().iter().enumerate() {
            let mark = if store.is_selected(record.id) { "[x]" } else { "[ ]" };
            println!(
                "{} #{} {} {}  ({})",
                mark,
                idx + 1,
                record.id,
                record.summary(),
                warranty_period(&record.completion_date, &record.warranty_years).trim()
            );
        }
    }

    fn edit(&mut self) -> Result<()> {
        let Some(id) = self.pick_record("編集するレコード")? else {
            return Ok(());
        };
        let Some(record) = self.state.store().get(id) else {
            return Ok(());
        };

        let labels: Vec<String> = RecordField::ALL
            .iter()
            .map(|f| format!("{}: {}", f.label(), record.field(*f)))
            .collect();
        let current: Vec<String> = RecordField::ALL.iter().map(|f| record.field(*f).to_string()).collect();

        let index = Select::new()
            .with_prompt("編集する項目")
            .items(&labels)
            .default(0)
            .interact()
            .context("項目選択")?;
        let field = RecordField::ALL[index];

        let value: String = Input::new()
            .with_prompt(field.label())
            .with_initial_text(current[index].clone())
            .allow_empty(true)
            .interact_text()
            .context("値入力")?;

        if self.state.store_mut().update_field(id, field, value) {
            println!("✔ {}を更新しました", field.label());
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(id) = self.pick_record("削除するレコード")? else {
            return Ok(());
        };
        if let Some(removed) = self.state.store_mut().remove(id) {
            println!("✔ 削除: {}", removed.summary());
        }
        Ok(())
    }

    fn toggle_select(&mut self) -> Result<()> {
        let Some(id) = self.pick_record("選択を切り替えるレコード")? else {
            return Ok(());
        };
        match self.state.store_mut().toggle_selection(id) {
            Some(true) => println!("✔ 選択しました"),
            Some(false) => println!("✔ 選択を解除しました"),
            None => {}
        }
        Ok(())
    }

    async fn print(&mut self, scope: PrintScope) {
        if let Err(e) = print_to_pdf(&mut self.state, scope, &self.settings).await {
            println!("✗ {}", e);
        }
    }

    /// レコードを1件選ぶ（Escで取り消し）
    fn pick_record(&self, prompt: &str) -> Result<Option<RecordId>> {
        let store = self.state.store();
        let labels: Vec<String> = store
            .records()
            .iter()
            .enumerate()
            .map(|(idx, r)| {
                let mark = if store.is_selected(r.id) { "[x]" } else { "[ ]" };
                format!("{} #{} {}", mark, idx + 1, r.summary())
            })
            .collect();

        let choice = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("レコード選択")?;

        Ok(choice.map(|idx| store.records()[idx].id))
    }

    fn confirm_quit(&self) -> Result<bool> {
        if self.state.store().is_empty() {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt("発行リストは保存されません。終了しますか？")
            .default(true)
            .interact()
            .context("終了確認")
    }
}
