use crate::error::{Result, WarrantyError};
use std::fs;
use std::path::Path;
use warranty_cert_common::{AppState, Stamp};

/// CSVファイルを取り込む。追加件数を返す
///
/// 読み込み・変換に失敗した場合は一覧を変更しない。
pub fn import_csv_file(state: &mut AppState, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(WarrantyError::FileNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    Ok(state.import_bytes(&bytes)?)
}

/// 社判画像を読み込む（形式は検証しない）
pub fn load_stamp(path: &Path) -> Result<Stamp> {
    if !path.exists() {
        return Err(WarrantyError::FileNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Stamp::new(file_name, bytes))
}
