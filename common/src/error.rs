//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("文字コード変換エラー: {encoding} として読み込めません")]
    Decode { encoding: String },

    #[error("未対応の文字コード: {0}")]
    UnknownEncoding(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
