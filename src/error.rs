use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarrantyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("日本語フォントが見つかりません。`warranty-cert config --set-font PATH` か --font で指定してください")]
    FontNotFound,

    #[error("フォント読み込みエラー: {0}")]
    FontLoad(String),

    #[error("印刷対象がありません: {0}")]
    NothingToPrint(String),

    #[error("レコードが見つかりません: {0}")]
    RecordNotFound(String),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] warranty_cert_common::Error),
}

pub type Result<T> = std::result::Result<T, WarrantyError>;
