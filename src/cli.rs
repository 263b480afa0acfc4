use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "warranty-cert")]
#[command(about = "防水工事保証書の一括発行ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVを取り込んで保証書PDFを出力
    Print {
        /// 取込CSV（複数指定時は順に追加）
        #[arg(required = true)]
        csv: Vec<PathBuf>,

        /// 社判（角印）画像
        #[arg(long)]
        stamp: Option<PathBuf>,

        /// 出力範囲 (all/selected/single)
        #[arg(long, value_enum, default_value = "all")]
        scope: ScopeArg,

        /// 選択するレコード（id-N または受注番号、複数可）
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,

        /// 個別出力するレコード（id-N または受注番号）
        #[arg(long, value_name = "ID")]
        id: Option<String>,

        /// 出力PDFファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 埋め込むフォント
        #[arg(long)]
        font: Option<PathBuf>,

        /// CSVの文字コード（既定: Shift_JIS）
        #[arg(long)]
        encoding: Option<String>,
    },

    /// CSVの取込結果と保証期間をJSONで表示
    Preview {
        /// 取込CSV
        #[arg(required = true)]
        csv: Vec<PathBuf>,

        /// CSVの文字コード
        #[arg(long)]
        encoding: Option<String>,
    },

    /// 対話的に取込・編集・印刷を行う
    Session {
        /// 起動時に取り込むCSV
        csv: Vec<PathBuf>,

        /// 社判（角印）画像
        #[arg(long)]
        stamp: Option<PathBuf>,

        /// PDF出力先ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 埋め込むフォント
        #[arg(long)]
        font: Option<PathBuf>,

        /// CSVの文字コード
        #[arg(long)]
        encoding: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 日本語フォントを設定
        #[arg(long)]
        set_font: Option<PathBuf>,

        /// CSVの文字コードを設定
        #[arg(long)]
        set_encoding: Option<String>,

        /// 印刷前の待ち時間（ms）を設定
        #[arg(long)]
        set_delay: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 出力範囲
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// 全件
    #[default]
    All,
    /// --select で指定したもの
    Selected,
    /// --id で指定した1件
    Single,
}
