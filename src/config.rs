use crate::error::{Result, WarrantyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use warranty_cert_common::{ColumnMap, ImportOptions, RecordDefaults, DEFAULT_ENCODING};

/// よく使われる日本語フォントの場所（先に見つかったものを使う）
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/ipafont-gothic/ipag.ttf",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 埋め込む日本語フォント（TTF/OTF）
    pub font_path: Option<PathBuf>,
    /// CSVの文字コード
    pub encoding: String,
    /// 印刷範囲を設定してから出力するまでの待ち時間（ms）
    pub print_delay_ms: u64,
    /// PDFの既定出力先
    pub output_dir: Option<PathBuf>,
    /// 取込列の対応表
    pub column_map: ColumnMap,
    /// 取込時の固定値
    pub record_defaults: RecordDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            encoding: DEFAULT_ENCODING.into(),
            print_delay_ms: 200,
            output_dir: None,
            column_map: ColumnMap::v1(),
            record_defaults: RecordDefaults::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WarrantyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("warranty-cert").join("config.json"))
    }

    /// 取込オプション（CLIの --encoding を優先）
    pub fn import_options(&self, encoding_override: Option<&str>) -> ImportOptions {
        ImportOptions {
            encoding: encoding_override.unwrap_or(self.encoding.as_str()).to_string(),
            column_map: self.column_map.clone(),
            defaults: self.record_defaults.clone(),
        }
    }

    /// 使用するフォントを決定（CLI指定 → 設定 → 既知の場所）
    pub fn resolve_font(&self, font_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = font_override.or(self.font_path.as_deref()) {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(WarrantyError::FileNotFound(path.display().to_string()));
        }

        FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .ok_or(WarrantyError::FontNotFound)
    }

    pub fn set_font(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(WarrantyError::FileNotFound(path.display().to_string()));
        }
        self.font_path = Some(path);
        self.save()
    }
}
