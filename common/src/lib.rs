//! Warranty Cert Common Library
//!
//! 防水工事保証書の取込・編集・印刷対象判定・保証期間計算。
//! 画面やPDF描画に依存しない部分をまとめる。

pub mod types;
pub mod mapping;
pub mod importer;
pub mod store;
pub mod scope;
pub mod period;
pub mod layout;
pub mod state;
pub mod error;
pub mod export;

pub use types::{RecordField, RecordId, Stamp, WarrantyRecord};
pub use mapping::{ColumnMap, RecordDefaults};
pub use importer::{ImportOptions, DEFAULT_ENCODING};
pub use store::{IdSequence, RecordStore};
pub use scope::{filter_in_scope, is_in_scope, PrintScope};
pub use period::{format_japanese_date, warranty_period, BLANK_PERIOD};
pub use layout::CertificateLayout;
pub use state::{AppState, ScopeGuard};
pub use error::{Error, Result};
pub use export::certificate_core::{build_certificate, CertificatePage};
