use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use warranty_cert::{cli, config, error, io, printing, session};
use warranty_cert_common::{warranty_period, AppState, PrintScope, WarrantyRecord};
use cli::{Cli, Commands, ScopeArg};
use config::Config;
use error::{Result, WarrantyError};
use printing::PrintSettings;

/// プレビュー出力の1行
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRow<'a> {
    #[serde(flatten)]
    record: &'a WarrantyRecord,
    warranty_period: String,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_state(config: &Config, csv: &[PathBuf], encoding: Option<&str>) -> Result<AppState> {
    let mut state = AppState::new(config.import_options(encoding));
    for path in csv {
        let count = io::import_csv_file(&mut state, path)?;
        println!("✔ {}: {}件", path.display(), count);
    }
    Ok(state)
}

/// セッション用のフォント。見つからなくても取込・編集はできるので起動は続ける
fn session_font(config: &Config, font: Option<&Path>) -> Result<Option<PathBuf>> {
    match config.resolve_font(font) {
        Ok(path) => Ok(Some(path)),
        Err(WarrantyError::FontNotFound) => {
            warn!("日本語フォントが見つかりません。印刷はできません");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Print { csv, stamp, scope, select, id, output, font, encoding } => {
            println!("📄 warranty-cert - 保証書発行\n");

            // 1. 取込
            println!("[1/2] CSVを読み込み中...");
            let mut state = load_state(&config, &csv, encoding.as_deref())?;
            println!("✔ 合計 {}件\n", state.store().len());

            if let Some(stamp_path) = stamp {
                let stamp = io::load_stamp(&stamp_path)?;
                println!("✔ 社判: {}\n", stamp.file_name);
                state.set_stamp(stamp);
            }

            for key in &select {
                let record_id = printing::resolve_record(state.store(), key)?;
                if state.store().is_selected(record_id) {
                    continue;
                }
                state.store_mut().toggle_selection(record_id);
            }

            let scope = match scope {
                ScopeArg::All => PrintScope::All,
                ScopeArg::Selected => PrintScope::Selected,
                ScopeArg::Single => {
                    let key = id.ok_or_else(|| {
                        WarrantyError::Config("--scope single には --id が必要です".into())
                    })?;
                    PrintScope::Single(printing::resolve_record(state.store(), &key)?)
                }
            };

            // 2. 出力
            println!("[2/2] 出力中... ({})", scope);
            let settings = PrintSettings {
                output: output
                    .or_else(|| config.output_dir.clone())
                    .unwrap_or_else(|| PathBuf::from(".")),
                font_path: Some(config.resolve_font(font.as_deref())?),
                delay: Duration::from_millis(config.print_delay_ms),
            };
            printing::print_to_pdf(&mut state, scope, &settings).await?;

            println!("\n✅ 発行完了");
        }

        Commands::Preview { csv, encoding } => {
            let mut state = AppState::new(config.import_options(encoding.as_deref()));
            for path in &csv {
                io::import_csv_file(&mut state, path)?;
            }

            let rows: Vec<PreviewRow> = state
                .store()
                .records()
                .iter()
                .map(|record| PreviewRow {
                    record,
                    warranty_period: warranty_period(&record.completion_date, &record.warranty_years),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }

        Commands::Session { csv, stamp, output, font, encoding } => {
            let mut state = load_state(&config, &csv, encoding.as_deref())?;
            if let Some(stamp_path) = stamp {
                state.set_stamp(io::load_stamp(&stamp_path)?);
            }

            let settings = PrintSettings {
                output: output
                    .or_else(|| config.output_dir.clone())
                    .unwrap_or_else(|| PathBuf::from(".")),
                font_path: session_font(&config, font.as_deref())?,
                delay: Duration::from_millis(config.print_delay_ms),
            };

            if let Err(e) = session::Session::new(state, settings).run().await {
                return Err(WarrantyError::Prompt(format!("{:#}", e)));
            }
        }

        Commands::Config { set_font, set_encoding, set_delay, show } => {
            let mut config = config;

            if let Some(path) = set_font {
                config.set_font(path)?;
                println!("✔ フォントを設定しました");
            }

            if let Some(encoding) = set_encoding {
                config.encoding = encoding;
                config.save()?;
                println!("✔ 文字コードを設定しました");
            }

            if let Some(delay) = set_delay {
                config.print_delay_ms = delay;
                config.save()?;
                println!("✔ 待ち時間を設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  フォント: {}",
                    config.font_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "自動".into())
                );
                println!("  文字コード: {}", config.encoding);
                println!("  待ち時間: {}ms", config.print_delay_ms);
                println!(
                    "  出力先: {}",
                    config.output_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| ".".into())
                );
                println!("  列対応: v{}", config.column_map.version);
            }
        }
    }

    Ok(())
}
