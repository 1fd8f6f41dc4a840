//! Cache command - inspect and clear unpacked assets on disk

use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ModelFetchError, ModelFetchResult};
use crate::ui::{self, UiContext};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An asset directory under the models root
#[derive(Debug, Clone, serde::Serialize)]
pub struct AssetEntry {
    pub name: String,
    pub path: PathBuf,
    pub files: u64,
    pub bytes: u64,
}

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> ModelFetchResult<()> {
    let models_root = config.cache.models_root();

    match args.action {
        CacheAction::Path => {
            println!("{}", models_root.display());
            Ok(())
        }
        CacheAction::List { format } => list_assets(&models_root, format),
        CacheAction::Clear { yes } => clear_assets(&models_root, yes).await,
    }
}

/// Scan the models root for asset directories, sorted by name
pub fn scan_assets(models_root: &Path) -> ModelFetchResult<Vec<AssetEntry>> {
    if !models_root.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(models_root).map_err(|e| {
        ModelFetchError::io(format!("reading {}", models_root.display()), e)
    })?;

    let mut assets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ModelFetchError::io("reading cache entry", e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let (files, bytes) = disk_usage(&path);
        assets.push(AssetEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            files,
            bytes,
        });
    }

    assets.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Found {} asset directories", assets.len());
    Ok(assets)
}

/// File count and total size below `dir`; unreadable entries are skipped
fn disk_usage(dir: &Path) -> (u64, u64) {
    let Ok(entries) = fs::read_dir(dir) else {
        return (0, 0);
    };

    entries
        .filter_map(Result::ok)
        .fold((0, 0), |(files, bytes), entry| match entry.metadata() {
            Ok(meta) if meta.is_dir() => {
                let (f, b) = disk_usage(&entry.path());
                (files + f, bytes + b)
            }
            Ok(meta) => (files + 1, bytes + meta.len()),
            Err(_) => (files, bytes),
        })
}

fn list_assets(models_root: &Path, format: OutputFormat) -> ModelFetchResult<()> {
    let assets = scan_assets(models_root)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assets)?),
        OutputFormat::Plain => {
            for asset in &assets {
                println!("{}", asset.name);
            }
        }
        OutputFormat::Table => {
            if assets.is_empty() {
                println!("No cached assets in {}", models_root.display());
                return Ok(());
            }

            println!("{:<40} {:>8} {:>12}", "ASSET", "FILES", "SIZE");
            println!("{}", "-".repeat(62));
            for asset in &assets {
                println!(
                    "{:<40} {:>8} {:>12}",
                    asset.name,
                    asset.files,
                    indicatif::HumanBytes(asset.bytes).to_string()
                );
            }
            println!();
            println!("Total: {} asset(s)", assets.len());
        }
    }

    Ok(())
}

async fn clear_assets(models_root: &Path, yes: bool) -> ModelFetchResult<()> {
    let ctx = UiContext::detect();

    if !models_root.exists() {
        ui::step_ok(&ctx, "Nothing to clear");
        return Ok(());
    }

    if !yes {
        ui::step_warn_hint(
            &ctx,
            &format!("This deletes everything under {}", models_root.display()),
            "Re-run with --yes to confirm",
        );
        return Ok(());
    }

    let count = scan_assets(models_root)?.len();
    tokio::fs::remove_dir_all(models_root).await.map_err(|e| {
        ModelFetchError::io(format!("removing {}", models_root.display()), e)
    })?;

    ui::step_ok_detail(
        &ctx,
        &format!("Removed {} cached asset(s)", count),
        &models_root.display().to_string(),
    );
    Ok(())
}
