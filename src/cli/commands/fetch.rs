//! Fetch command - resolve locators to local model files

use crate::cli::args::{FetchArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ModelFetchError, ModelFetchResult};
use crate::locate;
use crate::pipeline::{ModelPipeline, ResolvedModel};
use crate::ui::{self, TaskSpinner, UiContext};
use console::style;
use tracing::debug;

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> ModelFetchResult<()> {
    let ctx = UiContext::detect();
    let extension = args
        .extension
        .unwrap_or_else(|| config.locate.extension.clone());
    locate::check_extension(&extension)?;
    let pipeline = ModelPipeline::from_config(config);
    debug!(
        "Resolving {} locator(s) into {}",
        args.locators.len(),
        pipeline.materializer().models_root().display()
    );

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Resolving {} model(s)...", args.locators.len()));
    let mut results = pipeline
        .resolve_many(args.locators.as_slice(), &extension)
        .await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed == 0 {
        spinner.stop(&format!("Resolved {} model(s)", results.len()));
    } else {
        spinner.stop_error(&format!("{} of {} failed", failed, results.len()));
    }

    match args.format {
        OutputFormat::Plain => print_plain(&ctx, &args.locators, &results),
        OutputFormat::Table => print_table(&args.locators, &results),
        OutputFormat::Json => print_json(&args.locators, &results)?,
    }

    if failed == 0 {
        return Ok(());
    }

    // A lone failure surfaces as itself so its hint is shown
    if results.len() == 1 {
        if let Some(Err(e)) = results.pop() {
            return Err(e);
        }
    }

    Err(ModelFetchError::User(format!(
        "{} of {} locators failed",
        failed,
        results.len()
    )))
}

fn print_plain(
    ctx: &UiContext,
    locators: &[String],
    results: &[ModelFetchResult<ResolvedModel>],
) {
    for (locator, result) in locators.iter().zip(results) {
        match result {
            Ok(resolved) => println!("{}", resolved.model_path.display()),
            Err(e) if locators.len() > 1 => ui::step_error_detail(ctx, locator, &e.to_string()),
            Err(_) => {}
        }
    }
}

fn print_table(locators: &[String], results: &[ModelFetchResult<ResolvedModel>]) {
    println!("{:<50} {:<8} {}", "LOCATOR", "STATUS", "PATH / ERROR");
    println!("{}", "-".repeat(100));

    for (locator, result) in locators.iter().zip(results) {
        let (status, detail) = match result {
            Ok(r) if r.cache_hit => (
                style("cached").cyan().to_string(),
                r.model_path.display().to_string(),
            ),
            Ok(r) => (
                style("fetched").green().to_string(),
                r.model_path.display().to_string(),
            ),
            Err(e) => (style("failed").red().to_string(), e.to_string()),
        };
        println!("{:<50} {:<8} {}", locator, status, detail);
    }
}

fn print_json(
    locators: &[String],
    results: &[ModelFetchResult<ResolvedModel>],
) -> ModelFetchResult<()> {
    #[derive(serde::Serialize)]
    #[serde(untagged)]
    enum Entry<'a> {
        Ok(&'a ResolvedModel),
        Err { locator: &'a str, error: String },
    }

    let entries: Vec<Entry<'_>> = locators
        .iter()
        .zip(results)
        .map(|(locator, result)| match result {
            Ok(resolved) => Entry::Ok(resolved),
            Err(e) => Entry::Err {
                locator,
                error: e.to_string(),
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
