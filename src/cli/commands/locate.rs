//! Locate command - run the content locator on a directory

use crate::cli::args::LocateArgs;
use crate::config::Config;
use crate::error::{ModelFetchError, ModelFetchResult};
use crate::locate;

/// Execute the locate command
pub async fn execute(args: LocateArgs, config: &Config) -> ModelFetchResult<()> {
    let extension = args
        .extension
        .unwrap_or_else(|| config.locate.extension.clone());
    locate::check_extension(&extension)?;

    // Listing failures and empty results look the same to the locator
    if !args.dir.is_dir() {
        return Err(ModelFetchError::User(format!(
            "Not a directory: {}",
            args.dir.display()
        )));
    }

    let matches = if args.all {
        locate::list_by_extension(&args.dir, &extension)
    } else {
        locate::find_first_by_extension(&args.dir, &extension)
            .into_iter()
            .collect()
    };

    if matches.is_empty() {
        return Err(ModelFetchError::ContentNotFound {
            extension: extension.trim_start_matches('.').to_string(),
            directory: args.dir,
        });
    }

    for path in matches {
        println!("{}", path.display());
    }
    Ok(())
}
