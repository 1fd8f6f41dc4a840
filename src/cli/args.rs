//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// modelfetch - download, unpack and locate zipped 3D models
///
/// Resolves a remote model archive to the local path of its entry-point
/// file, reusing already extracted assets from the cache directory.
#[derive(Parser, Debug)]
#[command(name = "modelfetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MODELFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache root directory (overrides config)
    #[arg(long, global = true, env = "MODELFETCH_CACHE_ROOT")]
    pub cache_root: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and unpack model archives, printing the entry-point path
    Fetch(FetchArgs),

    /// Find the entry-point file in an already unpacked directory
    Locate(LocateArgs),

    /// Inspect or clear the asset cache directory
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Archive locators (http://, https:// or file:// URLs)
    #[arg(required = true)]
    pub locators: Vec<String>,

    /// Entry-point extension to look for (default: from config)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Directory to scan (not recursive)
    pub dir: PathBuf,

    /// Extension to look for (default: from config)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Print every match instead of the first
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for fetch and cache listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Print the directory holding unpacked assets
    Path,

    /// List unpacked assets
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete every unpacked asset
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_fetch() {
        let cli = Cli::parse_from([
            "modelfetch",
            "fetch",
            "https://example.test/a.zip",
            "https://example.test/b.zip",
            "-e",
            "glb",
        ]);
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.locators.len(), 2);
                assert_eq!(args.extension.as_deref(), Some("glb"));
                assert_eq!(args.format, OutputFormat::Plain);
            }
            _ => panic!("expected Fetch command"),
        }
    }

    #[test]
    fn cli_fetch_requires_locator() {
        assert!(Cli::try_parse_from(["modelfetch", "fetch"]).is_err());
    }

    #[test]
    fn cli_parses_locate_all() {
        let cli = Cli::parse_from(["modelfetch", "locate", "/tmp/widget", "--all"]);
        match cli.command {
            Commands::Locate(args) => {
                assert_eq!(args.dir, PathBuf::from("/tmp/widget"));
                assert!(args.all);
                assert!(args.extension.is_none());
            }
            _ => panic!("expected Locate command"),
        }
    }

    #[test]
    fn cli_parses_cache_clear() {
        let cli = Cli::parse_from(["modelfetch", "cache", "clear", "--yes"]);
        match cli.command {
            Commands::Cache(CacheArgs {
                action: CacheAction::Clear { yes },
            }) => assert!(yes),
            _ => panic!("expected Cache clear"),
        }
    }

    #[test]
    fn cli_global_cache_root() {
        let cli = Cli::parse_from(["modelfetch", "cache", "path", "--cache-root", "/srv/cache"]);
        assert_eq!(cli.cache_root, Some(PathBuf::from("/srv/cache")));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["modelfetch", "config"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["modelfetch", "-v", "config"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["modelfetch", "-vv", "config"]);
        assert_eq!(cli.verbose, 2);
    }
}
