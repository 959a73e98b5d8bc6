//! Mushaf reader - Entry Point

use clap::Parser;
use mushaf::config::CliOverrides;
use mushaf::fetch::HttpFetcher;
use mushaf::model::{AppError, ReadingDirection};
use mushaf::state::{detect_wake_lock, AppState, Capabilities, ReaderOptions};
use mushaf::storage::{FileStorage, MemoryStorage, Storage};
use mushaf::view::{ColorConfig, ViewOptions};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{info, warn};

/// Mushaf reader - page through the 604-page mushaf in the terminal
#[derive(Parser, Debug)]
#[command(name = "mushaf")]
#[command(version)]
#[command(about = "Terminal reader for the 604-page scanned mushaf")]
pub struct Args {
    /// Open at this page instead of the last one read
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub page: Option<u16>,

    /// Reading direction for arrow keys, taps and swipes
    #[arg(short, long, value_parser = parse_direction)]
    pub direction: Option<ReadingDirection>,

    /// Path to the key/value storage file
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_direction(raw: &str) -> Result<ReadingDirection, String> {
    ReadingDirection::parse(raw)
        .ok_or_else(|| format!("expected ltr, rtl, left-to-right or right-to-left, got {raw:?}"))
}

/// Open the storage file, or fall back to in-memory storage so that an
/// unreadable file never stops the reader from starting.
fn open_storage(path: &Path) -> Box<dyn Storage> {
    match FileStorage::open(path) {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            warn!(path = ?path, error = %err, "Storage unavailable, settings will not persist");
            Box::new(MemoryStorage::new())
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = mushaf::config::resolve(
        args.config.clone(),
        CliOverrides {
            page: args.page,
            direction: args.direction,
            storage_path: args.storage.clone(),
            no_color: args.no_color,
        },
    )?;

    mushaf::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let storage = open_storage(&config.storage_path);
    let (tx, rx) = mpsc::channel();
    let fetcher = HttpFetcher::new(tx)?;
    let wake_lock = detect_wake_lock(config.wake_lock_command.clone());

    let options = ReaderOptions {
        bounds: config.bounds()?,
        direction: config.reading_direction,
        prefetch_radius: config.prefetch_radius,
        jump_amount: config.jump_amount,
        storage_namespace: config.storage_namespace.clone(),
        start_page: config.start_page,
    };
    let app_state = AppState::new(
        options,
        Capabilities {
            locator: config.locator(),
            fetcher: Box::new(fetcher),
            storage,
            wake_lock,
            outcomes: Some(rx),
        },
    );

    let view_options = ViewOptions {
        key_bindings: config.key_bindings()?,
        tap_zones: config.tap_zones,
        swipe_threshold: config.swipe_threshold,
        colors: ColorConfig::from_no_color(config.no_color),
    };

    mushaf::view::run_reader(app_state, view_options)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["mushaf", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["mushaf", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["mushaf"]);
        assert_eq!(args.page, None);
        assert_eq!(args.direction, None);
        assert_eq!(args.storage, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_page_short_flag() {
        let args = Args::parse_from(["mushaf", "-p", "50"]);
        assert_eq!(args.page, Some(50));
    }

    #[test]
    fn test_page_long_flag() {
        let args = Args::parse_from(["mushaf", "--page", "604"]);
        assert_eq!(args.page, Some(604));
    }

    #[test]
    fn test_page_rejects_zero() {
        let result = Args::try_parse_from(["mushaf", "-p", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_page_rejects_negative() {
        let result = Args::try_parse_from(["mushaf", "-p", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_short_names() {
        let args = Args::parse_from(["mushaf", "-d", "rtl"]);
        assert_eq!(args.direction, Some(ReadingDirection::RightToLeft));

        let args = Args::parse_from(["mushaf", "--direction", "left-to-right"]);
        assert_eq!(args.direction, Some(ReadingDirection::LeftToRight));
    }

    #[test]
    fn test_direction_invalid_rejects() {
        let result = Args::try_parse_from(["mushaf", "--direction", "sideways"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["mushaf", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_and_storage_paths() {
        let args = Args::parse_from([
            "mushaf",
            "--config",
            "/custom/config.toml",
            "--storage",
            "/tmp/reader.json",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(args.storage, Some(PathBuf::from("/tmp/reader.json")));
    }

    #[test]
    fn test_unreadable_storage_falls_back_to_memory() {
        let dir = std::env::temp_dir().join(format!("mushaf_main_storage_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        // A directory cannot be opened as the storage file
        let mut storage = open_storage(&dir);
        assert_eq!(storage.get("quran_last_page"), None);
        storage.set("quran_last_page", "5").unwrap();
        assert_eq!(storage.get("quran_last_page").as_deref(), Some("5"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cli_page_flows_through_precedence_chain() {
        use mushaf::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            reading_direction: Some(ReadingDirection::RightToLeft),
            ..ConfigFile::default()
        };
        let merged = merge_config(Some(config_file));
        assert_eq!(merged.reading_direction, ReadingDirection::RightToLeft);
        assert_eq!(merged.start_page, None);

        let with_cli = apply_cli_overrides(
            merged,
            CliOverrides {
                page: Some(77),
                direction: Some(ReadingDirection::LeftToRight),
                ..CliOverrides::default()
            },
        );
        assert_eq!(with_cli.start_page, Some(77));
        assert_eq!(
            with_cli.reading_direction,
            ReadingDirection::LeftToRight,
            "CLI direction should override all other sources"
        );
    }
}
