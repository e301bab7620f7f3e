use clap::Parser;
use outline::core::config::{self, CliOverrides};
use outline::core::forest::Forest;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "outline", about = "Keyboard-driven outliner for the terminal")]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Columns per nesting level
    #[arg(long)]
    indent_width: Option<u16>,

    /// Start with an empty outline instead of the sample
    #[arg(long)]
    empty: bool,
}

/// Starts the file logger wide open so config loading is recorded.
/// `narrow_logging` applies the configured level afterwards.
fn init_logging(log_file: File) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
}

fn narrow_logging(level: LevelFilter) {
    log::set_max_level(level);
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to outline.log in current directory
    if let Ok(log_file) = File::create("outline.log") {
        init_logging(log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}; using defaults");
            eprintln!("Warning: {e}; using defaults");
            Default::default()
        }
    };
    let cli = CliOverrides {
        log_level: args.log_level,
        indent_width: args.indent_width,
    };
    let resolved = config::resolve(&file_config, &cli);
    narrow_logging(resolved.log_level);

    log::info!(
        "Outline starting up (indent_width={}, bullet={:?})",
        resolved.indent_width,
        resolved.bullet
    );

    let forest = if args.empty {
        Forest::new()
    } else {
        Forest::sample()
    };
    outline::tui::run(resolved, forest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_startup_messages_reach_log_before_level_applies() {
        let path = std::env::temp_dir().join(format!("outline-log-{}.log", std::process::id()));
        init_logging(File::create(&path).unwrap());

        // Config resolution logs before the configured level is known
        let resolved = config::resolve(
            &config::OutlineConfig::default(),
            &CliOverrides {
                log_level: Some("loud".to_string()),
                indent_width: None,
            },
        );
        narrow_logging(LevelFilter::Warn);
        log::info!("dropped after narrowing");

        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(resolved.log_level, config::DEFAULT_LOG_LEVEL);
        assert!(contents.contains("Unknown log level 'loud'"));
        assert!(!contents.contains("dropped after narrowing"));
    }
}
