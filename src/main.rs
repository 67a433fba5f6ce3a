#![forbid(unsafe_code)]

mod app;
mod config;
mod constants;
mod gui;
mod launcher;
mod peek;
#[cfg(unix)]
mod signals;
mod tray;
mod ui_queue;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use app::App;
use config::ConfigStore;
use launcher::Launcher;
use peek::PeekRequest;

/// Tray pet that peeks in from the edge of the screen
#[derive(Parser, Debug)]
#[command(name = "arlo-peeker", version, about)]
struct Cli {
    /// Open the settings window and exit
    #[arg(long)]
    settings: bool,

    /// Peek once and exit
    #[arg(long)]
    peek: bool,

    /// Image to peek (overrides the stored config)
    #[arg(long)]
    image: Option<String>,

    /// Peek duration in seconds (overrides the stored config when > 0)
    #[arg(long, allow_negative_numbers = true)]
    duration: Option<f64>,

    /// Speed factor (overrides the stored config when > 0)
    #[arg(long, allow_negative_numbers = true)]
    speed: Option<f64>,
}

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // stdout is reserved for the settings child's report to the tray
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let store = ConfigStore::new();

    if cli.settings {
        if let Some(committed) = gui::run_settings_editor(store)? {
            launcher::report_committed(&committed)?;
        }
        return Ok(());
    }

    if cli.peek {
        let settings = store
            .load()
            .with_overrides(cli.image.as_deref(), cli.duration, cli.speed);
        return peek::run_peek(PeekRequest::from_settings(&settings));
    }

    info!(config = %store.path().display(), "Starting tray");
    App::new(store, Launcher::current()?).run_tray()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_peek_flags_parse() {
        let cli = Cli::try_parse_from([
            "arlo-peeker", "--peek", "--image", "img.png", "--duration", "3", "--speed", "1.5",
        ])
        .unwrap();
        assert!(cli.peek);
        assert!(!cli.settings);
        assert_eq!(cli.image.as_deref(), Some("img.png"));
        assert_eq!(cli.duration, Some(3.0));
        assert_eq!(cli.speed, Some(1.5));
    }

    #[test]
    fn test_negative_override_parses_and_is_ignored() {
        let cli = Cli::try_parse_from(["arlo-peeker", "--peek", "--duration", "-1"]).unwrap();
        assert_eq!(cli.duration, Some(-1.0));

        let settings = config::Settings::default().with_overrides(None, cli.duration, cli.speed);
        assert_eq!(settings.duration, 3.0);
    }

    #[test]
    fn test_launcher_args_round_trip_through_cli() {
        let settings = config::Settings {
            image: "/tmp/arlo.png".to_string(),
            duration: 4.5,
            speed: 0.25,
        };
        let mut argv = vec![std::ffi::OsString::from("arlo-peeker")];
        argv.extend(launcher::peek_args(&settings));

        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(cli.peek);
        let parsed = config::Settings::default().with_overrides(cli.image.as_deref(), cli.duration, cli.speed);
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_launcher_args_keep_image_path_starting_with_dash() {
        let settings = config::Settings {
            image: "-arlo.png".to_string(),
            ..config::Settings::default()
        };
        let mut argv = vec![std::ffi::OsString::from("arlo-peeker")];
        argv.extend(launcher::peek_args(&settings));

        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.image.as_deref(), Some("-arlo.png"));
    }
}
