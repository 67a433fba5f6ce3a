//! Child processes for peek and settings windows
//!
//! The windowing backend allows a single event loop per process, so every
//! window runs in its own copy of this executable. A settings child reports
//! the settings it committed as one JSON line on stdout; logs go to stderr.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{info, warn};

use crate::config::Settings;
use crate::constants::cli;

#[derive(Debug, Clone)]
pub struct Launcher {
    exe: PathBuf,
}

impl Launcher {
    /// Launch windows through the running executable
    pub fn current() -> Result<Self> {
        let exe = std::env::current_exe().context("Failed to resolve executable path")?;
        Ok(Self::with_exe(exe))
    }

    pub fn with_exe(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// Start a peek and return immediately
    pub fn spawn_peek(&self, settings: &Settings) -> Result<Child> {
        let child = Command::new(&self.exe)
            .args(peek_args(settings))
            .spawn()
            .context("Failed to spawn peek window")?;
        info!(pid = child.id(), image = %settings.image, "Started peek");
        Ok(child)
    }

    /// Open the settings editor and wait until it exits
    ///
    /// Returns the settings the editor committed, or `None` when it was
    /// closed without saving.
    pub fn run_settings(&self) -> Result<Option<Settings>> {
        let output = Command::new(&self.exe)
            .arg(cli::SETTINGS)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .context("Failed to run settings window")?;
        if !output.status.success() {
            warn!(exit = ?output.status.code(), "Settings window exited with an error");
        }
        Ok(committed_settings(&output.stdout))
    }
}

/// Settings-child side of [`Launcher::run_settings`]
pub fn report_committed(settings: &Settings) -> Result<()> {
    let line = serde_json::to_string(settings).context("Failed to serialize committed settings")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}").context("Failed to report committed settings")?;
    stdout.flush().context("Failed to report committed settings")
}

/// Parse what a settings child printed; empty output means nothing was committed
fn committed_settings(stdout: &[u8]) -> Option<Settings> {
    let text = String::from_utf8_lossy(stdout);
    let line = text.lines().rev().find(|line| !line.trim().is_empty())?;
    match serde_json::from_str::<Settings>(line) {
        Ok(mut settings) => {
            settings.validate_and_clamp();
            Some(settings)
        }
        Err(err) => {
            warn!(error = %err, "Ignoring unreadable settings reported by the editor");
            None
        }
    }
}

/// Arguments that make a child peek with exactly `settings`
///
/// The image travels as `--image=<path>` so a path starting with `-` is
/// never mistaken for a flag.
pub fn peek_args(settings: &Settings) -> Vec<OsString> {
    let mut image = OsString::from(format!("{}=", cli::IMAGE));
    image.push(&settings.image);
    vec![
        cli::PEEK.into(),
        image,
        cli::DURATION.into(),
        settings.duration.to_string().into(),
        cli::SPEED.into(),
        settings.speed.to_string().into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_args_carry_all_settings() {
        let settings = Settings {
            image: "img.png".to_string(),
            duration: 3.0,
            speed: 1.5,
        };
        let args: Vec<OsString> = ["--peek", "--image=img.png", "--duration", "3", "--speed", "1.5"]
            .into_iter()
            .map(OsString::from)
            .collect();
        assert_eq!(peek_args(&settings), args);
    }

    #[test]
    fn test_committed_settings_parses_reported_line() {
        let settings = Settings {
            image: "/tmp/arlo.png".to_string(),
            duration: 2.5,
            speed: 4.0,
        };
        let stdout = format!("{}\n", serde_json::to_string(&settings).unwrap());
        assert_eq!(committed_settings(stdout.as_bytes()), Some(settings));
    }

    #[test]
    fn test_committed_settings_empty_or_garbage_is_none() {
        assert_eq!(committed_settings(b""), None);
        assert_eq!(committed_settings(b"\n  \n"), None);
        assert_eq!(committed_settings(b"not json\n"), None);
    }

    #[test]
    fn test_committed_settings_are_clamped() {
        let stdout = br#"{"image":"a.png","duration":-1.0,"speed":2.0}"#;
        let settings = committed_settings(stdout).unwrap();
        assert_eq!(settings.duration, Settings::default().duration);
        assert_eq!(settings.speed, 2.0);
    }

    #[test]
    fn test_missing_executable_errors() {
        let launcher = Launcher::with_exe("/nonexistent/arlo-peeker");
        assert!(launcher.run_settings().is_err());
        assert!(launcher.spawn_peek(&Settings::default()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_settings_waits_for_child() {
        let launcher = Launcher::with_exe("true");
        assert_eq!(launcher.run_settings().unwrap(), None);

        // A failing editor is logged, not propagated
        let launcher = Launcher::with_exe("false");
        assert_eq!(launcher.run_settings().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_peek_can_be_reaped() {
        let launcher = Launcher::with_exe("true");
        let mut child = launcher.spawn_peek(&Settings::default()).unwrap();
        assert!(child.wait().unwrap().success());
    }
}
