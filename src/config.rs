use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::cli::Cli;
use crate::theme::ThemeMode;

const APP_DIR: &str = "brewdeck";
const DEFAULT_LOG_LINES: usize = 200;
const DEFAULT_RECOMMENDATIONS: usize = 20;
const DEFAULT_FINISHED_LINGER_SECS: u64 = 3;
const DEFAULT_FAILED_LINGER_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Command line used to invoke Homebrew.
    pub brew: String,
    /// Output lines kept per install task.
    pub log_lines: usize,
    /// Packages drawn for each recommendation refresh.
    pub recommendations: usize,
    /// Seconds a succeeded install stays on screen.
    pub finished_linger_secs: u64,
    /// Seconds a failed or errored install stays on screen.
    pub failed_linger_secs: u64,
    pub theme: ThemeMode,
    pub ascii_icons: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brew: "brew".to_string(),
            log_lines: DEFAULT_LOG_LINES,
            recommendations: DEFAULT_RECOMMENDATIONS,
            finished_linger_secs: DEFAULT_FINISHED_LINGER_SECS,
            failed_linger_secs: DEFAULT_FAILED_LINGER_SECS,
            theme: ThemeMode::Auto,
            ascii_icons: false,
        }
    }
}

impl Settings {
    /// Defaults, then the settings file, then the environment, then flags.
    pub fn resolve(cli: &Cli) -> Self {
        let settings = match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };
        settings.with_env().with_cli(cli)
    }

    /// Reads the settings file. Each key is parsed on its own, so one bad
    /// value only resets that key.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        let map = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(path = %path.display(), "ignoring settings file that is not a JSON object");
                return Self::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring invalid settings file");
                return Self::default();
            }
        };

        let mut settings = Self::default();
        read_field(&map, "brew", &mut settings.brew);
        read_field(&map, "log_lines", &mut settings.log_lines);
        read_field(&map, "recommendations", &mut settings.recommendations);
        read_field(&map, "finished_linger_secs", &mut settings.finished_linger_secs);
        read_field(&map, "failed_linger_secs", &mut settings.failed_linger_secs);
        read_field(&map, "theme", &mut settings.theme);
        read_field(&map, "ascii_icons", &mut settings.ascii_icons);
        settings.normalize()
    }

    pub fn with_env(mut self) -> Self {
        if let Ok(value) = std::env::var("BREWDECK_ASCII") {
            self.ascii_icons = value == "1" || value.eq_ignore_ascii_case("true");
        }
        self
    }

    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(brew) = cli.brew.as_deref() {
            self.brew = brew.to_string();
        }
        if cli.ascii {
            self.ascii_icons = true;
        }
        self.normalize()
    }

    pub fn finished_linger(&self) -> Duration {
        Duration::from_secs(self.finished_linger_secs)
    }

    pub fn failed_linger(&self) -> Duration {
        Duration::from_secs(self.failed_linger_secs)
    }

    fn normalize(mut self) -> Self {
        if self.brew.trim().is_empty() {
            self.brew = "brew".to_string();
        }
        if self.log_lines == 0 {
            self.log_lines = DEFAULT_LOG_LINES;
        }
        if self.recommendations == 0 {
            self.recommendations = DEFAULT_RECOMMENDATIONS;
        }
        self
    }
}

fn read_field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(value) = map.get(key) else {
        return;
    };
    match T::deserialize(value) {
        Ok(parsed) => *slot = parsed,
        Err(err) => warn!(key, error = %err, "ignoring invalid setting"),
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings.json"))
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("brewdeck.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn write_settings(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log_lines, 200);
        assert_eq!(settings.recommendations, 20);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let (_dir, path) = write_settings(r#"{ "recommendations": 5, "theme": "light" }"#);
        let settings = Settings::load_from(&path);
        assert_eq!(settings.recommendations, 5);
        assert_eq!(settings.theme, ThemeMode::Light);
        assert_eq!(settings.brew, "brew");
        assert_eq!(settings.finished_linger(), Duration::from_secs(3));
        assert_eq!(settings.failed_linger(), Duration::from_secs(30));
    }

    #[test]
    fn one_bad_value_keeps_the_rest_of_the_file() {
        let (_dir, path) = write_settings(
            r#"{ "theme": "purple", "recommendations": 5, "log_lines": "lots", "ascii_icons": true }"#,
        );
        let settings = Settings::load_from(&path);
        assert_eq!(settings.theme, ThemeMode::Auto);
        assert_eq!(settings.recommendations, 5);
        assert_eq!(settings.log_lines, 200);
        assert!(settings.ascii_icons);
    }

    #[test]
    fn non_object_file_gives_defaults() {
        let (_dir, path) = write_settings("[1, 2, 3]");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_settings_are_reported_through_tracing() {
        let (_dir, path) = write_settings(r#"{ "theme": "purple" }"#);
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || Settings::load_from(&path));

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ignoring invalid setting"), "{output}");
        assert!(output.contains("theme"), "{output}");
    }
}
