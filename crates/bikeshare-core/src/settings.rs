use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the per-user directory holding logs and saved preferences.
pub const APP_DIR_NAME: &str = ".bikeshare-dashboard";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive analysis dashboard for daily and hourly bike-sharing data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare-dashboard",
    about = "Interactive analysis dashboard for daily and hourly bike-sharing data",
    version
)]
pub struct Settings {
    /// Daily records CSV
    #[arg(long, default_value = "dashboard/day.csv")]
    pub day_data: PathBuf,

    /// Hourly records CSV
    #[arg(long, default_value = "dashboard/hour.csv")]
    pub hour_data: PathBuf,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Tab shown on start-up
    #[arg(long, default_value = "overview", value_parser = ["overview", "eda", "rfm", "conclusions"])]
    pub tab: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Histogram bins for the rental distribution (1-200)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u16).range(1..=200))]
    pub bins: u16,

    /// Rows shown in dataset previews (1-50)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub head_rows: u16,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.bikeshare-dashboard/logs/dashboard.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved preferences
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Preferences saved to `~/.bikeshare-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<u16>,
}

impl LastUsedParams {
    /// Default path: `~/.bikeshare-dashboard/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load from an explicit path.  Missing or unparseable files yield
    /// `Default`.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Atomically write to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the file at `path` if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments, merge saved preferences for anything not given
    /// on the command line, and save the result for the next run.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// preferences path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return Self::resolve(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // clap ids use the field name, not the hyphenated flag.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "tab") {
            if let Some(v) = last.tab {
                settings.tab = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "day_data") {
            if let Some(v) = last.day_data {
                settings.day_data = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "hour_data") {
            if let Some(v) = last.hour_data {
                settings.hour_data = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "bins") {
            if let Some(v) = last.bins.filter(|b| (1..=200).contains(b)) {
                settings.bins = v;
            }
        }

        settings = Self::resolve(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!("Could not save preferences: {}", e);
        }

        settings
    }

    /// Apply the `--debug` override.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// `true` when the text report was requested instead of the TUI.
    pub fn is_report(&self) -> bool {
        self.view == "report"
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            tab: Some(s.tab.clone()),
            day_data: Some(s.day_data.clone()),
            hour_data: Some(s.hour_data.clone()),
            bins: Some(s.bins),
        }
    }
}

/// Returns `true` when `name` was supplied on the command line (not via a
/// default value).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
