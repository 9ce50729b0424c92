//! User settings stored as TOML.
//!
//! ```toml
//! max_digits = 14
//! display = "segments"   # or "text"
//! theme = "dark"         # or "light"
//! tax_rate = 10.0        # percent, used by TAX+ / TAX-
//! error_reset_ms = 1500  # delay before the error display clears itself
//! ```
//!
//! Missing fields take their defaults; unknown fields are rejected.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use deskcalc_engine::engine::{
    CalcConfig, DEFAULT_MAX_DIGITS, DEFAULT_TAX_RATE, DisplayStyle, MAX_SUPPORTED_DIGITS,
};

use crate::error::{DeskcalcError, Result};

const MAX_SETTINGS_FILE_BYTES: u64 = 65_536;
const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Default delay before an error display resets.
pub const DEFAULT_ERROR_RESET_MS: u64 = 1500;

/// Color scheme of the calculator face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Persistent user settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Digit positions on the display
    pub max_digits: usize,
    /// Seven-segment cells or plain text
    pub display: DisplayStyle,
    pub theme: Theme,
    /// Tax rate in percent
    pub tax_rate: f64,
    /// Milliseconds before the error display clears itself
    pub error_reset_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_digits: DEFAULT_MAX_DIGITS,
            display: DisplayStyle::default(),
            theme: Theme::default(),
            tax_rate: DEFAULT_TAX_RATE,
            error_reset_ms: DEFAULT_ERROR_RESET_MS,
        }
    }
}

impl Settings {
    /// Location of the settings file in the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("", "", "deskcalc")?;
        let mut path = proj.config_dir().to_path_buf();
        path.push(SETTINGS_FILE_NAME);
        Some(path)
    }

    /// Read and validate settings from `path`.
    pub fn load(path: &Path) -> Result<Settings> {
        let size = std::fs::metadata(path)?.len();
        if size > MAX_SETTINGS_FILE_BYTES {
            return Err(DeskcalcError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max: MAX_SETTINGS_FILE_BYTES,
            });
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings =
            toml::from_str(&content).map_err(|err| DeskcalcError::Parse {
                path: path.to_path_buf(),
                message: err.message().to_string(),
            })?;
        debug!(path = %path.display(), "settings loaded");
        settings.validated()
    }

    /// Load settings, falling back to defaults.
    ///
    /// `path` overrides the default location. Problems are returned as
    /// warnings rather than errors; a missing file at the default location
    /// is not a problem.
    pub fn load_or_default(path: Option<&Path>) -> (Settings, Vec<String>) {
        let mut warnings = Vec::new();
        let explicit = path.is_some();
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return (Settings::default(), warnings);
        };

        if !path.exists() {
            if explicit {
                warnings.push(format!("Settings file not found: {}", path.display()));
            }
            return (Settings::default(), warnings);
        }

        match Self::load(&path) {
            Ok(settings) => (settings, warnings),
            Err(err) => {
                warnings.push(err.to_string());
                (Settings::default(), warnings)
            }
        }
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Check field ranges. `max_digits` is clamped; a bad tax rate is an error.
    pub fn validated(mut self) -> Result<Settings> {
        self.max_digits = self.max_digits.clamp(1, MAX_SUPPORTED_DIGITS);
        validate_tax_rate(self.tax_rate)?;
        Ok(self)
    }

    pub fn calc_config(&self) -> CalcConfig {
        CalcConfig::new(self.max_digits, self.tax_rate)
    }

    pub fn error_reset_delay(&self) -> Duration {
        Duration::from_millis(self.error_reset_ms)
    }
}

pub(crate) fn validate_tax_rate(rate: f64) -> Result<()> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(DeskcalcError::InvalidSetting {
            name: "tax_rate",
            message: format!("expected a non-negative percentage, got {rate}"),
        })
    }
}
