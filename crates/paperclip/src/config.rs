//! Layered application settings.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (`paperclip.toml` shipped with the crate)
//! - `~/.config/paperclip/paperclip.toml`
//! - `./paperclip.toml`

use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use paperclip_dispatch::DispatchSettings;
use paperclip_error::{ConfigError, PaperclipError, PaperclipResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../paperclip.toml");

fn default_providers_file() -> PathBuf {
    PathBuf::from("providers.json")
}

fn default_sessions_dir() -> PathBuf {
    PathBuf::from("sessions")
}

fn default_session_name() -> String {
    "local_session".to_string()
}

fn default_poll_interval_ms() -> u64 {
    350
}

fn default_min_spacing_secs() -> u64 {
    2
}

/// Clipboard and prompt-spacing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSettings {
    /// Clipboard polling period in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Minimum seconds between a completed response and the next submission
    #[serde(default = "default_min_spacing_secs")]
    pub min_spacing_secs: u64,
}

impl TriggerSettings {
    /// Clipboard polling period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Minimum submission spacing.
    pub fn min_spacing(&self) -> Duration {
        Duration::from_secs(self.min_spacing_secs)
    }
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            min_spacing_secs: default_min_spacing_secs(),
        }
    }
}

/// Top-level PaperClip settings.
///
/// # Example
///
/// ```no_run
/// use paperclip::PaperclipConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PaperclipConfig::load()?;
/// println!("Providers from {}", config.providers_file.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperclipConfig {
    /// JSON provider list
    #[serde(default = "default_providers_file")]
    pub providers_file: PathBuf,
    /// Directory holding session transcripts
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: PathBuf,
    /// Prefix for new session names
    #[serde(default = "default_session_name")]
    pub session_name: String,
    /// Provider type tried first, if any
    #[serde(default)]
    pub preferred_provider_type: Option<String>,
    /// Retry, context and matching settings for the dispatcher
    #[serde(default)]
    pub dispatch: DispatchSettings,
    /// Clipboard and spacing settings
    #[serde(default)]
    pub trigger: TriggerSettings,
}

impl Default for PaperclipConfig {
    fn default() -> Self {
        Self {
            providers_file: default_providers_file(),
            sessions_dir: default_sessions_dir(),
            session_name: default_session_name(),
            preferred_provider_type: Some("openrouter".to_string()),
            dispatch: DispatchSettings::default(),
            trigger: TriggerSettings::default(),
        }
    }
}

impl PaperclipConfig {
    /// Load bundled defaults, then the home and working-directory overrides.
    ///
    /// Override files are optional and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an override file exists but cannot be parsed.
    #[instrument]
    pub fn load() -> PaperclipResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(config_dir) = dirs::home_dir() {
            let home_config = config_dir.join(".config/paperclip/paperclip.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("paperclip").required(false));

        Self::finish(builder)
    }

    /// Load bundled defaults overridden by a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> PaperclipResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Parse bundled defaults overridden by TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if `toml` is not valid settings.
    pub fn from_toml_str(toml: &str) -> PaperclipResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> PaperclipResult<Self> {
        builder
            .build()
            .map_err(|e| {
                PaperclipError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PaperclipError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Preferred provider type, ignoring blank values.
    pub fn preferred(&self) -> Option<&str> {
        self.preferred_provider_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
