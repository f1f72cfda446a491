//! kikiqr runtime configuration handling

use crate::error::{Error, Result};
use crate::qr::{Color, EncodeOptions, ErrorCorrection, QrStyle};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// URL encoded when nothing else is configured
pub const DEFAULT_URL: &str = "https://kikisconnect.vercel.app/";

/// Output file written when nothing else is configured
pub const DEFAULT_OUTPUT: &str = "kiki_ghibli_qr.png";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// What to encode
    pub payload: PayloadOptions,
    /// How to paint it
    pub style: QrStyle,
    /// Where to write it
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl GeneratorConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No kikiqr.toml / kikiqr.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["kikiqr.toml", "kikiqr.yaml", "kikiqr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("kikiqr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) -> Result<()> {
        self.payload.apply_env_overrides()?;
        apply_style_env_overrides(&mut self.style)?;
        self.output.apply_env_overrides();
        self.logging.apply_env_overrides();
        Ok(())
    }
}

/// Payload and symbol construction options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadOptions {
    /// Text encoded into the symbol
    pub url: String,
    /// Error correction settings
    #[serde(flatten)]
    pub encoding: EncodeOptions,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            encoding: EncodeOptions::default(),
        }
    }
}

impl PayloadOptions {
    pub(crate) fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var("KIKIQR_URL") {
            self.url = url;
        }
        if let Ok(level) = env::var("KIKIQR_ERROR_CORRECTION") {
            self.encoding.error_correction = ErrorCorrection::from_str(&level)?;
        }
        Ok(())
    }
}

fn apply_style_env_overrides(style: &mut QrStyle) -> Result<()> {
    if let Ok(scale) = env::var("KIKIQR_SCALE") {
        style.scale = scale
            .parse::<u32>()
            .map_err(|e| Error::Config(format!("Invalid KIKIQR_SCALE '{scale}': {e}")))?;
    }
    if let Ok(border) = env::var("KIKIQR_BORDER") {
        style.border = border
            .parse::<u32>()
            .map_err(|e| Error::Config(format!("Invalid KIKIQR_BORDER '{border}': {e}")))?;
    }

    let colors: [(&str, &mut Color); 4] = [
        ("KIKIQR_DARK", &mut style.dark),
        ("KIKIQR_LIGHT", &mut style.light),
        ("KIKIQR_FINDER_DARK", &mut style.finder_dark),
        ("KIKIQR_FINDER_LIGHT", &mut style.finder_light),
    ];
    for (var, slot) in colors {
        if let Ok(value) = env::var(var) {
            *slot = Color::parse(&value)?;
        }
    }

    if let Ok(value) = env::var("KIKIQR_QUIET_ZONE") {
        style.quiet_zone = if value.trim().is_empty() {
            None
        } else {
            Some(Color::parse(&value)?)
        };
    }
    Ok(())
}

/// Output artifact options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Destination image path; format follows the extension, PNG otherwise
    pub path: PathBuf,
    /// Decode the written file and compare it with the payload
    pub verify: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            verify: false,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("KIKIQR_OUTPUT") {
            if !path.trim().is_empty() {
                self.path = PathBuf::from(path);
            }
        }
        if let Ok(verify) = env::var("KIKIQR_VERIFY") {
            match verify.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => self.verify = true,
                "0" | "false" | "off" => self.verify = false,
                _ => {}
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `KIKIQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("KIKIQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("KIKIQR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("KIKIQR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("KIKIQR_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
