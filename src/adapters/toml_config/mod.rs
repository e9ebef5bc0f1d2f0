// TOML config adapter - Configuration loaded from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClipperError, ClipperResult};

/// Complete configuration, every section optional in the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipperConfig {
    pub tools: ToolsConfig,
    pub encoding: EncodingConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

/// `[tools]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub downloader: String,
    pub transcoder: String,
    /// Unset means wait for the tools indefinitely
    pub timeout_secs: Option<u64>,
    pub quiet: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            downloader: "yt-dlp".to_string(),
            transcoder: "ffmpeg".to_string(),
            timeout_secs: None,
            quiet: false,
        }
    }
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `[encoding]` section, used by re-encode mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// `[defaults]` section, fallbacks for omitted CLI flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub outdir: PathBuf,
    pub download_outdir: PathBuf,
    pub format: String,
    pub quality_height: Option<u32>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("clips"),
            download_outdir: PathBuf::from("fullvideos"),
            format: "mp4".to_string(),
            quality_height: Some(480),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration text
    pub fn parse(content: &str) -> ClipperResult<ClipperConfig> {
        let config: ClipperConfig = toml::from_str(content).map_err(|e| ClipperError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> ClipperResult<ClipperConfig> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ClipperError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Candidate config locations, most specific first
    pub fn default_config_paths(env: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("videoclipper.toml")];
        if let Some(xdg) = env("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("videoclipper").join("config.toml"));
        }
        if let Some(home) = env("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("videoclipper")
                    .join("config.toml"),
            );
        }
        if let Some(appdata) = env("APPDATA") {
            paths.push(PathBuf::from(appdata).join("videoclipper").join("config.toml"));
        }
        paths
    }
}

impl ClipperConfig {
    /// Validate configuration values
    pub fn validate(&self) -> ClipperResult<()> {
        let invalid = |message: &str| {
            Err(ClipperError::Config {
                message: message.to_string(),
            })
        };

        if self.tools.downloader.trim().is_empty() {
            return invalid("tools.downloader cannot be empty");
        }
        if self.tools.transcoder.trim().is_empty() {
            return invalid("tools.transcoder cannot be empty");
        }
        if self.tools.timeout_secs == Some(0) {
            return invalid("tools.timeout_secs must be positive");
        }
        if self.defaults.quality_height == Some(0) {
            return invalid("defaults.quality_height must be positive");
        }
        if self.encoding.video_codec.trim().is_empty() || self.encoding.audio_codec.trim().is_empty() {
            return invalid("encoding codecs cannot be empty");
        }
        parse_log_level(&self.logging.level)?;
        Ok(())
    }
}

/// Parse a log level name, shared with the `--log-level` flag
pub fn parse_log_level(level: &str) -> ClipperResult<tracing::Level> {
    level.parse::<tracing::Level>().map_err(|_| ClipperError::Config {
        message: format!(
            "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
            level
        ),
    })
}
