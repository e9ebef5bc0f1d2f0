//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::toml_config::{parse_log_level, ClipperConfig, TomlConfigAdapter};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "VIDEOCLIPPER_CONFIG";

/// Settings the command line may override
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_json: bool,
    pub timeout_secs: Option<u64>,
    pub quiet: bool,
}

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClipperConfig> {
    let mut config = load_config_file(cli.config_path.as_deref(), &env)?;
    apply_environment_overrides(&mut config, &env)?;
    apply_cli_overrides(&mut config, cli)?;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Load the named config file, or the first default location that exists
fn load_config_file(
    explicit: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<ClipperConfig> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        info!("Loading configuration from: {}", path.display());
        return Ok(TomlConfigAdapter::load(&path)?);
    }

    for path in TomlConfigAdapter::default_config_paths(env) {
        if path.is_file() {
            info!("Loading configuration from: {}", path.display());
            return Ok(TomlConfigAdapter::load(&path)?);
        }
    }

    Ok(ClipperConfig::default())
}

/// Apply `VIDEOCLIPPER_*` environment overrides
fn apply_environment_overrides(
    config: &mut ClipperConfig,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(downloader) = env("VIDEOCLIPPER_DOWNLOADER") {
        config.tools.downloader = downloader;
    }
    if let Some(transcoder) = env("VIDEOCLIPPER_TRANSCODER") {
        config.tools.transcoder = transcoder;
    }
    if let Some(timeout) = env("VIDEOCLIPPER_TOOL_TIMEOUT") {
        let seconds = timeout
            .trim()
            .parse::<u64>()
            .with_context(|| format!("VIDEOCLIPPER_TOOL_TIMEOUT must be whole seconds, got '{}'", timeout))?;
        config.tools.timeout_secs = Some(seconds);
    }
    if let Some(level) = env("VIDEOCLIPPER_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = env("VIDEOCLIPPER_FORMAT") {
        config.defaults.format = format;
    }
    Ok(())
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut ClipperConfig, cli: &CliOverrides) -> Result<()> {
    if let Some(level) = &cli.log_level {
        parse_log_level(level)?;
        config.logging.level = level.clone();
    }
    if cli.log_json {
        config.logging.json = true;
    }
    if let Some(seconds) = cli.timeout_secs {
        config.tools.timeout_secs = Some(seconds);
    }
    if cli.quiet {
        config.tools.quiet = true;
    }
    Ok(())
}
