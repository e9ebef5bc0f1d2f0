//! CLI module for videoclipper
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::CliOverrides;

pub mod args;
pub mod commands;

pub use args::{DownloadArgs, LocalClipArgs, QualityArgs, UrlArgs};

/// Cut clips out of online or local videos
///
/// Downloads with yt-dlp and cuts with ffmpeg. Clips are written as
/// `clip_<start>_<end>.<format>` into the output directory.
#[derive(Parser, Debug)]
#[command(name = "videoclipper")]
#[command(about = "Download videos and cut them into clips")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Kill an external tool that runs longer than this many seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Silence yt-dlp and ffmpeg output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a video from a URL and cut clips from it
    Url(args::UrlArgs),
    /// Cut clips from a video file already on disk
    Clip(args::LocalClipArgs),
    /// Download a video and keep it without clipping
    Download(args::DownloadArgs),
}

impl Cli {
    /// Global flags that feed the configuration hierarchy
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            log_level: self.log_level.clone(),
            log_json: self.log_json,
            timeout_secs: self.timeout,
            quiet: self.quiet,
        }
    }
}
