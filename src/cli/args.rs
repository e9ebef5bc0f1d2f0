//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

/// Arguments for clipping a video fetched from a URL
#[derive(Args, Debug, Clone)]
pub struct UrlArgs {
    /// Video URL
    pub url: String,

    /// Start time (seconds, MM:SS or HH:MM:SS)
    pub start: Option<String>,

    /// End time (seconds, MM:SS or HH:MM:SS)
    pub end: Option<String>,

    /// Comma-separated ranges, e.g. "0-10,1:00-1:30"
    #[arg(long)]
    pub clips: Option<String>,

    /// Output directory [default: clips]
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Re-encode instead of copying streams
    #[arg(long)]
    pub reencode: bool,

    /// Output container [default: mp4]
    #[arg(long)]
    pub format: Option<String>,

    #[command(flatten)]
    pub quality: QualityArgs,
}

/// Arguments for clipping a local file
#[derive(Args, Debug, Clone)]
pub struct LocalClipArgs {
    /// Video file on disk
    pub source: PathBuf,

    /// Start time (seconds, MM:SS or HH:MM:SS)
    pub start: Option<String>,

    /// End time (seconds, MM:SS or HH:MM:SS)
    pub end: Option<String>,

    /// Comma-separated ranges, e.g. "0-10,1:00-1:30"
    #[arg(long)]
    pub clips: Option<String>,

    /// Output directory [default: clips]
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Re-encode instead of copying streams
    #[arg(long)]
    pub reencode: bool,

    /// Output container [default: mp4]
    #[arg(long)]
    pub format: Option<String>,
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Video URL
    pub url: String,

    /// Output directory [default: fullvideos]
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Accept any container instead of the configured one
    #[arg(long)]
    pub reencode: bool,

    #[command(flatten)]
    pub quality: QualityArgs,
}

/// Maximum video height; at most one may be given
#[derive(Args, Debug, Clone, Default)]
#[group(id = "quality", multiple = false)]
pub struct QualityArgs {
    /// Limit to 360p
    #[arg(long = "360p")]
    pub p360: bool,

    /// Limit to 480p
    #[arg(long = "480p")]
    pub p480: bool,

    /// Limit to 720p
    #[arg(long = "720p")]
    pub p720: bool,

    /// Limit to 1080p
    #[arg(long = "1080p")]
    pub p1080: bool,

    /// Limit to a custom height in pixels
    #[arg(long, value_parser = parse_height)]
    pub height: Option<u32>,
}

impl QualityArgs {
    /// Height requested on the command line, if any
    pub fn selected_height(&self) -> Option<u32> {
        if self.p360 {
            Some(360)
        } else if self.p480 {
            Some(480)
        } else if self.p720 {
            Some(720)
        } else if self.p1080 {
            Some(1080)
        } else {
            self.height
        }
    }
}

fn parse_height(s: &str) -> Result<u32, String> {
    number_range(s, 1, 8640)
}
