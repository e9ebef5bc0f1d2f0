//! Core clipping engine module
//!
//! Builds the downloader and transcoder invocations and checks their results.
//! Everything here talks to the outside world only through [`ProcessPort`].
//!
//! [`ProcessPort`]: crate::ports::ProcessPort

use serde::{Deserialize, Serialize};

use crate::adapters::ClipperConfig;

pub mod clipper;
pub mod copy;
pub mod downloader;
pub mod reencode;
pub mod tools;
pub mod workarea;

pub use clipper::ClipExtractor;
pub use copy::StreamCopyClipper;
pub use downloader::SourceAcquirer;
pub use reencode::ReencodeClipper;
pub use tools::DependencyChecker;
pub use workarea::WorkArea;

/// Tool names and codec choices shared by the engine components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Downloader executable
    pub downloader: String,
    /// Transcoder executable
    pub transcoder: String,
    /// Video codec for re-encode mode
    pub video_codec: String,
    /// Audio codec for re-encode mode
    pub audio_codec: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&ClipperConfig::default())
    }
}

impl From<&ClipperConfig> for EngineConfig {
    fn from(config: &ClipperConfig) -> Self {
        Self {
            downloader: config.tools.downloader.clone(),
            transcoder: config.tools.transcoder.clone(),
            video_codec: config.encoding.video_codec.clone(),
            audio_codec: config.encoding.audio_codec.clone(),
        }
    }
}
