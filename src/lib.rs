//! videoclipper library
//!
//! Downloads online videos with yt-dlp and cuts them into clips with ffmpeg,
//! either by stream copy or by re-encoding.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::model::{ClipRange, ExtractionMode, OutputFormat, QualitySelector, Source, TimeValue};
pub use error::{ClipperError, ClipperResult, ErrorKind};
