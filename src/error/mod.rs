//! Error handling module for VideoClipper

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::domain::model::ClipRange;

/// Main error type for every clipping, download and validation failure
#[derive(Error, Debug)]
pub enum ClipperError {
    /// Timestamp text is not seconds, MM:SS or HH:MM:SS
    #[error("Invalid timestamp '{value}'. Use seconds (120), MM:SS (01:30) or HH:MM:SS (1:02:03)")]
    InvalidTimestamp { value: String },

    /// A clip range item without a single start-end separator
    #[error("Invalid clip range '{item}'. Use the format start-end, e.g., 10-30")]
    MalformedRange { item: String },

    /// Range end is not strictly after its start
    #[error("Clip end must be greater than start (got {start}-{end})")]
    InvalidRangeOrder { start: u64, end: u64 },

    /// The range list contained no items
    #[error("No clip ranges provided")]
    EmptyRangeList,

    /// Both the start/end pair and a range list were supplied
    #[error("Use either --clips or start/end, not both")]
    MutuallyExclusiveInput,

    /// Required input missing
    #[error("{what}")]
    MissingRequiredInput { what: String },

    /// External tools not found on PATH
    #[error("Missing dependencies on PATH: {}", .tools.join(", "))]
    MissingDependency { tools: Vec<String> },

    /// Downloader exited non-zero
    #[error("Failed to download video from {url} ({status})")]
    DownloadFailed { url: String, status: String },

    /// Downloader succeeded but left nothing behind
    #[error("Download succeeded but no source file was found in {}", .dir.display())]
    DownloadProducedNoFile { dir: PathBuf },

    /// Downloader left more than one candidate file
    #[error("Download produced {} candidate files in {}, expected exactly one", .candidates.len(), .dir.display())]
    MultipleCandidates {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    /// Fast copy requested but the downloaded container differs
    #[error("Source format '{source_format}' does not match output '{requested}'. Use --reencode or choose a matching --format")]
    FormatMismatch {
        source_format: String,
        requested: String,
    },

    /// Refusing to overwrite an existing output
    #[error("Output already exists: {}", .path.display())]
    OutputAlreadyExists { path: PathBuf },

    /// Transcoder exited non-zero for one clip
    #[error("Transcoder failed while generating clip {range} ({status}); {} earlier clip(s) kept", .produced.len())]
    ExtractionFailed {
        range: ClipRange,
        status: String,
        produced: Vec<PathBuf>,
    },

    /// Output format is empty after normalization
    #[error("Output format must be a non-empty extension")]
    EmptyOutputFormat,

    /// Local source file missing
    #[error("Source file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// External tool could not be started
    #[error("Failed to launch {program}: {source}")]
    ToolLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool exceeded the configured timeout
    #[error("{program} did not finish within {seconds}s and was stopped")]
    ToolTimeout { program: String, seconds: u64 },

    /// File system failure while preparing directories
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A multi-clip run stopped after writing some clips
    #[error("{source}; {} earlier clip(s) kept", .produced.len())]
    PartialFailure {
        produced: Vec<PathBuf>,
        #[source]
        source: Box<ClipperError>,
    },
}

/// Discriminant of [`ClipperError`], for callers that branch on the failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidTimestamp,
    MalformedRange,
    InvalidRangeOrder,
    EmptyRangeList,
    MutuallyExclusiveInput,
    MissingRequiredInput,
    MissingDependency,
    DownloadFailed,
    DownloadProducedNoFile,
    MultipleCandidates,
    FormatMismatch,
    OutputAlreadyExists,
    ExtractionFailed,
    EmptyOutputFormat,
    SourceNotFound,
    ToolLaunch,
    ToolTimeout,
    Io,
    Config,
}

impl ClipperError {
    /// Kind of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClipperError::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            ClipperError::MalformedRange { .. } => ErrorKind::MalformedRange,
            ClipperError::InvalidRangeOrder { .. } => ErrorKind::InvalidRangeOrder,
            ClipperError::EmptyRangeList => ErrorKind::EmptyRangeList,
            ClipperError::MutuallyExclusiveInput => ErrorKind::MutuallyExclusiveInput,
            ClipperError::MissingRequiredInput { .. } => ErrorKind::MissingRequiredInput,
            ClipperError::MissingDependency { .. } => ErrorKind::MissingDependency,
            ClipperError::DownloadFailed { .. } => ErrorKind::DownloadFailed,
            ClipperError::DownloadProducedNoFile { .. } => ErrorKind::DownloadProducedNoFile,
            ClipperError::MultipleCandidates { .. } => ErrorKind::MultipleCandidates,
            ClipperError::FormatMismatch { .. } => ErrorKind::FormatMismatch,
            ClipperError::OutputAlreadyExists { .. } => ErrorKind::OutputAlreadyExists,
            ClipperError::ExtractionFailed { .. } => ErrorKind::ExtractionFailed,
            ClipperError::EmptyOutputFormat => ErrorKind::EmptyOutputFormat,
            ClipperError::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            ClipperError::ToolLaunch { .. } => ErrorKind::ToolLaunch,
            ClipperError::ToolTimeout { .. } => ErrorKind::ToolTimeout,
            ClipperError::Io { .. } => ErrorKind::Io,
            ClipperError::Config { .. } => ErrorKind::Config,
            ClipperError::PartialFailure { source, .. } => source.kind(),
        }
    }

    /// Wrap an I/O error with a short description of what was attempted
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ClipperError::Io {
            context: context.into(),
            source,
        }
    }

    /// Clips written before the failure, if the failure happened mid-run
    pub fn produced(&self) -> &[PathBuf] {
        match self {
            ClipperError::ExtractionFailed { produced, .. }
            | ClipperError::PartialFailure { produced, .. } => produced,
            _ => &[],
        }
    }
}

/// Result type alias for VideoClipper operations
pub type ClipperResult<T> = std::result::Result<T, ClipperError>;
