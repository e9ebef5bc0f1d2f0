// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ClipperError, ClipperResult};

/// Whole seconds into the source media
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeValue(u64);

impl TimeValue {
    /// Create a new TimeValue from seconds
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn as_seconds(&self) -> u64 {
        self.0
    }

    /// Parse plain seconds ("120"), MM:SS ("01:30") or HH:MM:SS ("1:02:03")
    pub fn parse(time_str: &str) -> ClipperResult<Self> {
        let trimmed = time_str.trim();
        let invalid = || ClipperError::InvalidTimestamp {
            value: trimmed.to_string(),
        };

        let parts: Vec<&str> = trimmed.split(':').collect();
        let seconds = match parts.as_slice() {
            [secs] => parse_component(secs).ok_or_else(invalid)?,
            [minutes, secs] => {
                let minutes = parse_component(minutes).ok_or_else(invalid)?;
                let secs = parse_sexagesimal(secs).ok_or_else(invalid)?;
                minutes
                    .checked_mul(60)
                    .and_then(|m| m.checked_add(secs))
                    .ok_or_else(invalid)?
            }
            [hours, minutes, secs] => {
                let hours = parse_component(hours).ok_or_else(invalid)?;
                let minutes = parse_sexagesimal(minutes).ok_or_else(invalid)?;
                let secs = parse_sexagesimal(secs).ok_or_else(invalid)?;
                hours
                    .checked_mul(3600)
                    .and_then(|h| h.checked_add(minutes * 60 + secs))
                    .ok_or_else(invalid)?
            }
            _ => return Err(invalid()),
        };

        Ok(Self(seconds))
    }
}

/// Digits only: no sign, no decimal point, no inner whitespace
fn parse_component(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Minutes or seconds component, 0..=59
fn parse_sexagesimal(text: &str) -> Option<u64> {
    parse_component(text).filter(|value| *value < 60)
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TimeValue {
    type Err = ClipperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A clip's bounds, end strictly after start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClipRange {
    start: TimeValue,
    end: TimeValue,
}

impl ClipRange {
    /// Create a range from seconds, rejecting end <= start
    pub fn new(start: u64, end: u64) -> ClipperResult<Self> {
        Self::from_times(TimeValue::from_seconds(start), TimeValue::from_seconds(end))
    }

    pub fn from_times(start: TimeValue, end: TimeValue) -> ClipperResult<Self> {
        if end <= start {
            return Err(ClipperError::InvalidRangeOrder {
                start: start.as_seconds(),
                end: end.as_seconds(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeValue {
        self.start
    }

    pub fn end(&self) -> TimeValue {
        self.end
    }

    /// Clip length in seconds, always positive
    pub fn duration_seconds(&self) -> u64 {
        self.end.as_seconds() - self.start.as_seconds()
    }

    /// Deterministic output name: `clip_<start>_<end>.<format>`
    pub fn output_file_name(&self, format: &OutputFormat) -> String {
        format!("clip_{}_{}.{}", self.start, self.end, format)
    }
}

impl fmt::Display for ClipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ClipRange {
    type Err = ClipperError;

    /// Parse a single `start-end` item
    fn from_str(item: &str) -> Result<Self, Self::Err> {
        let item = item.trim();
        let mut pieces = item.split('-');
        match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(start), Some(end), None) => {
                Self::from_times(TimeValue::parse(start)?, TimeValue::parse(end)?)
            }
            _ => Err(ClipperError::MalformedRange {
                item: item.to_string(),
            }),
        }
    }
}

/// How every clip of one invocation is cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExtractionMode {
    /// Stream copy: fast, keyframe-bound, container must already match
    #[default]
    FastCopy,
    /// Full transcode: frame-accurate, any source codec
    ReEncode,
}

impl ExtractionMode {
    pub fn from_reencode_flag(reencode: bool) -> Self {
        if reencode {
            ExtractionMode::ReEncode
        } else {
            ExtractionMode::FastCopy
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::FastCopy => write!(f, "fast-copy"),
            ExtractionMode::ReEncode => write!(f, "re-encode"),
        }
    }
}

/// Optional target vertical resolution for URL downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QualitySelector {
    pub max_height: Option<u32>,
}

impl QualitySelector {
    /// No height constraint
    pub fn any() -> Self {
        Self { max_height: None }
    }

    pub fn height(max_height: u32) -> Self {
        Self {
            max_height: Some(max_height),
        }
    }
}

/// Requested container extension, normalized (no leading dot, non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFormat(String);

impl OutputFormat {
    pub fn parse(raw: &str) -> ClipperResult<Self> {
        let normalized = raw.trim().trim_start_matches('.');
        if normalized.is_empty() {
            return Err(ClipperError::EmptyOutputFormat);
        }
        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a file's extension names this same container
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.0.eq_ignore_ascii_case(extension)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The one media file a run reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    path: PathBuf,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Container extension as written by the downloader, without the dot
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
