// Domain rules - Range resolution and format policies

use crate::domain::model::*;
use crate::error::{ClipperError, ClipperResult};

/// Split a comma-separated list like "10-30,120-150" into ranges, in input order
pub fn parse_clip_ranges(ranges: &str) -> ClipperResult<Vec<ClipRange>> {
    let items: Vec<&str> = ranges
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Err(ClipperError::EmptyRangeList);
    }

    items.into_iter().map(str::parse).collect()
}

/// Resolve the single start/end pair or the `--clips` list, never both
pub fn resolve_ranges(
    start: Option<&str>,
    end: Option<&str>,
    clips: Option<&str>,
) -> ClipperResult<Vec<ClipRange>> {
    if let Some(clips) = clips {
        if start.is_some() || end.is_some() {
            return Err(ClipperError::MutuallyExclusiveInput);
        }
        return parse_clip_ranges(clips);
    }

    match (start, end) {
        (Some(start), Some(end)) => {
            let range = ClipRange::from_times(TimeValue::parse(start)?, TimeValue::parse(end)?)?;
            Ok(vec![range])
        }
        _ => Err(ClipperError::MissingRequiredInput {
            what: "Start and end are required unless --clips is provided".to_string(),
        }),
    }
}

/// Builds the downloader's format selector for a run
pub struct FormatSelectorPolicy;

impl FormatSelectorPolicy {
    /// Re-encode fetches the richest source; fast copy fetches the output container itself
    pub fn selector(
        mode: ExtractionMode,
        quality: QualitySelector,
        container: &OutputFormat,
    ) -> String {
        match (mode, quality.max_height) {
            (ExtractionMode::ReEncode, None) => "best".to_string(),
            (ExtractionMode::ReEncode, Some(height)) => format!(
                "bestvideo[height<={h}]+bestaudio/best[height<={h}]/best",
                h = height
            ),
            (ExtractionMode::FastCopy, None) => container.to_string(),
            (ExtractionMode::FastCopy, Some(height)) => {
                format!("best[ext={}][height<={}]", container, height)
            }
        }
    }
}

/// Fast copy cannot convert containers, so the source must already match
pub fn check_format_compatibility(
    mode: ExtractionMode,
    source: &Source,
    requested: &OutputFormat,
) -> ClipperResult<()> {
    if mode == ExtractionMode::ReEncode {
        return Ok(());
    }

    let source_format = source.extension();
    if requested.matches_extension(&source_format) {
        Ok(())
    } else {
        Err(ClipperError::FormatMismatch {
            source_format,
            requested: requested.to_string(),
        })
    }
}
