// Clip interactor - Orchestrates the clip-from-URL and clip-from-file use cases

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::model::*;
use crate::domain::rules::{check_format_compatibility, FormatSelectorPolicy};
use crate::engine::downloader::WORK_AREA_STEM;
use crate::engine::{ClipExtractor, DependencyChecker, EngineConfig, SourceAcquirer, WorkArea};
use crate::error::{ClipperError, ClipperResult};
use crate::ports::ProcessPort;

/// Request for clipping a downloaded video
#[derive(Debug, Clone)]
pub struct UrlClipRequest {
    pub url: String,
    pub ranges: Vec<ClipRange>,
    pub outdir: PathBuf,
    pub mode: ExtractionMode,
    pub format: OutputFormat,
    pub quality: QualitySelector,
}

/// Request for clipping a file already on disk
#[derive(Debug, Clone)]
pub struct LocalClipRequest {
    pub source: PathBuf,
    pub ranges: Vec<ClipRange>,
    pub outdir: PathBuf,
    pub mode: ExtractionMode,
    pub format: OutputFormat,
}

/// Interactor for the clipping use cases
pub struct ClipInteractor {
    checker: DependencyChecker,
    acquirer: SourceAcquirer,
    extractor: ClipExtractor,
    config: EngineConfig,
}

impl ClipInteractor {
    /// Create new clip interactor with the injected process port
    pub fn new(process: Arc<dyn ProcessPort>, config: EngineConfig) -> Self {
        Self {
            checker: DependencyChecker::new(Arc::clone(&process)),
            acquirer: SourceAcquirer::new(Arc::clone(&process), config.downloader.clone()),
            extractor: ClipExtractor::new(process, config.clone()),
            config,
        }
    }

    /// Download `url` into a transient work area and cut every range from it.
    ///
    /// Returns the clip paths in range order. The work area is removed before
    /// this returns, whatever the outcome.
    #[instrument(skip_all, fields(url = %request.url, mode = %request.mode))]
    pub async fn clip_from_url(&self, request: &UrlClipRequest) -> ClipperResult<Vec<PathBuf>> {
        require_ranges(&request.ranges)?;
        self.checker
            .require(&[self.config.downloader.as_str(), self.config.transcoder.as_str()])?;
        create_output_directory(&request.outdir)?;

        let work_area = WorkArea::create_in(&request.outdir)?;
        let result = self.acquire_and_extract(&work_area, request).await;
        work_area.close();
        result
    }

    async fn acquire_and_extract(
        &self,
        work_area: &WorkArea,
        request: &UrlClipRequest,
    ) -> ClipperResult<Vec<PathBuf>> {
        let selector = FormatSelectorPolicy::selector(request.mode, request.quality, &request.format);
        let source = self
            .acquirer
            .acquire(&request.url, work_area.path(), WORK_AREA_STEM, &selector)
            .await?;

        check_format_compatibility(request.mode, &source, &request.format)?;

        self.extract_all(&source, &request.ranges, &request.outdir, request.mode, &request.format)
            .await
    }

    /// Cut every range from a local file; only the transcoder is required
    #[instrument(skip_all, fields(source = %request.source.display(), mode = %request.mode))]
    pub async fn clip_from_local_file(&self, request: &LocalClipRequest) -> ClipperResult<Vec<PathBuf>> {
        require_ranges(&request.ranges)?;
        self.checker.require(&[self.config.transcoder.as_str()])?;
        if !request.source.is_file() {
            return Err(ClipperError::SourceNotFound {
                path: request.source.clone(),
            });
        }
        create_output_directory(&request.outdir)?;

        let source = Source::new(&request.source);
        self.extract_all(&source, &request.ranges, &request.outdir, request.mode, &request.format)
            .await
    }

    /// Extract ranges one at a time, in order, stopping at the first failure.
    /// Clips already written stay on disk and are reported with the error.
    async fn extract_all(
        &self,
        source: &Source,
        ranges: &[ClipRange],
        outdir: &Path,
        mode: ExtractionMode,
        format: &OutputFormat,
    ) -> ClipperResult<Vec<PathBuf>> {
        let mut outputs = Vec::with_capacity(ranges.len());

        for (index, range) in ranges.iter().enumerate() {
            let output = outdir.join(range.output_file_name(format));
            info!("Clip {}/{}: {}", index + 1, ranges.len(), range);

            match self.extractor.extract(source, range, &output, mode).await {
                Ok(path) => outputs.push(path),
                Err(ClipperError::ExtractionFailed { range, status, .. }) => {
                    return Err(ClipperError::ExtractionFailed {
                        range,
                        status,
                        produced: outputs,
                    });
                }
                Err(e) if outputs.is_empty() => return Err(e),
                Err(e) => {
                    warn!("Stopping after {} clip(s): {}", outputs.len(), e);
                    return Err(ClipperError::PartialFailure {
                        produced: outputs,
                        source: Box::new(e),
                    });
                }
            }
        }

        info!("Generated {} clip(s)", outputs.len());
        Ok(outputs)
    }
}

fn require_ranges(ranges: &[ClipRange]) -> ClipperResult<()> {
    if ranges.is_empty() {
        return Err(ClipperError::EmptyRangeList);
    }
    Ok(())
}

/// Create the output directory (and parents) if absent
pub(crate) fn create_output_directory(outdir: &Path) -> ClipperResult<()> {
    std::fs::create_dir_all(outdir).map_err(|e| {
        ClipperError::io(
            format!("Failed to create output directory {}", outdir.display()),
            e,
        )
    })
}
