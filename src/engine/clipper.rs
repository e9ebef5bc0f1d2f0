//! Main clip extractor implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::domain::model::{ClipRange, ExtractionMode, Source};
use crate::engine::{EngineConfig, ReencodeClipper, StreamCopyClipper};
use crate::error::{ClipperError, ClipperResult};
use crate::ports::{Invocation, ProcessPort};

/// Cuts one clip per call with the transcoder
pub struct ClipExtractor {
    process: Arc<dyn ProcessPort>,
    config: EngineConfig,
}

impl ClipExtractor {
    pub fn new(process: Arc<dyn ProcessPort>, config: EngineConfig) -> Self {
        Self { process, config }
    }

    /// Transcoder call for the chosen mode
    pub fn invocation(
        &self,
        source: &Source,
        range: &ClipRange,
        output: &Path,
        mode: ExtractionMode,
    ) -> Invocation {
        let transcoder = &self.config.transcoder;
        match mode {
            ExtractionMode::FastCopy => {
                StreamCopyClipper::invocation(transcoder, source.path(), range, output)
            }
            ExtractionMode::ReEncode => {
                ReencodeClipper::new(&self.config.video_codec, &self.config.audio_codec)
                    .invocation(transcoder, source.path(), range, output)
            }
        }
    }

    /// Write `range` of `source` to `output`, never replacing an existing file.
    ///
    /// A failed transcode reports the range with an empty `produced` list; the
    /// caller owns the record of earlier clips.
    pub async fn extract(
        &self,
        source: &Source,
        range: &ClipRange,
        output: &Path,
        mode: ExtractionMode,
    ) -> ClipperResult<PathBuf> {
        if output.exists() {
            return Err(ClipperError::OutputAlreadyExists {
                path: output.to_path_buf(),
            });
        }

        let started = Instant::now();
        info!("Extracting {} ({}) to {}", range, mode, output.display());

        let report = self
            .process
            .run(&self.invocation(source, range, output, mode))
            .await?;

        if !report.success {
            error!("Transcoder failed for clip {}: {}", range, report);
            return Err(ClipperError::ExtractionFailed {
                range: *range,
                status: report.to_string(),
                produced: Vec::new(),
            });
        }

        info!(
            "Clip {} written in {:.2}s",
            output.display(),
            started.elapsed().as_secs_f64()
        );
        Ok(output.to_path_buf())
    }
}
