// Download interactor - Keeps a downloaded video instead of clipping it

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, instrument};

use crate::app::clip_interactor::create_output_directory;
use crate::domain::model::*;
use crate::domain::rules::FormatSelectorPolicy;
use crate::engine::{DependencyChecker, EngineConfig, SourceAcquirer};
use crate::error::ClipperResult;
use crate::ports::ProcessPort;

/// Request for a download-only run
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub outdir: PathBuf,
    pub mode: ExtractionMode,
    pub quality: QualitySelector,
    /// Container fetched in fast-copy mode
    pub container: OutputFormat,
}

/// Interactor for the download-only use case
pub struct DownloadInteractor {
    checker: DependencyChecker,
    acquirer: SourceAcquirer,
    config: EngineConfig,
}

impl DownloadInteractor {
    pub fn new(process: Arc<dyn ProcessPort>, config: EngineConfig) -> Self {
        Self {
            checker: DependencyChecker::new(Arc::clone(&process)),
            acquirer: SourceAcquirer::new(process, config.downloader.clone()),
            config,
        }
    }

    /// Download straight into `outdir`; the file persists as the deliverable
    #[instrument(skip_all, fields(url = %request.url))]
    pub async fn download(&self, request: &DownloadRequest) -> ClipperResult<PathBuf> {
        self.checker
            .require(&[self.config.downloader.as_str(), self.config.transcoder.as_str()])?;
        create_output_directory(&request.outdir)?;

        let selector = FormatSelectorPolicy::selector(request.mode, request.quality, &request.container);
        let stem = download_stem();
        let source = self
            .acquirer
            .acquire(&request.url, &request.outdir, &stem, &selector)
            .await?;

        info!("Saved {}", source.path().display());
        Ok(source.path().to_path_buf())
    }
}

/// Timestamped stem so repeated downloads never collide
fn download_stem() -> String {
    format!("video_{}", Local::now().format("%Y%m%d_%H%M%S_%3f"))
}
