use std::sync::Arc;

use crate::adapters::{ClipperConfig, ExecProcessAdapter, ToolOutput};
use crate::app::{clip_interactor::ClipInteractor, download_interactor::DownloadInteractor};
use crate::engine::EngineConfig;
use crate::ports::ProcessPort;

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn download_interactor(&self) -> Arc<DownloadInteractor>;
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
    download_interactor: Arc<DownloadInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real process adapter from configuration
    pub fn new(config: &ClipperConfig) -> Self {
        let output = if config.tools.quiet {
            ToolOutput::Discard
        } else {
            ToolOutput::Forward
        };
        let process = Arc::new(
            ExecProcessAdapter::new()
                .with_timeout(config.tools.timeout())
                .with_output(output),
        );
        Self::with_process(process, EngineConfig::from(config))
    }

    /// Wire interactors around any process port
    pub fn with_process(process: Arc<dyn ProcessPort>, engine_config: EngineConfig) -> Self {
        let clip_interactor = Arc::new(ClipInteractor::new(
            Arc::clone(&process),
            engine_config.clone(),
        ));
        let download_interactor = Arc::new(DownloadInteractor::new(process, engine_config));

        Self {
            clip_interactor,
            download_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn download_interactor(&self) -> Arc<DownloadInteractor> {
        Arc::clone(&self.download_interactor)
    }
}
