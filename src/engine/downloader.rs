//! Source acquisition through the downloader

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::domain::model::Source;
use crate::error::{ClipperError, ClipperResult};
use crate::ports::{Invocation, ProcessPort};

/// File stem used inside a work area
pub const WORK_AREA_STEM: &str = "source";

/// Downloader leftovers that never count as the acquired file
const PARTIAL_SUFFIXES: &[&str] = &[".part", ".ytdl", ".temp"];

/// Downloads one media file into a directory and finds it afterwards
pub struct SourceAcquirer {
    process: Arc<dyn ProcessPort>,
    downloader: String,
}

impl SourceAcquirer {
    pub fn new(process: Arc<dyn ProcessPort>, downloader: impl Into<String>) -> Self {
        Self {
            process,
            downloader: downloader.into(),
        }
    }

    /// `<downloader> -f <selector> -o <dir>/<stem>.%(ext)s -- <url>`
    pub fn invocation(&self, url: &str, dir: &Path, stem: &str, selector: &str) -> Invocation {
        let template = dir.join(format!("{}.%(ext)s", stem));
        Invocation::new(&self.downloader)
            .args(["-f", selector, "-o"])
            .arg(template)
            .arg("--")
            .arg(url)
    }

    /// Download `url` into `dir` as `<stem>.<ext>`, returning that file
    pub async fn acquire(
        &self,
        url: &str,
        dir: &Path,
        stem: &str,
        selector: &str,
    ) -> ClipperResult<Source> {
        info!("Downloading {} with format '{}'", url, selector);

        let report = self
            .process
            .run(&self.invocation(url, dir, stem, selector))
            .await?;
        if !report.success {
            return Err(ClipperError::DownloadFailed {
                url: url.to_string(),
                status: report.to_string(),
            });
        }

        let mut candidates = find_candidates(dir, stem);
        match candidates.len() {
            0 => Err(ClipperError::DownloadProducedNoFile {
                dir: dir.to_path_buf(),
            }),
            1 => {
                let path = candidates.remove(0);
                info!("Downloaded source {}", path.display());
                Ok(Source::new(path))
            }
            _ => {
                warn!("Ambiguous download result: {:?}", candidates);
                Err(ClipperError::MultipleCandidates {
                    dir: dir.to_path_buf(),
                    candidates,
                })
            }
        }
    }
}

/// Files directly in `dir` named `<stem>.*`, sorted, leftovers excluded
pub fn find_candidates(dir: &Path, stem: &str) -> Vec<PathBuf> {
    let prefix = format!("{}.", stem);
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.starts_with(&prefix)
                && name.len() > prefix.len()
                && !PARTIAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
        .map(|entry| entry.into_path())
        .collect();
    found.sort();
    found
}
