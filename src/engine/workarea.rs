//! Transient working directory for one URL run

use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{ClipperError, ClipperResult};

const WORK_AREA_PREFIX: &str = "videoclipper_";

/// Scoped directory holding the downloaded source.
///
/// The directory and everything in it is removed when the guard is dropped,
/// on success and on every error path alike.
#[derive(Debug)]
pub struct WorkArea {
    dir: TempDir,
}

impl WorkArea {
    /// Create a fresh work area nested inside `parent`
    pub fn create_in(parent: &Path) -> ClipperResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORK_AREA_PREFIX)
            .tempdir_in(parent)
            .map_err(|e| {
                ClipperError::io(format!("Failed to create work area in {}", parent.display()), e)
            })?;
        debug!("Created work area {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, logging instead of failing on errors
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("Removed work area {}", path.display()),
            Err(e) => warn!("Failed to remove work area {}: {}", path.display(), e),
        }
    }
}
