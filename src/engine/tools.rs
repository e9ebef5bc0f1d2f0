//! External tool detection

use std::sync::Arc;

use tracing::debug;

use crate::error::{ClipperError, ClipperResult};
use crate::ports::ProcessPort;

/// Verifies external tools are on PATH before any work starts
pub struct DependencyChecker {
    process: Arc<dyn ProcessPort>,
}

impl DependencyChecker {
    pub fn new(process: Arc<dyn ProcessPort>) -> Self {
        Self { process }
    }

    /// Fail with every missing tool named, not just the first
    pub fn require(&self, tools: &[&str]) -> ClipperResult<()> {
        let mut missing = Vec::new();
        for tool in tools {
            match self.process.locate(tool) {
                Some(path) => debug!("Found {} at {}", tool, path.display()),
                None => missing.push(tool.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClipperError::MissingDependency { tools: missing })
        }
    }
}
