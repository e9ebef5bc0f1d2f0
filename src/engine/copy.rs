//! Stream copy implementation

use std::path::Path;

use crate::domain::model::ClipRange;
use crate::ports::Invocation;

/// Stream copy clipper for lossless operations
///
/// Seeks before opening the input, so the cut lands on the keyframe at or
/// before `start`. Codecs must already suit the output container.
pub struct StreamCopyClipper;

impl StreamCopyClipper {
    /// `-hide_banner -n -ss S -i SRC -t D -c copy OUT`
    pub fn invocation(transcoder: &str, source: &Path, range: &ClipRange, output: &Path) -> Invocation {
        Invocation::new(transcoder)
            .args(["-hide_banner", "-n", "-ss"])
            .arg(range.start().to_string())
            .arg("-i")
            .arg(source)
            .arg("-t")
            .arg(range.duration_seconds().to_string())
            .args(["-c", "copy"])
            .arg(output)
    }
}
