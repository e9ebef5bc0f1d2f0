//! Re-encoding clipping implementation for frame-accurate video clipping

use std::path::Path;

use crate::domain::model::ClipRange;
use crate::ports::Invocation;

/// Re-encoding clipper for frame-accurate clipping when stream copy is not viable
pub struct ReencodeClipper<'a> {
    /// Video encoder passed to `-c:v`
    pub video_codec: &'a str,
    /// Audio encoder passed to `-c:a`
    pub audio_codec: &'a str,
}

impl<'a> ReencodeClipper<'a> {
    pub fn new(video_codec: &'a str, audio_codec: &'a str) -> Self {
        Self {
            video_codec,
            audio_codec,
        }
    }

    /// Seek after `-i` (decode-accurate) and move the index to the front of the file
    pub fn invocation(&self, transcoder: &str, source: &Path, range: &ClipRange, output: &Path) -> Invocation {
        Invocation::new(transcoder)
            .args(["-hide_banner", "-n", "-i"])
            .arg(source)
            .arg("-ss")
            .arg(range.start().to_string())
            .arg("-t")
            .arg(range.duration_seconds().to_string())
            .args(["-c:v", self.video_codec, "-c:a", self.audio_codec])
            .args(["-movflags", "+faststart"])
            .arg(output)
    }
}
