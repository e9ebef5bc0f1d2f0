use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use videoclipper::app::{
    AppContainer, DefaultAppContainer, DownloadRequest, LocalClipRequest, UrlClipRequest,
};
use videoclipper::engine::EngineConfig;
use videoclipper::ports::{ExitReport, Invocation, ProcessPort};
use videoclipper::*;

/// Test doubles for the external tools
mod test_utils {
    use super::*;

    /// What the fake downloader leaves behind
    #[derive(Clone)]
    pub enum Download {
        /// Write `<stem>.<ext>` from the `-o` template
        Writes(&'static str),
        /// Exit non-zero without writing
        Fails(i32),
        /// Exit zero without writing
        Nothing,
    }

    /// Process port that fakes yt-dlp and ffmpeg by writing files
    pub struct ScriptedProcess {
        pub available: Vec<&'static str>,
        pub download: Download,
        /// 1-based transcoder call that exits non-zero
        pub fail_transcode_at: Option<usize>,
        pub calls: Mutex<Vec<Invocation>>,
    }

    impl ScriptedProcess {
        pub fn new(download: Download) -> Self {
            Self {
                available: vec!["yt-dlp", "ffmpeg"],
                download,
                fail_transcode_at: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_transcode_at(mut self, call: usize) -> Self {
            self.fail_transcode_at = Some(call);
            self
        }

        pub fn with_available(mut self, tools: Vec<&'static str>) -> Self {
            self.available = tools;
            self
        }

        pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.program == program)
                .cloned()
                .collect()
        }

        fn fake_download(&self, invocation: &Invocation) -> ExitReport {
            match &self.download {
                Download::Fails(code) => ExitReport::failure(*code),
                Download::Nothing => ExitReport::success(),
                Download::Writes(ext) => {
                    let args = invocation.args_lossy();
                    let template = args
                        .iter()
                        .position(|arg| arg == "-o")
                        .and_then(|index| args.get(index + 1))
                        .expect("downloader called without -o");
                    let target = template.replace("%(ext)s", ext);
                    std::fs::write(target, b"video").unwrap();
                    ExitReport::success()
                }
            }
        }

        fn fake_transcode(&self, invocation: &Invocation, call: usize) -> ExitReport {
            if self.fail_transcode_at == Some(call) {
                return ExitReport::failure(1);
            }
            let output = invocation.args.last().expect("transcoder called without output");
            std::fs::write(output, b"clip").unwrap();
            ExitReport::success()
        }
    }

    #[async_trait]
    impl ProcessPort for ScriptedProcess {
        async fn run(&self, invocation: &Invocation) -> ClipperResult<ExitReport> {
            let transcode_call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(invocation.clone());
                calls.iter().filter(|call| call.program == "ffmpeg").count()
            };

            match invocation.program.as_str() {
                "yt-dlp" => Ok(self.fake_download(invocation)),
                "ffmpeg" => Ok(self.fake_transcode(invocation, transcode_call)),
                other => panic!("unexpected program {}", other),
            }
        }

        fn locate(&self, program: &str) -> Option<PathBuf> {
            self.available
                .contains(&program)
                .then(|| PathBuf::from("/usr/bin").join(program))
        }
    }

    pub fn container(process: &Arc<ScriptedProcess>) -> DefaultAppContainer {
        let port: Arc<dyn ProcessPort> = process.clone();
        DefaultAppContainer::with_process(port, EngineConfig::default())
    }

    pub fn url_request(outdir: &Path, clips: &str, mode: ExtractionMode) -> UrlClipRequest {
        UrlClipRequest {
            url: "https://example.com/watch?v=abc".to_string(),
            ranges: domain::rules::parse_clip_ranges(clips).unwrap(),
            outdir: outdir.to_path_buf(),
            mode,
            format: OutputFormat::parse("mp4").unwrap(),
            quality: QualitySelector::height(480),
        }
    }

    /// Entries left in `dir` that look like work areas
    pub fn work_areas(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().starts_with("videoclipper_"))
                    .unwrap_or(false)
            })
            .collect()
    }
}

use test_utils::*;

#[tokio::test]
async fn test_url_fast_copy_produces_clips_in_order() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().join("clips");
    let process = Arc::new(ScriptedProcess::new(Download::Writes("mp4")));

    let request = url_request(&outdir, "0-10,20-30", ExtractionMode::FastCopy);
    let outputs = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap();

    assert_eq!(
        outputs,
        vec![outdir.join("clip_0_10.mp4"), outdir.join("clip_20_30.mp4")]
    );
    assert!(outputs.iter().all(|path| path.is_file()));
    assert!(work_areas(&outdir).is_empty());

    let downloads = process.calls_to("yt-dlp");
    assert_eq!(downloads.len(), 1);
    let args = downloads[0].args_lossy();
    assert_eq!(args[0..2], ["-f", "best[ext=mp4][height<=480]"]);
    assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc");

    let transcodes = process.calls_to("ffmpeg");
    assert_eq!(transcodes.len(), 2);
    assert!(transcodes[0].args_lossy().contains(&"copy".to_string()));
}

#[tokio::test]
async fn test_format_mismatch_stops_before_extraction() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().to_path_buf();
    let process = Arc::new(ScriptedProcess::new(Download::Writes("webm")));

    let request = url_request(&outdir, "0-10", ExtractionMode::FastCopy);
    let err = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ClipperError::FormatMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::FormatMismatch);
    assert!(process.calls_to("ffmpeg").is_empty());
    assert!(work_areas(&outdir).is_empty());
    assert!(!outdir.join("clip_0_10.mp4").exists());
}

#[tokio::test]
async fn test_reencode_accepts_any_source_container() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().to_path_buf();
    let process = Arc::new(ScriptedProcess::new(Download::Writes("webm")));

    let mut request = url_request(&outdir, "5-15", ExtractionMode::ReEncode);
    request.quality = QualitySelector::any();
    let outputs = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap();

    assert_eq!(outputs, vec![outdir.join("clip_5_15.mp4")]);
    let download_args = process.calls_to("yt-dlp")[0].args_lossy();
    assert_eq!(download_args[1], "best");
    let transcode_args = process.calls_to("ffmpeg")[0].args_lossy();
    assert!(transcode_args.contains(&"libx264".to_string()));
    assert!(transcode_args.contains(&"aac".to_string()));
}

#[tokio::test]
async fn test_failed_clip_keeps_earlier_outputs() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().to_path_buf();
    let process = Arc::new(ScriptedProcess::new(Download::Writes("mp4")).failing_transcode_at(2));

    let request = url_request(&outdir, "0-10,20-30,40-50", ExtractionMode::FastCopy);
    let err = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap_err();

    match &err {
        ClipperError::ExtractionFailed { range, produced, .. } => {
            assert_eq!(*range, ClipRange::new(20, 30).unwrap());
            assert_eq!(produced, &vec![outdir.join("clip_0_10.mp4")]);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(outdir.join("clip_0_10.mp4").is_file());
    assert!(!outdir.join("clip_40_50.mp4").exists());
    assert_eq!(process.calls_to("ffmpeg").len(), 2);
    assert!(work_areas(&outdir).is_empty());
}

#[tokio::test]
async fn test_duplicate_range_reports_earlier_outputs() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("movie.mp4");
    std::fs::write(&source, b"movie").unwrap();
    let outdir = temp.path().join("out");

    let process = Arc::new(ScriptedProcess::new(Download::Nothing));
    let request = LocalClipRequest {
        source,
        ranges: domain::rules::parse_clip_ranges("0-10,0-10").unwrap(),
        outdir: outdir.clone(),
        mode: ExtractionMode::ReEncode,
        format: OutputFormat::parse("mp4").unwrap(),
    };
    let err = container(&process)
        .clip_interactor()
        .clip_from_local_file(&request)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutputAlreadyExists);
    assert_eq!(err.produced(), [outdir.join("clip_0_10.mp4")]);
    assert!(err.to_string().contains("1 earlier clip(s) kept"));
    assert_eq!(std::fs::read(outdir.join("clip_0_10.mp4")).unwrap(), b"clip");
    assert_eq!(process.calls_to("ffmpeg").len(), 1);
}

#[tokio::test]
async fn test_existing_output_is_never_overwritten() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("movie.mp4");
    std::fs::write(&source, b"movie").unwrap();
    let outdir = temp.path().join("out");
    std::fs::create_dir(&outdir).unwrap();
    std::fs::write(outdir.join("clip_0_10.mp4"), b"original").unwrap();

    let process = Arc::new(ScriptedProcess::new(Download::Nothing));
    let request = LocalClipRequest {
        source,
        ranges: vec![ClipRange::new(0, 10).unwrap()],
        outdir: outdir.clone(),
        mode: ExtractionMode::FastCopy,
        format: OutputFormat::parse("mp4").unwrap(),
    };
    let err = container(&process)
        .clip_interactor()
        .clip_from_local_file(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ClipperError::OutputAlreadyExists { .. }));
    assert_eq!(std::fs::read(outdir.join("clip_0_10.mp4")).unwrap(), b"original");
    assert!(process.calls_to("ffmpeg").is_empty());
}

#[tokio::test]
async fn test_missing_tools_are_all_reported_before_side_effects() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().join("never-created");
    let process = Arc::new(ScriptedProcess::new(Download::Writes("mp4")).with_available(vec![]));

    let request = url_request(&outdir, "0-10", ExtractionMode::FastCopy);
    let err = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap_err();

    match err {
        ClipperError::MissingDependency { tools } => {
            assert_eq!(tools, vec!["yt-dlp".to_string(), "ffmpeg".to_string()]);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!outdir.exists());
    assert!(process.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_local_clip_needs_only_transcoder() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("movie.MKV");
    std::fs::write(&source, b"movie").unwrap();
    let outdir = temp.path().join("out");

    let process =
        Arc::new(ScriptedProcess::new(Download::Nothing).with_available(vec!["ffmpeg"]));
    let request = LocalClipRequest {
        source,
        ranges: domain::rules::parse_clip_ranges("0:05-0:10").unwrap(),
        outdir: outdir.clone(),
        mode: ExtractionMode::FastCopy,
        format: OutputFormat::parse("mkv").unwrap(),
    };
    let outputs = container(&process)
        .clip_interactor()
        .clip_from_local_file(&request)
        .await
        .unwrap();

    assert_eq!(outputs, vec![outdir.join("clip_5_10.mkv")]);
    assert!(process.calls_to("yt-dlp").is_empty());
}

#[tokio::test]
async fn test_local_clip_missing_source() {
    let temp = TempDir::new().unwrap();
    let process = Arc::new(ScriptedProcess::new(Download::Nothing));
    let request = LocalClipRequest {
        source: temp.path().join("absent.mp4"),
        ranges: vec![ClipRange::new(0, 1).unwrap()],
        outdir: temp.path().join("out"),
        mode: ExtractionMode::ReEncode,
        format: OutputFormat::parse("mp4").unwrap(),
    };
    let err = container(&process)
        .clip_interactor()
        .clip_from_local_file(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ClipperError::SourceNotFound { .. }));
    assert!(!temp.path().join("out").exists());
}

#[tokio::test]
async fn test_download_failures() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().to_path_buf();

    let process = Arc::new(ScriptedProcess::new(Download::Fails(2)));
    let request = url_request(&outdir, "0-10", ExtractionMode::FastCopy);
    let err = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap_err();
    assert!(matches!(err, ClipperError::DownloadFailed { .. }));
    assert!(err.to_string().contains("exit status 2"));
    assert!(work_areas(&outdir).is_empty());

    let process = Arc::new(ScriptedProcess::new(Download::Nothing));
    let err = container(&process)
        .clip_interactor()
        .clip_from_url(&request)
        .await
        .unwrap_err();
    assert!(matches!(err, ClipperError::DownloadProducedNoFile { .. }));
    assert!(process.calls_to("ffmpeg").is_empty());
    assert!(work_areas(&outdir).is_empty());
}

#[tokio::test]
async fn test_download_only_keeps_file() {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().join("fullvideos");
    let process = Arc::new(ScriptedProcess::new(Download::Writes("mp4")));

    let request = DownloadRequest {
        url: "https://example.com/watch?v=abc".to_string(),
        outdir: outdir.clone(),
        mode: ExtractionMode::FastCopy,
        quality: QualitySelector::height(1080),
        container: OutputFormat::parse("mp4").unwrap(),
    };
    let path = container(&process)
        .download_interactor()
        .download(&request)
        .await
        .unwrap();

    assert!(path.is_file());
    assert_eq!(path.parent().unwrap(), outdir);
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("video_") && name.ends_with(".mp4"), "{}", name);
    assert_eq!(
        process.calls_to("yt-dlp")[0].args_lossy()[1],
        "best[ext=mp4][height<=1080]"
    );
    assert!(process.calls_to("ffmpeg").is_empty());
}

/// End-to-end with the real transcoder; skipped when ffmpeg is not installed
#[tokio::test]
async fn test_reencode_real_ffmpeg() {
    if which::which("ffmpeg").is_err() {
        eprintln!("ffmpeg not found on PATH, skipping");
        return;
    }

    let temp = TempDir::new().unwrap();
    let source = temp.path().join("input.mp4");
    let status = std::process::Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=60:size=320x240:rate=25",
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=1000:duration=60",
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-shortest",
            "-y",
        ])
        .arg(&source)
        .status()
        .unwrap();
    if !status.success() {
        eprintln!("ffmpeg could not build a test video, skipping");
        return;
    }

    let outdir = temp.path().join("clips");
    let config = adapters::ClipperConfig::default();
    let mut tools = config.clone();
    tools.tools.quiet = true;
    let container = DefaultAppContainer::new(&tools);

    let request = LocalClipRequest {
        source,
        ranges: domain::rules::parse_clip_ranges("0-10,20-30").unwrap(),
        outdir: outdir.clone(),
        mode: ExtractionMode::ReEncode,
        format: OutputFormat::parse(&config.defaults.format).unwrap(),
    };
    let outputs = container
        .clip_interactor()
        .clip_from_local_file(&request)
        .await
        .unwrap();

    assert_eq!(
        outputs,
        vec![outdir.join("clip_0_10.mp4"), outdir.join("clip_20_30.mp4")]
    );
    for path in &outputs {
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }
}
