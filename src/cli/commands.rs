//! Command implementations

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tracing::{info, warn};

use crate::adapters::ClipperConfig;
use crate::app::{AppContainer, DownloadRequest, LocalClipRequest, UrlClipRequest};
use crate::cli::args::{DownloadArgs, LocalClipArgs, UrlArgs};
use crate::cli::Commands;
use crate::domain::model::{ExtractionMode, OutputFormat, QualitySelector};
use crate::domain::rules::resolve_ranges;
use crate::error::{ClipperError, ClipperResult};

/// Run a parsed command and return every file it produced
pub async fn execute(
    command: Commands,
    config: &ClipperConfig,
    container: &dyn AppContainer,
) -> ClipperResult<Vec<PathBuf>> {
    match command {
        Commands::Url(args) => {
            let request = url_request(args, config)?;
            container.clip_interactor().clip_from_url(&request).await
        }
        Commands::Clip(args) => {
            let request = local_request(args, config)?;
            container.clip_interactor().clip_from_local_file(&request).await
        }
        Commands::Download(args) => {
            let request = download_request(args, config)?;
            let path = container.download_interactor().download(&request).await?;
            Ok(vec![path])
        }
    }
}

/// Validate URL-clip input; nothing touches the filesystem until this succeeds
pub fn url_request(args: UrlArgs, config: &ClipperConfig) -> ClipperResult<UrlClipRequest> {
    let ranges = resolve_ranges(args.start.as_deref(), args.end.as_deref(), args.clips.as_deref())?;
    let format = OutputFormat::parse(args.format.as_deref().unwrap_or(&config.defaults.format))?;
    info!("Clipping {} range(s) from {}", ranges.len(), args.url);

    Ok(UrlClipRequest {
        url: args.url,
        ranges,
        outdir: args.outdir.unwrap_or_else(|| config.defaults.outdir.clone()),
        mode: ExtractionMode::from_reencode_flag(args.reencode),
        format,
        quality: quality(args.quality.selected_height(), config),
    })
}

pub fn local_request(args: LocalClipArgs, config: &ClipperConfig) -> ClipperResult<LocalClipRequest> {
    let ranges = resolve_ranges(args.start.as_deref(), args.end.as_deref(), args.clips.as_deref())?;
    let format = OutputFormat::parse(args.format.as_deref().unwrap_or(&config.defaults.format))?;

    Ok(LocalClipRequest {
        source: args.source,
        ranges,
        outdir: args.outdir.unwrap_or_else(|| config.defaults.outdir.clone()),
        mode: ExtractionMode::from_reencode_flag(args.reencode),
        format,
    })
}

pub fn download_request(args: DownloadArgs, config: &ClipperConfig) -> ClipperResult<DownloadRequest> {
    Ok(DownloadRequest {
        url: args.url,
        outdir: args
            .outdir
            .unwrap_or_else(|| config.defaults.download_outdir.clone()),
        mode: ExtractionMode::from_reencode_flag(args.reencode),
        quality: quality(args.quality.selected_height(), config),
        container: OutputFormat::parse(&config.defaults.format)?,
    })
}

fn quality(flag: Option<u32>, config: &ClipperConfig) -> QualitySelector {
    match flag.or(config.defaults.quality_height) {
        Some(height) => QualitySelector::height(height),
        None => QualitySelector::any(),
    }
}

/// Print produced paths, one per line or as a JSON document
pub fn report_success(outputs: &[PathBuf], as_json: bool) -> std::io::Result<()> {
    write_outputs(&mut std::io::stdout().lock(), outputs, as_json)
}

fn write_outputs(out: &mut impl Write, outputs: &[PathBuf], as_json: bool) -> std::io::Result<()> {
    if as_json {
        writeln!(out, "{}", json!({ "outputs": outputs }))?;
    } else {
        for path in outputs {
            writeln!(out, "{}", path.display())?;
        }
    }
    out.flush()
}

/// Report a failure on stderr; clips written before it are still listed on stdout
pub fn report_failure(error: &ClipperError, as_json: bool) {
    let produced = error.produced();
    if as_json {
        let body = json!({
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
                "produced": produced,
            }
        });
        eprintln!("{}", body);
    } else {
        if let Err(e) = report_success(produced, false) {
            warn!("Could not list clips written before the failure: {}", e);
        }
        eprintln!("error: {}", error);
    }
}
