//! videoclipper
//!
//! Cut clips out of online or local videos.
//!
//! # Usage
//!
//! ```bash
//! videoclipper url "https://www.youtube.com/watch?v=..." 1:00 1:30
//! videoclipper url "https://www.youtube.com/watch?v=..." --clips "0-10,2:00-2:15" --reencode --720p
//! videoclipper clip movie.mp4 --clips "0-10,20-30"
//! videoclipper download "https://www.youtube.com/watch?v=..." --1080p
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use videoclipper::adapters::{LogSettings, TracingLogAdapter};
use videoclipper::app::DefaultAppContainer;
use videoclipper::cli::{commands, Cli};
use videoclipper::config_initialization::initialize_configuration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match initialize_configuration(&cli.overrides(), |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    TracingLogAdapter::init(&LogSettings::from(&config.logging));
    debug!("Configuration: {:?}", config);

    let container = DefaultAppContainer::new(&config);
    let as_json = cli.json;

    match commands::execute(cli.command, &config, &container).await {
        Ok(outputs) => match commands::report_success(&outputs, as_json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: failed to write results: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            commands::report_failure(&e, as_json);
            ExitCode::FAILURE
        }
    }
}
