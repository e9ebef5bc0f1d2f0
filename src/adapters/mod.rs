// Adapters - External system implementations

pub mod exec_process;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_process::{ExecProcessAdapter, ToolOutput};
pub use toml_config::{ClipperConfig, TomlConfigAdapter};
pub use tracing_log::{LogSettings, TracingLogAdapter};
