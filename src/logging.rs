use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use env_logger::Builder;

/// Logging configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to include timestamps
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Per-module level overrides, e.g. {"playcontrol::player": "debug"}
    #[serde(default)]
    pub modules: std::collections::HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timestamps() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_timestamps(),
            modules: std::collections::HashMap::new(),
        }
    }
}

/// Parse a level string, falling back to Info on unknown values
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        other => {
            warn!("unknown log level '{}', using info", other);
            LevelFilter::Info
        }
    }
}

/// Initialize the global logger from the configuration.
///
/// Must be called once, before any log output is produced.
pub fn init_logging(config: &LoggingConfig) {
    let mut builder = Builder::new();
    builder.filter_level(parse_level(&config.level));

    for (module, level) in &config.modules {
        builder.filter_module(module, parse_level(level));
    }

    if config.timestamps {
        builder.format_timestamp_secs();
    } else {
        builder.format_timestamp(None);
    }

    builder.init();
}
