//! CLI configuration, populated from environment variables.

/// Runtime configuration for `aweft`.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `AWEFT_LOG` | `activityweft=warn` | `tracing` filter directive, written to stderr |
/// | `AWEFT_COMPACT` | (absent = pretty) | Print JSON on one line (read by clap as `--compact`) |
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Filter directive handed to `tracing_subscriber::EnvFilter`.
    pub log_filter: String,
}

impl CliConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var("AWEFT_LOG").unwrap_or_else(|_| "activityweft=warn".into()),
        }
    }
}
