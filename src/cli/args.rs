//! Shared command-line arguments.

use clap::{Args, ValueEnum};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented, human-readable text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Output and diagnostics arguments.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(short = 'O', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl OutputArgs {
    /// Install a stderr `tracing` subscriber.
    ///
    /// `RUST_LOG` takes precedence; otherwise `-v` selects `debug` for this
    /// crate and the default is `warn`.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let default = if self.verbose {
            "snmp_mibs=debug"
        } else {
            "snmp_mibs=warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
