pub mod toml_config;

pub use toml_config::ServiceConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "unimatch")]
#[command(about = "Find universities that match a field of study and a dream country")]
pub struct CliConfig {
    /// Faculty slug, e.g. computer-science
    #[arg(long, required_unless_present = "list_options")]
    pub subject: Option<String>,

    /// Country slug (usa, uk, ...) or name; omit for no preference
    #[arg(long, default_value = "")]
    pub country: String,

    /// TOML service configuration
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Never call the remote provider")]
    pub offline: bool,

    #[arg(long, help = "Skip the simulated latency of local synthesis")]
    pub no_delay: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, help = "List the known subjects and countries")]
    pub list_options: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the file given with `--config` (or defaults), fills the
    /// credential from the environment and applies the CLI switches.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        }
        .with_env_overrides(|name| std::env::var(name).ok());

        if self.offline {
            config.provider.api_key = None;
        }
        if self.no_delay {
            config.synthesis.simulated_latency_ms = 0;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.list_options {
            return Ok(());
        }
        validate_non_empty_string("subject", self.subject.as_deref().unwrap_or_default())
    }
}
