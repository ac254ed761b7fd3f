pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::ConverterConfig;
#[cfg(feature = "cli")]
use crate::domain::ports::SameUnitPolicy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "universal-converter")]
#[command(about = "Convert quantities between units with a step-by-step derivation")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    /// Override display.linear_decimals
    #[arg(long, global = true)]
    pub linear_decimals: Option<usize>,

    /// Override display.temperature_decimals
    #[arg(long, global = true)]
    pub temperature_decimals: Option<usize>,

    /// Return the input unchanged instead of rejecting identical units
    #[arg(long, global = true)]
    pub allow_same_unit: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List measurement domains
    Domains,

    /// List the units of a domain with their factors
    Units { domain: String },

    /// Convert a single value
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Measurement domain (defaults to session.default_domain)
        #[arg(short, long)]
        domain: Option<String>,

        /// Source unit (defaults to the domain's first unit)
        #[arg(long)]
        from: Option<String>,

        /// Target unit (defaults to the domain's second unit)
        #[arg(long)]
        to: Option<String>,
    },

    /// Interactive session reading commands from stdin
    Repl {
        /// Export the session history when the session ends
        #[arg(long)]
        export: bool,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> Result<ConverterConfig> {
        let mut config = match &self.config {
            Some(path) => ConverterConfig::from_file(path)?,
            None => ConverterConfig::default(),
        };

        // 應用命令列覆蓋設定
        if let Some(decimals) = self.linear_decimals {
            config.display.linear_decimals = decimals;
        }
        if let Some(decimals) = self.temperature_decimals {
            config.display.temperature_decimals = decimals;
        }
        if self.allow_same_unit {
            config.session.same_unit_policy = SameUnitPolicy::Identity;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_with_negative_value() {
        let cli = CliConfig::try_parse_from([
            "universal-converter",
            "convert",
            "-5",
            "--domain",
            "Temperature",
            "--from",
            "C",
            "--to",
            "K",
        ])
        .unwrap();

        match cli.command {
            Command::Convert { value, domain, from, to } => {
                assert_eq!(value, "-5");
                assert_eq!(domain.as_deref(), Some("Temperature"));
                assert_eq!(from.as_deref(), Some("C"));
                assert_eq!(to.as_deref(), Some("K"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let cli = CliConfig::try_parse_from([
            "universal-converter",
            "--linear-decimals",
            "2",
            "--allow-same-unit",
            "domains",
        ])
        .unwrap();

        let config = cli.resolve().unwrap();
        assert_eq!(config.display.linear_decimals, 2);
        assert_eq!(config.display.temperature_decimals, 4);
        assert_eq!(config.session.same_unit_policy, SameUnitPolicy::Identity);
    }
}
