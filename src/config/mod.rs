pub mod toml_config;

use crate::core::presenter::DisplayZone;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_IP_SERVICE: &str = "https://api.ipify.org";
pub const DEFAULT_GEO_SERVICE: &str = "https://ipvigilante.com";
pub const DEFAULT_PASS_SERVICE: &str = "http://api.open-notify.org/iss-pass.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "iss-flyover")]
#[command(about = "Shows when the ISS will next pass over your current location")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "IP echo service URL")]
    pub ip_service: Option<String>,

    #[arg(long, help = "Geolocation service base URL")]
    pub geo_service: Option<String>,

    #[arg(long, help = "ISS pass prediction service URL")]
    pub pass_service: Option<String>,

    #[arg(long, help = "Request timeout in seconds (none unless set)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "User-Agent header sent with every request")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Render pass times in UTC instead of local time")]
    pub utc: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run the full lookup and list upcoming passes (default)
    Next,
    /// Only look up the public IP address
    Ip,
    /// Look up coordinates for an IP (your own if omitted)
    Coords {
        #[arg(long)]
        ip: Option<String>,
    },
    /// Look up passes for explicit coordinates
    Passes {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyoverConfig {
    pub ip_service: String,
    pub geo_service: String,
    pub pass_service: String,
    /// `None` leaves reqwest without a request timeout.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
    pub utc: bool,
}

impl Default for FlyoverConfig {
    fn default() -> Self {
        Self {
            ip_service: DEFAULT_IP_SERVICE.to_string(),
            geo_service: DEFAULT_GEO_SERVICE.to_string(),
            pass_service: DEFAULT_PASS_SERVICE.to_string(),
            timeout_seconds: None,
            user_agent: format!("iss-flyover/{}", env!("CARGO_PKG_VERSION")),
            utc: false,
        }
    }
}

impl FlyoverConfig {
    /// Loads the config file named by `--config`, if any, and merges it.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };
        Ok(Self::from_sources(cli, file.as_ref()))
    }

    /// Flag beats file beats default.
    pub fn from_sources(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        Self {
            ip_service: cli
                .ip_service
                .clone()
                .or(file.services.ip)
                .unwrap_or(defaults.ip_service),
            geo_service: cli
                .geo_service
                .clone()
                .or(file.services.geo)
                .unwrap_or(defaults.geo_service),
            pass_service: cli
                .pass_service
                .clone()
                .or(file.services.pass)
                .unwrap_or(defaults.pass_service),
            timeout_seconds: cli.timeout.or(file.http.timeout_seconds),
            user_agent: cli
                .user_agent
                .clone()
                .or(file.http.user_agent)
                .unwrap_or(defaults.user_agent),
            utc: cli.utc || file.output.utc.unwrap_or(defaults.utc),
        }
    }

    pub fn display_zone(&self) -> DisplayZone {
        if self.utc {
            DisplayZone::Utc
        } else {
            DisplayZone::Local
        }
    }
}

impl ConfigProvider for FlyoverConfig {
    fn ip_service(&self) -> &str {
        &self.ip_service
    }

    fn geo_service(&self) -> &str {
        &self.geo_service
    }

    fn pass_service(&self) -> &str {
        &self.pass_service
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for FlyoverConfig {
    fn validate(&self) -> Result<()> {
        validate_url("services.ip", &self.ip_service)?;
        validate_url("services.geo", &self.geo_service)?;
        validate_url("services.pass", &self.pass_service)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }
        validate_non_empty_string("http.user_agent", &self.user_agent)?;
        Ok(())
    }
}
