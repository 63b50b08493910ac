use crate::adapters::ReqwestClient;
use crate::config::{CliConfig, Command, FlyoverConfig};
use crate::core::pipeline::FlyoverPipeline;
use crate::core::presenter::{write_pass_times, DisplayZone};
use crate::domain::model::{Coordinates, IpAddress, PassWindow};
use crate::utils::error::{FlyoverError, Result};
use crate::utils::validation::{validate_latitude, validate_longitude, Validate};
use serde::Serialize;
use std::io::Write;

pub const EXIT_SUCCESS: i32 = 0;
/// Every failure kind exits with the same code.
pub const EXIT_FAILURE: i32 = 1;

/// Runs one CLI invocation: results go to `out`, failures to `err`.
/// Returns the process exit code.
pub async fn run<O: Write, E: Write>(cli: &CliConfig, out: &mut O, err: &mut E) -> i32 {
    let config = match FlyoverConfig::load(cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            report_failure(&e, err);
            return EXIT_FAILURE;
        }
    };

    let command = cli.command.clone().unwrap_or(Command::Next);

    match execute(&config, &command, cli.json, out).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!(
                "❌ Lookup failed: {} (Category: {:?}, Stage: {:?})",
                e,
                e.category(),
                e.stage()
            );
            report_failure(&e, err);
            EXIT_FAILURE
        }
    }
}

pub async fn execute<O: Write>(
    config: &FlyoverConfig,
    command: &Command,
    json: bool,
    out: &mut O,
) -> Result<()> {
    let client = ReqwestClient::new(config)?;
    let pipeline = FlyoverPipeline::new(client, config)?;
    let zone = config.display_zone();

    match command {
        Command::Next => {
            let report = pipeline.run().await?;
            if json {
                write_json(out, &report)?;
            } else {
                show_passes(out, &report.passes, zone)?;
            }
        }
        Command::Ip => {
            let ip = pipeline.fetch_my_ip().await?;
            if json {
                write_json(out, &serde_json::json!({ "ip": ip }))?;
            } else {
                writeln!(out, "It worked! Returned IP: {}", ip)?;
            }
        }
        Command::Coords { ip } => {
            let ip = match ip {
                Some(raw) => IpAddress::new(raw).ok_or_else(|| FlyoverError::InvalidConfigValue {
                    field: "--ip".to_string(),
                    value: raw.clone(),
                    reason: "IP address cannot be empty".to_string(),
                })?,
                None => pipeline.fetch_my_ip().await?,
            };
            let coordinates = pipeline.fetch_coords_by_ip(&ip).await?;
            if json {
                write_json(out, &coordinates)?;
            } else {
                writeln!(out, "It worked! Returned coordinates: {}", coordinates)?;
            }
        }
        Command::Passes { lat, lon } => {
            validate_latitude("--lat", *lat)?;
            validate_longitude("--lon", *lon)?;
            let passes = pipeline
                .fetch_flyover_times(&Coordinates::new(*lat, *lon))
                .await?;
            if json {
                write_json(out, &passes)?;
            } else {
                show_passes(out, &passes, zone)?;
            }
        }
    }

    Ok(())
}

pub fn report_failure<E: Write>(error: &FlyoverError, err: &mut E) {
    // nowhere left to report a failing stderr
    let _ = writeln!(err, "It didn't work! {}", error);
    let _ = writeln!(err, "💡 {}", error.recovery_suggestion());
}

fn show_passes<O: Write>(out: &mut O, passes: &[PassWindow], zone: DisplayZone) -> Result<()> {
    if passes.is_empty() {
        tracing::warn!("No upcoming passes returned for this location");
    }
    write_pass_times(out, passes, zone)?;
    Ok(())
}

fn write_json<O: Write, T: Serialize>(out: &mut O, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
