use crate::core::geo_resolver::GeoResolver;
use crate::core::ip_resolver::IpResolver;
use crate::core::pass_time_resolver::PassTimeResolver;
use crate::domain::model::{Coordinates, FlyoverReport, IpAddress, PassWindow};
use crate::domain::ports::{ConfigProvider, HttpClient};
use crate::utils::error::{FlyoverError, Result};
use crate::utils::validation::validate_url;

/// Progress of one lookup. Each state carries what the earlier stages produced.
#[derive(Debug)]
enum RunState {
    AwaitingIp,
    AwaitingCoords {
        ip: IpAddress,
    },
    AwaitingPasses {
        ip: IpAddress,
        coordinates: Coordinates,
    },
    Done(FlyoverReport),
    Failed(FlyoverError),
}

impl RunState {
    fn name(&self) -> &'static str {
        match self {
            RunState::AwaitingIp => "awaiting_ip",
            RunState::AwaitingCoords { .. } => "awaiting_coords",
            RunState::AwaitingPasses { .. } => "awaiting_passes",
            RunState::Done(_) => "done",
            RunState::Failed(_) => "failed",
        }
    }
}

/// Chains IP lookup, geolocation and pass prediction.
///
/// Stages run strictly one after another. The first failing stage ends the
/// run and its error is returned as is; later stages never send a request.
pub struct FlyoverPipeline<H: HttpClient> {
    client: H,
    ip_resolver: IpResolver,
    geo_resolver: GeoResolver,
    pass_resolver: PassTimeResolver,
}

impl<H: HttpClient> FlyoverPipeline<H> {
    pub fn new<C: ConfigProvider>(client: H, config: &C) -> Result<Self> {
        let ip_url = validate_url("services.ip", config.ip_service())?;
        let geo_url = validate_url("services.geo", config.geo_service())?;
        let pass_url = validate_url("services.pass", config.pass_service())?;

        Ok(Self {
            client,
            ip_resolver: IpResolver::new(ip_url),
            geo_resolver: GeoResolver::new(geo_url)?,
            pass_resolver: PassTimeResolver::new(pass_url),
        })
    }

    pub async fn fetch_my_ip(&self) -> Result<IpAddress> {
        self.ip_resolver.resolve(&self.client).await
    }

    pub async fn fetch_coords_by_ip(&self, ip: &IpAddress) -> Result<Coordinates> {
        self.geo_resolver.resolve(&self.client, ip).await
    }

    pub async fn fetch_flyover_times(&self, coordinates: &Coordinates) -> Result<Vec<PassWindow>> {
        self.pass_resolver.resolve(&self.client, coordinates).await
    }

    pub async fn run(&self) -> Result<FlyoverReport> {
        let mut state = RunState::AwaitingIp;

        loop {
            state = match state {
                RunState::AwaitingIp => match self.fetch_my_ip().await {
                    Ok(ip) => {
                        tracing::info!("🌐 Public IP: {}", ip);
                        RunState::AwaitingCoords { ip }
                    }
                    Err(e) => RunState::Failed(e),
                },
                RunState::AwaitingCoords { ip } => match self.fetch_coords_by_ip(&ip).await {
                    Ok(coordinates) => {
                        tracing::info!("📍 Coordinates: {}", coordinates);
                        RunState::AwaitingPasses { ip, coordinates }
                    }
                    Err(e) => RunState::Failed(e),
                },
                RunState::AwaitingPasses { ip, coordinates } => {
                    match self.fetch_flyover_times(&coordinates).await {
                        Ok(passes) => {
                            tracing::info!("🛰️ {} upcoming passes", passes.len());
                            RunState::Done(FlyoverReport {
                                ip,
                                coordinates,
                                passes,
                            })
                        }
                        Err(e) => RunState::Failed(e),
                    }
                }
                RunState::Done(report) => return Ok(report),
                RunState::Failed(e) => {
                    tracing::debug!("Lookup stopped at {:?}", e.stage());
                    return Err(e);
                }
            };
            tracing::debug!("Pipeline state: {}", state.name());
        }
    }

    pub async fn next_passes(&self) -> Result<Vec<PassWindow>> {
        self.run().await.map(|report| report.passes)
    }
}
