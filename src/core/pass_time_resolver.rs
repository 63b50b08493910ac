use crate::core::fetch::fetch_json;
use crate::domain::model::{Coordinates, PassWindow, Stage};
use crate::domain::ports::HttpClient;
use crate::utils::error::{FlyoverError, Result};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct PassResponse {
    message: Option<String>,
    reason: Option<String>,
    response: Option<serde_json::Value>,
}

/// Fetches predicted ISS passes for a location from an open-notify style service.
#[derive(Debug, Clone)]
pub struct PassTimeResolver {
    base: Url,
}

impl PassTimeResolver {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn url_for(&self, coordinates: &Coordinates) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coordinates.latitude.to_string())
            .append_pair("lon", &coordinates.longitude.to_string());
        url
    }

    pub async fn resolve<H: HttpClient + ?Sized>(
        &self,
        client: &H,
        coordinates: &Coordinates,
    ) -> Result<Vec<PassWindow>> {
        let url = self.url_for(coordinates);
        let response: PassResponse = fetch_json(client, &url, Stage::PassTimes).await?;

        match response.response {
            Some(raw) => {
                let passes: Vec<PassWindow> = serde_json::from_value(raw).map_err(|e| {
                    FlyoverError::parse(Stage::PassTimes, "response", e.to_string())
                })?;
                tracing::debug!("Received {} pass windows", passes.len());
                Ok(passes)
            }
            None => {
                let reason = match (response.message.as_deref(), response.reason) {
                    (Some("failure"), Some(reason)) => format!("service reported failure: {}", reason),
                    _ => "field is missing".to_string(),
                };
                Err(FlyoverError::parse(Stage::PassTimes, "response", reason))
            }
        }
    }
}
