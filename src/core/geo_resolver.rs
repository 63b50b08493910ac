use crate::core::fetch::fetch_json;
use crate::domain::model::{Coordinates, IpAddress, Stage};
use crate::domain::ports::HttpClient;
use crate::utils::error::{FlyoverError, Result};
use crate::utils::validation::{validate_latitude, validate_longitude};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct GeoResponse {
    data: Option<GeoData>,
}

#[derive(Debug, Deserialize)]
struct GeoData {
    latitude: Option<Degrees>,
    longitude: Option<Degrees>,
}

/// Some geolocation services quote their numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Degrees::Number(n) => *n,
            Degrees::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                FlyoverError::parse(
                    Stage::Coordinates,
                    field,
                    format!("'{}' is not a number: {}", s, e),
                )
            })?,
        };

        if !value.is_finite() {
            return Err(FlyoverError::parse(
                Stage::Coordinates,
                field,
                format!("{} is not a finite number", value),
            ));
        }
        Ok(value)
    }
}

/// Maps an IP address to approximate coordinates via `<base>/<ip>`.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    base: Url,
}

impl GeoResolver {
    pub fn new(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(FlyoverError::InvalidConfigValue {
                field: "services.geo".to_string(),
                value: base.to_string(),
                reason: "URL cannot take a path segment".to_string(),
            });
        }
        Ok(Self { base })
    }

    pub fn url_for(&self, ip: &IpAddress) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(ip.as_str());
        }
        url
    }

    pub async fn resolve<H: HttpClient + ?Sized>(
        &self,
        client: &H,
        ip: &IpAddress,
    ) -> Result<Coordinates> {
        let url = self.url_for(ip);
        let response: GeoResponse = fetch_json(client, &url, Stage::Coordinates).await?;

        let data = response.data.ok_or_else(|| {
            FlyoverError::parse(Stage::Coordinates, "data", "field is missing")
        })?;

        let latitude = data
            .latitude
            .ok_or_else(|| {
                FlyoverError::parse(Stage::Coordinates, "data.latitude", "field is missing")
            })?
            .to_f64("data.latitude")?;
        let longitude = data
            .longitude
            .ok_or_else(|| {
                FlyoverError::parse(Stage::Coordinates, "data.longitude", "field is missing")
            })?
            .to_f64("data.longitude")?;

        validate_latitude("data.latitude", latitude)
            .and_then(|_| validate_longitude("data.longitude", longitude))
            .map_err(|e| match e {
                FlyoverError::InvalidConfigValue { field, reason, .. } => {
                    FlyoverError::parse(Stage::Coordinates, field, reason)
                }
                other => other,
            })?;

        let coordinates = Coordinates::new(latitude, longitude);
        tracing::debug!("Resolved {} to {}", ip, coordinates);
        Ok(coordinates)
    }
}
