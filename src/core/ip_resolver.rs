use crate::core::fetch::fetch_json;
use crate::domain::model::{IpAddress, Stage};
use crate::domain::ports::HttpClient;
use crate::utils::error::{FlyoverError, Result};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: Option<String>,
}

/// Looks up the caller's public IP from an ipify-style echo service.
#[derive(Debug, Clone)]
pub struct IpResolver {
    endpoint: Url,
}

impl IpResolver {
    pub fn new(base: Url) -> Self {
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(key, _)| key != "format")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut endpoint = base;
        endpoint
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("format", "json");

        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn resolve<H: HttpClient + ?Sized>(&self, client: &H) -> Result<IpAddress> {
        let response: IpResponse = fetch_json(client, &self.endpoint, Stage::Ip).await?;

        let ip = response
            .ip
            .as_deref()
            .and_then(IpAddress::new)
            .ok_or_else(|| {
                FlyoverError::parse(Stage::Ip, "ip", "Could not obtain your IP address")
            })?;

        tracing::debug!("Resolved public IP: {}", ip);
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_requests_json_format() {
        let resolver = IpResolver::new(Url::parse("https://api.ipify.org").unwrap());
        assert_eq!(
            resolver.endpoint().as_str(),
            "https://api.ipify.org/?format=json"
        );
    }

    #[test]
    fn test_endpoint_replaces_existing_format() {
        let resolver =
            IpResolver::new(Url::parse("https://echo.example.com/ip?format=text&v=4").unwrap());
        assert_eq!(
            resolver.endpoint().query(),
            Some("v=4&format=json")
        );
    }
}
