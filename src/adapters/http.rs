use crate::domain::ports::{ConfigProvider, HttpClient, HttpResponse};
use crate::utils::error::{FlyoverError, Result, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// `HttpClient` backed by reqwest with rustls.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FlyoverError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("Response status: {}", status);
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
