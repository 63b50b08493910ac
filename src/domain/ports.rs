use crate::utils::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound GET capability. Any response, whatever its status, is `Ok`;
/// only failures to obtain one are `Err`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError>;
}

pub trait ConfigProvider: Send + Sync {
    fn ip_service(&self) -> &str;
    fn geo_service(&self) -> &str;
    fn pass_service(&self) -> &str;
    /// `None` means no timeout beyond the HTTP stack's own behavior.
    fn request_timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> &str;
}
