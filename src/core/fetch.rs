use crate::domain::model::Stage;
use crate::domain::ports::HttpClient;
use crate::utils::error::{FlyoverError, Result};
use serde::de::DeserializeOwned;
use url::Url;

/// GET `url` and decode a 200 response body as `T`.
///
/// Transport failures, non-200 statuses and undecodable bodies are reported
/// against `stage` so the caller can tell which step broke.
pub async fn fetch_json<T, H>(client: &H, url: &Url, stage: Stage) -> Result<T>
where
    T: DeserializeOwned,
    H: HttpClient + ?Sized,
{
    tracing::debug!("Fetching {} from: {}", stage, url);

    let response = client
        .get(url)
        .await
        .map_err(|e| FlyoverError::Transport {
            stage,
            message: e.message,
        })?;

    if response.status != 200 {
        tracing::debug!(
            "Unexpected status {} while fetching {}",
            response.status,
            stage
        );
        return Err(FlyoverError::HttpStatus {
            stage,
            code: response.status,
            body: response.body,
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|e| FlyoverError::parse(stage, "body", e.to_string()))
}
