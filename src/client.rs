//! Network boundary to the prediction service.

use futures::future::{FutureExt, LocalBoxFuture};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;

use crate::models::{FormSnapshot, PredictionResult};
use crate::state::FailureKind;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("request failed: {0:#}")]
    Transport(anyhow::Error),
    #[error("server returned {0}")]
    Status(u16),
    #[error("malformed prediction response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PredictError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PredictError::Transport(_) => FailureKind::Transport,
            PredictError::Status(_) => FailureKind::Server,
            PredictError::Decode(_) => FailureKind::Decode,
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::Transport(err.into())
    }
}

/// Something that turns a snapshot into a prediction.
///
/// The returned future owns everything it needs so the caller can hold it
/// past the call that produced it.
pub trait PredictionClient {
    fn predict(
        &self,
        snapshot: FormSnapshot,
    ) -> LocalBoxFuture<'static, Result<PredictionResult, PredictError>>;
}

/// POSTs the snapshot as JSON. No timeout and no retry.
#[derive(Clone)]
pub struct HttpPredictionClient {
    http: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionClient for HttpPredictionClient {
    fn predict(
        &self,
        snapshot: FormSnapshot,
    ) -> LocalBoxFuture<'static, Result<PredictionResult, PredictError>> {
        send(self.http.clone(), self.endpoint.clone(), snapshot).boxed_local()
    }
}

async fn send(
    http: Client,
    endpoint: String,
    snapshot: FormSnapshot,
) -> Result<PredictionResult, PredictError> {
    let body = snapshot.to_json()?;
    let resp = http
        .post(&endpoint)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PredictError::Status(status.as_u16()));
    }

    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_failure_kinds() {
        let decode = serde_json::from_str::<PredictionResult>("<html>").unwrap_err();

        assert_eq!(
            PredictError::Transport(anyhow::anyhow!("connection refused")).kind(),
            FailureKind::Transport
        );
        assert_eq!(PredictError::Status(503).kind(), FailureKind::Server);
        assert_eq!(PredictError::Decode(decode).kind(), FailureKind::Decode);
    }

    #[test]
    fn status_error_names_the_code() {
        assert_eq!(PredictError::Status(500).to_string(), "server returned 500");
    }
}
