use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// One emotion prediction as the server reports it. `confidence` is already
/// a percentage. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub emotion: String,
    pub confidence: f64,
    pub message: String,
}

/// How the form controller reaches the prediction endpoint. Injected so the
/// controller can be driven in tests without a network.
#[async_trait]
pub trait Transport {
    async fn predict(&self, url: &str, content: &str, csrf_token: &str)
        -> Result<PredictionResult>;
}

/// Real transport: form-encoded POST with the CSRF token echoed in the
/// request header, matching what the page script sends.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (cookies, default headers).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn predict(
        &self,
        url: &str,
        content: &str,
        csrf_token: &str,
    ) -> Result<PredictionResult> {
        let response = self
            .client
            .post(url)
            .header("X-CSRFToken", csrf_token)
            .form(&[("content", content)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http(status.as_u16()));
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
