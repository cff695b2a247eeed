//! HTTP client for the analysis service.
//!
//! Endpoint: POST /analyze with a JSON [`AnalysisRequest`] body.
//! Errors may carry `{ "detail": "..." }`, which becomes the user message.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::AnalysisService;
use crate::config::ResolvedConfig;
use crate::domain::{AnalysisRequest, AnalysisResult};
use crate::error::LensError;

/// Analysis service reached over HTTP
pub struct HttpAnalysisClient {
    endpoint: String,
    client: reqwest::Client,
}

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl HttpAnalysisClient {
    /// Create a client posting to `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create from resolved config
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull a string `detail` out of an error body, if there is one
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(detail) => Some(detail),
        _ => None,
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, LensError> {
        debug!(
            endpoint = %self.endpoint,
            kind = %request.kind,
            data_bytes = request.data.len(),
            "Posting analysis request"
        );

        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Analysis request failed");
                return Err(LensError::analysis(None));
            }
        };

        let status = response.status();
        if status.is_success() {
            // Any JSON body is accepted; only a non-JSON body is an error
            return response
                .json::<Value>()
                .await
                .map(AnalysisResult::from_value)
                .map_err(|e| {
                    warn!(error = %e, "Analysis result is not JSON");
                    LensError::analysis(None)
                });
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Analysis service returned an error");
        Err(LensError::analysis(extract_detail(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Image too large"}"#),
            Some("Image too large".to_string())
        );
        assert_eq!(extract_detail(r#"{"error": "nope"}"#), None);
        assert_eq!(extract_detail("<html>Bad Gateway</html>"), None);
        // Structured validation details are not a single line
        assert_eq!(
            extract_detail(r#"{"detail": [{"loc": ["body", "data"], "msg": "field required"}]}"#),
            None
        );
    }

    #[test]
    fn test_client_endpoint() {
        let client = HttpAnalysisClient::new("http://localhost:8000/analyze");
        assert_eq!(client.endpoint(), "http://localhost:8000/analyze");
        assert_eq!(client.name(), "http");
    }
}
