use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use crate::constants::{UNIFIED_ORDER_URL, XML_CONTENT_TYPE};
use crate::error::WxPayError;
use crate::transport::Transport;

/// [`Transport`] that POSTs XML bodies to the gateway over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Transport for the production unified-order endpoint.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new(), UNIFIED_ORDER_URL)
    }

    /// Transport with a request timeout, for a custom endpoint.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, WxPayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WxPayError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn post_xml(&self, body: String) -> Result<Vec<u8>, WxPayError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(ACCEPT, "application/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| WxPayError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %self.endpoint, status = %status, "gateway returned non-success status");
            return Err(WxPayError::Transport(format!("gateway returned HTTP {status}")));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| WxPayError::Transport(format!("failed to read reply body: {e}")))?;
        Ok(bytes.to_vec())
    }
}
