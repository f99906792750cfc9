//! Seam between the order flow and the network.
//!
//! See [`crate::http_client::HttpTransport`] for the `reqwest` implementation.

use crate::error::WxPayError;

/// Delivers one request body to the gateway and returns the raw reply body.
///
/// Implementations own endpoint selection, timeouts, and TLS. They must not
/// retry on their own; a failed exchange is reported as
/// [`WxPayError::Transport`] and the caller decides what to do next.
pub trait Transport: Send + Sync {
    fn post_xml(
        &self,
        body: String,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, WxPayError>> + Send;
}
