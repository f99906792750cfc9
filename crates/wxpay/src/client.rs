//! Unified-order flow: validate, sign, transmit, parse, check.
//!
//! One attempt per call. Every step stops at its first error and returns it
//! unchanged; no partial response is ever handed back alongside an error.

use crate::config::MerchantConfig;
use crate::error::WxPayError;
use crate::payload::UnifiedOrderPayload;
use crate::response::UnifiedOrderResponse;
use crate::sign;
use crate::transport::Transport;
use crate::util;

/// Create a prepaid order at the gateway.
///
/// On success the reply has been checked with
/// [`UnifiedOrderResponse::is_success`] and is ready for
/// [`UnifiedOrderResponse::handoff`].
pub async fn create_order<T: Transport>(
    transport: &T,
    mut payload: UnifiedOrderPayload,
    secret_key: &str,
) -> Result<UnifiedOrderResponse, WxPayError> {
    payload.validate()?;

    // Any caller-supplied signature is ignored by the signer; overwrite it.
    payload.sign = sign::sign(&payload.to_params(), secret_key);
    let body = payload.to_xml()?;

    let trade_type = payload.trade_type.map(|t| t.as_str()).unwrap_or_default();
    tracing::debug!(
        out_trade_no = %payload.out_trade_no,
        trade_type = %trade_type,
        total_fee = payload.total_fee,
        "submitting unified order"
    );

    let raw = transport.post_xml(body).await?;
    let response = UnifiedOrderResponse::from_xml(&raw)?;

    if !response.is_success() {
        let err = response.to_error();
        tracing::warn!(
            out_trade_no = %payload.out_trade_no,
            return_code = %response.return_code,
            result_code = %response.result_code,
            error = %err,
            "unified order rejected"
        );
        return Err(err);
    }

    tracing::info!(
        out_trade_no = %payload.out_trade_no,
        trade_type = %response.trade_type,
        "unified order created"
    );
    Ok(response)
}

/// Merchant-bound client: fills the merchant identity into each order and
/// signs with the merchant API key.
pub struct WxPayClient<T: Transport> {
    transport: T,
    config: MerchantConfig,
}

impl<T: Transport> WxPayClient<T> {
    pub fn new(config: MerchantConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &MerchantConfig {
        &self.config
    }

    /// Fill `appid`, `mch_id`, `notify_url` and `nonce_str` where the
    /// caller left them empty.
    pub fn prepare(&self, mut payload: UnifiedOrderPayload) -> UnifiedOrderPayload {
        if payload.appid.is_empty() {
            payload.appid = self.config.appid.clone();
        }
        if payload.mch_id.is_empty() {
            payload.mch_id = self.config.mch_id.clone();
        }
        if payload.notify_url.is_empty() {
            payload.notify_url = self.config.notify_url.clone();
        }
        if payload.nonce_str.is_empty() {
            payload.nonce_str = util::nonce_str();
        }
        payload
    }

    /// [`prepare`](Self::prepare) the payload, then run [`create_order`].
    pub async fn create_order(
        &self,
        payload: UnifiedOrderPayload,
    ) -> Result<UnifiedOrderResponse, WxPayError> {
        let payload = self.prepare(payload);
        create_order(&self.transport, payload, &self.config.api_key).await
    }
}
