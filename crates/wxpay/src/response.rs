use serde::{Deserialize, Serialize};

use crate::constants::{
    ReturnCode, APP_PACKAGE, PREPAY_ID_PREFIX, SIGN_FIELD, SIGN_TYPE_MD5,
};
use crate::error::WxPayError;
use crate::sign::{self, ParamValue, Params};
use crate::trade_type::TradeType;
use crate::{util, wire};

/// Key under which the JSAPI handoff carries its signature.
pub const PAY_SIGN_FIELD: &str = "paySign";

/// Reply of the unified-order endpoint. Elements the gateway leaves out
/// decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedOrderResponse {
    pub return_code: String,
    pub return_msg: String,
    pub appid: String,
    pub mch_id: String,
    pub nonce_str: String,
    pub sign: String,
    pub result_code: String,
    pub err_code: String,
    pub err_code_des: String,
    /// Session token redeemed by the client SDK. Valid for two hours.
    pub prepay_id: String,
    pub trade_type: String,
    /// QR payload for [`TradeType::Native`].
    pub code_url: String,
}

/// Parameters the client application passes to its local payment SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Handoff {
    /// `WeixinJSBridge` / JSSDK `chooseWXPay` arguments, signed under `paySign`.
    Jsapi(Params),
    /// Mobile SDK `PayReq` fields, signed under `sign`.
    App(Params),
    /// Content of the QR code to display.
    CodeUrl(String),
}

impl UnifiedOrderResponse {
    /// Parse a raw reply body.
    pub fn from_xml(raw: &[u8]) -> Result<Self, WxPayError> {
        wire::read_xml(raw)
    }

    /// Both the transport-level and the business-level code read `SUCCESS`.
    pub fn is_success(&self) -> bool {
        ReturnCode::Success.matches(&self.return_code)
            && ReturnCode::Success.matches(&self.result_code)
    }

    /// Declared trade type, or `None` if absent or unrecognised.
    pub fn trade_type(&self) -> Option<TradeType> {
        self.trade_type.parse().ok()
    }

    /// Error to report for an unsuccessful reply.
    pub fn to_error(&self) -> WxPayError {
        let code = [&self.err_code, &self.return_code]
            .into_iter()
            .find(|c| !c.is_empty())
            .cloned()
            .unwrap_or_else(|| ReturnCode::Fail.as_str().to_string());
        let description = [&self.err_code_des, &self.return_msg]
            .into_iter()
            .find(|d| !d.is_empty())
            .cloned()
            .unwrap_or_else(|| "unified order failed".to_string());
        WxPayError::Gateway { code, description }
    }

    /// Build the client handoff for `trade_type`.
    ///
    /// Returns `None` when the reply was issued for a different trade type;
    /// callers treat that as "not applicable" rather than as a failure.
    pub fn handoff(&self, trade_type: TradeType, secret_key: &str) -> Option<Handoff> {
        self.handoff_at(
            trade_type,
            secret_key,
            util::gateway_timestamp(),
            &util::nonce_str(),
        )
    }

    /// JSAPI handoff, or `None` if this is not a JSAPI reply.
    pub fn jsapi(&self, secret_key: &str) -> Option<Params> {
        match self.handoff(TradeType::Jsapi, secret_key)? {
            Handoff::Jsapi(params) => Some(params),
            _ => None,
        }
    }

    /// APP handoff, or `None` if this is not an APP reply.
    pub fn app(&self, secret_key: &str) -> Option<Params> {
        match self.handoff(TradeType::App, secret_key)? {
            Handoff::App(params) => Some(params),
            _ => None,
        }
    }

    /// QR code content, or `None` if this is not a NATIVE reply.
    pub fn native(&self) -> Option<&str> {
        (self.trade_type() == Some(TradeType::Native)).then_some(self.code_url.as_str())
    }

    pub(crate) fn handoff_at(
        &self,
        trade_type: TradeType,
        secret_key: &str,
        timestamp: i64,
        nonce: &str,
    ) -> Option<Handoff> {
        let declared = self.trade_type()?;
        if declared != trade_type {
            return None;
        }
        let handoff = match declared {
            TradeType::Jsapi => Handoff::Jsapi(self.jsapi_params(secret_key, timestamp, nonce)),
            TradeType::App => Handoff::App(self.app_params(secret_key, timestamp, nonce)),
            TradeType::Native => Handoff::CodeUrl(self.code_url.clone()),
        };
        Some(handoff)
    }

    fn jsapi_params(&self, secret_key: &str, timestamp: i64, nonce: &str) -> Params {
        let mut params = Params::new();
        params.insert("appId".to_string(), self.appid.as_str().into());
        params.insert("timeStamp".to_string(), timestamp.into());
        params.insert("nonceStr".to_string(), nonce.into());
        params.insert(
            "package".to_string(),
            format!("{PREPAY_ID_PREFIX}{}", self.prepay_id).into(),
        );
        params.insert("signType".to_string(), SIGN_TYPE_MD5.into());
        let pay_sign = sign::sign(&params, secret_key);
        params.insert(PAY_SIGN_FIELD.to_string(), pay_sign.into());
        params
    }

    fn app_params(&self, secret_key: &str, timestamp: i64, nonce: &str) -> Params {
        let mut params = Params::new();
        params.insert("appid".to_string(), self.appid.as_str().into());
        params.insert("partnerid".to_string(), self.mch_id.as_str().into());
        params.insert("package".to_string(), APP_PACKAGE.into());
        params.insert("timestamp".to_string(), timestamp.into());
        params.insert("noncestr".to_string(), nonce.into());
        params.insert("prepayid".to_string(), self.prepay_id.as_str().into());
        let signature = sign::sign(&params, secret_key);
        params.insert(SIGN_FIELD.to_string(), ParamValue::Text(signature));
        params
    }
}

/// Check the gateway's signature over every element of a raw reply.
///
/// Works on the raw body rather than [`UnifiedOrderResponse`] so that
/// elements the record does not model are still covered.
pub fn verify_reply(raw: &[u8], secret_key: &str) -> Result<bool, WxPayError> {
    let params = wire::read_params(raw)?;
    let presented = params
        .get(SIGN_FIELD)
        .and_then(ParamValue::as_text)
        .unwrap_or_default();
    if presented.is_empty() {
        return Ok(false);
    }
    Ok(sign::verify(&params, secret_key, presented))
}
