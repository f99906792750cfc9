use crate::error::WxPayError;
use crate::sign::{ParamValue, Params};
use crate::trade_type::TradeType;
use crate::wire;

/// Create-order request sent to the unified-order endpoint.
///
/// Text fields left empty and a zero `total_fee` are omitted from both the
/// signing input and the XML body. `sign` is filled in by
/// [`crate::client::create_order`] and should be left empty by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedOrderPayload {
    /// Application id issued by the gateway. Required.
    pub appid: String,
    /// Merchant id. Required.
    pub mch_id: String,
    pub device_info: String,
    /// Random token, see [`crate::util::nonce_str`]. Required.
    pub nonce_str: String,
    pub sign: String,
    /// Defaults to MD5 at the gateway when empty.
    pub sign_type: String,
    /// Trade description shown to the payer. Required.
    pub body: String,
    pub detail: String,
    pub attach: String,
    /// Merchant order number. Required.
    pub out_trade_no: String,
    pub fee_type: String,
    /// Amount in the smallest currency unit (fen). Required, non-zero.
    pub total_fee: u32,
    /// Payer's IP address. Required.
    pub spbill_create_ip: String,
    /// `yyyyMMddHHmmss` in gateway time.
    pub time_start: String,
    /// `yyyyMMddHHmmss` in gateway time.
    pub time_expire: String,
    pub goods_tag: String,
    /// Payment result callback URL. Required.
    pub notify_url: String,
    /// Required.
    pub trade_type: Option<TradeType>,
    /// `no_credit` forbids credit cards.
    pub limit_pay: String,
    /// Payer identity. Required for [`TradeType::Jsapi`].
    pub openid: String,
    /// Product identifier. Required for [`TradeType::Native`].
    pub product_id: String,
}

impl UnifiedOrderPayload {
    /// Pre-flight check. Stops at the first missing field; the checking
    /// order is stable so the reported field is deterministic.
    pub fn validate(&self) -> Result<(), WxPayError> {
        let always_required = [
            ("appid", self.appid.is_empty()),
            ("mch_id", self.mch_id.is_empty()),
            ("body", self.body.is_empty()),
            ("nonce_str", self.nonce_str.is_empty()),
            ("out_trade_no", self.out_trade_no.is_empty()),
            ("total_fee", self.total_fee == 0),
            ("spbill_create_ip", self.spbill_create_ip.is_empty()),
            ("notify_url", self.notify_url.is_empty()),
        ];
        if let Some((field, _)) = always_required.iter().find(|(_, missing)| *missing) {
            return Err(WxPayError::missing(*field));
        }

        let trade_type = self
            .trade_type
            .ok_or_else(|| WxPayError::missing("trade_type"))?;
        match trade_type {
            TradeType::Jsapi if self.openid.is_empty() => {
                Err(WxPayError::missing_for("openid", trade_type))
            }
            TradeType::Native if self.product_id.is_empty() => {
                Err(WxPayError::missing_for("product_id", trade_type))
            }
            TradeType::Jsapi | TradeType::Native | TradeType::App => Ok(()),
        }
    }

    /// Non-empty fields by wire name, in schema order.
    pub fn fields(&self) -> Vec<(&'static str, ParamValue)> {
        let trade_type = self.trade_type.map(|t| t.as_str()).unwrap_or_default();
        let all: [(&'static str, ParamValue); 21] = [
            ("appid", self.appid.as_str().into()),
            ("mch_id", self.mch_id.as_str().into()),
            ("device_info", self.device_info.as_str().into()),
            ("nonce_str", self.nonce_str.as_str().into()),
            ("sign", self.sign.as_str().into()),
            ("sign_type", self.sign_type.as_str().into()),
            ("body", self.body.as_str().into()),
            ("detail", self.detail.as_str().into()),
            ("attach", self.attach.as_str().into()),
            ("out_trade_no", self.out_trade_no.as_str().into()),
            ("fee_type", self.fee_type.as_str().into()),
            ("total_fee", self.total_fee.into()),
            ("spbill_create_ip", self.spbill_create_ip.as_str().into()),
            ("time_start", self.time_start.as_str().into()),
            ("time_expire", self.time_expire.as_str().into()),
            ("goods_tag", self.goods_tag.as_str().into()),
            ("notify_url", self.notify_url.as_str().into()),
            ("trade_type", trade_type.into()),
            ("limit_pay", self.limit_pay.as_str().into()),
            ("openid", self.openid.as_str().into()),
            ("product_id", self.product_id.as_str().into()),
        ];
        all.into_iter().filter(|(_, v)| !v.is_empty()).collect()
    }

    /// Generic key-value view used as signing input.
    pub fn to_params(&self) -> Params {
        self.fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Request body for the gateway.
    pub fn to_xml(&self) -> Result<String, WxPayError> {
        let fields = self.fields();
        wire::write_xml(fields.iter().map(|(k, v)| (*k, v)))
    }
}
