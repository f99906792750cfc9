use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WxPayError;

/// Channel through which the payer completes the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    /// Web page inside the WeChat in-app browser. Requires the payer's `openid`.
    #[serde(rename = "JSAPI")]
    Jsapi,
    /// Native mobile app through the WeChat SDK.
    #[serde(rename = "APP")]
    App,
    /// QR code scanned by the payer. Requires a `product_id`.
    #[serde(rename = "NATIVE")]
    Native,
}

impl TradeType {
    /// Wire value used in the `trade_type` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Jsapi => "JSAPI",
            TradeType::App => "APP",
            TradeType::Native => "NATIVE",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = WxPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JSAPI" => Ok(TradeType::Jsapi),
            "APP" => Ok(TradeType::App),
            "NATIVE" => Ok(TradeType::Native),
            other => Err(WxPayError::Parse(format!("unknown trade type '{other}'"))),
        }
    }
}
