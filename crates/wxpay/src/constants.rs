/// Unified-order endpoint of the production gateway.
pub const UNIFIED_ORDER_URL: &str = "https://api.mch.weixin.qq.com/pay/unifiedorder";

/// Root element of every request and reply body.
pub const XML_ROOT: &str = "xml";

/// Content type the gateway expects on request bodies.
pub const XML_CONTENT_TYPE: &str = "application/xml;charset=utf-8";

/// Parameter that carries a signature. Never part of its own signing input.
pub const SIGN_FIELD: &str = "sign";

/// Signature type announced in the JSAPI handoff.
pub const SIGN_TYPE_MD5: &str = "MD5";

/// Fixed `package` value of the APP handoff.
pub const APP_PACKAGE: &str = "Sign=WXPay";

/// Prefix of the JSAPI handoff `package` value.
pub const PREPAY_ID_PREFIX: &str = "prepay_id=";

/// Gateway's fixed timezone (UTC+08:00), in seconds east of UTC.
pub const GATEWAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Status sentinel shared by `return_code` and `result_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Success,
    Fail,
}

impl ReturnCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnCode::Success => "SUCCESS",
            ReturnCode::Fail => "FAIL",
        }
    }

    /// Exact, case-sensitive comparison against a wire value.
    pub fn matches(&self, value: &str) -> bool {
        value == self.as_str()
    }
}
