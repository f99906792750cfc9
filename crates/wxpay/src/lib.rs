//! WeChat Pay unified-order client.
//!
//! Creates prepaid orders through the v2 XML API and turns the gateway's
//! reply into the parameters a client needs to finish the payment.
//!
//! # Flow
//!
//! - [`UnifiedOrderPayload::validate`] checks required fields
//! - [`sign::sign`] computes the canonical MD5 signature
//! - a [`Transport`] delivers the XML body ([`HttpTransport`] with `full`)
//! - [`UnifiedOrderResponse::handoff`] builds the JSAPI / APP / NATIVE handoff
//!
//! # Quick example
//!
//! ```no_run
//! use wxpay::{create_order, HttpTransport, TradeType, UnifiedOrderPayload};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let payload = UnifiedOrderPayload {
//!     appid: "wx2421b1c4370ec43b".into(),
//!     mch_id: "10000100".into(),
//!     nonce_str: wxpay::util::nonce_str(),
//!     body: "Coffee".into(),
//!     out_trade_no: "20240101-0001".into(),
//!     total_fee: 1800,
//!     spbill_create_ip: "203.0.113.7".into(),
//!     notify_url: "https://merchant.example/notify".into(),
//!     trade_type: Some(TradeType::Native),
//!     product_id: "sku-42".into(),
//!     ..Default::default()
//! };
//!
//! let response = create_order(&HttpTransport::new(), payload, "YOUR_API_KEY")
//!     .await
//!     .unwrap();
//! println!("scan: {}", response.native().unwrap_or_default());
//! # }
//! ```

// Core types
pub mod constants;
pub mod error;
pub mod payload;
pub mod response;
pub mod sign;
pub mod trade_type;

// Wire format and helpers
pub mod util;
pub mod wire;

// Order flow
pub mod client;
pub mod config;
pub mod transport;

#[cfg(feature = "full")]
pub mod http_client;

// Re-exports
pub use client::{create_order, WxPayClient};
pub use config::{ConfigError, MerchantConfig};
pub use constants::ReturnCode;
pub use error::WxPayError;
pub use payload::UnifiedOrderPayload;
pub use response::{verify_reply, Handoff, UnifiedOrderResponse};
pub use sign::{ParamValue, Params};
pub use trade_type::TradeType;
pub use transport::Transport;

#[cfg(feature = "full")]
pub use http_client::HttpTransport;
