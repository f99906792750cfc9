use std::env;
use std::time::Duration;
use url::Url;

use crate::constants::UNIFIED_ORDER_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Length of API keys issued by the merchant platform.
const API_KEY_LEN: usize = 32;

/// Merchant credentials and gateway settings.
#[derive(Clone)]
pub struct MerchantConfig {
    /// Application id bound to the merchant account
    pub appid: String,
    /// Merchant id
    pub mch_id: String,
    /// API key used as the signing secret
    pub api_key: String,
    /// Default payment result callback URL
    pub notify_url: String,
    /// Unified-order endpoint
    pub gateway_url: String,
    /// Request timeout applied by the HTTP transport
    pub timeout: Duration,
}

impl std::fmt::Debug for MerchantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantConfig")
            .field("appid", &self.appid)
            .field("mch_id", &self.mch_id)
            .field("api_key", &"[REDACTED]")
            .field("notify_url", &self.notify_url)
            .field("gateway_url", &self.gateway_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MerchantConfig {
    /// Load from `WXPAY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require =
            |name: &'static str| get(name).ok_or(ConfigError::MissingRequired(name));

        let appid = require("WXPAY_APPID")?;
        let mch_id = require("WXPAY_MCH_ID")?;
        let api_key = require("WXPAY_API_KEY")?;

        let notify_url = require("WXPAY_NOTIFY_URL")?;
        Url::parse(&notify_url).map_err(|_| ConfigError::InvalidUrl(notify_url.clone()))?;

        // Optional: gateway endpoint (sandbox or proxy)
        let gateway_url =
            get("WXPAY_GATEWAY_URL").unwrap_or_else(|| UNIFIED_ORDER_URL.to_string());
        Url::parse(&gateway_url).map_err(|_| ConfigError::InvalidUrl(gateway_url.clone()))?;

        let timeout = match get("WXPAY_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidNumber("WXPAY_TIMEOUT_SECS", raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        if api_key.len() != API_KEY_LEN {
            tracing::warn!(
                "WXPAY_API_KEY is {} bytes, expected {}; the gateway will reject signatures \
                 made with a truncated or padded key",
                api_key.len(),
                API_KEY_LEN
            );
        }

        Ok(Self {
            appid,
            mch_id,
            api_key,
            notify_url,
            gateway_url,
            timeout,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid number in {0}: {1}")]
    InvalidNumber(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base() -> HashMap<String, String> {
        vars(&[
            ("WXPAY_APPID", "wx2421b1c4370ec43b"),
            ("WXPAY_MCH_ID", "10000100"),
            ("WXPAY_API_KEY", "192006250b4c09247ec02edce69f6a2d"),
            ("WXPAY_NOTIFY_URL", "https://merchant.example/notify"),
        ])
    }

    fn load(map: &HashMap<String, String>) -> Result<MerchantConfig, ConfigError> {
        MerchantConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&base()).unwrap();
        assert_eq!(cfg.appid, "wx2421b1c4370ec43b");
        assert_eq!(cfg.gateway_url, UNIFIED_ORDER_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_required() {
        for name in ["WXPAY_APPID", "WXPAY_MCH_ID", "WXPAY_API_KEY", "WXPAY_NOTIFY_URL"] {
            let mut map = base();
            map.remove(name);
            match load(&map) {
                Err(ConfigError::MissingRequired(missing)) => assert_eq!(missing, name),
                other => panic!("expected missing {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut map = base();
        map.insert("WXPAY_MCH_ID".to_string(), "  ".to_string());
        assert!(matches!(
            load(&map),
            Err(ConfigError::MissingRequired("WXPAY_MCH_ID"))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut map = base();
        map.insert(
            "WXPAY_GATEWAY_URL".to_string(),
            "https://api.mch.weixin.qq.com/sandboxnew/pay/unifiedorder".to_string(),
        );
        map.insert("WXPAY_TIMEOUT_SECS".to_string(), "5".to_string());
        let cfg = load(&map).unwrap();
        assert!(cfg.gateway_url.contains("sandboxnew"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        let mut map = base();
        map.insert("WXPAY_NOTIFY_URL".to_string(), "not a url".to_string());
        assert!(matches!(load(&map), Err(ConfigError::InvalidUrl(_))));

        let mut map = base();
        map.insert("WXPAY_TIMEOUT_SECS".to_string(), "0".to_string());
        assert!(matches!(
            load(&map),
            Err(ConfigError::InvalidNumber("WXPAY_TIMEOUT_SECS", _))
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let cfg = load(&base()).unwrap();
        let debug = format!("{cfg:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("192006250b4c09247ec02edce69f6a2d"));
    }
}
