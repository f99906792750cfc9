//! Nonce and gateway-clock helpers. All functions are stateless and safe to
//! call from concurrent orders.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use uuid::Uuid;

use crate::constants::GATEWAY_UTC_OFFSET_SECS;

/// Length of tokens produced by [`nonce_str`].
pub const NONCE_LEN: usize = 32;

/// Fresh 32-character random token (lowercase hex, UUID v4).
pub fn nonce_str() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Seconds since the Unix epoch, taken on the gateway's clock.
pub fn gateway_timestamp() -> i64 {
    gateway_now().timestamp()
}

/// Current time in the gateway's fixed UTC+08:00 zone.
pub fn gateway_now() -> DateTime<FixedOffset> {
    to_gateway_time(Utc::now())
}

/// Render a point in time as the gateway's `yyyyMMddHHmmss` order time,
/// as used by `time_start` and `time_expire`.
pub fn format_order_time(at: DateTime<Utc>) -> String {
    to_gateway_time(at).format("%Y%m%d%H%M%S").to_string()
}

fn to_gateway_time(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    // The offset is a constant well inside chrono's +-24h range.
    let offset = FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS)
        .unwrap_or_else(|| Utc.fix());
    at.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_nonce_shape() {
        let nonce = nonce_str();
        assert_eq!(nonce.len(), NONCE_LEN);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_nonces_are_unique() {
        let nonces: HashSet<String> = (0..1000).map(|_| nonce_str()).collect();
        assert_eq!(nonces.len(), 1000);
    }

    #[test]
    fn test_nonce_is_thread_safe() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..100).map(|_| nonce_str()).collect::<Vec<_>>()))
            .collect();
        let mut all = HashSet::new();
        for h in handles {
            all.extend(h.join().unwrap());
        }
        assert_eq!(all.len(), 800);
    }

    #[test]
    fn test_timestamp_is_epoch_seconds() {
        let before = Utc::now().timestamp();
        let ts = gateway_timestamp();
        let after = Utc::now().timestamp();
        assert!(before <= ts && ts <= after);
    }

    #[test]
    fn test_gateway_offset_is_utc_plus_eight() {
        assert_eq!(gateway_now().offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_format_order_time_uses_gateway_zone() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 20, 5, 9).unwrap();
        assert_eq!(format_order_time(at), "20250101040509");
    }
}
