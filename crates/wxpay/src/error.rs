use thiserror::Error;

use crate::trade_type::TradeType;

/// Errors returned by unified-order operations.
#[derive(Debug, Error)]
pub enum WxPayError {
    /// A required payload field is empty. `trade_type` is set when the field
    /// is only required for that trade type.
    #[error("missing required parameter{}: {field}", for_trade_type(.trade_type))]
    MissingField {
        field: &'static str,
        trade_type: Option<TradeType>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// The gateway answered but rejected the order.
    #[error("gateway rejected order ({code}): {description}")]
    Gateway { code: String, description: String },

    #[error("serialization error: {0}")]
    Serialize(String),
}

impl WxPayError {
    pub(crate) fn missing(field: &'static str) -> Self {
        WxPayError::MissingField {
            field,
            trade_type: None,
        }
    }

    pub(crate) fn missing_for(field: &'static str, trade_type: TradeType) -> Self {
        WxPayError::MissingField {
            field,
            trade_type: Some(trade_type),
        }
    }
}

fn for_trade_type(trade_type: &Option<TradeType>) -> String {
    trade_type
        .map(|t| format!(" for {t} payment"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_field() {
        let err = WxPayError::missing("mch_id");
        assert_eq!(err.to_string(), "missing required parameter: mch_id");
    }

    #[test]
    fn missing_field_message_names_trade_type() {
        let err = WxPayError::missing_for("openid", TradeType::Jsapi);
        assert_eq!(
            err.to_string(),
            "missing required parameter for JSAPI payment: openid"
        );
    }

    #[test]
    fn gateway_error_carries_description() {
        let err = WxPayError::Gateway {
            code: "ORDERPAID".to_string(),
            description: "order already paid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "gateway rejected order (ORDERPAID): order already paid"
        );
    }
}
