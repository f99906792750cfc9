//! XML body encoding for the gateway.
//!
//! Requests are written element by element from an ordered field list so
//! that omission of empty values stays an explicit rule. Replies are read
//! with serde.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use crate::constants::XML_ROOT;
use crate::error::WxPayError;
use crate::sign::{ParamValue, Params};

/// Write `<xml>` with one child element per non-empty field, in list order.
pub fn write_xml<'a, I>(fields: I) -> Result<String, WxPayError>
where
    I: IntoIterator<Item = (&'a str, &'a ParamValue)>,
{
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Start(BytesStart::new(XML_ROOT)))
        .map_err(serialize_err)?;
    for (name, value) in fields.into_iter().filter(|(_, v)| !v.is_empty()) {
        let text = value.to_string();
        writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(serialize_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(serialize_err)?;
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(serialize_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(XML_ROOT)))
        .map_err(serialize_err)?;

    String::from_utf8(writer.into_inner()).map_err(serialize_err)
}

/// Decode a reply body into a typed record. Elements missing from the body
/// fall back to the record's serde defaults.
pub fn read_xml<T: DeserializeOwned>(raw: &[u8]) -> Result<T, WxPayError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| WxPayError::Parse(format!("reply is not UTF-8: {e}")))?;
    quick_xml::de::from_str(text).map_err(|e| WxPayError::Parse(format!("malformed reply: {e}")))
}

/// Decode a flat reply body into a generic parameter set, keeping every
/// element the gateway sent. Used to check reply signatures.
pub fn read_params(raw: &[u8]) -> Result<Params, WxPayError> {
    let flat: BTreeMap<String, String> = read_xml(raw)?;
    Ok(flat
        .into_iter()
        .map(|(k, v)| (k, ParamValue::Text(v)))
        .collect())
}

fn serialize_err(e: impl std::fmt::Display) -> WxPayError {
    WxPayError::Serialize(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_skips_empty_values() {
        let appid = ParamValue::from("wx1");
        let attach = ParamValue::from("");
        let fee = ParamValue::Int(0);
        let xml = write_xml([("appid", &appid), ("attach", &attach), ("total_fee", &fee)]).unwrap();
        assert_eq!(xml, "<xml><appid>wx1</appid></xml>");
    }

    #[test]
    fn test_write_keeps_list_order() {
        let b = ParamValue::from("2");
        let a = ParamValue::Int(1);
        let xml = write_xml([("b", &b), ("a", &a)]).unwrap();
        assert_eq!(xml, "<xml><b>2</b><a>1</a></xml>");
    }

    #[test]
    fn test_write_escapes_text() {
        let body = ParamValue::from("Tom & Jerry <3");
        let xml = write_xml([("body", &body)]).unwrap();
        assert_eq!(xml, "<xml><body>Tom &amp; Jerry &lt;3</body></xml>");
    }

    #[test]
    fn test_read_params_accepts_cdata() {
        let raw = b"<xml><return_code><![CDATA[SUCCESS]]></return_code><appid>wx1</appid></xml>";
        let params = read_params(raw).unwrap();
        assert_eq!(params["return_code"], ParamValue::from("SUCCESS"));
        assert_eq!(params["appid"], ParamValue::from("wx1"));
    }

    #[test]
    fn test_read_rejects_non_utf8() {
        let err = read_params(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, WxPayError::Parse(_)));
    }
}
