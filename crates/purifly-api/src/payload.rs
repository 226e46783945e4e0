// ── Vendor JSON envelope handling ──
//
// Purifier firmware wraps reads in `{"state":{"reported":{...}}}` and
// expects writes as `{"state":{"desired":{...}}}`. Some firmware revisions
// report a bare top-level object instead; both shapes are accepted.

use serde_json::{Value, json};

use crate::client::StatusMap;
use crate::error::ApiError;

/// Decode a raw status payload into the flat key/value status map.
///
/// Accepts either the `state.reported` envelope or a bare JSON object.
pub fn decode_status(payload: &[u8]) -> Result<StatusMap, ApiError> {
    if payload.is_empty() {
        return Err(ApiError::EmptyPayload);
    }

    let value: Value = serde_json::from_slice(payload)?;
    let Value::Object(mut root) = value else {
        return Err(ApiError::MalformedPayload("top level is not an object"));
    };

    match root.remove("state") {
        Some(Value::Object(mut state)) => match state.remove("reported") {
            Some(Value::Object(reported)) => Ok(reported),
            Some(_) => Err(ApiError::MalformedPayload("state.reported is not an object")),
            None => Err(ApiError::MalformedPayload("state envelope without reported")),
        },
        Some(_) => Err(ApiError::MalformedPayload("state is not an object")),
        // No envelope: the object itself is the status map.
        None => Ok(root),
    }
}

/// Encode a control write into the `state.desired` envelope the device
/// expects.
pub fn encode_control(values: &StatusMap) -> Vec<u8> {
    json!({ "state": { "desired": values } }).to_string().into_bytes()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decode_enveloped_status() {
        let raw = json!({
            "state": { "reported": { "name": "Bedroom", "type": "AC2729", "pwr": "1" } }
        })
        .to_string();

        let status = decode_status(raw.as_bytes()).unwrap();
        assert_eq!(status.get("name").unwrap(), "Bedroom");
        assert_eq!(status.get("pwr").unwrap(), "1");
    }

    #[test]
    fn decode_bare_object_status() {
        let raw = json!({ "om": "s", "aqil": 50 }).to_string();

        let status = decode_status(raw.as_bytes()).unwrap();
        assert_eq!(status.get("aqil").unwrap(), 50);
    }

    #[test]
    fn decode_rejects_empty_payload() {
        assert!(matches!(decode_status(b""), Err(ApiError::EmptyPayload)));
    }

    #[test]
    fn decode_rejects_non_object() {
        assert!(matches!(
            decode_status(b"[1,2,3]"),
            Err(ApiError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_rejects_envelope_without_reported() {
        let raw = json!({ "state": { "desired": {} } }).to_string();
        assert!(matches!(
            decode_status(raw.as_bytes()),
            Err(ApiError::MalformedPayload(_))
        ));
    }

    #[test]
    fn encode_wraps_in_desired_envelope() {
        let mut values = StatusMap::new();
        values.insert("pwr".into(), json!("0"));

        let encoded: serde_json::Value =
            serde_json::from_slice(&encode_control(&values)).unwrap();
        assert_eq!(encoded, json!({ "state": { "desired": { "pwr": "0" } } }));
    }
}
