//! Response envelope codec
//!
//! Every business response from the backend is wrapped in a JSON envelope
//! `{ code, message, data }`. The `code` is a status token with two reserved
//! values: one for success and one for "session not authenticated"; any other
//! value is a generic business error. Bodies without a `code` field (file
//! downloads, streams) carry no envelope at all and must be passed through
//! untouched.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Wire literal for a successful response
pub const SUCCESS_CODE: &str = "00000";

/// Wire literal for "session not authenticated"
pub const NOT_LOGGED_IN_CODE: &str = "B1001";

// =============================================================================
// Status Codes
// =============================================================================

/// Closed enumeration of the envelope status token
///
/// The reserved literals are modeled as dedicated variants so dispatch on
/// them is exhaustive; every other token the backend may mint lands in
/// [`ResponseCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseCode {
    /// The request succeeded; `data` carries the payload
    Ok,
    /// The caller's session is missing or no longer valid
    NotLoggedIn,
    /// Any other business status token
    Other(String),
}

impl From<String> for ResponseCode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            SUCCESS_CODE => ResponseCode::Ok,
            NOT_LOGGED_IN_CODE => ResponseCode::NotLoggedIn,
            _ => ResponseCode::Other(raw),
        }
    }
}

impl From<ResponseCode> for String {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Ok => SUCCESS_CODE.to_string(),
            ResponseCode::NotLoggedIn => NOT_LOGGED_IN_CODE.to_string(),
            ResponseCode::Other(raw) => raw,
        }
    }
}

impl ResponseCode {
    /// The wire form of this code
    pub fn as_str(&self) -> &str {
        match self {
            ResponseCode::Ok => SUCCESS_CODE,
            ResponseCode::NotLoggedIn => NOT_LOGGED_IN_CODE,
            ResponseCode::Other(raw) => raw,
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// The JSON wrapper around every business response
///
/// `data` is only meaningful when `code` is [`ResponseCode::Ok`]; on any
/// other code it is ignored and `message` is the user-facing explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Status token
    pub code: ResponseCode,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Payload; null unless `code` is the success token
    #[serde(default)]
    pub data: serde_json::Value,
}

/// A response body after envelope detection
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// The body carried a well-formed envelope
    Enveloped(Envelope),
    /// No envelope present (binary/stream body); returned as-is
    Raw(Bytes),
}

/// Decode a raw response body into an envelope or a raw passthrough
///
/// A body is enveloped only when it is a JSON object whose `code` field is a
/// string. Anything else, including bodies that are not JSON at all, is a
/// raw passthrough and bypasses code-based classification.
pub fn decode_body(body: &Bytes) -> DecodedBody {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return DecodedBody::Raw(body.clone());
    };
    let has_code = value.get("code").map(|c| c.is_string()).unwrap_or(false);
    if !has_code {
        return DecodedBody::Raw(body.clone());
    }
    match serde_json::from_value::<Envelope>(value) {
        Ok(envelope) => DecodedBody::Enveloped(envelope),
        Err(_) => DecodedBody::Raw(body.clone()),
    }
}

// =============================================================================
// Paged Results
// =============================================================================

/// Generic pagination envelope used by list-returning endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pager<T> {
    /// Page number, starting at 1
    pub current: u64,
    /// Requested page size
    pub size: u64,
    /// Total number of records across all pages
    pub total: u64,
    /// Records on this page; absent on empty pages
    #[serde(default = "Option::default")]
    pub data: Option<Vec<T>>,
}

impl<T> Pager<T> {
    /// Check the pagination invariants: `current >= 1`, `size >= 1` and the
    /// page never holds more records than `size`
    pub fn is_well_formed(&self) -> bool {
        self.current >= 1
            && self.size >= 1
            && self.data.as_ref().map(|d| d.len() as u64).unwrap_or(0) <= self.size
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.data.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_code_reserved_literals() {
        assert_eq!(ResponseCode::from("00000".to_string()), ResponseCode::Ok);
        assert_eq!(
            ResponseCode::from("B1001".to_string()),
            ResponseCode::NotLoggedIn
        );
        assert_eq!(
            ResponseCode::from("B2002".to_string()),
            ResponseCode::Other("B2002".to_string())
        );
    }

    #[test]
    fn test_response_code_round_trip() {
        for raw in ["00000", "B1001", "C0001"] {
            let code = ResponseCode::from(raw.to_string());
            assert_eq!(code.as_str(), raw);
            assert_eq!(String::from(code), raw);
        }
    }

    #[test]
    fn test_envelope_deserialization() {
        let body = json!({
            "code": "00000",
            "message": "ok",
            "data": {"id": "42"}
        });
        let envelope: Envelope = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.code, ResponseCode::Ok);
        assert_eq!(envelope.message, "ok");
        assert_eq!(envelope.data["id"], "42");
    }

    #[test]
    fn test_envelope_null_data_defaults() {
        let body = json!({"code": "B1001", "message": "not logged in"});
        let envelope: Envelope = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.code, ResponseCode::NotLoggedIn);
        assert!(envelope.data.is_null());
    }

    #[test]
    fn test_decode_body_enveloped() {
        let body = Bytes::from(r#"{"code":"00000","message":"ok","data":[1,2,3]}"#);
        match decode_body(&body) {
            DecodedBody::Enveloped(envelope) => {
                assert_eq!(envelope.code, ResponseCode::Ok);
                assert_eq!(envelope.data, json!([1, 2, 3]));
            }
            other => panic!("expected envelope, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_body_json_without_code_is_raw() {
        let body = Bytes::from(r#"{"rows":[],"count":0}"#);
        assert_eq!(decode_body(&body), DecodedBody::Raw(body.clone()));
    }

    #[test]
    fn test_decode_body_numeric_code_is_raw() {
        // Only a string code marks an envelope; a numeric field is someone
        // else's schema.
        let body = Bytes::from(r#"{"code":200,"message":"ok"}"#);
        assert_eq!(decode_body(&body), DecodedBody::Raw(body.clone()));
    }

    #[test]
    fn test_decode_body_binary_is_raw() {
        let body = Bytes::from_static(&[0x1f, 0x8b, 0x08, 0x00, 0xff]);
        assert_eq!(decode_body(&body), DecodedBody::Raw(body.clone()));
    }

    #[test]
    fn test_pager_well_formed() {
        let pager: Pager<u32> = Pager {
            current: 1,
            size: 10,
            total: 3,
            data: Some(vec![1, 2, 3]),
        };
        assert!(pager.is_well_formed());
        assert_eq!(pager.len(), 3);
        assert!(!pager.is_empty());
    }

    #[test]
    fn test_pager_missing_data_is_empty() {
        let pager: Pager<u32> = Pager {
            current: 2,
            size: 10,
            total: 10,
            data: None,
        };
        assert!(pager.is_well_formed());
        assert!(pager.is_empty());
    }

    #[test]
    fn test_pager_invariant_violations() {
        let zero_page: Pager<u32> = Pager {
            current: 0,
            size: 10,
            total: 0,
            data: None,
        };
        assert!(!zero_page.is_well_formed());

        let overfull: Pager<u32> = Pager {
            current: 1,
            size: 2,
            total: 3,
            data: Some(vec![1, 2, 3]),
        };
        assert!(!overfull.is_well_formed());
    }

    #[test]
    fn test_pager_deserialization() {
        let body = json!({
            "current": 1,
            "size": 10,
            "total": 3,
            "data": ["a", "b", "c"]
        });
        let pager: Pager<String> = serde_json::from_value(body).unwrap();
        assert!(pager.is_well_formed());
        assert_eq!(pager.total, 3);
    }
}
