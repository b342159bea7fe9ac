use serde_json::{Map, Value};

use crate::domain::ParentId;

/// Transport status plus the decoded body of one endpoint call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Builds a reply from raw bytes; a body that is not JSON becomes `{}`.
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        Self {
            status,
            body: parse_body(bytes),
        }
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(ParentId),
    NotFound,
    Unexpected { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Failed { status: u16, message: String },
}

const UNKNOWN_MESSAGE: &str = "Unknown";

/// The `statusCode` check reads the body, not the transport status: the lookup
/// endpoint mirrors its domain status there.
pub fn classify_lookup(reply: &HttpReply) -> LookupOutcome {
    if success_flag(&reply.body) {
        if let Some(parent_id) = found_parent_id(&reply.body) {
            return LookupOutcome::Found(parent_id);
        }
    }
    if body_status_code(&reply.body) == Some(404.0) {
        return LookupOutcome::NotFound;
    }
    LookupOutcome::Unexpected {
        status: reply.status,
    }
}

pub fn classify_clear(reply: &HttpReply) -> ClearOutcome {
    if reply.is_success_status() && success_flag(&reply.body) {
        return ClearOutcome::Cleared;
    }
    let message = reply
        .body
        .get("message")
        .and_then(message_text)
        .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string());
    ClearOutcome::Failed {
        status: reply.status,
        message,
    }
}

/// Truthy scalars are shown as text; falsy values and containers are not.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn success_flag(body: &Value) -> bool {
    matches!(body.get("success"), Some(Value::Bool(true)))
}

fn found_parent_id(body: &Value) -> Option<ParentId> {
    let raw = body.get("data")?.get("parentId")?.as_str()?;
    ParentId::new(raw).ok()
}

fn body_status_code(body: &Value) -> Option<f64> {
    body.get("statusCode").and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::{classify_clear, classify_lookup, parse_body, ClearOutcome, HttpReply, LookupOutcome};
    use crate::domain::ParentId;
    use serde_json::json;

    #[test]
    fn parse_body_falls_back_to_empty_object() {
        assert_eq!(parse_body(b"<html>oops</html>"), json!({}));
        assert_eq!(parse_body(b""), json!({}));
        assert_eq!(parse_body(br#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn lookup_found_requires_success_and_parent_id() {
        let reply = HttpReply::new(200, json!({"success": true, "data": {"parentId": "p1"}}));
        assert_eq!(
            classify_lookup(&reply),
            LookupOutcome::Found(ParentId::new("p1").expect("id"))
        );

        let empty_id = HttpReply::new(200, json!({"success": true, "data": {"parentId": ""}}));
        assert_eq!(
            classify_lookup(&empty_id),
            LookupOutcome::Unexpected { status: 200 }
        );

        let missing_data = HttpReply::new(200, json!({"success": true}));
        assert_eq!(
            classify_lookup(&missing_data),
            LookupOutcome::Unexpected { status: 200 }
        );

        let stringly = HttpReply::new(200, json!({"success": "yes", "data": {"parentId": "p1"}}));
        assert_eq!(
            classify_lookup(&stringly),
            LookupOutcome::Unexpected { status: 200 }
        );
    }

    #[test]
    fn lookup_not_found_reads_body_status_code() {
        let reply = HttpReply::new(200, json!({"statusCode": 404}));
        assert_eq!(classify_lookup(&reply), LookupOutcome::NotFound);

        let transport_only = HttpReply::new(404, json!({}));
        assert_eq!(
            classify_lookup(&transport_only),
            LookupOutcome::Unexpected { status: 404 }
        );

        let string_code = HttpReply::new(200, json!({"statusCode": "404"}));
        assert_eq!(
            classify_lookup(&string_code),
            LookupOutcome::Unexpected { status: 200 }
        );
    }

    #[test]
    fn lookup_unrecognized_shape_is_unexpected() {
        let reply = HttpReply::new(200, json!({"foo": "bar"}));
        assert_eq!(
            classify_lookup(&reply),
            LookupOutcome::Unexpected { status: 200 }
        );
    }

    #[test]
    fn clear_needs_transport_and_domain_success() {
        assert_eq!(
            classify_clear(&HttpReply::new(200, json!({"success": true}))),
            ClearOutcome::Cleared
        );
        assert_eq!(
            classify_clear(&HttpReply::new(204, json!({"success": true}))),
            ClearOutcome::Cleared
        );
        assert_eq!(
            classify_clear(&HttpReply::new(500, json!({"success": true}))),
            ClearOutcome::Failed {
                status: 500,
                message: "Unknown".to_string()
            }
        );
        assert_eq!(
            classify_clear(&HttpReply::new(200, json!({"success": false, "message": "locked"}))),
            ClearOutcome::Failed {
                status: 200,
                message: "locked".to_string()
            }
        );
    }

    #[test]
    fn clear_message_shows_truthy_scalars_as_text() {
        assert_eq!(
            classify_clear(&HttpReply::new(409, json!({"message": 12}))),
            ClearOutcome::Failed {
                status: 409,
                message: "12".to_string()
            }
        );
        assert_eq!(
            classify_clear(&HttpReply::new(409, json!({"message": true}))),
            ClearOutcome::Failed {
                status: 409,
                message: "true".to_string()
            }
        );
    }

    #[test]
    fn clear_message_defaults_to_unknown() {
        for body in [
            json!({}),
            json!({"message": ""}),
            json!({"message": 0}),
            json!({"message": false}),
            json!({"message": null}),
            json!({"message": {"code": 7}}),
        ] {
            assert_eq!(
                classify_clear(&HttpReply::new(400, body)),
                ClearOutcome::Failed {
                    status: 400,
                    message: "Unknown".to_string()
                }
            );
        }
    }
}
