use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{Answer, UploadReceipt};

/// Body of the ask request.
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    /// Question text.
    pub question: &'a str,
}

fn parse_object(body: &[u8]) -> Option<serde_json::Map<String, Value>> {
    match serde_json::from_slice(body).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Reads an upload body.
///
/// Never fails: a body that is not an object, or has no string `status`,
/// yields a receipt that is not a success.
#[must_use]
pub fn upload_receipt(body: &[u8]) -> UploadReceipt {
    let Some(map) = parse_object(body) else {
        return UploadReceipt::default();
    };

    let status = match map.get("status") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => Some(other.to_string()),
    };
    let chunks = map.get("chunks").and_then(Value::as_u64);

    UploadReceipt { status, chunks }
}

/// Reads an answer body, requiring an object with a string `answer`.
#[must_use]
pub fn answer(body: &[u8]) -> Option<Answer> {
    parse_object(body)?
        .get("answer")
        .and_then(Value::as_str)
        .map(Answer::new)
}

/// Reads the `detail` of an error body when it is a non-blank string.
///
/// Validation failures send a list instead, which is ignored.
#[must_use]
pub fn error_detail(body: &[u8]) -> Option<String> {
    parse_object(body)?
        .get("detail")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_ask_request_shape() {
        let body = serde_json::to_value(AskRequest { question: "Q" }).unwrap();
        assert_eq!(body, serde_json::json!({ "question": "Q" }));
    }

    #[test]
    fn test_success_receipt() {
        let receipt = upload_receipt(br#"{"status":"success","chunks":12}"#);
        assert!(receipt.is_success());
        assert_eq!(receipt.chunks, Some(12));
    }

    #[test_case(br#"{"status":"success","chunks":"12"}"# ; "string_chunks")]
    #[test_case(br#"{"status":"success","chunks":1.5}"# ; "float_chunks")]
    #[test_case(br#"{"status":"success","chunks":-3}"# ; "negative_chunks")]
    fn test_odd_chunks_keep_success(body: &[u8]) {
        let receipt = upload_receipt(body);
        assert!(receipt.is_success());
        assert_eq!(receipt.chunks, None);
    }

    #[test_case(br#"["success"]"#, None ; "array")]
    #[test_case(br#""success""#, None ; "bare_string")]
    #[test_case(b"ok", None ; "not_json")]
    #[test_case(br#"{"ok":true}"#, None ; "no_status")]
    #[test_case(br#"{"status":null}"#, None ; "null_status")]
    #[test_case(br#"{"status":1}"#, Some("1") ; "numeric_status")]
    #[test_case(br#"{"status":"queued"}"#, Some("queued") ; "other_status")]
    fn test_non_success_receipts(body: &[u8], status: Option<&str>) {
        let receipt = upload_receipt(body);
        assert!(!receipt.is_success());
        assert_eq!(receipt.status.as_deref(), status);
    }

    #[test]
    fn test_answer_ignores_extra_fields() {
        assert_eq!(
            answer(br#"{"answer":"42","sources":[]}"#),
            Some(Answer::new("42"))
        );
    }

    #[test_case(br#"["X"]"# ; "array")]
    #[test_case(br#"{"answer":7}"# ; "numeric_answer")]
    #[test_case(br#"{"text":"X"}"# ; "missing_answer")]
    fn test_malformed_answer(body: &[u8]) {
        assert!(answer(body).is_none());
    }

    #[test]
    fn test_string_detail() {
        assert_eq!(
            error_detail(br#"{"detail":"Upload documents first"}"#).as_deref(),
            Some("Upload documents first")
        );
    }

    #[test_case(br#"{"detail":[{"loc":["body"],"msg":"field required"}]}"# ; "structured")]
    #[test_case(br#"["Upload documents first"]"# ; "array")]
    #[test_case(br#"{"detail":"  "}"# ; "blank")]
    fn test_unusable_detail_is_ignored(body: &[u8]) {
        assert!(error_detail(body).is_none());
    }
}
