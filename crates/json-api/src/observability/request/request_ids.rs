//! Request ID resolution and response header helpers.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// The caller's request id when it sent a non-blank one, otherwise a new one.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_request_id_is_kept() {
        assert_eq!(resolve_request_id(Some(" abc-123 ".to_string())), "abc-123");
    }

    #[test]
    fn blank_or_missing_request_id_is_generated() {
        for header in [None, Some(String::new()), Some("   ".to_string())] {
            let id = resolve_request_id(header);

            assert!(Uuid::parse_str(&id).is_ok(), "expected a uuid, got {id:?}");
        }
    }
}
