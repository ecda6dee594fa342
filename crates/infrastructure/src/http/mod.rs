//! HTTP-facing helpers for instrumented services
//!
//! The engine attaches no transport meaning to faults; HTTP callers use
//! these helpers to turn an injected fault or a response override into the
//! response they actually send.

use domain::{FaultKind, ResponseOverride};

/// Map a fault kind to the HTTP status an instrumented service should return
///
/// Mirrors the error taxonomy of a typical service handler: missing
/// credentials is an auth failure, a client fault is a bad request, and
/// everything else is an internal error.
#[must_use]
pub const fn status_for_fault(kind: &FaultKind) -> u16 {
    match kind {
        FaultKind::NoCredentials => 401,
        FaultKind::Client => 400,
        FaultKind::Other(_) => 500,
    }
}

/// JSON body for a synthesized response, `{"message": ...}`
#[must_use]
pub fn body_json(over: &ResponseOverride) -> serde_json::Value {
    serde_json::json!({ "message": over.body_message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_credentials_is_unauthorized() {
        assert_eq!(status_for_fault(&FaultKind::NoCredentials), 401);
    }

    #[test]
    fn client_fault_is_bad_request() {
        assert_eq!(status_for_fault(&FaultKind::Client), 400);
    }

    #[test]
    fn unknown_kinds_are_internal_errors() {
        assert_eq!(
            status_for_fault(&FaultKind::Other("CustomAppException".into())),
            500
        );
        assert_eq!(status_for_fault(&FaultKind::Other("ValueError".into())), 500);
    }

    #[test]
    fn body_json_wraps_message() {
        let over = ResponseOverride::new(429, "throttled");
        assert_eq!(
            body_json(&over),
            serde_json::json!({ "message": "throttled" })
        );
    }
}
