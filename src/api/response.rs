use reqwest::StatusCode;

use crate::api::models::ErrorBody;

/// Exit code used when an error response does not carry a usable `rc`.
pub const FALLBACK_RC: i32 = 1;

/// Status codes the service uses to report a failed operation.
pub const ERROR_STATUSES: [StatusCode; 8] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::NOT_FOUND,
    StatusCode::REQUEST_TIMEOUT,
    StatusCode::CONFLICT,
    StatusCode::PAYLOAD_TOO_LARGE,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::NOT_IMPLEMENTED,
];

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_error(&self) -> bool {
        ERROR_STATUSES.contains(&self.status)
    }

    /// `rc` from a JSON error body, or [`FALLBACK_RC`] when there is none.
    pub fn errno(&self) -> i32 {
        match serde_json::from_slice::<ErrorBody>(&self.body) {
            Ok(ErrorBody { rc: Some(rc) }) => match i32::try_from(rc) {
                Ok(rc) => rc,
                Err(_) => {
                    log::warn!("rc {} out of range, exiting with {}", rc, FALLBACK_RC);
                    FALLBACK_RC
                }
            },
            Ok(ErrorBody { rc: None }) => {
                log::warn!("Error response has no rc, exiting with {}", FALLBACK_RC);
                FALLBACK_RC
            }
            Err(e) => {
                log::warn!(
                    "Error response body is not valid JSON ({}), exiting with {}",
                    e,
                    FALLBACK_RC
                );
                FALLBACK_RC
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_set() {
        for code in [400u16, 401, 404, 408, 409, 413, 500, 501] {
            let response = Response::new(StatusCode::from_u16(code).unwrap(), Vec::new());
            assert!(response.is_error(), "{} should be an error", code);
        }
        for code in [200u16, 201, 204, 403, 502, 503] {
            let response = Response::new(StatusCode::from_u16(code).unwrap(), Vec::new());
            assert!(!response.is_error(), "{} should not be an error", code);
        }
    }

    #[test]
    fn errno_reads_rc() {
        let response = Response::new(StatusCode::NOT_FOUND, br#"{"rc": 2}"#.to_vec());
        assert_eq!(response.errno(), 2);

        let response = Response::new(
            StatusCode::CONFLICT,
            br#"{"rc": 17, "message": "exists"}"#.to_vec(),
        );
        assert_eq!(response.errno(), 17);
    }

    #[test]
    fn errno_falls_back_without_rc() {
        let cases: [&[u8]; 5] = [
            b"",
            b"Not Found",
            br#"{"message": "nope"}"#,
            br#"{"rc": "two"}"#,
            b"[1, 2]",
        ];
        for body in cases {
            let response = Response::new(StatusCode::BAD_REQUEST, body.to_vec());
            assert_eq!(response.errno(), FALLBACK_RC);
        }
    }

    #[test]
    fn reason_phrase() {
        assert_eq!(Response::new(StatusCode::OK, Vec::new()).reason(), "OK");
        assert_eq!(
            Response::new(StatusCode::NOT_FOUND, Vec::new()).reason(),
            "Not Found"
        );
        let unknown = StatusCode::from_u16(599).unwrap();
        assert_eq!(Response::new(unknown, Vec::new()).reason(), "Unknown");
    }
}
