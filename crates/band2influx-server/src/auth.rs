//! Access Gate
//!
//! HTTP Basic authentication for the ingestion routes. The expected pair is
//! fixed at startup; a request either carries exactly that pair or is turned
//! away with `401` before its body is read.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use band2influx_common::PipelineStage;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::error::AppError;

/// Challenge sent in `WWW-Authenticate` with every `401`.
pub const WWW_AUTHENTICATE_CHALLENGE: &str = "Basic realm=\"band2influx\"";

/// Expected identifier/secret pair
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Both the identifier and the secret are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Constant-time check of a supplied pair.
    ///
    /// Both fields are always compared and the outcomes are combined without
    /// short-circuiting, so timing only depends on the lengths involved.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decode an `Authorization: Basic <base64(user:pass)>` header value.
///
/// The scheme name is case-insensitive and the pair is split on the first
/// `:`, so passwords may contain colons. Returns `None` for anything else.
pub fn parse_basic_authorization(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware guarding the ingestion routes.
///
/// Install with `axum::middleware::from_fn_with_state(credentials, require_basic_auth)`.
pub async fn require_basic_auth(
    State(credentials): State<Arc<Credentials>>,
    request: Request,
    next: Next,
) -> Response {
    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_authorization);

    let outcome = match supplied {
        Some((username, password)) if credentials.verify(&username, &password) => Ok(()),
        Some(_) => Err(AppError::Unauthorized("Invalid credentials".to_string())),
        None => Err(AppError::Unauthorized("Missing or malformed Basic credentials".to_string())),
    };

    match PipelineStage::Authorizing.track(outcome) {
        Ok(()) => {
            debug!(uri = %request.uri(), "Request authorized");
            next.run(request).await
        },
        Err(e) => {
            warn!(uri = %request.uri(), "Rejected unauthenticated request");
            e.into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(pair: &str) -> String {
        format!("Basic {}", STANDARD.encode(pair))
    }

    #[test]
    fn test_verify_exact_match_only() {
        let credentials = Credentials::new("collector", "hunter2");
        assert!(credentials.verify("collector", "hunter2"));
        assert!(!credentials.verify("collector", "hunter3"));
        assert!(!credentials.verify("collectos", "hunter2"));
        assert!(!credentials.verify("other", "other"));
    }

    #[test]
    fn test_verify_mismatch_positions() {
        let credentials = Credentials::new("collector", "hunter2");
        // first byte, last byte, shorter, longer, empty
        for bad in ["Hunter2", "hunter3", "hunter", "hunter22", ""] {
            assert!(!credentials.verify("collector", bad), "{}", bad);
        }
        for bad in ["Collector", "collectoR", "collecto", "collectorr", ""] {
            assert!(!credentials.verify(bad, "hunter2"), "{}", bad);
        }
    }

    #[test]
    fn test_parse_basic_authorization() {
        assert_eq!(
            parse_basic_authorization(&encode("collector:hunter2")),
            Some(("collector".to_string(), "hunter2".to_string()))
        );
        assert_eq!(
            parse_basic_authorization(&format!("bAsIc {}", STANDARD.encode("a:b:c"))),
            Some(("a".to_string(), "b:c".to_string()))
        );
        assert_eq!(
            parse_basic_authorization(&encode(":")),
            Some((String::new(), String::new()))
        );
    }

    #[test]
    fn test_parse_basic_authorization_rejects_garbage() {
        assert_eq!(parse_basic_authorization("Bearer abc"), None);
        assert_eq!(parse_basic_authorization("Basic"), None);
        assert_eq!(parse_basic_authorization("Basic !!!notbase64"), None);
        assert_eq!(parse_basic_authorization(&encode("no-colon")), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("collector", "hunter2"));
        assert!(rendered.contains("collector"));
        assert!(!rendered.contains("hunter2"));
    }
}
