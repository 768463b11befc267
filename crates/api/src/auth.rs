//! Static bearer-token check used by protected routes.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    InvalidFormat,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("API token not configured")]
    NotConfigured,
}

/// Accept the request only if it carries `Authorization: Bearer <expected>`.
pub fn check_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), BearerError> {
    let expected = expected.ok_or(BearerError::NotConfigured)?;

    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(BearerError::MissingHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(BearerError::InvalidFormat)?;

    if token != expected {
        return Err(BearerError::InvalidToken);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn matching_token_passes() {
        assert_eq!(check_bearer(&with_auth("Bearer s3cret"), Some("s3cret")), Ok(()));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(
            check_bearer(&HeaderMap::new(), Some("s3cret")),
            Err(BearerError::MissingHeader)
        );
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        assert_eq!(
            check_bearer(&with_auth("Basic czNjcmV0"), Some("s3cret")),
            Err(BearerError::InvalidFormat)
        );
    }

    #[test]
    fn wrong_token_is_rejected() {
        assert_eq!(
            check_bearer(&with_auth("Bearer nope"), Some("s3cret")),
            Err(BearerError::InvalidToken)
        );
    }

    #[test]
    fn unconfigured_token_rejects_everything() {
        assert_eq!(
            check_bearer(&with_auth("Bearer s3cret"), None),
            Err(BearerError::NotConfigured)
        );
    }
}
