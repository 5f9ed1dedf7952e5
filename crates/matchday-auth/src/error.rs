//! Error types for authentication and authorization operations.
//!
//! Login failures collapse into a single detail-free
//! [`AuthError::InvalidCredentials`]: the response never reveals whether
//! the identifier exists. Authorization failures
//! ([`AuthError::PermissionDenied`]) do name the missing permission; the
//! caller is already authenticated at that point.

use thiserror::Error;

use matchday_identity::IdentityError;
use matchday_rbac::RbacError;

/// Authentication and authorization error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login failed. Unknown identifier and wrong password are
    /// indistinguishable to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The request carried no bearer token.
    #[error("missing bearer token")]
    TokenMissing,

    /// The token failed structural decoding before any signature check.
    #[error("malformed token")]
    TokenMalformed,

    /// Signature or issuer check failed.
    #[error("invalid token")]
    TokenInvalid,

    /// The token's expiry has passed.
    #[error("token has expired")]
    TokenExpired,

    /// Authenticated, but the identity lacks the named permission.
    #[error("permission denied: missing '{0}'")]
    PermissionDenied(String),

    /// Entity lookup miss outside the login path.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation, surfaced as a conflict.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transient storage failure; safe to retry with backoff.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level. Expected
    /// outcomes like a wrong password are not server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AuthError::Internal(_) | AuthError::Config(_) | AuthError::Storage(_)
        )
    }

    /// Transient failures may be retried by the caller with backoff;
    /// everything else is a final answer for the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Storage(_))
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenMalformed
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => 401,

            AuthError::PermissionDenied(_) => 403,
            AuthError::NotFound(_) => 404,
            AuthError::Duplicate(_) => 409,
            AuthError::Storage(_) => 503,
            AuthError::Config(_) | AuthError::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TokenMissing => "TOKEN_MISSING",
            AuthError::TokenMalformed => "TOKEN_MALFORMED",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::PermissionDenied(_) => "PERMISSION_DENIED",
            AuthError::NotFound(_) => "NOT_FOUND",
            AuthError::Duplicate(_) => "DUPLICATE_NAME",
            AuthError::Config(_) => "CONFIG_ERROR",
            AuthError::Storage(_) => "STORAGE_UNAVAILABLE",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// Default mappings from the storage layers. The login path overrides the
// user-lookup miss with `InvalidCredentials` explicitly.
impl From<IdentityError> for AuthError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::UserNotFound(who) => AuthError::NotFound(format!("user {}", who)),
            IdentityError::DuplicateIdentifier(email) => AuthError::Duplicate(email),
            IdentityError::InvalidRecord(detail) => AuthError::Internal(detail),
            IdentityError::Storage(detail) => AuthError::Storage(detail),
        }
    }
}

impl From<RbacError> for AuthError {
    fn from(e: RbacError) -> Self {
        match e {
            RbacError::RoleNotFound(which) => AuthError::NotFound(format!("role {}", which)),
            RbacError::PermissionNotFound(which) => {
                AuthError::NotFound(format!("permission {}", which))
            }
            RbacError::DuplicateName(name) => AuthError::Duplicate(name),
            RbacError::Storage(detail) => AuthError::Storage(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::TokenExpired.status_code(), 401);
        assert_eq!(
            AuthError::PermissionDenied("USER_MANAGE".to_string()).status_code(),
            403
        );
        assert_eq!(AuthError::Duplicate("ROLE_X".to_string()).status_code(), 409);
        assert_eq!(AuthError::Storage("timeout".to_string()).status_code(), 503);
    }

    #[test]
    fn test_only_storage_is_retryable() {
        assert!(AuthError::Storage("timeout".to_string()).is_retryable());
        assert!(!AuthError::InvalidCredentials.is_retryable());
        assert!(!AuthError::TokenExpired.is_retryable());
    }

    #[test]
    fn test_invalid_credentials_has_no_detail() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
    }

    #[test]
    fn test_storage_mapping_from_lower_layers() {
        let e: AuthError = IdentityError::Storage("timeout".to_string()).into();
        assert!(matches!(e, AuthError::Storage(_)));

        let e: AuthError = RbacError::DuplicateName("ROLE_X".to_string()).into();
        assert!(matches!(e, AuthError::Duplicate(_)));
    }
}
