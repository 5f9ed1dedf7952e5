//! Bearer token claims.
//!
//! The decoded payload of an access token: standard JWT claims (RFC 7519)
//! plus the identity snapshot taken at issuance. The role snapshot goes
//! stale if assignments change after issuance; holders keep the issued
//! capabilities until expiry or re-login. That window is an accepted
//! property of bearer-only tokens, not a defect.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decoded access token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id).
    pub sub: String,

    /// Issuer.
    pub iss: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Not before (Unix timestamp).
    pub nbf: i64,

    /// Unique id for this token.
    pub jti: String,

    /// Subject email.
    pub email: String,

    /// Role names held at issuance.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AccessClaims {
    /// Create claims for a subject, valid for `ttl` from now.
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        roles: Vec<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        let exp = now + ttl;

        Self {
            sub: user_id.to_string(),
            iss: "matchday".to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            email: email.into(),
            roles,
        }
    }

    /// Set the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = issuer.into();
        self
    }

    /// Get the subject as a UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if the token is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get the expiry as a DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Get the issuance instant as a DateTime.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    /// Check the role snapshot for a role name.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::now_v7();
        let claims = AccessClaims::new(
            user_id,
            "alice@example.com",
            vec!["ROLE_EDITOR".to_string()],
            Duration::hours(1),
        );

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.has_role("ROLE_EDITOR"));
        assert!(!claims.has_role("ROLE_ADMIN"));
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = AccessClaims::new(
            Uuid::now_v7(),
            "alice@example.com",
            Vec::new(),
            Duration::hours(1),
        );
        claims.exp = Utc::now().timestamp() - 3600;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_each_token_gets_a_fresh_jti() {
        let user_id = Uuid::now_v7();
        let a = AccessClaims::new(user_id, "a@example.com", Vec::new(), Duration::hours(1));
        let b = AccessClaims::new(user_id, "a@example.com", Vec::new(), Duration::hours(1));

        assert_ne!(a.jti, b.jti);
    }
}
