//! Token issuance and verification.
//!
//! Tokens are compact JWS (HS256) strings: three dot-separated URL-safe
//! parts, with the signature covering the full header+payload, so any bit
//! flip invalidates the token. Verification is pure computation (no I/O,
//! no side effects) and fails closed: structural failures surface before
//! the signature check as [`AuthError::TokenMalformed`], signature and
//! issuer mismatches as [`AuthError::TokenInvalid`], and a passed expiry
//! as [`AuthError::TokenExpired`].

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

use crate::claims::AccessClaims;
use crate::error::{AuthError, AuthResult};

/// Signing configuration, set once at startup and read-only thereafter.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Server-held HMAC secret.
    pub secret: String,

    /// Issuer embedded in and required from every token.
    pub issuer: String,

    /// Fixed validity window from issuance.
    pub ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "matchday".to_string(),
            ttl: Duration::hours(1),
        }
    }
}

/// Stateless token issuer/verifier.
///
/// No session state survives between requests: everything a request needs
/// is inside the token, and possession is sufficient (bearer-only, no
/// revocation list).
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.config.issuer)
            .field("ttl", &self.config.ttl)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Create a token service from the given configuration.
    pub fn new(config: TokenConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Config(
                "signing secret must not be empty".to_string(),
            ));
        }
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a secret and the default issuer/TTL.
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        Self::new(TokenConfig {
            secret: secret.into(),
            ..Default::default()
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Mint a token for an authenticated subject with its role snapshot.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: impl Into<String>,
        roles: Vec<String>,
    ) -> AuthResult<String> {
        let claims = AccessClaims::new(user_id, email, roles, self.config.ttl)
            .with_issuer(self.config.issuer.clone());
        self.encode_claims(&claims)
    }

    /// Encode prepared claims into a signed token.
    pub fn encode_claims(&self, claims: &AccessClaims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Verify and decode a token.
    ///
    /// Expiry is checked with zero leeway: a token is expired the moment
    /// the current time reaches its `exp`.
    pub fn verify(&self, token: &str) -> AuthResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        let token_data: TokenData<AccessClaims> = decode(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::TokenInvalid,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::TokenMalformed,
                _ => AuthError::TokenInvalid,
            })?;

        Ok(token_data.claims)
    }
}
