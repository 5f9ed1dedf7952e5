//! # Matchday Authentication
//!
//! The authentication and authorization core for the Matchday club-site
//! backend. The HTTP layer and the content resources (teams, players,
//! matches, news, gallery) consume this crate through two questions:
//! "do these credentials belong to someone?" and "may this identity do
//! that?".
//!
//! ## Overview
//!
//! The matchday-auth crate handles:
//! - **Passwords**: bcrypt hashing and verification ([`PasswordHasher`])
//! - **Tokens**: stateless signed bearer tokens with a fixed TTL and a
//!   role snapshot ([`TokenService`], [`AccessClaims`])
//! - **Resolution**: identity → effective permission set
//!   ([`PermissionResolver`])
//! - **Composition**: login, the per-request guard, and admin
//!   provisioning ([`AuthGateway`])
//!
//! Storage lives in the sibling crates: `matchday-identity` owns the
//! accounts and `matchday-rbac` owns the role/permission graph.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use matchday_auth::{AuthGateway, NewUser, PasswordHasher, TokenService};
//! use matchday_identity::MemoryCredentialStore;
//! use matchday_rbac::{seed_defaults, MemoryRoleGraph};
//!
//! # async fn example() -> matchday_auth::AuthResult<()> {
//! let store = Arc::new(MemoryCredentialStore::new());
//! let graph = Arc::new(MemoryRoleGraph::new());
//! seed_defaults(graph.as_ref()).await?;
//!
//! let gateway = AuthGateway::new(
//!     store,
//!     graph,
//!     PasswordHasher::default(),
//!     TokenService::with_secret("your-signing-secret")?,
//! );
//!
//! gateway
//!     .provision_user(
//!         NewUser {
//!             name: "Alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             password: "strongPassword!@#".to_string(),
//!         },
//!         "ROLE_EDITOR",
//!     )
//!     .await?;
//!
//! let login = gateway.login("alice@example.com", "strongPassword!@#").await?;
//! let identity = gateway
//!     .authorize_request(Some(&login.access_token), "NEWS_WRITE")
//!     .await?;
//! assert!(identity.has_role("ROLE_EDITOR"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Security properties
//!
//! - Login failures are generic: unknown identifier and wrong password
//!   are indistinguishable in the response.
//! - Tokens are bearer-only and stateless; there is no revocation list.
//!   Role changes after issuance take effect at re-login (accepted
//!   staleness window).
//! - Authorization is deny-by-default: missing roles, deleted roles, and
//!   unknown permission names all resolve to "denied", never to an
//!   error.

pub mod claims;
pub mod error;
pub mod gateway;
pub mod password;
pub mod resolver;
pub mod token;

// Re-export main types
pub use claims::AccessClaims;
pub use error::{AuthError, AuthResult};
pub use gateway::{AuthGateway, AuthenticatedIdentity, LoginResponse, NewUser};
pub use password::PasswordHasher;
pub use resolver::PermissionResolver;
pub use token::{TokenConfig, TokenService};
