//! Composition root: login, the per-request guard, and provisioning.
//!
//! The HTTP layer talks to the core exclusively through [`AuthGateway`]:
//! `login` exchanges credentials for a bearer token, and
//! `authenticate_request` / `authorize_request` turn an inbound token
//! into a verified identity with its effective permission set. Everything
//! here is request-scoped; the gateway holds only immutable configuration
//! and handles to the shared stores.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use matchday_identity::{CredentialStore, IdentityError, User, UserSummary};
use matchday_rbac::{PermissionSet, RoleGraph};

use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;
use crate::resolver::PermissionResolver;
use crate::token::TokenService;

/// Payload for the admin provisioning flow.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,

    /// Unique login identifier.
    pub email: String,

    /// Plaintext password; hashed before it reaches storage.
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login payload for the transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// The bearer token to present on subsequent requests.
    pub access_token: String,

    /// Public view of the authenticated account.
    pub user: UserSummary,
}

/// A verified request identity: decoded claims plus the effective
/// permission set resolved from the current graph state.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    /// Subject id.
    pub user_id: Uuid,

    /// Subject email.
    pub email: String,

    /// Role names from the token snapshot.
    pub roles: Vec<String>,

    /// Effective permissions.
    pub permissions: PermissionSet,
}

impl AuthenticatedIdentity {
    /// Deny-by-default permission check.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Deny-by-default role check against the token snapshot.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// The authentication facade composed once at startup.
pub struct AuthGateway {
    store: Arc<dyn CredentialStore>,
    graph: Arc<dyn RoleGraph>,
    passwords: PasswordHasher,
    tokens: TokenService,
    resolver: PermissionResolver,
}

impl AuthGateway {
    /// Compose the gateway from its collaborators.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        graph: Arc<dyn RoleGraph>,
        passwords: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        let resolver = PermissionResolver::new(graph.clone());
        Self {
            store,
            graph,
            passwords,
            tokens,
            resolver,
        }
    }

    /// The shared permission resolver.
    pub fn resolver(&self) -> &PermissionResolver {
        &self.resolver
    }

    /// Exchange credentials for a bearer token.
    ///
    /// An unknown identifier and a wrong password produce the identical
    /// [`AuthError::InvalidCredentials`]; neither the outcome nor the log
    /// line distinguishes them. A failed check is final for this request;
    /// there is no internal retry.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginResponse> {
        let mut user = match self.store.find_by_email(email).await {
            Ok(user) => user,
            Err(IdentityError::UserNotFound(_)) => {
                debug!("login rejected");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.passwords.verify(password, &user.password_hash) {
            debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        self.store.record_login(user.id, now).await?;
        user.last_login = Some(now);

        let roles = self.resolver.role_names(&user).await?;
        let access_token = self
            .tokens
            .issue(user.id, user.email.clone(), roles.clone())?;

        info!(user_id = %user.id, "login succeeded");
        Ok(LoginResponse {
            access_token,
            user: UserSummary::new(&user, roles),
        })
    }

    /// Per-request guard: token in, identity plus permissions out.
    ///
    /// `token` is the raw bearer value already extracted from transport
    /// framing; `None` means the request carried no credential. The
    /// permission set is resolved freshly from the graph via the role
    /// names in the claims.
    pub async fn authenticate_request(
        &self,
        token: Option<&str>,
    ) -> AuthResult<AuthenticatedIdentity> {
        let token = token.ok_or(AuthError::TokenMissing)?;
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id().ok_or(AuthError::TokenMalformed)?;
        let permissions = self.resolver.permissions_for_claims(&claims).await?;

        Ok(AuthenticatedIdentity {
            user_id,
            email: claims.email,
            roles: claims.roles,
            permissions,
        })
    }

    /// Guard a route that requires `permission`. Deny is explicit and
    /// carries the missing permission name; not-authenticated and
    /// authenticated-but-lacking stay distinguishable for the transport
    /// layer.
    pub async fn authorize_request(
        &self,
        token: Option<&str>,
        permission: &str,
    ) -> AuthResult<AuthenticatedIdentity> {
        let identity = self.authenticate_request(token).await?;
        if identity.has_permission(permission) {
            Ok(identity)
        } else {
            warn!(user_id = %identity.user_id, permission, "permission denied");
            Err(AuthError::PermissionDenied(permission.to_string()))
        }
    }

    /// Admin provisioning: hash the password and create the account with
    /// the named role attached. The default flow assigns exactly one
    /// role; more can be granted later with [`AuthGateway::grant_role`].
    pub async fn provision_user(
        &self,
        new_user: NewUser,
        role_name: &str,
    ) -> AuthResult<UserSummary> {
        let role = self.graph.role_by_name(role_name).await?;
        let password_hash = self.passwords.hash(&new_user.password)?;
        let user = User::new(new_user.name, new_user.email, password_hash).with_role(role.id);
        let user = self.store.create(user).await?;

        info!(user_id = %user.id, role = role_name, "user provisioned");
        let roles = self.resolver.role_names(&user).await?;
        Ok(UserSummary::new(&user, roles))
    }

    /// Grant an additional role to an existing account; idempotent.
    pub async fn grant_role(&self, user_id: Uuid, role_name: &str) -> AuthResult<UserSummary> {
        let role = self.graph.role_by_name(role_name).await?;
        let user = self.store.assign_role(user_id, role.id).await?;

        info!(user_id = %user.id, role = role_name, "role granted");
        let roles = self.resolver.role_names(&user).await?;
        Ok(UserSummary::new(&user, roles))
    }

    /// Summaries of all accounts, for the admin listing surface.
    pub async fn list_users(&self) -> AuthResult<Vec<UserSummary>> {
        let users = self.store.list().await?;
        let mut summaries = Vec::with_capacity(users.len());
        for user in &users {
            let roles = self.resolver.role_names(user).await?;
            summaries.push(UserSummary::new(user, roles));
        }
        Ok(summaries)
    }

    /// Summary of a single account.
    pub async fn find_user(&self, id: Uuid) -> AuthResult<UserSummary> {
        let user = self.store.find_by_id(id).await?;
        let roles = self.resolver.role_names(&user).await?;
        Ok(UserSummary::new(&user, roles))
    }
}
