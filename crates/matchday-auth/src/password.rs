//! Password hashing and verification.
//!
//! Bcrypt with a configurable work factor. Verification recomputes the
//! digest from the stored salt and compares it in constant time, so the
//! duration does not depend on where the comparison diverges. The
//! plaintext is never stored, logged, or echoed back in any error.

use crate::error::{AuthError, AuthResult};

/// Salted adaptive password hashing.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Create with an explicit work factor (bcrypt accepts 4..=31).
    /// Production deployments should stay at [`bcrypt::DEFAULT_COST`] or
    /// above; low factors exist for tests.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// The configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext into an opaque salted digest.
    pub fn hash(&self, plaintext: &str) -> AuthResult<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
    }

    /// Compare a plaintext against a stored digest.
    ///
    /// A structurally invalid stored hash compares as `false` rather than
    /// erroring; the boolean carries no information about the failure
    /// point.
    pub fn verify(&self, plaintext: &str, password_hash: &str) -> bool {
        bcrypt::verify(plaintext, password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test suite fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hasher = hasher();
        let digest = hasher.hash("strongPassword!@#").unwrap();

        assert!(hasher.verify("strongPassword!@#", &digest));
        assert!(!hasher.verify("wrongPassword", &digest));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let a = hasher.hash("strongPassword!@#").unwrap();
        let b = hasher.hash("strongPassword!@#").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_never_contains_plaintext() {
        let hasher = hasher();
        let digest = hasher.hash("strongPassword!@#").unwrap();

        assert!(!digest.contains("strongPassword"));
    }

    #[test]
    fn test_malformed_stored_hash_verifies_false() {
        let hasher = hasher();

        assert!(!hasher.verify("anything", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("anything", ""));
    }
}
