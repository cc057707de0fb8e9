//! bcrypt password hashing, run off the async executor

use crate::errors::DomainError;

/// Hashes and checks passwords with bcrypt
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a fresh salt
    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }

    /// Check a password against a stored hash.
    /// A malformed stored hash counts as a mismatch.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        match result {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, event = "password_hash_invalid", "Stored password hash is not valid bcrypt");
                Ok(false)
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
