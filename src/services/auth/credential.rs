use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("malformed password hash")]
    Format(#[source] bcrypt::BcryptError),
}

/// Password hashing and verification.
///
/// Hashing is one-way and salted; the work factor comes from configuration.
/// Verification delegates to bcrypt, which compares the full digest rather
/// than short-circuiting on the first differing byte.
#[derive(Clone, Copy, Debug)]
pub struct CredentialService {
    cost: u32,
}

impl CredentialService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::Internal
        })
    }

    /// Returns false on a plain mismatch. Only a hash that cannot be parsed
    /// as a bcrypt digest is an error.
    pub fn compare(&self, plaintext: &str, hashed: &str) -> Result<bool, CredentialError> {
        bcrypt::verify(plaintext, hashed).map_err(CredentialError::Format)
    }
}
