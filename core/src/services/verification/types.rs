//! Types for verification results

use crate::errors::AuthError;

/// Outcome of checking a candidate code against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the entry has been consumed
    Verified,
    /// Code did not match; the entry is kept. `remaining` is `None` when
    /// the attempt lockout is disabled.
    Mismatch { remaining: Option<u32> },
    /// The code outlived its lifetime; the entry has been evicted
    Expired,
    /// No code is pending for this subject
    Missing,
    /// Too many wrong guesses; the entry has been evicted
    Exhausted,
}

impl VerifyOutcome {
    /// Whether the code was accepted
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Convert into the authentication error the caller should report
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            VerifyOutcome::Verified => Ok(()),
            VerifyOutcome::Mismatch { .. } | VerifyOutcome::Missing => {
                Err(AuthError::InvalidVerificationCode)
            }
            VerifyOutcome::Expired => Err(AuthError::VerificationCodeExpired),
            VerifyOutcome::Exhausted => Err(AuthError::MaxAttemptsExceeded),
        }
    }
}
