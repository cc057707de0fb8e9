use serde::{Deserialize, Serialize};
use validator::Validate;

use tpcm_core::domain::value_objects::SessionUser;

/// Missing fields deserialize as empty strings so the service can report
/// them with its own required-field messages.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Subscriber phone number, e.g. "+40712345678" or "0712345678"
    #[serde(default)]
    #[validate(length(max = 20, message = "Invalid phone number format"))]
    pub msisdn: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Invalid email format"))]
    pub email: String,

    /// bcrypt only reads the first 72 bytes
    #[serde(default)]
    #[validate(length(max = 72, message = "Password must be at most 72 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Invalid email format"))]
    pub email: String,

    /// 6-digit verification code
    #[serde(default)]
    #[validate(length(max = 16, message = "Verification code must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(max = 20, message = "Invalid credentials"))]
    pub msisdn: String,

    #[serde(default)]
    #[validate(length(max = 72, message = "Invalid credentials"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub valid: bool,
    pub user: SessionUser,
}
