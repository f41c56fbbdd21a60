//! Auth domain module.
//!
//! # Module Structure
//!
//! - `model`: OTP/login envelopes and the `UserProfile`
//! - `validation`: phone and OTP checks that run before the network

mod model;
mod validation;

pub use model::{
    ACADEMY_ADMIN_SOURCE, ApiStatus, DEFAULT_ALLOWED_ROLES, LoginPayload, LoginRequest,
    LoginResponse, OtpPayload, OtpRequest, OtpResponse, UserProfile, ValidateResponse,
};
pub use validation::{OtpCode, PhoneNumber};
