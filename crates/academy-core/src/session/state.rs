use crate::auth::{PhoneNumber, UserProfile};
use serde::Serialize;

/// Credentials of a signed-in administrator.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// Login lifecycle: `Unauthenticated → OtpSent → Authenticated`.
///
/// Any 401 drops straight back to `Unauthenticated`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    OtpSent {
        phone: PhoneNumber,
        reference_id: String,
    },
    Authenticated(AuthSession),
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Unauthenticated => SessionPhase::Unauthenticated,
            SessionState::OtpSent { .. } => SessionPhase::OtpSent,
            SessionState::Authenticated(_) => SessionPhase::Authenticated,
        }
    }
}

/// Token-free view of [`SessionState`], safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Unauthenticated,
    OtpSent,
    Authenticated,
}
