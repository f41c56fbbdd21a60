use serde::Serialize;

/// Session transitions published to subscribers (the view layer).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Credentials were persisted after a successful OTP login.
    LoggedIn { user_id: i64 },
    /// Explicit logout cleared the session.
    LoggedOut,
    /// The server rejected the token; credentials were discarded and the
    /// subscriber should route back to login.
    Expired,
}
