//! Phone + OTP sign-in.
//!
//! Drives the session through `Unauthenticated -> OtpSent -> Authenticated`.
//! Input is validated before any request is made, and a login only touches
//! durable storage once the server response has passed every check.

use academy_core::auth::{LoginRequest, OtpCode, PhoneNumber, UserProfile};
use academy_core::session::{SessionPhase, SessionStore};
use academy_core::{AcademyError, Result};
use academy_interaction::AuthApi;
use std::sync::Arc;

const INVALID_RESPONSE: &str = "Invalid response from server";
const INVALID_OTP: &str = "Invalid OTP";
const OTP_FAILED: &str = "Failed to send OTP";

pub struct AuthUseCase {
    api: AuthApi,
    session: Arc<SessionStore>,
    allowed_roles: Vec<String>,
}

impl AuthUseCase {
    pub fn new(api: AuthApi, session: Arc<SessionStore>, allowed_roles: Vec<String>) -> Self {
        Self {
            api,
            session,
            allowed_roles,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    /// Requests an OTP for `phone` and returns the server's reference id.
    pub async fn send_otp(&self, phone: &str) -> Result<String> {
        let phone = PhoneNumber::parse(phone)?;
        let response = self.api.send_otp(&phone).await?;

        if !response.status.is_ok() {
            let message = response
                .status
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| OTP_FAILED.to_string());
            return Err(AcademyError::api(response.status.code, message));
        }
        let reference_id = response
            .response
            .map(|payload| payload.reference_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AcademyError::api(response.status.code, INVALID_RESPONSE))?;

        tracing::info!(phone = %phone, "OTP sent");
        self.session.mark_otp_sent(phone, reference_id.clone());
        Ok(reference_id)
    }

    /// Exchanges an OTP for a session.
    ///
    /// Nothing is persisted unless the code is accepted, the payload carries
    /// both token and profile, and the profile's role is authorized.
    pub async fn login(&self, phone: &str, otp: &str, reference_id: &str) -> Result<UserProfile> {
        let phone = PhoneNumber::parse(phone)?;
        let otp = OtpCode::parse(otp)?;

        let request = LoginRequest::new(phone.as_str(), otp.as_str(), reference_id);
        let response = self.api.login(&request).await.map_err(|err| match err {
            AcademyError::Unauthorized(message) => AcademyError::validation(message),
            other => other,
        })?;

        let payload = response.response.unwrap_or_default();
        if !response.status.is_ok() || !payload.valid {
            let message = payload
                .exception
                .or(response.status.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| INVALID_OTP.to_string());
            tracing::warn!(phone = %phone, "OTP rejected");
            return Err(AcademyError::validation(message));
        }

        let (Some(token), Some(user)) = (payload.token.filter(|t| !t.is_empty()), payload.user_bo)
        else {
            return Err(AcademyError::api(response.status.code, INVALID_RESPONSE));
        };

        if !user.has_role_in(&self.allowed_roles) {
            tracing::warn!(user_id = user.id, role = %user.role, "Login refused for role");
            return Err(AcademyError::AccessDenied(format!(
                "role {} may not use the academy admin console",
                user.role
            )));
        }

        self.session.establish(token, user.clone())?;
        tracing::info!(user_id = user.id, "Logged in");
        Ok(user)
    }

    /// Completes the pending OTP started by [`send_otp`](Self::send_otp).
    pub async fn verify_otp(&self, otp: &str) -> Result<UserProfile> {
        let (phone, reference_id) = self
            .session
            .pending_otp()
            .ok_or_else(|| AcademyError::validation("Request an OTP first"))?;
        self.login(phone.as_str(), otp, &reference_id).await
    }

    /// Abandons the pending OTP so another number can be entered.
    pub fn change_number(&self) {
        self.session.reset_otp();
    }

    /// Ends the session. The server call is best effort; local state is
    /// always cleared.
    pub async fn logout(&self) -> Result<()> {
        if self.session.is_authenticated() {
            if let Err(err) = self.api.logout().await {
                tracing::warn!("Logout request failed, clearing local session anyway: {}", err);
            }
        }
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Asks the server whether the stored token is still valid.
    ///
    /// Never fails: any error reads as "not valid". Without a token no
    /// request is made.
    pub async fn validate_token(&self) -> bool {
        if self.session.token().is_none() {
            return false;
        }
        match self.api.validate().await {
            Ok(response) => response.status.is_some_and(|status| status.is_ok()),
            Err(err) => {
                tracing::debug!("Token validation failed: {}", err);
                false
            }
        }
    }
}
