//! `/auth/*` endpoints.
//!
//! These return the raw envelopes; interpreting `status.code` and the login
//! payload is the auth use case's job.

use crate::gateway::HttpGateway;
use academy_core::Result;
use academy_core::auth::{
    LoginRequest, LoginResponse, OtpRequest, OtpResponse, PhoneNumber, ValidateResponse,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthApi {
    gateway: Arc<HttpGateway>,
}

impl AuthApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn send_otp(&self, phone: &PhoneNumber) -> Result<OtpResponse> {
        let body = OtpRequest {
            number: phone.as_str().to_string(),
        };
        self.gateway.post_json("/auth/otp/generate", &body).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.gateway.post_json("/auth/login", request).await
    }

    pub async fn validate(&self) -> Result<ValidateResponse> {
        self.gateway.get_json("/auth/validate").await
    }

    pub async fn logout(&self) -> Result<()> {
        self.gateway.post_unit::<()>("/auth/logout", None).await
    }
}
