//! Auth wire types and the authenticated user profile.

use serde::{Deserialize, Serialize};

/// Identifier sent as `loginFrom` and in the `source` header.
pub const ACADEMY_ADMIN_SOURCE: &str = "ACADEMY_ADMIN";

/// Roles admitted to the console when configuration does not say otherwise.
pub const DEFAULT_ALLOWED_ROLES: &[&str] = &["ACADEMY_ADMIN", "ADMIN", "SUPER_ADMIN"];

/// Profile of the signed-in administrator, as returned in `userBO`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_number: String,
    pub role: String,
    #[serde(default)]
    pub organization_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
}

impl UserProfile {
    /// Name for headers and prompts; falls back to the phone number.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.contact_number
        } else {
            &self.name
        }
    }

    /// Whether this profile's role appears in `allowed_roles`.
    pub fn has_role_in<S: AsRef<str>>(&self, allowed_roles: &[S]) -> bool {
        allowed_roles
            .iter()
            .any(|role| role.as_ref().eq_ignore_ascii_case(self.role.trim()))
    }
}

/// Status block of the auth envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub response: Option<OtpPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpPayload {
    #[serde(default)]
    pub reference_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub number: String,
    pub otp: String,
    pub reference_id: String,
    pub login_from: String,
}

impl LoginRequest {
    pub fn new(
        number: impl Into<String>,
        otp: impl Into<String>,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            otp: otp.into(),
            reference_id: reference_id.into(),
            login_from: ACADEMY_ADMIN_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub response: Option<LoginPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "userBO", default)]
    pub user_bo: Option<UserProfile>,
    #[serde(default)]
    pub staff_type: Option<String>,
    #[serde(default)]
    pub exception: Option<String>,
}

/// Body of `GET /auth/validate`. Only the status block matters.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub status: Option<ApiStatus>,
}
