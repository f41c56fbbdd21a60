//! Input checks run before any auth request leaves the process.

use crate::error::{AcademyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const PHONE_DIGITS: usize = 10;
const OTP_DIGITS: usize = 6;

/// A phone number reduced to exactly ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strips every non-digit character, then requires ten digits.
    pub fn parse(input: &str) -> Result<Self> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != PHONE_DIGITS {
            return Err(AcademyError::validation(
                "Please enter a valid 10-digit phone number",
            ));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A six digit one-time code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim();
        if code.len() != OTP_DIGITS || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AcademyError::validation("Please enter a valid 6-digit OTP"));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_formatted_input() {
        let phone = PhoneNumber::parse("98765-43210").unwrap();
        assert_eq!(phone.as_str(), "9876543210");
        assert_eq!(PhoneNumber::parse(" 987 654 3210 ").unwrap().to_string(), "9876543210");
    }

    #[test]
    fn test_phone_rejects_wrong_digit_count() {
        for input in ["", "987654321", "98765432101", "+91 98765 43210", "phone"] {
            let err = PhoneNumber::parse(input).unwrap_err();
            assert!(err.is_validation(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_otp_requires_six_digits() {
        assert_eq!(OtpCode::parse("123456").unwrap().as_str(), "123456");
        assert_eq!(OtpCode::parse(" 654321\n").unwrap().as_str(), "654321");
        for input in ["12345", "1234567", "12a456", ""] {
            assert!(OtpCode::parse(input).unwrap_err().is_validation());
        }
    }
}
