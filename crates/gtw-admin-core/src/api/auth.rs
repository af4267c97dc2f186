//! Sign-in and password reset endpoints

use crate::gateway::AuthGateway;
use crate::{Error, Result};
use gtw_admin_types::{Acknowledgement, LoginResponse};
use serde::Serialize;
use tracing::info;

/// Shortest password the backend accepts
pub const MIN_PASSWORD_LEN: usize = 6;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    otp: &'a str,
}

/// Third step of the password reset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    /// Account email
    pub email: String,
    /// Code received by email
    pub otp: String,
    /// New password
    pub new_password: String,
    /// Repeated new password
    pub confirm_password: String,
}

impl PasswordReset {
    /// Client-side checks run before the request is sent
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for empty fields, mismatching passwords,
    /// or a password shorter than [`MIN_PASSWORD_LEN`].
    pub fn validate(&self) -> Result<()> {
        if self.otp.trim().is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(Error::validation("password", FILL_ALL_FIELDS));
        }
        if self.new_password != self.confirm_password {
            return Err(Error::validation("confirmPassword", "Passwords do not match"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(
                "newPassword",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
            ));
        }
        Ok(())
    }
}

/// Authentication endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: AuthGateway,
}

impl AuthApi {
    /// Create the service
    #[must_use]
    pub const fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// Underlying gateway
    #[must_use]
    pub const fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    /// `POST /auth/admin-login`
    ///
    /// # Errors
    ///
    /// Empty fields are rejected with [`Error::Validation`] before any
    /// request is sent. Rejected credentials come back as [`Error::Api`].
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("credentials", FILL_ALL_FIELDS));
        }
        info!(username, "Signing in");
        self.gateway
            .post("/auth/admin-login", &LoginRequest { username, password })
            .await
    }

    /// `POST /auth/forgot-password`: mail a one-time code
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty email, otherwise whatever the
    /// backend answers.
    pub async fn send_reset_otp(&self, email: &str) -> Result<Acknowledgement> {
        if email.trim().is_empty() {
            return Err(Error::validation("email", "Please enter your email"));
        }
        self.gateway
            .post("/auth/forgot-password", &EmailRequest { email })
            .await
    }

    /// `POST /auth/verify-otp`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty code, otherwise whatever the
    /// backend answers.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<Acknowledgement> {
        if otp.trim().is_empty() {
            return Err(Error::validation("otp", "Please enter the OTP"));
        }
        self.gateway
            .post("/auth/verify-otp", &OtpRequest { email, otp })
            .await
    }

    /// `POST /auth/reset-password`
    ///
    /// # Errors
    ///
    /// Returns the first failed [`PasswordReset::validate`] check, otherwise
    /// whatever the backend answers.
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<Acknowledgement> {
        reset.validate()?;
        self.gateway.post("/auth/reset-password", reset).await
    }
}
