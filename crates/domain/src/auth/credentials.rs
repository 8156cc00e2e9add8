//! Login and registration forms

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Email/password pair posted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be present.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when either field is blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::MissingField(
                "Please enter your email and password".to_string(),
            ));
        }
        Ok(())
    }
}

/// The registration form as the user filled it in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirm_password: String,
    /// Whether the terms of service were accepted.
    pub agree_terms: bool,
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
}

impl Registration {
    /// Checks the form and produces the request body.
    ///
    /// # Errors
    ///
    /// Missing fields are reported first, then a password mismatch, then
    /// unaccepted terms.
    pub fn validate(&self) -> DomainResult<RegistrationRequest> {
        let fields = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(DomainError::MissingField(
                "Please fill in all fields".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }
        if !self.agree_terms {
            return Err(DomainError::TermsNotAccepted);
        }
        Ok(RegistrationRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}
