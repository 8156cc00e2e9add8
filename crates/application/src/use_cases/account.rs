//! Account flows: login, registration and password reset.

use std::sync::Arc;

use tracing::info;
use zenkai_domain::{ApiRequest, DomainError, LoginCredentials, Registration};

use crate::auth::AuthStore;
use crate::ports::{ApiClient, send_ok};
use crate::ApplicationResult;

/// Signs in with email and password, then confirms the session.
pub struct Login {
    client: Arc<dyn ApiClient>,
    store: AuthStore,
}

impl Login {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>, store: AuthStore) -> Self {
        Self { client, store }
    }

    /// Posts the credentials and updates the shared store.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank fields, the server's message when
    /// the credentials are refused, or the store's error when the new session
    /// cannot be confirmed.
    pub async fn execute(&self, credentials: &LoginCredentials) -> ApplicationResult<()> {
        credentials.validate()?;
        let request = ApiRequest::post(&["auth", "login"]).with_json(credentials)?;
        send_ok(self.client.as_ref(), request, "Failed to login").await?;
        self.store.login().await?;
        info!(email = %credentials.email, "signed in");
        Ok(())
    }
}

/// Creates a new account.
pub struct Register {
    client: Arc<dyn ApiClient>,
}

impl Register {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Validates the form locally and submits it.
    ///
    /// Returns the server's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request is made, or the server's
    /// rejection (e.g. an email already in use).
    pub async fn execute(&self, form: &Registration) -> ApplicationResult<String> {
        let body = form.validate()?;
        let request = ApiRequest::post(&["api", "register"])
            .anonymous()
            .with_json(&body)?;
        let response = send_ok(self.client.as_ref(), request, "Registration failed").await?;
        info!(email = %body.email, "account registered");
        Ok(response.text())
    }
}

/// Sends a password reset link.
pub struct RequestPasswordReset {
    client: Arc<dyn ApiClient>,
}

impl RequestPasswordReset {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Asks the backend to email a reset link to `email`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank address, or the server's message.
    pub async fn execute(&self, email: &str) -> ApplicationResult<()> {
        let email = email.trim();
        if email.is_empty() {
            let message = "Please enter your email address".to_string();
            return Err(DomainError::MissingField(message).into());
        }
        let request = ApiRequest::post(&["auth", "forgot-password"])
            .anonymous()
            .with_query("email", email);
        send_ok(self.client.as_ref(), request, "Failed to send reset link").await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNavigator, RecordingNotifier, ScriptedApi};
    use crate::ApplicationError;
    use pretty_assertions::assert_eq;
    use zenkai_domain::{AuthStatus, HttpMethod, RequestBody};

    fn store(api: &Arc<ScriptedApi>) -> AuthStore {
        AuthStore::new(
            api.clone(),
            Arc::new(RecordingNavigator::default()),
            Arc::new(RecordingNotifier::default()),
            "/",
        )
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_confirms_session() {
        let api = Arc::new(
            ScriptedApi::new()
                .on(HttpMethod::Post, "/auth/login", 200, "Login successful")
                .on(HttpMethod::Get, "/auth/me", 200, "{}"),
        );
        let store = store(&api);
        let login = Login::new(api.clone(), store.clone());

        login
            .execute(&LoginCredentials::new("goku@capsule.corp", "kamehameha"))
            .await
            .unwrap();

        assert_eq!(store.status(), AuthStatus::Authenticated);
        let sent = api.last(HttpMethod::Post, "/auth/login").unwrap();
        assert!(sent.with_credentials);
        assert_eq!(
            sent.body,
            RequestBody::Json(serde_json::json!({
                "email": "goku@capsule.corp",
                "password": "kamehameha"
            }))
        );
    }

    #[tokio::test]
    async fn test_login_surfaces_server_text() {
        let api = Arc::new(ScriptedApi::new().on(
            HttpMethod::Post,
            "/auth/login",
            401,
            "Invalid Credentials",
        ));
        let store = store(&api);
        let err = Login::new(api.clone(), store.clone())
            .execute(&LoginCredentials::new("a@b.c", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid Credentials");
        assert_eq!(store.status(), AuthStatus::Unknown);
        assert_eq!(api.count(HttpMethod::Get, "/auth/me"), 0);
    }

    #[tokio::test]
    async fn test_login_rejects_blank_fields_without_request() {
        let api = Arc::new(ScriptedApi::new());
        let err = Login::new(api.clone(), store(&api))
            .execute(&LoginCredentials::new("", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_only_account_fields() {
        let api = Arc::new(ScriptedApi::new().on(
            HttpMethod::Post,
            "/api/register",
            200,
            "User registered successfully",
        ));
        let form = Registration {
            first_name: "Son".to_string(),
            last_name: "Goku".to_string(),
            email: "goku@capsule.corp".to_string(),
            password: "kamehameha".to_string(),
            confirm_password: "kamehameha".to_string(),
            agree_terms: true,
        };

        let text = Register::new(api.clone()).execute(&form).await.unwrap();

        assert_eq!(text, "User registered successfully");
        let sent = api.last(HttpMethod::Post, "/api/register").unwrap();
        assert!(!sent.with_credentials);
        assert_eq!(
            sent.body,
            RequestBody::Json(serde_json::json!({
                "firstName": "Son",
                "lastName": "Goku",
                "email": "goku@capsule.corp",
                "password": "kamehameha"
            }))
        );
    }

    #[tokio::test]
    async fn test_register_mismatch_is_local() {
        let api = Arc::new(ScriptedApi::new());
        let form = Registration {
            first_name: "Son".to_string(),
            last_name: "Goku".to_string(),
            email: "goku@capsule.corp".to_string(),
            password: "a".to_string(),
            confirm_password: "b".to_string(),
            agree_terms: true,
        };
        let err = Register::new(api.clone()).execute(&form).await.unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_password_reset_uses_query() {
        let api = Arc::new(ScriptedApi::new().on(
            HttpMethod::Post,
            "/auth/forgot-password",
            200,
            "",
        ));
        RequestPasswordReset::new(api.clone())
            .execute(" goku@capsule.corp ")
            .await
            .unwrap();
        let sent = api.last(HttpMethod::Post, "/auth/forgot-password").unwrap();
        assert_eq!(
            sent.query,
            vec![("email".to_string(), "goku@capsule.corp".to_string())]
        );
    }
}
