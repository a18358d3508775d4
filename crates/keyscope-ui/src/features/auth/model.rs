//! Auth operations over the user endpoints.

use crate::core::navigation::with_query;
use crate::core::session::Session;
use crate::services::api::{ApiClient, ApiError, ApiPayload, SIGN_IN_ENDPOINT};
use crate::services::http::Method;
use keyscope_api_models::{SignInRequest, SignUpRequest, TokenPair};
use thiserror::Error;

const SIGN_UP_ENDPOINT: &str = "/users/sign-up";
const ACTIVATE_ENDPOINT: &str = "/users/activate";
/// Confirmation returned by [`AuthService::resend_code`].
pub const RESEND_MESSAGE: &str = "Activation code resent to your email";

/// Auth failures that can happen before or after the API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Nothing is waiting for activation.
    #[error("No pending activation found")]
    NoPendingActivation,
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// HTTP status behind the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status(),
            Self::NoPendingActivation | Self::PasswordMismatch => None,
        }
    }
}

/// User-facing auth operations; keeps the session consistent with each outcome.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Session,
}

impl AuthService {
    /// Service over `api`, persisting through `session`.
    #[must_use]
    pub const fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    /// Register an account; on success the email is remembered for activation.
    ///
    /// # Errors
    /// [`AuthError::PasswordMismatch`] locally, otherwise [`AuthError::Api`].
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<ApiPayload, AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        self.register(email, password, confirm_password).await
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<ApiPayload, AuthError> {
        let body = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        let payload = self.api.post(SIGN_UP_ENDPOINT, &body).await?;
        self.session.set_pending_activation(email);
        Ok(payload)
    }

    /// Exchange credentials for tokens and persist them.
    ///
    /// # Errors
    /// [`AuthError::Api`]; a reply without both tokens is [`ApiError::Decode`].
    /// A pending-activation rejection also records the email as pending.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let body = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.post_json::<_, TokenPair>(SIGN_IN_ENDPOINT, &body).await {
            Ok(tokens) if tokens.access.is_empty() || tokens.refresh.is_empty() => Err(
                ApiError::Decode("sign-in response is missing tokens".to_string()).into(),
            ),
            Ok(tokens) => {
                self.session.store_sign_in(&tokens, email);
                tracing::info!("signed in");
                Ok(())
            }
            Err(err) => {
                if err.is_pending_activation() {
                    self.session.set_pending_activation(email);
                }
                Err(err.into())
            }
        }
    }

    /// Confirm an account with its emailed code.
    ///
    /// # Errors
    /// [`AuthError::Api`].
    pub async fn activate(&self, email: &str, token: &str) -> Result<ApiPayload, AuthError> {
        let endpoint = with_query(ACTIVATE_ENDPOINT, &[("email", email), ("token", token)]);
        let payload = self.api.request(&endpoint, Method::Post, None).await?;
        self.session.clear_pending_activation();
        Ok(payload)
    }

    /// Ask the server to send a fresh activation code to the pending email.
    ///
    /// # Errors
    /// [`AuthError::NoPendingActivation`] when no email is pending, otherwise
    /// [`AuthError::Api`].
    pub async fn resend_code(&self) -> Result<&'static str, AuthError> {
        let email = self
            .session
            .pending_activation_email()
            .ok_or(AuthError::NoPendingActivation)?;
        self.register(&email, "", "").await?;
        Ok(RESEND_MESSAGE)
    }

    /// Forget every persisted identifier.
    pub fn logout(&self) {
        self.session.clear_all();
        tracing::info!("signed out");
    }

    /// Whether an access token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Email awaiting activation.
    #[must_use]
    pub fn pending_activation_email(&self) -> Option<String> {
        self.session.pending_activation_email()
    }

    /// Signed-in user's email.
    #[must_use]
    pub fn user_email(&self) -> Option<String> {
        self.session.user_email()
    }

    /// Whether an account is waiting for activation.
    #[must_use]
    pub fn needs_activation(&self) -> bool {
        self.pending_activation_email().is_some()
    }
}
