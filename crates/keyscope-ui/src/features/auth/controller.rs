//! Auth form handlers.
//!
//! # Design
//! - Every handler catches its own errors and renders them into the form's
//!   error banner; nothing propagates past the entry points.
//! - Navigation is requested through the context queue, never performed here.
//! - A forced logout (`SessionExpired`) renders nothing and requests nothing,
//!   so the queued `/login` stands.

use crate::context::AppContext;
use crate::core::navigation::{query_param, with_query};
use crate::core::view::{Display, ids};
use crate::features::auth::model::{AuthError, AuthService};
use crate::services::api::ApiError;
use std::rc::Rc;

const PENDING_ACTIVATION_NOTICE: &str =
    "Account needs activation. Please check your email for the activation link.";
const USER_EXISTS_NOTICE: &str = "User already exists. Redirecting to login.";
const ACTIVATED_NOTICE: &str = "Account activated successfully!";

/// Handles the login, signup and activation screens plus logout.
pub struct AuthController {
    ctx: Rc<AppContext>,
    service: AuthService,
}

struct FormIds {
    error: &'static str,
    submit: &'static str,
    idle_label: &'static str,
}

const LOGIN: FormIds = FormIds {
    error: ids::LOGIN_ERROR,
    submit: ids::LOGIN_SUBMIT,
    idle_label: "Sign In",
};
const SIGNUP: FormIds = FormIds {
    error: ids::SIGNUP_ERROR,
    submit: ids::SIGNUP_SUBMIT,
    idle_label: "Sign Up",
};
const ACTIVATE: FormIds = FormIds {
    error: ids::ACTIVATE_ERROR,
    submit: ids::ACTIVATE_SUBMIT,
    idle_label: "Activate Account",
};

impl AuthController {
    /// Controller bound to `ctx`.
    #[must_use]
    pub fn new(ctx: Rc<AppContext>) -> Self {
        let service = AuthService::new(ctx.api.clone(), ctx.session.clone());
        Self { ctx, service }
    }

    /// Submit the sign-in form.
    pub async fn sign_in(&self, email: &str, password: &str) {
        self.begin(&LOGIN, "Signing in...");
        match self.service.sign_in(email, password).await {
            Ok(()) => self.ctx.navigation.request("/dashboard"),
            Err(AuthError::Api(ApiError::SessionExpired)) => {}
            Err(err) => {
                let message = if is_pending_activation(&err) {
                    PENDING_ACTIVATION_NOTICE.to_string()
                } else {
                    err.to_string()
                };
                self.fail(&LOGIN, &message);
            }
        }
    }

    /// Submit the sign-up form.
    pub async fn sign_up(&self, email: &str, password: &str, confirm_password: &str) {
        self.begin(&SIGNUP, "Creating account...");
        match self.service.sign_up(email, password, confirm_password).await {
            Ok(_) => {
                self.ctx.session.set_pending_activation(email);
                self.ctx
                    .navigation
                    .request(with_query("/activate", &[("email", email)]));
            }
            Err(AuthError::Api(ApiError::SessionExpired)) => {}
            Err(err) if is_conflict(&err) => {
                self.ctx.view.alert(USER_EXISTS_NOTICE);
                self.ctx.navigation.request("/login");
            }
            Err(err) => self.fail(&SIGNUP, &err.to_string()),
        }
    }

    /// Email the activation screen is for: the pending marker, else the URL's `email`.
    #[must_use]
    pub fn activation_email(&self) -> Option<String> {
        self.service
            .pending_activation_email()
            .or_else(|| query_param(&self.ctx.history.location(), "email"))
    }

    /// Show the activation email on a freshly mounted activation screen.
    pub fn populate_activation(&self) {
        if let Some(email) = self.activation_email() {
            self.ctx.view.set_text(ids::EMAIL_DISPLAY, &email);
            self.ctx.view.set_value(ids::ACTIVATION_EMAIL, &email);
        }
    }

    /// Submit the activation form.
    pub async fn activate(&self, token: &str) {
        let Some(email) = self.activation_email() else {
            self.show_error(&ACTIVATE, &AuthError::NoPendingActivation.to_string());
            return;
        };
        self.begin(&ACTIVATE, "Activating...");
        match self.service.activate(&email, token).await {
            Ok(_) => {
                self.ctx.view.alert(ACTIVATED_NOTICE);
                self.ctx.navigation.request("/login");
            }
            Err(AuthError::Api(ApiError::SessionExpired)) => {}
            Err(err) => self.fail(&ACTIVATE, &err.to_string()),
        }
    }

    /// Activate straight from an emailed link.
    pub async fn auto_activate(&self, email: &str, token: &str) {
        match self.service.activate(email, token).await {
            Ok(_) => {
                self.ctx.view.alert(ACTIVATED_NOTICE);
                self.ctx.navigation.request("/login");
            }
            Err(AuthError::Api(ApiError::SessionExpired)) => {}
            Err(err) => {
                tracing::warn!(error = %err, "activation link rejected");
                self.ctx.view.alert(&format!("Activation failed: {err}"));
                self.ctx.navigation.request("/activate");
            }
        }
    }

    /// Resend the activation code and report the outcome.
    pub async fn resend_code(&self) {
        match self.service.resend_code().await {
            Ok(message) => self.ctx.view.alert(message),
            Err(AuthError::Api(ApiError::SessionExpired)) => {}
            Err(err) => self
                .ctx
                .view
                .alert(&format!("Failed to resend code: {err}")),
        }
    }

    /// Sign out and return to the login screen.
    pub fn logout(&self) {
        self.service.logout();
        self.ctx.navigation.request("/login");
    }

    fn begin(&self, form: &FormIds, busy_label: &str) {
        let view = &self.ctx.view;
        view.set_display(form.error, Display::None);
        view.set_disabled(form.submit, true);
        view.set_text(form.submit, busy_label);
    }

    fn fail(&self, form: &FormIds, message: &str) {
        self.show_error(form, message);
        self.ctx.view.set_disabled(form.submit, false);
        self.ctx.view.set_text(form.submit, form.idle_label);
    }

    fn show_error(&self, form: &FormIds, message: &str) {
        self.ctx.view.set_text(form.error, message);
        self.ctx.view.set_display(form.error, Display::Block);
    }
}

fn is_pending_activation(err: &AuthError) -> bool {
    matches!(err, AuthError::Api(api) if api.is_pending_activation())
}

fn is_conflict(err: &AuthError) -> bool {
    err.status() == Some(409)
        || matches!(err, AuthError::Api(ApiError::Status { message, .. }) if message.contains("already exists"))
}
