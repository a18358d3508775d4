//! Persisted session state.
//!
//! # Design
//! - Keys and raw string values match what the browser already holds, so a
//!   session written by another tab or script stays readable.
//! - An access token being present is the only authentication predicate;
//!   expiry is the server's call, surfaced as a 401.
//! - The backing store is a port so the session is testable without a browser.

use keyscope_api_models::TokenPair;
use std::rc::Rc;

/// Storage key for the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the signed-in user's email.
pub const USER_EMAIL_KEY: &str = "user_email";
/// Storage key for the email awaiting activation.
pub const PENDING_ACTIVATION_EMAIL_KEY: &str = "pending_activation_email";

/// String key/value persistence (browser local storage on wasm32).
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&self, key: &str, value: &str);
    /// Delete a value; missing keys are ignored.
    fn remove(&self, key: &str);
}

/// Façade over the persisted tokens and activation marker.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
}

impl Session {
    /// Wrap a backing store.
    #[must_use]
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }

    /// Stored access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    /// Stored refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Email of the signed-in user.
    #[must_use]
    pub fn user_email(&self) -> Option<String> {
        self.read(USER_EMAIL_KEY)
    }

    /// Email whose account still needs activation.
    #[must_use]
    pub fn pending_activation_email(&self) -> Option<String> {
        self.read(PENDING_ACTIVATION_EMAIL_KEY)
    }

    #[must_use]
    /// Whether an access token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Persist a fresh sign-in and drop any pending activation marker.
    pub fn store_sign_in(&self, tokens: &TokenPair, email: &str) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access);
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh);
        self.store.set(USER_EMAIL_KEY, email);
        self.store.remove(PENDING_ACTIVATION_EMAIL_KEY);
    }

    /// Remember an email that must be activated before sign-in succeeds.
    pub fn set_pending_activation(&self, email: &str) {
        self.store.set(PENDING_ACTIVATION_EMAIL_KEY, email);
    }

    /// Forget the pending activation marker.
    pub fn clear_pending_activation(&self) {
        self.store.remove(PENDING_ACTIVATION_EMAIL_KEY);
    }

    /// Drop both tokens (forced logout on 401).
    pub fn clear_tokens(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
    }

    /// Drop every persisted identifier.
    pub fn clear_all(&self) {
        self.clear_tokens();
        self.store.remove(USER_EMAIL_KEY);
        self.store.remove(PENDING_ACTIVATION_EMAIL_KEY);
    }
}
