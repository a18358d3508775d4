#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Keyscope keyword API.
//!
//! The shapes mirror what the API emits on the wire (camelCase keyword
//! fields, `{access, refresh}` token pairs, `{error}` / `{errors: []}` error
//! bodies) so the dashboard client can decode responses without ad-hoc JSON
//! probing.

use serde::{Deserialize, Serialize};

/// Processing lifecycle of an uploaded keyword.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KeywordStatus {
    /// Queued for scraping.
    Pending,
    /// A worker is scraping the search results.
    Processing,
    /// Results were captured.
    Completed,
    /// Scraping failed; see the keyword's error message.
    Failed,
}

impl KeywordStatus {
    /// All statuses in lifecycle order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Pending,
            Self::Processing,
            Self::Completed,
            Self::Failed,
        ]
    }

    /// Wire label used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parse a wire label, ignoring ASCII case.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

/// Keyword record as returned by `GET /keywords` and `GET /keywords/{id}`.
///
/// Status stays a free-form string: the client displays whatever the server
/// sends and only interprets it through [`KeywordStatus::from_wire`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDto {
    /// Server-assigned identifier.
    pub id: i64,
    /// Keyword text from the uploaded CSV.
    pub keyword: String,
    /// Processing status label.
    #[serde(default)]
    pub status: String,
    /// Number of ads found on the results page.
    #[serde(default)]
    pub ad_count: Option<i64>,
    /// Number of links found on the results page.
    #[serde(default)]
    pub link_count: Option<i64>,
    /// Failure reason when scraping failed.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Captured results page markup.
    #[serde(default)]
    pub html_content: Option<String>,
}

/// Body for `POST /users/sign-up`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

/// Body for `POST /users/sign-in`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Token pair issued on successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

/// Error body shapes emitted by the API.
///
/// Handlers write either `{"error": ...}`, `{"message": ...}`, or, for
/// validation failures, `{"errors": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Single error string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Alternative message field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_decodes_camel_case_with_nulls() {
        let raw = r#"{
            "id": 7,
            "keyword": "rust wasm",
            "status": "completed",
            "adCount": 3,
            "linkCount": null,
            "htmlContent": "<p>hi</p>",
            "errorMessage": null
        }"#;
        let dto: KeywordDto = serde_json::from_str(raw).expect("decode");
        assert_eq!(dto.id, 7);
        assert_eq!(dto.ad_count, Some(3));
        assert_eq!(dto.link_count, None);
        assert_eq!(dto.error_message, None);
        assert_eq!(dto.html_content.as_deref(), Some("<p>hi</p>"));
    }

    #[test]
    fn keyword_tolerates_missing_optional_fields() {
        let dto: KeywordDto =
            serde_json::from_str(r#"{"id": 1, "keyword": "a"}"#).expect("decode");
        assert!(dto.status.is_empty());
        assert!(dto.ad_count.is_none());
    }

    #[test]
    fn sign_up_request_uses_confirm_password_key() {
        let body = SignUpRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        };
        let value = serde_json::to_value(&body).expect("encode");
        assert_eq!(value["confirmPassword"], "pw");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            KeywordStatus::from_wire("Completed"),
            Some(KeywordStatus::Completed)
        );
        assert_eq!(KeywordStatus::from_wire("unknown"), None);
    }

    #[test]
    fn error_body_accepts_each_shape() {
        let validation: ErrorBody =
            serde_json::from_str(r#"{"errors": ["a", "b"]}"#).expect("decode");
        assert_eq!(validation.errors, Some(vec!["a".into(), "b".into()]));
        let single: ErrorBody = serde_json::from_str(r#"{"error": "nope"}"#).expect("decode");
        assert_eq!(single.error.as_deref(), Some("nope"));
    }
}
