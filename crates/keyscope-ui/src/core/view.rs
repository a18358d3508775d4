//! Rendering port used by the router and controllers.
//!
//! # Design
//! - Controllers address elements by id, exactly as the fragments declare them.
//! - Writes to ids that are not in the document are no-ops; only mounting a
//!   fragment can fail, because a missing container means the screen is gone.
//! - Reads (form values, files) stay in the browser layer and arrive at
//!   controllers as plain arguments.

use thiserror::Error;

/// CSS display values the controllers toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    /// `display: none`.
    None,
    /// `display: block`.
    Block,
    /// `display: flex`.
    Flex,
}

impl Display {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Block => "block",
            Self::Flex => "flex",
        }
    }
}

/// View loading failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The container to mount into is not in the document.
    #[error("container `{0}` not found")]
    MissingContainer(String),
    /// No fragment exists under that name.
    #[error("fragment `{0}` not found")]
    FragmentNotFound(String),
    /// The fragment exists but could not be fetched.
    #[error("fragment `{name}` unavailable: {reason}")]
    FragmentUnavailable {
        /// Fragment name.
        name: String,
        /// Underlying failure.
        reason: String,
    },
}

/// Element-id based rendering surface.
pub trait ViewPort {
    /// Replace the children of `container` with `html`.
    ///
    /// The fragment's elements are queryable once this returns.
    ///
    /// # Errors
    /// Returns [`ViewError::MissingContainer`] when `container` is absent.
    fn mount(&self, container: &str, html: &str) -> Result<(), ViewError>;
    /// Set an element's text content.
    fn set_text(&self, id: &str, text: &str);
    /// Set an element's inner HTML.
    fn set_html(&self, id: &str, html: &str);
    /// Set a form control's value.
    fn set_value(&self, id: &str, value: &str);
    /// Set an element's CSS display.
    fn set_display(&self, id: &str, display: Display);
    /// Enable or disable a control.
    fn set_disabled(&self, id: &str, disabled: bool);
    /// Replace an element's class attribute.
    fn set_class(&self, id: &str, class: &str);
    /// Add or remove a single class.
    fn toggle_class(&self, id: &str, class: &str, on: bool);
    /// Show a blocking notice to the user.
    fn alert(&self, message: &str);
}

/// Element ids shared between fragments and controllers.
pub mod ids {
    /// Top-level container every screen mounts into.
    pub const APP_CONTAINER: &str = "app-container";
    /// Boot spinner hidden once the first screen renders.
    pub const LOADING: &str = "loading";
    /// Nested container inside the app shell.
    pub const SCREEN_CONTAINER: &str = "screen-container";
    /// Signed-in user's email in the shell header.
    pub const SHELL_USER_EMAIL: &str = "shell-user-email";

    /// Sign-in form.
    pub const LOGIN_FORM: &str = "login-form";
    /// Sign-in error banner.
    pub const LOGIN_ERROR: &str = "login-error-message";
    /// Sign-in submit button.
    pub const LOGIN_SUBMIT: &str = "login-submit";

    /// Sign-up form.
    pub const SIGNUP_FORM: &str = "signup-form";
    /// Sign-up error banner.
    pub const SIGNUP_ERROR: &str = "signup-error-message";
    /// Sign-up submit button.
    pub const SIGNUP_SUBMIT: &str = "signup-submit";

    /// Activation form.
    pub const ACTIVATE_FORM: &str = "activate-form";
    /// Activation error banner.
    pub const ACTIVATE_ERROR: &str = "activate-error-message";
    /// Activation submit button.
    pub const ACTIVATE_SUBMIT: &str = "activate-submit";
    /// Email shown on the activation screen.
    pub const EMAIL_DISPLAY: &str = "email-display";
    /// Hidden email input on the activation form.
    pub const ACTIVATION_EMAIL: &str = "activation-email";

    /// Dashboard total counter.
    pub const TOTAL_KEYWORDS: &str = "total-keywords";
    /// Dashboard completed counter.
    pub const COMPLETED_KEYWORDS: &str = "completed-keywords";
    /// Dashboard processing counter.
    pub const PROCESSING_KEYWORDS: &str = "processing-keywords";
    /// Dashboard failed counter.
    pub const FAILED_KEYWORDS: &str = "failed-keywords";
    /// Dashboard recent list.
    pub const RECENT_KEYWORDS_LIST: &str = "recent-keywords-list";

    /// Keyword table body.
    pub const KEYWORDS_LIST: &str = "keywords-list";
    /// Status filter select.
    pub const STATUS_FILTER: &str = "status-filter";
    /// Search filter input.
    pub const SEARCH_FILTER: &str = "search-filter";

    /// Detail title.
    pub const KEYWORD_TITLE: &str = "keyword-title";
    /// Detail status badge.
    pub const STATUS_BADGE: &str = "status-badge";
    /// Detail link counter.
    pub const LINK_COUNT: &str = "link-count";
    /// Detail ad counter.
    pub const AD_COUNT: &str = "ad-count";
    /// Detail error section.
    pub const ERROR_SECTION: &str = "error-section";
    /// Detail error text.
    pub const ERROR_MESSAGE: &str = "error-message";
    /// Detail HTML preview.
    pub const HTML_PREVIEW: &str = "html-preview";
    /// Detail raw JSON.
    pub const RAW_DATA: &str = "raw-data";

    /// Upload form.
    pub const UPLOAD_FORM: &str = "upload-form";
    /// Upload drop zone.
    pub const UPLOAD_AREA: &str = "upload-area";
    /// Upload file input.
    pub const FILE_INPUT: &str = "file-input";
    /// Selected file summary.
    pub const FILE_INFO: &str = "file-info";
    /// Selected file name.
    pub const FILE_NAME: &str = "file-name";
    /// Selected file size.
    pub const FILE_SIZE: &str = "file-size";
    /// Upload submit button.
    pub const UPLOAD_BUTTON: &str = "upload-button";
    /// Upload error banner.
    pub const UPLOAD_ERROR: &str = "upload-error-message";
    /// Upload success banner.
    pub const UPLOAD_SUCCESS: &str = "upload-success-message";
}
