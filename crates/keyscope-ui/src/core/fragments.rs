//! View fragments and the sources that load them.
//!
//! # Design
//! - A fragment is static markup for one screen (or the shared app shell).
//! - Loading is async so a deployment can serve fragments over HTTP; the
//!   embedded source ships the same markup inside the binary.
//! - A failed load is terminal for the navigation attempt; the router decides
//!   where to go instead.

use crate::core::view::ViewError;
use async_trait::async_trait;

/// Every fragment the router can mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// Shared shell (header, nav, `screen-container`).
    AppShell,
    /// Sign-in screen.
    Login,
    /// Sign-up screen.
    Signup,
    /// Account activation screen.
    Activate,
    /// Dashboard overview.
    Dashboard,
    /// Keyword table.
    Keywords,
    /// CSV upload.
    Upload,
    /// Single keyword result.
    KeywordDetail,
}

impl Fragment {
    /// Fragment name, also its file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AppShell => "app",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Activate => "activate",
            Self::Dashboard => "dashboard",
            Self::Keywords => "keywords",
            Self::Upload => "upload",
            Self::KeywordDetail => "keyword-detail",
        }
    }

    /// Path relative to the fragment root.
    #[must_use]
    pub fn relative_path(self) -> String {
        match self {
            Self::AppShell => "layout/app.html".to_string(),
            other => format!("screens/{}.html", other.name()),
        }
    }
}

/// Async loader for fragment markup.
#[async_trait(?Send)]
pub trait FragmentSource {
    /// Load the markup for `fragment`.
    ///
    /// # Errors
    /// Returns a [`ViewError`] when the fragment cannot be produced.
    async fn load(&self, fragment: Fragment) -> Result<String, ViewError>;
}

/// Fragments compiled into the binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedFragments;

impl EmbeddedFragments {
    /// Markup for `fragment`.
    #[must_use]
    pub const fn markup(fragment: Fragment) -> &'static str {
        match fragment {
            Fragment::AppShell => include_str!("../../views/layout/app.html"),
            Fragment::Login => include_str!("../../views/screens/login.html"),
            Fragment::Signup => include_str!("../../views/screens/signup.html"),
            Fragment::Activate => include_str!("../../views/screens/activate.html"),
            Fragment::Dashboard => include_str!("../../views/screens/dashboard.html"),
            Fragment::Keywords => include_str!("../../views/screens/keywords.html"),
            Fragment::Upload => include_str!("../../views/screens/upload.html"),
            Fragment::KeywordDetail => include_str!("../../views/screens/keyword-detail.html"),
        }
    }
}

#[async_trait(?Send)]
impl FragmentSource for EmbeddedFragments {
    async fn load(&self, fragment: Fragment) -> Result<String, ViewError> {
        Ok(Self::markup(fragment).to_string())
    }
}
