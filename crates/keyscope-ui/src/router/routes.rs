//! Route table and path resolution.
//!
//! # Design
//! - Resolution is a pure, total function over an ordered matcher list;
//!   the first matcher that claims a path wins and the last always does.
//! - Screens know their fragment, whether they need the app shell, and where
//!   to send the user when their fragment cannot be loaded.

use crate::core::fragments::Fragment;
use crate::core::navigation::{query_param, route_path};

/// Emailed activation link path.
pub const ACTIVATION_LINK_PATH: &str = "/users/activate";
const KEYWORD_DETAIL_PREFIX: &str = "/keywords/";

/// Screens the router can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Sign-in form.
    Login,
    /// Registration form.
    Signup,
    /// Activation code form.
    Activate,
    /// Overview counters.
    Dashboard,
    /// Keyword table.
    Keywords,
    /// CSV upload.
    Upload,
    /// Single keyword result.
    KeywordDetail,
}

/// What to do when a screen's fragment fails to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fallback {
    /// Redirect target.
    pub path: &'static str,
    /// Notice shown before redirecting.
    pub alert: Option<&'static str>,
}

impl Screen {
    /// Fragment mounted for this screen.
    #[must_use]
    pub const fn fragment(self) -> Fragment {
        match self {
            Self::Login => Fragment::Login,
            Self::Signup => Fragment::Signup,
            Self::Activate => Fragment::Activate,
            Self::Dashboard => Fragment::Dashboard,
            Self::Keywords => Fragment::Keywords,
            Self::Upload => Fragment::Upload,
            Self::KeywordDetail => Fragment::KeywordDetail,
        }
    }

    /// Whether the screen lives inside the app shell.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Keywords | Self::Upload | Self::KeywordDetail
        )
    }

    /// Where to go if this screen cannot be loaded.
    #[must_use]
    pub const fn fallback(self) -> Fallback {
        let (path, alert) = match self {
            Self::Dashboard => ("/keywords", None),
            Self::Keywords | Self::Upload => ("/dashboard", None),
            Self::Login => (
                "/signup",
                Some("Login screen failed to load. Redirecting to signup."),
            ),
            Self::Signup | Self::Activate | Self::KeywordDetail => ("/login", None),
        };
        Fallback { path, alert }
    }
}

/// Resolved destination for a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    /// Activation link; activates automatically when both parameters are present.
    ActivationLink {
        /// `email` query parameter.
        email: Option<String>,
        /// `token` query parameter.
        token: Option<String>,
    },
    /// Keyword detail for an id taken from the path.
    KeywordDetail {
        /// Raw id segment.
        id: String,
    },
    /// A screen with no parameters.
    Screen(Screen),
}

const ROUTES: [(&str, Screen); 6] = [
    ("/login", Screen::Login),
    ("/signup", Screen::Signup),
    ("/activate", Screen::Activate),
    ("/dashboard", Screen::Dashboard),
    ("/keywords", Screen::Keywords),
    ("/upload", Screen::Upload),
];

type Matcher = fn(&str) -> Option<RouteTarget>;

const MATCHERS: [Matcher; 4] = [
    match_activation_link,
    match_keyword_detail,
    match_static,
    match_wildcard,
];

/// Resolve `path` (with or without a query) to its destination.
#[must_use]
pub fn resolve(path: &str) -> RouteTarget {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(path))
        .unwrap_or(RouteTarget::Screen(Screen::Login))
}

fn match_activation_link(path: &str) -> Option<RouteTarget> {
    (route_path(path) == ACTIVATION_LINK_PATH).then(|| RouteTarget::ActivationLink {
        email: query_param(path, "email"),
        token: query_param(path, "token"),
    })
}

fn match_keyword_detail(path: &str) -> Option<RouteTarget> {
    let rest = route_path(path).strip_prefix(KEYWORD_DETAIL_PREFIX)?;
    let id = rest.split('/').next().unwrap_or_default();
    (!id.is_empty()).then(|| RouteTarget::KeywordDetail { id: id.to_string() })
}

fn match_static(path: &str) -> Option<RouteTarget> {
    let route = route_path(path);
    ROUTES
        .iter()
        .find(|(candidate, _)| *candidate == route)
        .map(|(_, screen)| RouteTarget::Screen(*screen))
}

#[allow(clippy::unnecessary_wraps)]
const fn match_wildcard(_path: &str) -> Option<RouteTarget> {
    Some(RouteTarget::Screen(Screen::Login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes_ignore_query() {
        assert_eq!(
            resolve("/activate?email=a%40b.c"),
            RouteTarget::Screen(Screen::Activate)
        );
        assert_eq!(resolve("/upload"), RouteTarget::Screen(Screen::Upload));
        assert_eq!(resolve("/keywords"), RouteTarget::Screen(Screen::Keywords));
    }

    #[test]
    fn keyword_detail_prefix_wins_over_table() {
        assert_eq!(
            resolve("/keywords/abc123"),
            RouteTarget::KeywordDetail {
                id: "abc123".into()
            }
        );
        assert_eq!(
            resolve("/keywords/42?tab=raw"),
            RouteTarget::KeywordDetail { id: "42".into() }
        );
        assert_eq!(resolve("/keywords/"), RouteTarget::Screen(Screen::Login));
    }

    #[test]
    fn activation_link_carries_parameters() {
        assert_eq!(
            resolve("/users/activate?email=a%40b.c&token=XYZ"),
            RouteTarget::ActivationLink {
                email: Some("a@b.c".into()),
                token: Some("XYZ".into()),
            }
        );
        assert_eq!(
            resolve("/users/activate"),
            RouteTarget::ActivationLink {
                email: None,
                token: None
            }
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_login() {
        assert_eq!(resolve("/"), RouteTarget::Screen(Screen::Login));
        assert_eq!(resolve("/settings"), RouteTarget::Screen(Screen::Login));
        assert_eq!(resolve(""), RouteTarget::Screen(Screen::Login));
    }

    #[test]
    fn fallbacks_follow_screen_family() {
        assert_eq!(Screen::Dashboard.fallback().path, "/keywords");
        assert_eq!(Screen::Keywords.fallback().path, "/dashboard");
        assert_eq!(Screen::Upload.fallback().path, "/dashboard");
        assert_eq!(Screen::KeywordDetail.fallback().path, "/login");
        assert_eq!(Screen::Signup.fallback().path, "/login");
        assert_eq!(Screen::Login.fallback().path, "/signup");
        assert!(Screen::Login.fallback().alert.is_some());
        assert!(!Screen::Activate.is_protected());
        assert!(Screen::KeywordDetail.is_protected());
    }
}
