//! URL handling, browser history port, and the navigation request queue.
//!
//! # Design
//! - Paths travel as `path?query` strings; helpers split them on demand.
//! - Components never call the router; they queue a navigation and the router
//!   drains the queue after each handler. The last request wins.

use std::cell::RefCell;
use std::rc::Rc;

/// Path component without the query string.
#[must_use]
pub fn route_path(path: &str) -> &str {
    path.split_once('?').map_or(path, |(route, _)| route)
}

/// Decoded value of query parameter `name`, if present and non-empty.
#[must_use]
pub fn query_param(path: &str, name: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_component(value))
        .filter(|value| !value.is_empty())
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), |decoded| decoded.into_owned())
}

/// Append `?name=value` pairs to `path`, percent-encoding the values.
#[must_use]
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Browser history surface.
pub trait History {
    /// Current `path?query`.
    fn location(&self) -> String;
    /// Push a new entry.
    fn push(&self, path: &str);
    /// Replace the current entry.
    fn replace(&self, path: &str);
}

/// Pending navigation shared between components and the router.
#[derive(Clone, Debug, Default)]
pub struct NavigationQueue {
    pending: Rc<RefCell<Option<String>>>,
}

impl NavigationQueue {
    /// Ask the router to go to `path` once the current handler returns.
    pub fn request(&self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(%path, "navigation requested");
        *self.pending.borrow_mut() = Some(path);
    }

    /// Take the pending request, if any.
    #[must_use]
    pub fn take(&self) -> Option<String> {
        self.pending.borrow_mut().take()
    }

    /// Peek at the pending request.
    #[must_use]
    pub fn pending(&self) -> Option<String> {
        self.pending.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_path_strips_query() {
        assert_eq!(route_path("/activate?email=a%40b.c"), "/activate");
        assert_eq!(route_path("/dashboard"), "/dashboard");
    }

    #[test]
    fn query_param_decodes_values() {
        let path = "/users/activate?email=jo%2Bdoe%40example.com&token=AB12CD";
        assert_eq!(
            query_param(path, "email").as_deref(),
            Some("jo+doe@example.com")
        );
        assert_eq!(query_param(path, "token").as_deref(), Some("AB12CD"));
        assert_eq!(query_param(path, "missing"), None);
        assert_eq!(query_param("/users/activate?token=", "token"), None);
    }

    #[test]
    fn with_query_round_trips_through_query_param() {
        let path = with_query("/activate", &[("email", "a b@c.d")]);
        assert_eq!(path, "/activate?email=a%20b%40c.d");
        assert_eq!(query_param(&path, "email").as_deref(), Some("a b@c.d"));
    }

    #[test]
    fn queue_keeps_last_request() {
        let queue = NavigationQueue::default();
        queue.request("/keywords");
        queue.request("/login");
        assert_eq!(queue.take().as_deref(), Some("/login"));
        assert_eq!(queue.take(), None);
    }
}
