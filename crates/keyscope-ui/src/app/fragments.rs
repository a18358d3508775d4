//! Fragments served over HTTP.

use crate::core::fragments::{Fragment, FragmentSource};
use crate::core::view::ViewError;
use async_trait::async_trait;
use gloo_net::http::Request;

/// Fetches `<base>/<relative path>` for each fragment.
#[derive(Clone, Debug)]
pub(crate) struct RemoteFragments {
    base_url: String,
}

impl RemoteFragments {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait(?Send)]
impl FragmentSource for RemoteFragments {
    async fn load(&self, fragment: Fragment) -> Result<String, ViewError> {
        let url = format!("{}/{}", self.base_url, fragment.relative_path());
        let unavailable = |reason: String| ViewError::FragmentUnavailable {
            name: fragment.name().to_string(),
            reason,
        };
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;
        match response.status() {
            200..=299 => response.text().await.map_err(|err| unavailable(err.to_string())),
            404 => Err(ViewError::FragmentNotFound(fragment.name().to_string())),
            status => Err(unavailable(format!("HTTP {status}"))),
        }
    }
}
