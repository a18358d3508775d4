//! HTTP operations on the keyword resource.

use crate::features::keywords::logic::{UploadError, validate_upload};
use crate::services::api::{ApiClient, ApiError, ApiPayload};
use crate::services::http::UploadFile;
use keyscope_api_models::KeywordDto;
use std::borrow::Cow;
use thiserror::Error;

const KEYWORDS_ENDPOINT: &str = "/keywords";
const UPLOAD_FIELD: &str = "file";

/// Upload failures: rejected locally or by the API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// The file never left the browser.
    #[error(transparent)]
    Invalid(#[from] UploadError),
    /// The API refused or failed the upload.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Keyword list, detail and upload calls.
#[derive(Clone)]
pub struct KeywordsService {
    api: ApiClient,
    max_upload_bytes: u64,
}

impl KeywordsService {
    /// Build a service over `api`, rejecting uploads above `max_upload_bytes`.
    #[must_use]
    pub const fn new(api: ApiClient, max_upload_bytes: u64) -> Self {
        Self {
            api,
            max_upload_bytes,
        }
    }

    /// Every keyword owned by the signed-in user.
    ///
    /// # Errors
    /// Propagates [`ApiError`].
    pub async fn list(&self) -> Result<Vec<KeywordDto>, ApiError> {
        self.api.get_json(KEYWORDS_ENDPOINT).await
    }

    /// A single keyword, including its captured HTML.
    ///
    /// `id` may come straight from the location path, so it is decoded once
    /// before being encoded as a path segment.
    ///
    /// # Errors
    /// Propagates [`ApiError`].
    pub async fn get(&self, id: &str) -> Result<KeywordDto, ApiError> {
        let segment = urlencoding::decode(id).unwrap_or(Cow::Borrowed(id));
        let endpoint = format!("{KEYWORDS_ENDPOINT}/{}", urlencoding::encode(&segment));
        self.api.get_json(&endpoint).await
    }

    /// Validate and upload a CSV of keywords.
    ///
    /// # Errors
    /// [`UploadFailure::Invalid`] before any request is made, otherwise
    /// [`UploadFailure::Api`].
    pub async fn upload(&self, file: UploadFile) -> Result<ApiPayload, UploadFailure> {
        validate_upload(Some(&file), self.max_upload_bytes)?;
        tracing::info!(name = %file.name, size = file.size, "uploading keywords");
        Ok(self
            .api
            .post_form(KEYWORDS_ENDPOINT, UPLOAD_FIELD, file)
            .await?)
    }
}
