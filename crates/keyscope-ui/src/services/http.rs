//! Transport-level request/response types.
//!
//! # Design
//! - Responses are fully buffered; the API client inspects status, content
//!   type and body text before deciding how to interpret them.
//! - Transport errors mean the request never produced a response.

use async_trait::async_trait;
use thiserror::Error;

/// HTTP methods the dashboard issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
}

impl Method {
    /// Uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Platform handle for the bytes of a selected file.
#[derive(Clone, Debug)]
pub enum FileHandle {
    /// Browser `File` picked from an input or drop.
    #[cfg(target_arch = "wasm32")]
    Browser(web_sys::File),
    /// In-memory contents.
    Bytes(Vec<u8>),
}

/// File selected for upload.
#[derive(Clone, Debug)]
pub struct UploadFile {
    /// File name including extension.
    pub name: String,
    /// Reported MIME type (may be empty).
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
    /// Contents.
    pub handle: FileHandle,
}

impl UploadFile {
    /// In-memory file, mostly for tests and non-browser callers.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            handle: FileHandle::Bytes(bytes),
        }
    }
}

/// Request body.
#[derive(Clone, Debug)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// Serialized JSON text.
    Json(String),
    /// `multipart/form-data` with a single file part.
    Multipart {
        /// Form field name.
        field: &'static str,
        /// File part.
        file: UploadFile,
    },
}

/// Outbound request.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Value of header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Buffered response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase (may be empty).
    pub status_text: String,
    /// `Content-Type` header.
    pub content_type: Option<String>,
    /// Body text.
    pub body: String,
}

impl HttpResponse {
    /// 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the content type announces JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.contains("application/json"))
    }
}

/// The request never produced a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("network request failed: {0}")]
pub struct TransportError(pub String);

/// Sends requests over the network.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Send `request` and buffer the response.
    ///
    /// # Errors
    /// Returns [`TransportError`] when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
