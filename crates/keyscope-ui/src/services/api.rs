//! API client with bearer auth and response normalisation.
//!
//! # Design
//! - One client per app boot; the token is read from the session on every
//!   request so sign-in/logout take effect immediately.
//! - A 401 outside sign-in is a forced logout: tokens are cleared and a
//!   navigation to `/login` is queued before the error is returned.
//! - Error messages keep the `"<status>: <message>"` shape users already see,
//!   but callers branch on [`ApiError::status`], never on message text.

use crate::core::navigation::NavigationQueue;
use crate::core::session::Session;
use crate::services::http::{
    HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, UploadFile,
};
use keyscope_api_models::ErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use thiserror::Error;

/// Sign-in endpoint; its 401s are credential errors, not expired sessions.
pub const SIGN_IN_ENDPOINT: &str = "/users/sign-in";
/// Where a forced logout lands.
pub const LOGIN_PATH: &str = "/login";

const DEFAULT_ERROR_MESSAGE: &str = "API request failed";
const COMPLETED_MESSAGE: &str = "Request completed successfully";
const ACCEPTED_MESSAGE: &str = "Request accepted";

/// API failures surfaced to models and controllers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx response.
    #[error("{status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
    /// 401 on an authenticated endpoint; the session was cleared.
    #[error("401: session expired")]
    SessionExpired,
    /// 2xx response whose payload did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status behind the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the server reported the account as awaiting activation.
    #[must_use]
    pub fn is_pending_activation(&self) -> bool {
        self.to_string().contains("pending activation")
    }
}

/// Normalised success payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiPayload {
    /// Parsed JSON body.
    Json(Value),
    /// Non-JSON body text.
    Text(String),
    /// Empty or unparseable body on a successful status.
    Completed {
        /// Synthesised confirmation message.
        message: String,
    },
}

impl ApiPayload {
    fn completed(message: &str) -> Self {
        Self::Completed {
            message: message.to_string(),
        }
    }

    /// Decode a JSON payload into `T`.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] for non-JSON payloads or shape mismatches.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => {
                serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
            }
            Self::Text(_) => Err(ApiError::Decode("expected JSON, got text".to_string())),
            Self::Completed { .. } => Err(ApiError::Decode("empty response body".to_string())),
        }
    }
}

/// Client for the keyword API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: Session,
    navigation: NavigationQueue,
}

impl ApiClient {
    /// Build a client rooted at `base_url`.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn HttpTransport>,
        session: Session,
        navigation: NavigationQueue,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            navigation,
        }
    }

    /// Issue a JSON (or bodiless) request.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<ApiPayload, ApiError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        self.attach_auth(&mut headers);
        let body = match body {
            Some(value) => RequestBody::Json(value.to_string()),
            None => RequestBody::Empty,
        };
        let response = self.send(endpoint, method, headers, body).await?;
        self.check_status(endpoint, &response)?;
        Ok(interpret_success(response))
    }

    /// Upload `file` as multipart field `field`.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn post_form(
        &self,
        endpoint: &str,
        field: &'static str,
        file: UploadFile,
    ) -> Result<ApiPayload, ApiError> {
        let mut headers = Vec::new();
        self.attach_auth(&mut headers);
        let body = RequestBody::Multipart { field, file };
        let response = self.send(endpoint, Method::Post, headers, body).await?;
        self.check_status(endpoint, &response)?;
        if response.status == 202 {
            return Ok(interpret_accepted(&response));
        }
        Ok(interpret_success(response))
    }

    /// `GET` and decode JSON.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, Method::Get, None).await?.decode()
    }

    /// `POST` a serialisable body and return the raw payload.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiPayload, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.request(endpoint, Method::Post, Some(value)).await
    }

    /// `POST` a serialisable body and decode the JSON reply.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post(endpoint, body).await?.decode()
    }

    fn attach_auth(&self, headers: &mut Vec<(String, String)>) {
        if let Some(token) = self.session.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        headers: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            url: format!("{}{endpoint}", self.base_url),
            headers,
            body,
        };
        tracing::debug!(method = method.as_str(), %endpoint, "api request");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        tracing::debug!(status = response.status, %endpoint, "api response");
        Ok(response)
    }

    fn check_status(&self, endpoint: &str, response: &HttpResponse) -> Result<(), ApiError> {
        if response.status == 401 && endpoint != SIGN_IN_ENDPOINT {
            tracing::warn!(%endpoint, "session rejected; signing out");
            self.session.clear_tokens();
            self.navigation.request(LOGIN_PATH);
            return Err(ApiError::SessionExpired);
        }
        if response.is_success() {
            return Ok(());
        }
        Err(ApiError::Status {
            status: response.status,
            message: error_message(response),
        })
    }
}

fn interpret_success(response: HttpResponse) -> ApiPayload {
    if response.body.trim().is_empty() {
        return ApiPayload::completed(COMPLETED_MESSAGE);
    }
    if response.is_json() {
        return serde_json::from_str(&response.body)
            .map_or_else(|_| ApiPayload::completed(COMPLETED_MESSAGE), ApiPayload::Json);
    }
    ApiPayload::Text(response.body)
}

fn interpret_accepted(response: &HttpResponse) -> ApiPayload {
    if response.is_json() {
        if let Ok(value) = serde_json::from_str(&response.body) {
            return ApiPayload::Json(value);
        }
    }
    ApiPayload::completed(ACCEPTED_MESSAGE)
}

/// Pick the most specific message from an error response.
fn error_message(response: &HttpResponse) -> String {
    let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
    let fallback = || non_empty(&response.status_text).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.into());

    if !response.is_json() {
        return non_empty(&response.body).unwrap_or_else(fallback);
    }
    let Ok(body) = serde_json::from_str::<ErrorBody>(&response.body) else {
        return fallback();
    };
    if response.status == 400 {
        if let Some(errors) = body.errors.as_ref().filter(|errors| !errors.is_empty()) {
            return errors.join(", ");
        }
    }
    body.error
        .as_deref()
        .and_then(non_empty)
        .or_else(|| body.message.as_deref().and_then(non_empty))
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{ACCESS_TOKEN_KEY, KeyValueStore, REFRESH_TOKEN_KEY};
    use crate::test_support::{MemoryStore, ScriptedTransport, json_response, text_response};
    use serde_json::json;

    struct Harness {
        store: Rc<MemoryStore>,
        transport: Rc<ScriptedTransport>,
        navigation: NavigationQueue,
        client: ApiClient,
    }

    fn harness() -> Harness {
        let store = Rc::new(MemoryStore::default());
        let transport = Rc::new(ScriptedTransport::default());
        let navigation = NavigationQueue::default();
        let client = ApiClient::new(
            "http://api.test/v1/",
            transport.clone(),
            Session::new(store.clone()),
            navigation.clone(),
        );
        Harness {
            store,
            transport,
            navigation,
            client,
        }
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_json_content_type() {
        let h = harness();
        h.store.set(ACCESS_TOKEN_KEY, "tok");
        h.transport.push(Ok(json_response(200, "[]")));

        let payload = h.client.request("/keywords", Method::Get, None).await;

        assert_eq!(payload, Ok(ApiPayload::Json(json!([]))));
        let sent = h.transport.sent();
        assert_eq!(sent[0].url, "http://api.test/v1/keywords");
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let h = harness();
        h.transport.push(Ok(json_response(201, "")));
        let payload = h
            .client
            .post("/users/sign-up", &json!({"email": "a@b.c"}))
            .await;
        assert_eq!(payload, Ok(ApiPayload::completed(COMPLETED_MESSAGE)));
        assert!(h.transport.sent()[0].header("authorization").is_none());
    }

    #[tokio::test]
    async fn unauthorized_sign_in_keeps_session() {
        let h = harness();
        h.store.set(ACCESS_TOKEN_KEY, "tok");
        h.transport
            .push(Ok(json_response(401, r#"{"error": "invalid credentials"}"#)));

        let err = h
            .client
            .post(SIGN_IN_ENDPOINT, &json!({"email": "a@b.c", "password": "x"}))
            .await
            .expect_err("401");

        assert_eq!(err.to_string(), "401: invalid credentials");
        assert_eq!(h.store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok"));
        assert!(h.navigation.pending().is_none());
    }

    #[tokio::test]
    async fn unauthorized_elsewhere_clears_tokens_and_redirects() {
        let h = harness();
        h.store.set(ACCESS_TOKEN_KEY, "tok");
        h.store.set(REFRESH_TOKEN_KEY, "ref");
        h.transport.push(Ok(json_response(401, r#"{"error": "unauthorized"}"#)));

        let err = h.client.request("/keywords", Method::Get, None).await;

        assert_eq!(err, Err(ApiError::SessionExpired));
        assert!(h.store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(h.store.get(REFRESH_TOKEN_KEY).is_none());
        assert_eq!(h.navigation.pending().as_deref(), Some(LOGIN_PATH));
    }

    #[tokio::test]
    async fn validation_errors_are_joined() {
        let h = harness();
        h.transport.push(Ok(json_response(
            400,
            r#"{"errors": ["email is required", "password too short"]}"#,
        )));
        let err = h
            .client
            .post("/users/sign-up", &json!({}))
            .await
            .expect_err("400");
        assert_eq!(err.to_string(), "400: email is required, password too short");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn error_field_wins_over_message_and_errors_only_apply_to_400() {
        let h = harness();
        h.transport.push(Ok(json_response(
            409,
            r#"{"errors": ["ignored"], "error": "token expired", "message": "other"}"#,
        )));
        let err = h.client.request("/x", Method::Post, None).await.expect_err("409");
        assert_eq!(err.to_string(), "409: token expired");

        h.transport
            .push(Ok(json_response(500, r#"{"message": "boom"}"#)));
        let err = h.client.request("/x", Method::Post, None).await.expect_err("500");
        assert_eq!(err.to_string(), "500: boom");

        h.transport.push(Ok(json_response(500, r"{}")));
        let err = h.client.request("/x", Method::Post, None).await.expect_err("500");
        assert_eq!(err.to_string(), "500: API request failed");
    }

    #[tokio::test]
    async fn non_json_errors_use_text_then_status_text() {
        let h = harness();
        h.transport.push(Ok(text_response(502, "Bad Gateway", "upstream down")));
        let err = h.client.request("/x", Method::Get, None).await.expect_err("502");
        assert_eq!(err.to_string(), "502: upstream down");

        h.transport.push(Ok(text_response(503, "Service Unavailable", "")));
        let err = h.client.request("/x", Method::Get, None).await.expect_err("503");
        assert_eq!(err.to_string(), "503: Service Unavailable");
    }

    #[tokio::test]
    async fn success_bodies_are_normalised() {
        let h = harness();
        h.transport.push(Ok(text_response(200, "OK", "plain")));
        h.transport.push(Ok(json_response(200, "not json")));
        assert_eq!(
            h.client.request("/x", Method::Get, None).await,
            Ok(ApiPayload::Text("plain".into()))
        );
        assert_eq!(
            h.client.request("/x", Method::Get, None).await,
            Ok(ApiPayload::completed(COMPLETED_MESSAGE))
        );
    }

    #[tokio::test]
    async fn multipart_skips_content_type_and_accepts_202() {
        let h = harness();
        h.store.set(ACCESS_TOKEN_KEY, "tok");
        h.transport.push(Ok(text_response(202, "Accepted", "")));

        let file = UploadFile::from_bytes("k.csv", "text/csv", b"rust\n".to_vec());
        let payload = h.client.post_form("/keywords", "file", file).await;

        assert_eq!(payload, Ok(ApiPayload::completed(ACCEPTED_MESSAGE)));
        let sent = h.transport.sent();
        assert!(sent[0].header("content-type").is_none());
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert!(matches!(
            sent[0].body,
            RequestBody::Multipart { field: "file", .. }
        ));
    }

    #[tokio::test]
    async fn transport_failures_surface_as_transport_errors() {
        let h = harness();
        let err = h
            .client
            .request("/keywords", Method::Get, None)
            .await
            .expect_err("no scripted response");
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn decode_rejects_non_json_payloads() {
        let err = ApiPayload::Text("hi".into())
            .decode::<Vec<i64>>()
            .expect_err("text");
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
