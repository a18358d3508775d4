//! `gloo-net` transport for the browser.

use crate::services::http::{
    FileHandle, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, TransportError,
    UploadFile,
};
use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::FormData;

/// Sends requests with the Fetch API.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GlooTransport;

impl GlooTransport {
    fn build(request: HttpRequest) -> Result<Request, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        Ok(match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder.body(text),
            RequestBody::Multipart { field, file } => builder.body(multipart(field, file)?),
        })
    }
}

fn multipart(field: &str, file: UploadFile) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|err| TransportError(format!("form-data: {err:?}")))?;
    let appended = match file.handle {
        FileHandle::Browser(browser_file) => {
            form.append_with_blob_and_filename(field, &browser_file, &file.name)
        }
        FileHandle::Bytes(bytes) => {
            let mime = (!file.mime.is_empty()).then_some(file.mime.as_str());
            let blob: web_sys::Blob =
                gloo::file::Blob::new_with_options(bytes.as_slice(), mime).into();
            form.append_with_blob_and_filename(field, &blob, &file.name)
        }
    };
    appended.map_err(|err| TransportError(format!("attach file: {err:?}")))?;
    Ok(form)
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = Self::build(request)?
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            content_type: response.headers().get("content-type"),
            body,
        })
    }
}
