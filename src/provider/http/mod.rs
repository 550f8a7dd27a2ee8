//! Providers backed by remote detection APIs, and the transport they share.

mod neutrino_api_com;
mod what_is_my_browser_com;

pub use neutrino_api_com::*;
pub use what_is_my_browser_com::*;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// A form-encoded POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            form: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.form.push((name.to_string(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("application/json"))
    }

    /// Decode a JSON body. A wrong content type, an empty body or a body that
    /// does not match `T` all count as a bad request.
    pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_json() {
            return Err(Error::Request(format!(
                "could not get valid \"application/json\" response, got \"{}\"",
                self.content_type.as_deref().unwrap_or_default()
            )));
        }
        if self.body.trim().is_empty() {
            return Err(Error::Request("response body is empty".to_string()));
        }
        serde_json::from_str(&self.body)
            .map_err(|e| Error::Request(format!("could not decode response body: {e}")))
    }
}

/// Sends requests for the remote providers. Transport failures come back as
/// [`Error::Request`]; any HTTP status is a successful send.
pub trait HttpClient: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_client {
    use super::*;
    use std::time::Duration;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Blocking reqwest transport.
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self> {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        pub fn with_timeout(timeout: Duration) -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| Error::Request(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
            let response = self
                .client
                .post(&request.url)
                .form(&request.form)
                .send()
                .map_err(|e| Error::Request(e.to_string()))?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().map_err(|e| Error::Request(e.to_string()))?;

            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued responses in order and records every request.
    #[derive(Default)]
    pub(crate) struct QueuedClient {
        responses: Mutex<VecDeque<HttpResponse>>,
        pub requests: Mutex<Vec<HttpRequest>>,
    }

    impl QueuedClient {
        pub fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpClient for QueuedClient {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Request("no queued response".to_string()))
        }
    }

    pub(crate) fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            content_type: Some("application/json;charset=UTF-8".to_string()),
            body: body.to_string(),
        }
    }

    pub(crate) fn html_response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            content_type: Some("text/html".to_string()),
            body: "<html></html>".to_string(),
        }
    }
}
