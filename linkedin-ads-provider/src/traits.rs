use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::types::{RequestHeaders, Response};

/// HTTP transport used by the repositories.
///
/// Implementations return a [`Response`] for every status code they receive;
/// only failures to obtain a response at all are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a request, serializing `body` as JSON when present.
    async fn request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        headers: &RequestHeaders,
    ) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized;

    /// `GET url`
    async fn get(&self, url: &str, headers: &RequestHeaders) -> Result<Response> {
        self.request(Method::GET, url, None::<&()>, headers).await
    }

    /// `POST url` with a JSON body
    async fn post<B>(&self, url: &str, body: &B, headers: &RequestHeaders) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::POST, url, Some(body), headers).await
    }

    /// `PUT url` with a JSON body
    async fn put<B>(&self, url: &str, body: &B, headers: &RequestHeaders) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::PUT, url, Some(body), headers).await
    }

    /// `PATCH url` with a JSON body
    async fn patch<B>(&self, url: &str, body: &B, headers: &RequestHeaders) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::PATCH, url, Some(body), headers).await
    }

    /// `DELETE url`
    async fn delete(&self, url: &str, headers: &RequestHeaders) -> Result<Response> {
        self.request(Method::DELETE, url, None::<&()>, headers).await
    }
}

/// Error sink for repository failure paths.
///
/// Only invoked when a call fails. Repositories hold it as an `Option`, so
/// running without one simply skips logging.
pub trait ErrorLogger: Send + Sync {
    /// Record a failure with key/value context.
    fn error(&self, message: &str, tags: &[(&str, String)]);
}

/// [`ErrorLogger`] that forwards to the `log` facade at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorLogger;

impl ErrorLogger for LogErrorLogger {
    fn error(&self, message: &str, tags: &[(&str, String)]) {
        let tags = tags
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        log::error!("[linkedin] {message} {tags}");
    }
}

#[async_trait]
impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    async fn request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        headers: &RequestHeaders,
    ) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        (**self).request(method, url, body, headers).await
    }
}
