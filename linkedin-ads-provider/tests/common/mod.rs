//! Shared test helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use linkedin_ads_provider::{
    ApiConfig, ApiError, ErrorLogger, HttpClient, Method, RequestHeaders, Response,
    RetryingHttpClient,
};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Assert a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Assert a `Result` is `Err` and unwrap the error, failing the test otherwise.
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

pub const TOKEN: &str = "Bearer test-token";
pub const VERSION: &str = "202505";

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(TOKEN)
        .with_base_url(base_url)
        .with_version(VERSION)
}

/// Transport with millisecond backoff so retry tests stay fast.
pub fn fast_client(max_retries: u32) -> Result<RetryingHttpClient, ApiError> {
    RetryingHttpClient::builder()
        .max_retries(max_retries)
        .retry_delay(Duration::from_millis(5))
        .max_retry_delay(Duration::from_millis(20))
        .timeout(Duration::from_secs(5))
        .build()
}

// ============ Recording client ============

/// A request seen by [`RecordingClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: RequestHeaders,
}

/// In-memory [`HttpClient`] replaying scripted outcomes and recording requests.
#[derive(Debug, Default)]
pub struct RecordingClient {
    outcomes: Mutex<VecDeque<Result<Response, ApiError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingClient {
    pub fn replying(outcomes: Vec<Result<Response, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::default(),
        })
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Arc<Self> {
        Self::replying(vec![Ok(response(status, &body.to_string()))])
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn request<B>(
        &self,
        method: Method,
        url: &str,
        _body: Option<&B>,
        headers: &RequestHeaders,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                url: url.to_string(),
                headers: headers.clone(),
            });

        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(response(200, "{}")))
    }
}

pub fn response(status: u16, body: &str) -> Response {
    Response {
        status,
        headers: Default::default(),
        body: body.as_bytes().to_vec(),
    }
}

// ============ Logger ============

/// One `ErrorLogger::error` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedError {
    pub message: String,
    pub tags: Vec<(String, String)>,
}

impl LoggedError {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LoggedError>>,
}

impl MemoryLogger {
    pub fn entries(&self) -> Vec<LoggedError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ErrorLogger for MemoryLogger {
    fn error(&self, message: &str, tags: &[(&str, String)]) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LoggedError {
                message: message.to_string(),
                tags: tags
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
            });
    }
}

// ============ Scripted TCP server ============

/// What the scripted server does with one connection.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Accept and close without writing anything.
    Drop,
    /// Answer with a status and body, then close.
    Status(u16, &'static str),
}

/// Local server answering the n-th connection with `script[n]`; connections
/// past the end of the script repeat its last entry. Returns the base URL
/// and the number of connections served.
pub async fn scripted_server(script: Vec<Reply>) -> std::io::Result<(String, Arc<AtomicUsize>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let served = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&served);
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let reply = script
                .get(n)
                .or_else(|| script.last())
                .cloned()
                .unwrap_or(Reply::Drop);

            match reply {
                Reply::Drop => drop(socket),
                Reply::Status(status, body) => {
                    read_request_head(&mut socket).await;
                    let raw = format!(
                        "HTTP/1.1 {status} Scripted\r\n\
                         Content-Type: application/json\r\n\
                         Content-Length: {}\r\n\
                         Connection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(raw.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            }
        }
    });

    Ok((base_url, served))
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0_u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
