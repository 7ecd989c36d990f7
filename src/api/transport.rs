//! Transports
//!
//! [`Transport`] sends one [`ApiRequest`] and returns the unwrapped payload.
//! [`HttpTransport`] is the real one: a JSON POST with a timeout, retried with
//! exponential backoff on retryable failures.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use super::envelope::{unwrap_envelope, ApiRequest};
use super::{ApiError, ApiResult};

/// Sends controller requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the unwrapped `data` payload
    async fn send(&self, request: &ApiRequest) -> ApiResult<Value>;
}

/// JSON-over-HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("bad header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidRequest(format!("bad value for header '{key}': {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// One attempt: POST, check the status, decode, unwrap the envelope
    async fn execute(&self, request: &ApiRequest) -> ApiResult<Value> {
        let response = self
            .client
            .post(&self.config.base_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        unwrap_envelope(body, Some(status.as_u16()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> ApiResult<Value> {
        request.validate()?;
        retry_with_backoff(&self.config, request, || self.execute(request)).await
    }
}

/// Run `attempt` up to `config.retries` times, sleeping with exponential
/// backoff between tries. Only retryable errors are retried; the final
/// retryable failure is wrapped in [`ApiError::Exhausted`].
pub async fn retry_with_backoff<F, Fut>(
    config: &ClientConfig,
    request: &ApiRequest,
    mut attempt: F,
) -> ApiResult<Value>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = ApiResult<Value>>,
{
    let max_attempts = config.retries.max(1);
    let mut tries = 0;

    loop {
        tries += 1;
        debug!(
            "{} {} (attempt {}/{})",
            request.action.as_str(),
            request.entity_type,
            tries,
            max_attempts
        );

        let err = match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_retryable() {
            return Err(err);
        }
        if tries >= max_attempts {
            warn!(
                "{} {} failed after {} attempts: {}",
                request.action.as_str(),
                request.entity_type,
                tries,
                err
            );
            return Err(ApiError::Exhausted {
                attempts: tries,
                source: Box::new(err),
            });
        }

        let backoff = config.backoff_for(tries);
        warn!(
            "{} {} failed ({}) - retry {}/{} after {}ms backoff",
            request.action.as_str(),
            request.entity_type,
            err,
            tries,
            max_attempts - 1,
            backoff.as_millis()
        );
        tokio::time::sleep(backoff).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn fast_config(retries: u32) -> ClientConfig {
        ClientConfig {
            retries,
            initial_backoff: Duration::from_millis(1),
            ..ClientConfig::default()
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 503,
            reason: "Service Unavailable".into(),
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let request = ApiRequest::list("Foods", 0, 10);
        let result = retry_with_backoff(&fast_config(3), &request, move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(server_error())
            } else {
                Ok(Value::from(7))
            }
        })
        .await;

        assert_eq!(result.unwrap(), Value::from(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_wraps_last_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let request = ApiRequest::list("Foods", 0, 10);
        let result = retry_with_backoff(&fast_config(3), &request, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(server_error())
        })
        .await;

        match result {
            Err(ApiError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert_eq!(source.status_code(), Some(503));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let request = ApiRequest::detail("Foods", "1");
        let result = retry_with_backoff(&fast_config(3), &request, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Status {
                status: 404,
                reason: "Not Found".into(),
            })
        })
        .await;

        assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_http_transport_rejects_bad_header() {
        let config = ClientConfig::default().with_header("bad header", "x");
        assert!(matches!(HttpTransport::new(config), Err(ApiError::InvalidRequest(_))));
    }

    /// Accept one connection per canned reply, answer it once the full request
    /// has arrived, and report how many connections were served
    async fn serve(replies: Vec<(u16, &'static str, String)>) -> (String, tokio::task::JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/controller.php", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let mut served = 0;
            for (status, reason, body) in replies {
                let (mut socket, _) = listener.accept().await.unwrap();
                read_request(&mut socket).await;
                let reply = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
                served += 1;
            }
            served
        });
        (url, handle)
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    fn transport_for(url: &str, retries: u32) -> HttpTransport {
        HttpTransport::new(fast_config(retries).with_base_url(url)).unwrap()
    }

    #[tokio::test]
    async fn test_http_transport_unwraps_envelope() {
        let (url, server) = serve(vec![(
            200,
            "OK",
            json!([{ "success": true, "data": [{ "id": "1", "name": "Oats" }] }]).to_string(),
        )])
        .await;

        let data = transport_for(&url, 3).send(&ApiRequest::list("Foods", 0, 10)).await.unwrap();
        assert_eq!(data, json!([{ "id": "1", "name": "Oats" }]));
        assert_eq!(server.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_http_transport_server_error_is_retried_then_exhausted() {
        let unavailable = (503, "Service Unavailable", String::new());
        let (url, server) = serve(vec![unavailable.clone(), unavailable]).await;

        let result = transport_for(&url, 2).send(&ApiRequest::list("Foods", 0, 10)).await;
        match result {
            Err(ApiError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(
                    *source,
                    ApiError::Status { status: 503, ref reason } if reason == "Service Unavailable"
                ));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(server.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_http_transport_client_error_is_not_retried() {
        let (url, server) = serve(vec![(404, "Not Found", String::new())]).await;

        let result = transport_for(&url, 3).send(&ApiRequest::detail("Foods", "9")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert!(!err.is_retryable());
        assert_eq!(server.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_http_transport_bad_json_is_decode_error() {
        let (url, server) = serve(vec![(200, "OK", "{not json".to_string())]).await;

        let result = transport_for(&url, 3).send(&ApiRequest::list("Foods", 0, 10)).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert_eq!(server.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused_is_retryable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/controller.php", listener.local_addr().unwrap());
        drop(listener);

        let result = transport_for(&url, 1).send(&ApiRequest::list("Foods", 0, 10)).await;
        match result {
            Err(ApiError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 1);
                assert!(source.is_retryable());
                match *source {
                    ApiError::Network(ref e) => {
                        assert!(!e.is_builder());
                        assert!(e.status().is_none());
                    }
                    ref other => panic!("expected a network error, got {:?}", other),
                }
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_transport_validates_before_sending() {
        let transport = HttpTransport::new(ClientConfig::default()).unwrap();
        let mut request = ApiRequest::update("Foods", Value::Null);
        request.object = None;
        let result = transport.send(&request).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
