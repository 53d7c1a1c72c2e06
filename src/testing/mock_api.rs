//! Mock Generation Server for Tests
//!
//! Provides a [`MockGenerationServer`] that emulates an Ollama-style
//! `/api/generate` endpoint on loopback, so the HTTP client and the
//! generative source can be exercised without a live model.
//!
//! # Example
//! ```ignore
//! let server = MockGenerationServer::builder()
//!     .with_response(r#"{"questao": "..."}"#)
//!     .with_latency(50)
//!     .build()
//!     .await;
//! let endpoint = format!("{}/api/generate", server.url());
//! // ... point the client at `endpoint` ...
//! server.stop().await;
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};

/// Upper bound on a request we are willing to buffer.
const MAX_REQUEST_BYTES: usize = 1 << 20;

/// Describes how the mock server should answer one request.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with a well-formed envelope whose `response` is this text
    Text(String),
    /// 200 with this exact body
    Raw(String),
    /// An HTTP error with the given status code and body
    Error { status: u16, body: String },
}

/// A lightweight mock HTTP server that speaks just enough of the
/// generation protocol to satisfy [`crate::api::OllamaClient`].
pub struct MockGenerationServer {
    url: String,
    requests: Arc<AtomicUsize>,
    shutdown_tx: watch::Sender<bool>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockGenerationServer {
    pub fn builder() -> MockGenerationServerBuilder {
        MockGenerationServerBuilder::default()
    }

    /// Bind to `127.0.0.1:0` and start serving in a background task.
    pub async fn start(config: MockServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("failed to get local addr");
        let url = format!("http://{}", addr);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let requests = Arc::new(AtomicUsize::new(0));
        let handle = tokio::spawn(accept_loop(
            listener,
            Arc::new(config),
            Arc::clone(&requests),
            shutdown_rx,
        ));

        Self {
            url,
            requests,
            shutdown_tx,
            handle,
        }
    }

    /// Base URL, e.g. `"http://127.0.0.1:54321"`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Full generation endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.url)
    }

    /// Number of generation requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

#[derive(Debug, Clone)]
pub struct MockServerConfig {
    /// Served in FIFO order, then `default_response` forever
    pub responses: Vec<MockResponse>,
    pub default_response: MockResponse,
    /// Delay before every response (milliseconds)
    pub latency_ms: u64,
    pub model: String,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            responses: Vec::new(),
            default_response: MockResponse::Error {
                status: 500,
                body: "no more responses".to_string(),
            },
            latency_ms: 0,
            model: "mock-model".to_string(),
        }
    }
}

#[derive(Default)]
pub struct MockGenerationServerBuilder {
    config: MockServerConfig,
}

impl MockGenerationServerBuilder {
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.config.responses.push(MockResponse::Text(text.into()));
        self
    }

    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.config.responses.push(MockResponse::Raw(body.into()));
        self
    }

    pub fn with_error(mut self, status: u16, body: impl Into<String>) -> Self {
        self.config.responses.push(MockResponse::Error {
            status,
            body: body.into(),
        });
        self
    }

    pub fn with_latency(mut self, ms: u64) -> Self {
        self.config.latency_ms = ms;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn with_default_response(mut self, resp: MockResponse) -> Self {
        self.config.default_response = resp;
        self
    }

    pub fn with_default_response_text(self, text: impl Into<String>) -> Self {
        self.with_default_response(MockResponse::Text(text.into()))
    }

    pub async fn build(self) -> MockGenerationServer {
        MockGenerationServer::start(self.config).await
    }
}

async fn accept_loop(
    listener: TcpListener,
    config: Arc<MockServerConfig>,
    requests: Arc<AtomicUsize>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let response_idx = Arc::new(Mutex::new(0usize));

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _addr)) => {
                        let cfg = Arc::clone(&config);
                        let idx = Arc::clone(&response_idx);
                        let counter = Arc::clone(&requests);
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, cfg, idx, counter).await {
                                tracing::debug!("mock server connection error: {}", e);
                            }
                        });
                    }
                    Err(e) => {
                        tracing::debug!("mock server accept error: {}", e);
                    }
                }
            }
        }
    }
}

/// Read one HTTP request completely (headers plus `Content-Length` body).
async fn read_request(stream: &mut tokio::net::TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
        if buf.len() > MAX_REQUEST_BYTES {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn handle_connection(
    mut stream: tokio::net::TcpStream,
    config: Arc<MockServerConfig>,
    response_idx: Arc<Mutex<usize>>,
    requests: Arc<AtomicUsize>,
) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;
    if request.is_empty() {
        return Ok(());
    }

    let is_generate = request.starts_with("POST") && request.contains("/api/generate");
    if !is_generate {
        write_http_response(&mut stream, 404, "").await?;
        return Ok(());
    }
    requests.fetch_add(1, Ordering::SeqCst);

    if config.latency_ms > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(config.latency_ms)).await;
    }

    let mock_response = {
        let mut idx = response_idx.lock().await;
        if *idx < config.responses.len() {
            let resp = config.responses[*idx].clone();
            *idx += 1;
            resp
        } else {
            config.default_response.clone()
        }
    };

    match mock_response {
        MockResponse::Text(text) => {
            let body = serde_json::json!({
                "model": config.model,
                "created_at": "2026-10-15T00:00:00Z",
                "response": text,
                "done": true,
            })
            .to_string();
            write_http_response(&mut stream, 200, &body).await?;
        }
        MockResponse::Raw(body) => {
            write_http_response(&mut stream, 200, &body).await?;
        }
        MockResponse::Error { status, body } => {
            write_http_response(&mut stream, status, &body).await?;
        }
    }

    Ok(())
}

async fn write_http_response(
    stream: &mut tokio::net::TcpStream,
    status: u16,
    body: &str,
) -> std::io::Result<()> {
    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body,
    );

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}
