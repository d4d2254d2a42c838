//! Spy transport.

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Canned response.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::json(200, body)
    }

    /// Any status with a JSON body.
    pub fn json(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
        .with_header("content-type", "application/x-amz-json-1.1")
    }

    /// Any status with an empty body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Bytes::new(),
        }
    }

    /// Service error in the JSON protocol's usual form.
    pub fn service_error(status: u16, code: &str, message: &str) -> Self {
        let body = serde_json::json!({ "__type": code, "message": message });
        Self::json(status, body.to_string())
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add an `x-amzn-RequestId` header.
    pub fn with_request_id(self, request_id: impl Into<String>) -> Self {
        self.with_header("x-amzn-RequestId", request_id)
    }
}

impl From<MockResponse> for HttpResponse {
    fn from(mock: MockResponse) -> Self {
        let mut response = HttpResponse::new(mock.status, mock.body);
        for (name, value) in mock.headers {
            response = response.with_header(name, value);
        }
        response
    }
}

/// Transport that records every request and answers from a queue.
///
/// When the queue is empty the default response is used; without one the
/// send fails with a connection error.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<MockResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    deadlines: Mutex<Vec<Option<Instant>>>,
    default_response: Option<MockResponse>,
    delay: Option<Duration>,
    hang: bool,
    shut_down: AtomicBool,
}

impl MockTransport {
    /// Transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport answering every request with `response`.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            default_response: Some(response),
            ..Self::default()
        }
    }

    /// Transport answering from `responses` in order.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    /// Transport that records the request and never answers.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a response.
    pub fn push_response(&self, response: MockResponse) {
        self.replies.lock().push_back(Ok(response));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.replies.lock().push_back(Err(error));
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests sent.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    /// Deadlines passed with each send.
    pub fn deadlines(&self) -> Vec<Option<Instant>> {
        self.deadlines.lock().clone()
    }

    /// Whether `shutdown` was called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(
        &self,
        request: HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<HttpResponse, TransportError> {
        if self.is_shut_down() {
            return Err(TransportError::Shutdown);
        }

        self.requests.lock().push(request);
        self.deadlines.lock().push(deadline);

        if self.hang {
            futures::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .replies
            .lock()
            .pop_front()
            .or_else(|| self.default_response.clone().map(Ok));

        match reply {
            Some(Ok(response)) => Ok(response.into()),
            Some(Err(error)) => Err(error),
            None => Err(TransportError::Connection {
                message: "No mock response available".to_string(),
            }),
        }
    }

    fn shutdown(&self) {
        self.shut_down.store(true, Ordering::Release);
    }
}
