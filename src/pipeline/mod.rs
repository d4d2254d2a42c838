//! Invocation pipeline.
//!
//! One invocation walks a fixed sequence of stages:
//!
//! ```text
//! Init -> CredentialsResolved -> Marshalled -> Dispatched -> Unmarshalled -> Done
//! ```
//!
//! with `Errored` reachable from each of them. Credentials are resolved
//! first (per-call override, else the shared provider, called once), the
//! input is marshalled and validated, the request is signed and sent through
//! the transport exactly once, and the response is decoded into the result
//! shape or a typed service error. Nothing is retried here; see
//! [`crate::resilience`] for a caller-side retry helper.

mod request;

pub use request::{Request, RequestOptions};

use crate::config::ClientConfig;
use crate::error::{ConfigurationError, SdkResult, ServiceErrorKind, TransportError};
use crate::metrics::{CallOutcome, MetricField};
use crate::protocol::{JsonMarshaller, JsonUnmarshaller, Marshaller, ServiceMetadata, Unmarshaller, WireRequest};
use crate::shape::Shape;
use crate::signing::{RequestSigner, SigningContext};
use crate::transport::{HttpRequest, HttpTransport};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, trace, warn, Instrument};
use url::Url;
use uuid::Uuid;

/// Header carrying the per-invocation id.
pub const INVOCATION_ID_HEADER: &str = "amz-sdk-invocation-id";

/// Binds an operation name to its input, output and error kind.
///
/// Implemented by marker types in each service module.
pub trait Operation: Send + Sync + 'static {
    /// Wire operation name, used in `x-amz-target`.
    const NAME: &'static str;

    /// Whether repeating the call has no additional effect.
    const IDEMPOTENT: bool = false;

    /// Request shape.
    type Input: Shape;

    /// Result shape.
    type Output: Shape;

    /// Service error kind.
    type ErrorKind: ServiceErrorKind;
}

/// Declares operation marker types and their [`Operation`] impls.
macro_rules! operations {
    (
        error: $kind:ty;
        $(
            $(#[$meta:meta])*
            $name:ident: $input:ty => $output:ty, idempotent = $idem:literal;
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl $crate::pipeline::Operation for $name {
                const NAME: &'static str = stringify!($name);
                const IDEMPOTENT: bool = $idem;
                type Input = $input;
                type Output = $output;
                type ErrorKind = $kind;
            }
        )+
    };
}

pub(crate) use operations;

/// Stage of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// Request accepted.
    Init,
    /// Credentials are known.
    CredentialsResolved,
    /// Input validated and encoded.
    Marshalled,
    /// A response was received.
    Dispatched,
    /// The response was decoded into the result shape.
    Unmarshalled,
    /// The call finished successfully.
    Done,
    /// The call failed.
    Errored,
}

impl CallState {
    /// Stage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallState::Init => "Init",
            CallState::CredentialsResolved => "CredentialsResolved",
            CallState::Marshalled => "Marshalled",
            CallState::Dispatched => "Dispatched",
            CallState::Unmarshalled => "Unmarshalled",
            CallState::Done => "Done",
            CallState::Errored => "Errored",
        }
    }

    fn advance(&mut self, next: CallState) {
        trace!(from = self.as_str(), to = next.as_str(), "State transition");
        *self = next;
    }
}

/// Runs invocations for one service.
///
/// Cheap to clone; clones share configuration, transport and signer.
#[derive(Clone)]
pub struct Invoker {
    inner: Arc<InvokerInner>,
}

struct InvokerInner {
    config: ClientConfig,
    metadata: &'static ServiceMetadata,
    endpoint: Url,
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn RequestSigner>,
    shut_down: AtomicBool,
}

impl Invoker {
    /// Create an invoker. The endpoint is resolved once, here.
    pub fn new(
        config: ClientConfig,
        metadata: &'static ServiceMetadata,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, ConfigurationError> {
        let endpoint = config.resolve_endpoint(metadata.endpoint_prefix)?;
        debug!(
            service = metadata.service_name,
            endpoint = %endpoint,
            region = %config.region,
            "Created invoker"
        );
        Ok(Self {
            inner: Arc::new(InvokerInner {
                config,
                metadata,
                endpoint,
                transport,
                signer,
                shut_down: AtomicBool::new(false),
            }),
        })
    }

    /// Service binding.
    pub fn metadata(&self) -> &'static ServiceMetadata {
        self.inner.metadata
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Resolved endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.inner.shut_down.load(Ordering::Acquire)
    }

    /// Release the transport. Idempotent; later calls fail with
    /// [`TransportError::Shutdown`] without touching the network.
    pub fn shutdown(&self) {
        if !self.inner.shut_down.swap(true, Ordering::AcqRel) {
            self.inner.transport.shutdown();
            debug!(service = self.inner.metadata.service_name, "Invoker shut down");
        }
    }

    /// Invoke a typed operation with the JSON protocol engine.
    pub async fn invoke<O: Operation>(
        &self,
        request: Request<O::Input>,
    ) -> SdkResult<O::Output, O::ErrorKind> {
        let marshaller = JsonMarshaller::new(self.inner.metadata, O::NAME);
        let unmarshaller = JsonUnmarshaller::<O::Output, O::ErrorKind>::new();
        self.invoke_with(request, &marshaller, &unmarshaller, O::NAME)
            .await
    }

    /// Invoke with an explicit marshaller and unmarshaller.
    pub async fn invoke_with<I, O, K, M, U>(
        &self,
        request: Request<I>,
        marshaller: &M,
        unmarshaller: &U,
        operation: &'static str,
    ) -> SdkResult<O, K>
    where
        I: Send,
        O: Send,
        K: ServiceErrorKind,
        M: Marshaller<I>,
        U: Unmarshaller<O, K>,
    {
        let started = Instant::now();
        let invocation_id = Uuid::new_v4();
        let service = self.inner.metadata.service_name;
        let span = debug_span!("invoke", service, operation, %invocation_id);

        async move {
            debug!("Starting call");
            let mut state = CallState::Init;
            let result = self
                .run(
                    request,
                    marshaller,
                    unmarshaller,
                    operation,
                    invocation_id,
                    started,
                    &mut state,
                )
                .await;

            let elapsed = started.elapsed();
            self.record_timing(operation, MetricField::ClientExecuteTime, elapsed);

            let outcome = match &result {
                Ok(_) => {
                    state.advance(CallState::Done);
                    debug!(elapsed_ms = elapsed.as_millis() as u64, "Call succeeded");
                    CallOutcome::Success
                }
                Err(error) => {
                    state.advance(CallState::Errored);
                    warn!(
                        error = %error,
                        category = ?error.category(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Call failed"
                    );
                    CallOutcome::Failure {
                        category: format!("{:?}", error.category()),
                        code: error.error_code().map(str::to_string),
                    }
                }
            };
            self.inner
                .config
                .metrics
                .record_outcome(service, operation, &outcome);

            result
        }
        .instrument(span)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn run<I, O, K, M, U>(
        &self,
        request: Request<I>,
        marshaller: &M,
        unmarshaller: &U,
        operation: &'static str,
        invocation_id: Uuid,
        started: Instant,
        state: &mut CallState,
    ) -> SdkResult<O, K>
    where
        I: Send,
        O: Send,
        K: ServiceErrorKind,
        M: Marshaller<I>,
        U: Unmarshaller<O, K>,
    {
        let inner = &*self.inner;
        if self.is_shut_down() {
            return Err(TransportError::Shutdown.into());
        }

        let Request { input, mut options } = request;
        let override_credentials = options.take_credentials();
        let cancellation = options.cancellation().cloned();
        if cancellation
            .as_ref()
            .map_or(false, CancellationToken::is_cancelled)
        {
            return Err(TransportError::Cancelled.into());
        }
        let deadline = options.effective_deadline(started, inner.config.operation_timeout);

        let stage = Instant::now();
        let credentials = match override_credentials {
            Some(credentials) => {
                trace!("Using per-call credentials");
                credentials
            }
            None => {
                bounded(
                    inner.config.credentials_provider.get_credentials(),
                    deadline,
                    cancellation.as_ref(),
                    "credential resolution",
                )
                .await??
            }
        };
        self.record_timing(operation, MetricField::CredentialsRequestTime, stage.elapsed());
        state.advance(CallState::CredentialsResolved);

        let stage = Instant::now();
        let wire = marshaller.marshall(&input)?;
        self.record_timing(operation, MetricField::RequestMarshallTime, stage.elapsed());
        state.advance(CallState::Marshalled);

        let stage = Instant::now();
        let http_request = self.build_http_request(wire, invocation_id);
        let context = SigningContext::new(inner.config.region.as_str(), inner.metadata.signing_name);
        let signed = inner.signer.sign(http_request, &credentials, &context)?;
        self.record_timing(operation, MetricField::RequestSigningTime, stage.elapsed());

        let stage = Instant::now();
        let response = bounded(
            inner.transport.send(signed, deadline),
            deadline,
            cancellation.as_ref(),
            "dispatch",
        )
        .await
        .and_then(|response| response);
        self.record_timing(operation, MetricField::HttpRequestTime, stage.elapsed());
        let response = response?;
        state.advance(CallState::Dispatched);
        debug!(
            status = response.status,
            request_id = response.request_id().unwrap_or("-"),
            "Received response"
        );

        let stage = Instant::now();
        let output = unmarshaller.unmarshall(&response);
        self.record_timing(operation, MetricField::ResponseProcessingTime, stage.elapsed());
        let output = output?;
        state.advance(CallState::Unmarshalled);

        Ok(output)
    }

    fn build_http_request(&self, wire: WireRequest, invocation_id: Uuid) -> HttpRequest {
        let mut url = self.inner.endpoint.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), wire.path);
        url.set_path(&path);
        if !wire.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &wire.query {
                pairs.append_pair(name, value);
            }
        }

        let mut request = HttpRequest::new(wire.method, url).with_body(wire.body);
        for (name, value) in wire.headers {
            request.set_header(name, value);
        }
        if let Some(host) = request.host_header() {
            request.set_header("host", host);
        }
        request.set_header("user-agent", self.inner.config.user_agent.as_str());
        request.set_header(INVOCATION_ID_HEADER, invocation_id.to_string());
        request
    }

    fn record_timing(&self, operation: &str, field: MetricField, duration: Duration) {
        self.inner.config.metrics.record_timing(
            self.inner.metadata.service_name,
            operation,
            field,
            duration,
        );
    }
}

/// Await `future` until `deadline` passes or `cancellation` fires.
///
/// Both bounds surface as transport errors; nothing has reached the network
/// when they fire before dispatch.
async fn bounded<F: Future>(
    future: F,
    deadline: Option<Instant>,
    cancellation: Option<&CancellationToken>,
    stage: &'static str,
) -> Result<F::Output, TransportError> {
    let timed = async {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, future).await.map_err(|_| {
                TransportError::Timeout {
                    message: format!("deadline elapsed during {}", stage),
                }
            }),
            None => Ok(future.await),
        }
    };

    match cancellation {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(TransportError::Cancelled),
            outcome = timed => outcome,
        },
        None => timed.await,
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("service", &self.inner.metadata.service_name)
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("region", &self.inner.config.region)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}
