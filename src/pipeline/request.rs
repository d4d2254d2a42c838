use crate::credentials::AwsCredentials;
use crate::shape::Shape;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Per-call settings.
///
/// None of these outlive the call: override credentials are used for this
/// invocation only and never reach the client's credentials provider.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    credentials: Option<AwsCredentials>,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign this call with `credentials` instead of asking the provider.
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Absolute deadline for the call. Wins over [`with_timeout`](Self::with_timeout).
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline relative to the start of the call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the call when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Override credentials.
    pub fn credentials(&self) -> Option<&AwsCredentials> {
        self.credentials.as_ref()
    }

    /// Cancellation token.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Effective deadline for a call that started at `started`.
    ///
    /// Absolute deadline first, then the relative timeout, then `default`.
    /// A relative timeout too large to represent as an instant, such as
    /// `Duration::MAX`, means the call has no deadline.
    pub fn effective_deadline(&self, started: Instant, default: Duration) -> Option<Instant> {
        match (self.deadline, self.timeout) {
            (Some(deadline), _) => Some(deadline),
            (None, Some(timeout)) => started.checked_add(timeout),
            (None, None) => started.checked_add(default),
        }
    }

    pub(crate) fn take_credentials(&mut self) -> Option<AwsCredentials> {
        self.credentials.take()
    }
}

/// A request shape plus its per-call options.
#[derive(Debug, Clone)]
pub struct Request<I> {
    /// Input shape.
    pub input: I,
    /// Per-call options.
    pub options: RequestOptions,
}

impl<I> Request<I> {
    /// Wrap `input` with default options.
    pub fn new(input: I) -> Self {
        Self {
            input,
            options: RequestOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// See [`RequestOptions::with_credentials`].
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.options = self.options.with_credentials(credentials);
        self
    }

    /// See [`RequestOptions::with_deadline`].
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.options = self.options.with_deadline(deadline);
        self
    }

    /// See [`RequestOptions::with_timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_timeout(timeout);
        self
    }

    /// See [`RequestOptions::with_cancellation`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.options = self.options.with_cancellation(token);
        self
    }
}

impl<I: Shape> From<I> for Request<I> {
    fn from(input: I) -> Self {
        Request::new(input)
    }
}
