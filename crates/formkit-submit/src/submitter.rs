//! The external asynchronous submission operation.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;

use crate::payload::{Payload, Receipt};

/// Why the external operation did not accept a submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitError {
    /// The service answered and refused the submission.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The service did not answer in time.
    #[error("submission timed out after {0:?}")]
    TimedOut(Duration),

    /// The request never reached the service.
    #[error("network error: {0}")]
    Network(String),
}

/// Accepts a payload and settles with a receipt or an error.
///
/// The pipeline treats implementations as opaque. There is no
/// cancellation: once called, the pipeline waits for the future to settle.
pub trait Submitter {
    fn submit(&self, payload: &Payload) -> impl Future<Output = Result<Receipt, SubmitError>>;
}

impl<S: Submitter> Submitter for &S {
    fn submit(&self, payload: &Payload) -> impl Future<Output = Result<Receipt, SubmitError>> {
        (**self).submit(payload)
    }
}

/// Stand-in backend: waits a fixed latency, then accepts or rejects every call.
#[derive(Debug)]
pub struct SimulatedBackend {
    latency: Duration,
    accept: bool,
    calls: AtomicU64,
}

impl SimulatedBackend {
    /// A backend that accepts after `latency`.
    pub fn accepting(latency: Duration) -> Self {
        Self {
            latency,
            accept: true,
            calls: AtomicU64::new(0),
        }
    }

    /// A backend that rejects after `latency`.
    pub fn rejecting(latency: Duration) -> Self {
        Self {
            accept: false,
            ..Self::accepting(latency)
        }
    }

    /// Number of submissions received so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Submitter for SimulatedBackend {
    async fn submit(&self, payload: &Payload) -> Result<Receipt, SubmitError> {
        let sequence = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        let bytes = serde_json::to_vec(payload).map(|v| v.len()).unwrap_or(0);
        tracing::debug!(
            form = %payload.form,
            sequence,
            bytes,
            latency_ms = self.latency.as_millis() as u64,
            "simulated backend received submission"
        );

        tokio::time::sleep(self.latency).await;

        if self.accept {
            Ok(Receipt {
                reference: Some(format!("{}-{sequence:04}", payload.form)),
            })
        } else {
            Err(SubmitError::Rejected(
                "the simulated service is configured to fail".to_string(),
            ))
        }
    }
}

/// Submitter backed by a synchronous closure that settles immediately.
pub struct FnSubmitter<F> {
    f: F,
}

impl<F> FnSubmitter<F>
where
    F: Fn(&Payload) -> Result<Receipt, SubmitError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Submitter for FnSubmitter<F>
where
    F: Fn(&Payload) -> Result<Receipt, SubmitError>,
{
    async fn submit(&self, payload: &Payload) -> Result<Receipt, SubmitError> {
        (self.f)(payload)
    }
}
