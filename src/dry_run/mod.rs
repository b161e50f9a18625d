//! Dry-run orchestration.
//!
//! A [`DryRunner`] walks a list of [`ProbeTarget`]s strictly in order, awaiting
//! each probe before issuing the next, and records one [`ProbeOutcome`] per
//! target. A failing probe never aborts the run. Optionally each probe gets a
//! deadline, and the run can be cancelled through a [`CancellationToken`];
//! a cancelled run keeps the outcomes recorded so far.
//!
//! ```rust
//! use route_audit::{HttpMethod, ProbeTarget, dry_run::{DryRunner, probe_fn}};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let runner = DryRunner::new(probe_fn(|_, path: String| async move {
//!     Ok::<_, route_audit::Error>(if path == "/movies" { 200 } else { 404 })
//! }));
//!
//! let report = runner
//!     .run(&[
//!         ProbeTarget::new(HttpMethod::Get, "/movies"),
//!         ProbeTarget::new(HttpMethod::Get, "/missing"),
//!     ])
//!     .await;
//!
//! assert_eq!(report.passed(), 1);
//! assert_eq!(report.failed(), 1);
//! # }
//! ```

mod probe;

pub use probe::{HttpProbe, Probe, ProbeFn, RouterProbe, probe_fn};

use {
    crate::{Error, HttpMethod, ProbeTarget},
    serde::{Deserialize, Serialize},
    std::time::Duration,
    tokio_util::sync::CancellationToken,
};

/// Result of probing a single target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub ok: bool,
}

impl ProbeOutcome {
    /// A probe that got a response. `ok` iff `200 <= status < 400`.
    pub fn from_status(method: HttpMethod, path: impl Into<String>, status: u16) -> Self {
        Self {
            method,
            path: path.into(),
            status: Some(status),
            error: None,
            ok: (200..400).contains(&status),
        }
    }

    /// A probe that failed before producing a status.
    pub fn from_error(method: HttpMethod, path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            status: None,
            error: Some(error.into()),
            ok: false,
        }
    }
}

/// Ordered outcomes of a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunReport {
    pub outcomes: Vec<ProbeOutcome>,
    /// Set when the run stopped early because it was cancelled.
    pub cancelled: bool,
}

impl DryRunReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

/// Sequentially probes targets through a [`Probe`].
pub struct DryRunner<P> {
    probe: P,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl<P: Probe> DryRunner<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            timeout: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Fails any single probe that takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stops the run when `token` is cancelled.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this runner.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn run(&self, targets: &[ProbeTarget]) -> DryRunReport {
        tracing::info!(probes = targets.len(), "Starting dry run");
        let mut report = DryRunReport {
            outcomes: Vec::with_capacity(targets.len()),
            cancelled: false,
        };

        for target in targets {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    report.cancelled = true;
                    break;
                }
                outcome = self.probe_one(target) => outcome,
            };

            match (&outcome.status, &outcome.error) {
                (_, Some(error)) => tracing::info!(
                    method = %outcome.method,
                    path = %outcome.path,
                    error = %error,
                    ok = outcome.ok,
                    "Probe failed"
                ),
                (status, None) => tracing::info!(
                    method = %outcome.method,
                    path = %outcome.path,
                    status = ?status,
                    ok = outcome.ok,
                    "Probe completed"
                ),
            }
            report.outcomes.push(outcome);
        }

        if report.cancelled {
            tracing::warn!(
                completed = report.outcomes.len(),
                remaining = targets.len() - report.outcomes.len(),
                "Dry run cancelled"
            );
        } else {
            tracing::info!(
                passed = report.passed(),
                failed = report.failed(),
                "Dry run complete"
            );
        }
        report
    }

    async fn probe_one(&self, target: &ProbeTarget) -> ProbeOutcome {
        let probe = self.probe.probe(target.method, &target.path);
        let result = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, probe).await {
                Ok(result) => result,
                Err(_) => Err(Error::probe(format!(
                    "Timed out after {}",
                    humantime::format_duration(timeout)
                ))),
            },
            None => probe.await,
        };

        match result {
            Ok(status) => ProbeOutcome::from_status(target.method, target.path.as_str(), status),
            Err(e) => ProbeOutcome::from_error(target.method, target.path.as_str(), e.to_string()),
        }
    }
}
