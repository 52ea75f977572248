//! Invocation boundary around `Solver::compute`.
//!
//! Nothing raised by the solver crosses this boundary. Every call ends in a
//! [`ComputeOutcome`], which the host sees as a `(success, message)` pair.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use super::traits::Solver;
use crate::logging::{LogLevel, LoggingBridge, DIAGNOSTIC_TARGET};
use crate::util::panic_message;

/// Message reported for failures the solver did not describe.
pub const UNKNOWN_FAILURE: &str = "Unknown error occurred during computation";

/// Why a computation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComputeFailure {
    /// The solver returned an error with this description.
    Solver(String),
    /// The solver unwound without a usable error.
    Unknown,
}

impl ComputeFailure {
    pub fn message(&self) -> &str {
        match self {
            ComputeFailure::Solver(msg) => msg,
            ComputeFailure::Unknown => UNKNOWN_FAILURE,
        }
    }
}

impl fmt::Display for ComputeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one wrapped computation.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputeOutcome {
    Completed { elapsed: Duration },
    Failed(ComputeFailure),
}

impl ComputeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ComputeOutcome::Completed { .. })
    }

    /// Failure description, empty on success.
    pub fn message(&self) -> &str {
        match self {
            ComputeOutcome::Completed { .. } => "",
            ComputeOutcome::Failed(failure) => failure.message(),
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ComputeOutcome::Completed { elapsed } => Some(*elapsed),
            ComputeOutcome::Failed(_) => None,
        }
    }

    /// The `(success, message)` pair handed to the host.
    pub fn into_tuple(self) -> (bool, String) {
        (self.is_success(), self.message().to_string())
    }
}

/// Runs solver computations with timing and failure containment.
pub struct ComputationInvoker<'a> {
    bridge: &'a LoggingBridge,
    label: &'a str,
}

impl<'a> ComputationInvoker<'a> {
    pub fn new(bridge: &'a LoggingBridge) -> Self {
        Self { bridge, label: "DemBones" }
    }

    /// Name used in the start event, e.g. `DemBonesExt`.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Call `solver.compute()` once.
    #[tracing::instrument(skip_all, fields(label = self.label))]
    pub fn invoke<T: Solver + ?Sized>(&self, solver: &mut T) -> ComputeOutcome {
        self.bridge.info(&format!("Starting {} computation", self.label));
        if self.bridge.is_enabled(LogLevel::Debug) {
            let model = solver.model();
            self.bridge.debug(&format!(
                "Computation parameters: nIters={}, nB={}, nV={}",
                model.params.n_iters, model.n_b, model.n_v
            ));
        }

        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| solver.compute()));
        let elapsed = start.elapsed();

        match result {
            Ok(Ok(())) => {
                self.bridge.info(&format!(
                    "Computation completed successfully in {}ms",
                    elapsed.as_millis()
                ));
                ComputeOutcome::Completed { elapsed }
            }
            Ok(Err(e)) => {
                let msg = e.to_string();
                self.bridge.error(&format!("Computation failed with error: {}", msg));
                ComputeOutcome::Failed(ComputeFailure::Solver(msg))
            }
            Err(payload) => {
                tracing::debug!(target: DIAGNOSTIC_TARGET, "solver unwound: {}", panic_message(payload.as_ref()));
                self.bridge.error(UNKNOWN_FAILURE);
                ComputeOutcome::Failed(ComputeFailure::Unknown)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_tuples() {
        let ok = ComputeOutcome::Completed { elapsed: Duration::from_millis(3) };
        assert_eq!(ok.elapsed(), Some(Duration::from_millis(3)));
        assert_eq!(ok.into_tuple(), (true, String::new()));

        let failed = ComputeOutcome::Failed(ComputeFailure::Solver("singular matrix".into()));
        assert!(!failed.is_success());
        assert_eq!(failed.into_tuple(), (false, "singular matrix".to_string()));

        let unknown = ComputeOutcome::Failed(ComputeFailure::Unknown);
        assert_eq!(unknown.message(), UNKNOWN_FAILURE);
        assert_eq!(unknown.elapsed(), None);
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(ComputeFailure::Unknown.to_string(), UNKNOWN_FAILURE);
        assert_eq!(ComputeFailure::Solver("nan in poses".into()).to_string(), "nan in poses");
    }
}
