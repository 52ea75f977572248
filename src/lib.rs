//! # dembones-bridge
//!
//! Marshaling and logging layer between a host scripting environment and a
//! Dem Bones style skinning decomposition solver.
//!
//! The solver stores skinning weights as a sparse `(nB x nV)` matrix,
//! bone transformations as a flat `(3 * nF, 4)` stack and bind matrices as a
//! `(3, 4 * nB)` horizontal stack. Hosts want dense arrays, `(nF, 4, 4)`
//! frames and `(3 * nB, 4)` blocks. This crate converts between the two,
//! routes leveled log events to native and host sinks, and runs the solver
//! behind a boundary that turns every failure into a `(success, message)`
//! pair.
//!
//! ## Modules
//!
//! - [`util`] - Errors, scalar trait and identity helpers
//! - [`codec`] - Weight, transformation and bind pose conversions
//! - [`logging`] - Dual-channel logging bridge
//! - [`solver`] - Solver trait, model, invoker and session
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dembones_bridge::prelude::*;
//!
//! let bridge = Arc::new(LoggingBridge::new(BridgeConfig::from_env()));
//! let mut session = SkinningSession::new(MySolver::default(), bridge);
//! session.set_weights(dense.view());
//! let (ok, message) = session.compute().into_tuple();
//! ```

pub mod util;
pub mod codec;
pub mod logging;
pub mod solver;

// Python bindings (optional, enabled with "python" feature)
#[cfg(feature = "python")]
pub mod python;

/// Crate version, exposed to hosts as `__version__`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types
pub use util::{Error, Result, Scalar};
pub use logging::{BridgeConfig, LogLevel, LoggingBridge};
pub use solver::{ComputationInvoker, ComputeOutcome, SkinningSession, Solver, SolverModel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, Scalar};
    pub use crate::codec::{bind_pose, transforms, weights};
    pub use crate::logging::{
        init_console, BridgeConfig, HostMethod, HostScope, HostSink, LockedHost, LogLevel,
        LoggingBridge, NativeSink, TracingSink,
    };
    pub use crate::solver::{
        ComputationInvoker, ComputeFailure, ComputeOutcome, Progress, RigData,
        SkinningSession, Solver, SolverModel, SolverParams,
    };
}
