//! Solver collaborator and the invocation boundary.
//!
//! - [`Solver`] - Trait implemented by the external decomposition solver
//! - [`SolverModel`] - Numeric state exchanged with the host
//! - [`ComputationInvoker`] - Timed, failure-contained `compute` calls
//! - [`SkinningSession`] - Getter/setter surface combining the codecs

mod invoker;
mod model;
mod session;
mod traits;

pub use invoker::*;
pub use model::*;
pub use session::*;
pub use traits::*;
