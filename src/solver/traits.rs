//! Interface to the external skinning decomposition solver.

use super::model::SolverModel;
use crate::util::{Result, Scalar};

/// A skinning decomposition solver driven through the bridge.
///
/// Implementations own a [`SolverModel`] the marshaling layer reads and
/// writes between calls. Failures the solver recognizes are returned as
/// `Err`; anything else may unwind and is contained by the invoker.
pub trait Solver {
    type Scalar: Scalar;

    fn model(&self) -> &SolverModel<Self::Scalar>;

    fn model_mut(&mut self) -> &mut SolverModel<Self::Scalar>;

    /// Initialize bones and weights from the input poses.
    fn init(&mut self) -> Result<()>;

    /// Run the full decomposition.
    fn compute(&mut self) -> Result<()>;

    /// Update skinning weights only.
    fn compute_weights(&mut self) -> Result<()>;

    /// Update bone transformations only.
    fn compute_transformations(&mut self) -> Result<()>;

    /// Root mean squared reconstruction error.
    fn rmse(&self) -> Self::Scalar;

    /// Drop all data, keeping parameters.
    fn clear(&mut self);
}
