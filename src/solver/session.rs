//! Host-facing accessors over a solver.
//!
//! A session owns one solver and a handle to the process logging bridge.
//! Getters return fresh host buffers; setters copy host buffers into the
//! solver model.

use std::sync::Arc;

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use super::invoker::{ComputationInvoker, ComputeOutcome};
use super::model::{Progress, SolverParams};
use super::traits::Solver;
use crate::codec::{bind_pose, transforms, weights};
use crate::logging::LoggingBridge;
use crate::util::Result;

/// A solver paired with the bridge its computations report through.
pub struct SkinningSession<T: Solver> {
    solver: T,
    bridge: Arc<LoggingBridge>,
    label: String,
}

impl<T: Solver> SkinningSession<T> {
    pub fn new(solver: T, bridge: Arc<LoggingBridge>) -> Self {
        Self {
            solver,
            bridge,
            label: "DemBones".to_string(),
        }
    }

    /// Name used in computation log events.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn solver(&self) -> &T {
        &self.solver
    }

    pub fn solver_mut(&mut self) -> &mut T {
        &mut self.solver
    }

    pub fn into_inner(self) -> T {
        self.solver
    }

    pub fn bridge(&self) -> &Arc<LoggingBridge> {
        &self.bridge
    }

    // ------------------------------------------------------------------
    // Solver entry points
    // ------------------------------------------------------------------

    /// Run the full decomposition. Never fails; see [`ComputeOutcome`].
    pub fn compute(&mut self) -> ComputeOutcome {
        ComputationInvoker::new(&self.bridge)
            .with_label(&self.label)
            .invoke(&mut self.solver)
    }

    pub fn init(&mut self) -> Result<()> {
        self.solver.init()
    }

    pub fn compute_weights(&mut self) -> Result<()> {
        self.solver.compute_weights()
    }

    pub fn compute_transformations(&mut self) -> Result<()> {
        self.solver.compute_transformations()
    }

    pub fn rmse(&self) -> T::Scalar {
        self.solver.rmse()
    }

    pub fn clear(&mut self) {
        self.solver.clear();
    }

    // ------------------------------------------------------------------
    // Parameters and counters
    // ------------------------------------------------------------------

    pub fn params(&self) -> &SolverParams<T::Scalar> {
        &self.solver.model().params
    }

    pub fn params_mut(&mut self) -> &mut SolverParams<T::Scalar> {
        &mut self.solver.model_mut().params
    }

    pub fn progress(&self) -> Progress {
        self.solver.model().progress
    }

    // ------------------------------------------------------------------
    // Buffers
    // ------------------------------------------------------------------

    /// Dense `(nB, nV)` weights.
    pub fn weights(&self) -> Array2<T::Scalar> {
        let model = self.solver.model();
        weights::to_dense(&model.w, model.n_b, model.n_v)
    }

    /// Replace weights with the non-zero cells of `dense`.
    pub fn set_weights(&mut self, dense: ArrayView2<'_, T::Scalar>) {
        self.solver.model_mut().w = weights::from_dense(dense);
    }

    /// `(nF, 4, 4)` frames, empty until both frames and bones are set.
    pub fn transformations(&self) -> Array3<T::Scalar> {
        let model = self.solver.model();
        let n_frames = if model.n_b > 0 { model.n_f } else { 0 };
        transforms::unpack(model.m.view(), n_frames)
    }

    /// Store a flat `(3 * nF, 4)` stack as-is.
    pub fn set_transformations(&mut self, flat: Array2<T::Scalar>) {
        self.solver.model_mut().m = flat;
    }

    /// Store `(nF, 4, 4)` frames in flat form.
    pub fn set_transformation_stack(&mut self, stack: ArrayView3<'_, T::Scalar>) {
        self.solver.model_mut().m = transforms::pack(stack);
    }

    /// Bind matrices as `(3 * nB, 4)` blocks.
    pub fn bind(&self) -> Array2<T::Scalar> {
        let model = self.solver.model();
        bind_pose::pack(model.rig.bind.view(), model.n_b)
    }

    /// Set bind matrices from `(3 * nB, 4)` blocks, growing `nB` if needed.
    pub fn set_bind(&mut self, blocks: ArrayView2<'_, T::Scalar>) -> Result<()> {
        let model = self.solver.model_mut();
        model.rig.bind = bind_pose::unpack(blocks, &mut model.n_b)?;
        Ok(())
    }

    pub fn rest_pose(&self) -> Array2<T::Scalar> {
        self.solver.model().u.clone()
    }

    pub fn set_rest_pose(&mut self, rest_pose: Array2<T::Scalar>) {
        self.solver.model_mut().u = rest_pose;
    }

    pub fn animated_poses(&self) -> Array2<T::Scalar> {
        self.solver.model().v.clone()
    }

    pub fn set_animated_poses(&mut self, animated_poses: Array2<T::Scalar>) {
        self.solver.model_mut().v = animated_poses;
    }
}
