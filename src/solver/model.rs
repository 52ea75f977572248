//! Numeric state shared between the solver and the marshaling layer.
//!
//! Fields are read and written verbatim; nothing here interprets their
//! numeric meaning.

use ndarray::{Array1, Array2};
use sprs::CsMat;

use crate::util::Scalar;

/// Solver tuning parameters, passed through unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolverParams<S> {
    /// Global iterations.
    pub n_iters: i32,
    /// Clustering iterations during initialization.
    pub n_init_iters: i32,
    /// Transformation updates per global iteration.
    pub n_trans_iters: i32,
    pub trans_affine: S,
    pub trans_affine_norm: S,
    /// Weight updates per global iteration.
    pub n_weights_iters: i32,
    /// Maximum non-zero weights per vertex.
    pub nnz: i32,
    pub weights_smooth: S,
    pub weights_smooth_step: S,
    pub weight_eps: S,
}

/// Iteration counters maintained by the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub iter: i32,
    pub iter_transformations: i32,
    pub iter_weights: i32,
}

/// Rig data used by the extended solver.
#[derive(Clone, Debug)]
pub struct RigData<S> {
    /// Time of each frame.
    pub f_time: Vec<S>,
    pub bone_name: Vec<String>,
    /// Parent bone index, `-1` for roots.
    pub parent: Vec<i32>,
    pub bind_update: i32,
    /// Bind matrices, `(3, 4 * nB)`.
    pub bind: Array2<S>,
}

impl<S: Scalar> Default for RigData<S> {
    fn default() -> Self {
        Self {
            f_time: Vec::new(),
            bone_name: Vec::new(),
            parent: Vec::new(),
            bind_update: 0,
            bind: Array2::zeros((0, 0)),
        }
    }
}

/// Complete solver state visible across the host boundary.
#[derive(Clone, Debug)]
pub struct SolverModel<S> {
    pub params: SolverParams<S>,

    /// Vertices.
    pub n_v: i32,
    /// Bones.
    pub n_b: i32,
    /// Subjects.
    pub n_s: i32,
    /// Frames.
    pub n_f: i32,

    /// First frame of each subject, `nS + 1` entries.
    pub f_start: Vec<i32>,
    /// Subject owning each frame.
    pub subject_id: Vec<i32>,
    /// Rest pose geometry.
    pub u: Array2<S>,
    /// Per-vertex weight lock mask.
    pub lock_w: Array1<S>,
    /// Bone transformations, flat `(3 * nF, 4)` stack.
    pub m: Array2<S>,
    /// Per-bone transformation lock mask.
    pub lock_m: Array1<i32>,
    /// Animated pose geometry.
    pub v: Array2<S>,
    /// Polygon vertex lists.
    pub fv: Vec<Vec<i32>>,
    /// Skinning weights, `(nB, nV)`.
    pub w: CsMat<S>,

    pub progress: Progress,
    pub rig: RigData<S>,
}

impl<S: Scalar> Default for SolverModel<S> {
    fn default() -> Self {
        Self {
            params: SolverParams::default(),
            n_v: 0,
            n_b: 0,
            n_s: 0,
            n_f: 0,
            f_start: Vec::new(),
            subject_id: Vec::new(),
            u: Array2::zeros((0, 0)),
            lock_w: Array1::zeros(0),
            m: Array2::zeros((0, 0)),
            lock_m: Array1::zeros(0),
            v: Array2::zeros((0, 0)),
            fv: Vec::new(),
            w: CsMat::zero((0, 0)),
            progress: Progress::default(),
            rig: RigData::default(),
        }
    }
}

impl<S: Scalar> SolverModel<S> {
    /// Reset data and progress, keeping parameters.
    pub fn clear_data(&mut self) {
        let params = std::mem::take(&mut self.params);
        *self = Self {
            params,
            ..Self::default()
        };
    }
}
