//! Conversions between solver storage and host buffers.
//!
//! - [`weights`] - sparse `(nB x nV)` weights <-> dense buffers
//! - [`transforms`] - flat `(3 * nF, 4)` stacks <-> `(nF, 4, 4)` frames
//! - [`bind_pose`] - host `(3 * nB, 4)` blocks <-> solver `(3, 4 * nB)`
//!
//! Weights and transforms tolerate stale dimensions (clip or pad with
//! identity). Bind pose input is validated and rejected when malformed.

pub mod bind_pose;
pub mod transforms;
pub mod weights;
