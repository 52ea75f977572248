//! Utility types and functions.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`Scalar`] - Element bound shared by the codecs
//! - Matrix helpers and glam re-exports

mod error;
mod math;

pub use error::*;
pub use math::*;
