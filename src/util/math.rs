//! Scalar bound and small matrix helpers shared by the codecs.
//!
//! The solver is bound in double and single precision, so every codec is
//! generic over [`Scalar`]. Frames can be viewed as `glam` matrices for
//! downstream math.

pub use glam::{DMat4, DVec4};

use ndarray::ArrayViewMut2;
use num_traits::Float;
use std::fmt::Debug;

/// Element type accepted by all codecs (`f32` and `f64` in practice).
pub trait Scalar: Float + Default + Debug + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + Default + Debug + Send + Sync + 'static {}

/// Identity value of cell `(i, j)` in a homogeneous matrix.
#[inline]
pub fn identity_at<S: Scalar>(i: usize, j: usize) -> S {
    if i == j { S::one() } else { S::zero() }
}

/// Overwrite a 2-D block with the identity pattern.
///
/// Non-square blocks get ones on the leading diagonal only, so a 3x4 block
/// becomes identity rotation with zero translation.
pub fn fill_identity<S: Scalar>(mut block: ArrayViewMut2<'_, S>) {
    for ((i, j), v) in block.indexed_iter_mut() {
        *v = identity_at(i, j);
    }
}

/// Build a glam matrix from 16 row-major values.
///
/// glam stores columns, the codecs store rows, so this transposes.
pub fn dmat4_from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols(
        DVec4::new(rows[0][0], rows[1][0], rows[2][0], rows[3][0]),
        DVec4::new(rows[0][1], rows[1][1], rows[2][1], rows[3][1]),
        DVec4::new(rows[0][2], rows[1][2], rows[2][2], rows[3][2]),
        DVec4::new(rows[0][3], rows[1][3], rows[2][3], rows[3][3]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_fill_identity_3x4() {
        let mut block = Array2::<f64>::from_elem((3, 4), 7.0);
        fill_identity(block.view_mut());
        assert_eq!(block.row(0).to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(block.row(1).to_vec(), vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(block.row(2).to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_dmat4_from_rows() {
        let m = dmat4_from_rows([
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let p = m.transform_point3(glam::DVec3::ZERO);
        assert_eq!(p, glam::DVec3::new(5.0, 6.0, 7.0));
    }
}
