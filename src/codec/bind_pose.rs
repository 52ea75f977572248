//! Bind pose blocks: host `(3 * nB, 4)` <-> solver `(3, 4 * nB)`.
//!
//! Unlike weights and transforms, a malformed host bind array is a caller
//! error and is rejected.

use ndarray::{s, Array2, ArrayView2};

use crate::logging::DIAGNOSTIC_TARGET;
use crate::util::{fill_identity, Error, Result, Scalar};

/// Bone count used by [`pack`] when the solver reports none.
pub const FALLBACK_BONES: usize = 2;

/// Convert host bind blocks into the solver's side-by-side layout.
///
/// `blocks` must have 4 columns and a row count divisible by 3. Bone `b`
/// reads rows `[3b, 3b + 3)` and lands in columns `[4b, 4b + 4)`.
/// `n_bones` is raised to the derived bone count but never lowered.
pub fn unpack<S: Scalar>(blocks: ArrayView2<'_, S>, n_bones: &mut i32) -> Result<Array2<S>> {
    let (rows, cols) = blocks.dim();
    if cols != 4 {
        return Err(Error::shape(format!(
            "Bind matrix must have 4 columns, got {}",
            cols
        )));
    }
    if rows % 3 != 0 {
        return Err(Error::shape(format!(
            "Bind matrix rows must be a multiple of 3, got {}",
            rows
        )));
    }

    let bones = rows / 3;
    let mut stack = Array2::zeros((3, 4 * bones));
    for b in 0..bones {
        let mut block = stack.slice_mut(s![.., 4 * b..4 * b + 4]);
        fill_identity(block.view_mut());
        block.assign(&blocks.slice(s![3 * b..3 * b + 3, ..]));
    }

    let bones = i32::try_from(bones).map_err(|_| Error::shape("Bind matrix has too many rows"))?;
    if *n_bones < bones {
        *n_bones = bones;
    }
    Ok(stack)
}

/// Convert the solver's bind stack into host `(3 * nB, 4)` blocks.
///
/// With `n_bones <= 0` this yields [`FALLBACK_BONES`] blocks instead of an
/// empty array. Bones or cells missing from `stack` stay identity.
pub fn pack<S: Scalar>(stack: ArrayView2<'_, S>, n_bones: i32) -> Array2<S> {
    let bones = if n_bones > 0 {
        n_bones as usize
    } else {
        tracing::trace!(target: DIAGNOSTIC_TARGET, "nB not set, packing {} identity bind blocks", FALLBACK_BONES);
        FALLBACK_BONES
    };

    let mut blocks = Array2::zeros((3 * bones, 4));
    for b in 0..bones {
        fill_identity(blocks.slice_mut(s![3 * b..3 * b + 3, ..]));
    }

    if stack.is_empty() {
        return blocks;
    }

    let (rows, cols) = stack.dim();
    let to_copy = (cols / 4).min(bones);
    for b in 0..to_copy {
        for i in 0..rows.min(3) {
            for j in 0..4 {
                blocks[[3 * b + i, j]] = stack[[i, 4 * b + j]];
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn host_blocks() -> Array2<f64> {
        array![
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 2.0],
            [0.0, 0.0, 1.0, 3.0],
            [0.0, 0.0, 1.0, 4.0],
            [0.0, 1.0, 0.0, 5.0],
            [-1.0, 0.0, 0.0, 6.0],
        ]
    }

    #[test]
    fn test_unpack_layout() {
        let mut n_bones = 0;
        let stack = unpack(host_blocks().view(), &mut n_bones).unwrap();
        assert_eq!(stack.dim(), (3, 8));
        assert_eq!(n_bones, 2);
        assert_eq!(stack.row(0).to_vec(), vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 4.0]);
        assert_eq!(stack.row(2).to_vec(), vec![0.0, 0.0, 1.0, 3.0, -1.0, 0.0, 0.0, 6.0]);
    }

    #[test]
    fn test_unpack_bone_count_only_grows() {
        let mut n_bones = 5;
        unpack(host_blocks().view(), &mut n_bones).unwrap();
        assert_eq!(n_bones, 5);

        let mut n_bones = 1;
        unpack(host_blocks().view(), &mut n_bones).unwrap();
        assert_eq!(n_bones, 2);
    }

    #[test]
    fn test_unpack_rejects_three_columns() {
        let mut n_bones = 0;
        let bad = Array2::<f64>::zeros((3, 3));
        let err = unpack(bad.view(), &mut n_bones).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
        assert!(err.to_string().contains("4 columns"));
        assert_eq!(n_bones, 0);
    }

    #[test]
    fn test_unpack_rejects_four_rows() {
        let mut n_bones = 0;
        let bad = Array2::<f64>::zeros((4, 4));
        let err = unpack(bad.view(), &mut n_bones).unwrap_err();
        assert!(err.to_string().contains("multiple of 3"));
        assert_eq!(n_bones, 0);
    }

    #[test]
    fn test_unpack_empty() {
        let mut n_bones = 3;
        let stack = unpack(Array2::<f32>::zeros((0, 4)).view(), &mut n_bones).unwrap();
        assert_eq!(stack.dim(), (3, 0));
        assert_eq!(n_bones, 3);
    }

    #[test]
    fn test_pack_inverts_unpack() {
        let mut n_bones = 0;
        let stack = unpack(host_blocks().view(), &mut n_bones).unwrap();
        assert_eq!(pack(stack.view(), n_bones), host_blocks());
    }

    #[test]
    fn test_pack_fallback_two_bones() {
        let empty = Array2::<f64>::zeros((0, 0));
        for n in [0, -4] {
            let blocks = pack(empty.view(), n);
            assert_eq!(blocks.dim(), (6, 4));
            for b in 0..2 {
                for i in 0..3 {
                    for j in 0..4 {
                        assert_eq!(blocks[[3 * b + i, j]], if i == j { 1.0 } else { 0.0 });
                    }
                }
            }
        }
    }

    #[test]
    fn test_pack_more_bones_than_stored() {
        let mut n_bones = 0;
        let stack = unpack(host_blocks().view(), &mut n_bones).unwrap();
        let blocks = pack(stack.view(), 3);
        assert_eq!(blocks.dim(), (9, 4));
        assert_eq!(blocks[[5, 3]], 6.0);
        assert_eq!(blocks.row(6).to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(blocks.row(8).to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_pack_short_stack_rows() {
        let stack = array![[2.0, 0.0, 0.0, 7.0]];
        let blocks = pack(stack.view(), 1);
        assert_eq!(blocks.row(0).to_vec(), vec![2.0, 0.0, 0.0, 7.0]);
        assert_eq!(blocks.row(1).to_vec(), vec![0.0, 1.0, 0.0, 0.0]);
    }
}
