//! Per-frame transform stacks: flat `(3 * nF, 4)` <-> `(nF, 4, 4)`.
//!
//! The flat layout stores only the affine 3x4 part of each frame, rows
//! `[3f, 3f + 3)` for frame `f`. Unpacked frames are homogeneous 4x4
//! matrices whose bottom row is always `(0, 0, 0, 1)`.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut2, Axis};
use rayon::prelude::*;

use crate::logging::DIAGNOSTIC_TARGET;
use crate::util::{dmat4_from_rows, fill_identity, identity_at, DMat4, Scalar};

/// Frame count above which unpacking runs on the rayon pool.
pub const PARALLEL_FRAMES: usize = 10;

/// Expand a flat stack into `n_frames` homogeneous matrices.
///
/// Frames or cells missing from `flat` stay identity. The bottom row of
/// every frame is forced to `(0, 0, 0, 1)`.
pub fn unpack<S: Scalar>(flat: ArrayView2<'_, S>, n_frames: i32) -> Array3<S> {
    if n_frames <= 0 {
        return Array3::zeros((0, 4, 4));
    }
    let n_frames = n_frames as usize;
    let (flat_rows, flat_cols) = flat.dim();
    if flat_rows < n_frames * 3 || flat_cols < 4 {
        tracing::debug!(
            target: DIAGNOSTIC_TARGET,
            "transform stack {}x{} short of {} frames, padding with identity",
            flat_rows, flat_cols, n_frames
        );
    }

    let mut stack = Array3::zeros((n_frames, 4, 4));
    let fill = |frame: usize, mut out: ArrayViewMut2<'_, S>| {
        fill_identity(out.view_mut());
        for i in 0..3 {
            let src_row = frame * 3 + i;
            if src_row >= flat_rows {
                break;
            }
            for j in 0..flat_cols.min(4) {
                out[[i, j]] = flat[[src_row, j]];
            }
        }
        for j in 0..4 {
            out[[3, j]] = identity_at(3, j);
        }
    };

    if n_frames > PARALLEL_FRAMES {
        stack
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(frame, out)| fill(frame, out));
    } else {
        for (frame, out) in stack.axis_iter_mut(Axis(0)).enumerate() {
            fill(frame, out);
        }
    }

    stack
}

/// Collapse homogeneous frames into the flat `(3 * nF, 4)` layout.
///
/// The bottom row of each frame is not stored. Cells absent from a frame
/// smaller than 4x4 are written as identity values.
pub fn pack<S: Scalar>(stack: ArrayView3<'_, S>) -> Array2<S> {
    let (n_frames, frame_rows, frame_cols) = stack.dim();
    let mut flat = Array2::zeros((n_frames * 3, 4));
    for (frame, src) in stack.axis_iter(Axis(0)).enumerate() {
        for i in 0..3 {
            for j in 0..4 {
                flat[[frame * 3 + i, j]] = if i < frame_rows && j < frame_cols {
                    src[[i, j]]
                } else {
                    identity_at(i, j)
                };
            }
        }
    }
    flat
}

/// View unpacked frames as glam double-precision matrices.
pub fn frame_matrices<S: Scalar>(stack: ArrayView3<'_, S>) -> Vec<DMat4> {
    let (_, frame_rows, frame_cols) = stack.dim();
    stack
        .axis_iter(Axis(0))
        .map(|src| {
            let mut rows = [[0.0f64; 4]; 4];
            for (i, row) in rows.iter_mut().enumerate() {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = if i < frame_rows && j < frame_cols {
                        src[[i, j]].to_f64().unwrap_or(0.0)
                    } else {
                        identity_at(i, j)
                    };
                }
            }
            dmat4_from_rows(rows)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s};

    fn two_frames() -> Array2<f64> {
        array![
            [1.0, 0.0, 0.0, 10.0],
            [0.0, 1.0, 0.0, 20.0],
            [0.0, 0.0, 1.0, 30.0],
            [0.0, -1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, 1.0, 3.0],
        ]
    }

    #[test]
    fn test_unpack_basic() {
        let stack = unpack(two_frames().view(), 2);
        assert_eq!(stack.dim(), (2, 4, 4));
        assert_eq!(stack[[0, 0, 3]], 10.0);
        assert_eq!(stack[[1, 0, 1]], -1.0);
        assert_eq!(stack[[1, 2, 3]], 3.0);
        for f in 0..2 {
            assert_eq!(stack.slice(s![f, 3, ..]).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_unpack_non_positive_frames() {
        assert_eq!(unpack(two_frames().view(), 0).dim(), (0, 4, 4));
        assert_eq!(unpack(two_frames().view(), -3).dim(), (0, 4, 4));
    }

    #[test]
    fn test_unpack_missing_frames_are_identity() {
        let stack = unpack(two_frames().view(), 4);
        for f in 2..4 {
            for i in 0..4 {
                for j in 0..4 {
                    assert_eq!(stack[[f, i, j]], if i == j { 1.0 } else { 0.0 });
                }
            }
        }
    }

    #[test]
    fn test_unpack_partial_block_and_narrow_columns() {
        // Four rows: frame 1 only has its first row.
        let flat = two_frames().slice(s![..4, ..2]).to_owned();
        let stack = unpack(flat.view(), 2);
        assert_eq!(stack[[0, 0, 3]], 0.0);
        assert_eq!(stack[[1, 0, 1]], -1.0);
        assert_eq!(stack[[1, 0, 0]], 0.0);
        assert_eq!(stack[[1, 1, 1]], 1.0);
        assert_eq!(stack[[1, 2, 2]], 1.0);
    }

    #[test]
    fn test_unpack_empty_source() {
        let flat = Array2::<f32>::zeros((0, 0));
        let stack = unpack(flat.view(), 3);
        assert_eq!(stack.dim(), (3, 4, 4));
        assert_eq!(stack[[2, 3, 3]], 1.0);
        assert_eq!(stack[[2, 0, 0]], 1.0);
    }

    #[test]
    fn test_pack_drops_bottom_row() {
        let mut stack = unpack(two_frames().view(), 2);
        stack[[0, 3, 0]] = 42.0;
        let flat = pack(stack.view());
        assert_eq!(flat, two_frames());
    }

    #[test]
    fn test_unpack_many_frames_parallel() {
        let frames = 64;
        let mut flat = Array2::<f64>::zeros((frames * 3, 5));
        for r in 0..frames * 3 {
            for c in 0..5 {
                flat[[r, c]] = (r * 5 + c) as f64;
            }
        }
        let stack = unpack(flat.view(), frames as i32);
        for f in 0..frames {
            for i in 0..3 {
                for j in 0..4 {
                    assert_eq!(stack[[f, i, j]], flat[[f * 3 + i, j]]);
                }
            }
            assert_eq!(stack.slice(s![f, 3, ..]).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
        }
        assert_eq!(pack(stack.view()), flat.slice(s![.., ..4]));
    }

    #[test]
    fn test_frame_matrices() {
        let stack = unpack(two_frames().view(), 2);
        let mats = frame_matrices(stack.view());
        assert_eq!(mats.len(), 2);
        let p = mats[0].transform_point3(glam::DVec3::ZERO);
        assert_eq!(p, glam::DVec3::new(10.0, 20.0, 30.0));
        let x = mats[1].transform_vector3(glam::DVec3::X);
        assert_eq!(x, glam::DVec3::new(0.0, 1.0, 0.0));
    }
}
