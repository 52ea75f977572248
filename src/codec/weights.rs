//! Sparse bone x vertex weights <-> dense host buffers.
//!
//! The solver keeps skinning weights as a sparse matrix with one row per
//! bone and one column per vertex. Hosts want a plain rectangular buffer.
//! Reported dimensions (`nB`, `nV`) can lag behind the sparse storage while
//! a rig is being set up incrementally, so densifying clips instead of
//! failing.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};
use rayon::prelude::*;
use sprs::{CsMat, CsMatView, TriMat};

use crate::logging::DIAGNOSTIC_TARGET;
use crate::util::Scalar;

/// Element count above which conversions run on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Copy sparse weights into a zero-filled `(n_bones, n_vertices)` buffer.
///
/// Entries whose row or column falls outside the reported dimensions are
/// dropped. Non-positive dimensions produce an empty (all-zero) buffer with
/// negative sizes clamped to zero.
pub fn to_dense<S: Scalar>(sparse: &CsMat<S>, n_bones: i32, n_vertices: i32) -> Array2<S> {
    let rows = n_bones.max(0) as usize;
    let cols = n_vertices.max(0) as usize;
    let mut dense = Array2::zeros((rows, cols));
    if rows == 0 || cols == 0 {
        return dense;
    }

    if sparse.rows() > rows || sparse.cols() > cols {
        tracing::trace!(
            target: DIAGNOSTIC_TARGET,
            "weights storage {}x{} exceeds reported {}x{}, clipping",
            sparse.rows(), sparse.cols(), rows, cols
        );
    }

    // Rows must be the outer dimension so each task owns one bone.
    let converted;
    let source: CsMatView<'_, S> = if sparse.is_csr() {
        sparse.view()
    } else {
        converted = sparse.to_csr();
        converted.view()
    };

    let fill = |bone: usize, mut row: ArrayViewMut1<'_, S>| {
        if let Some(entries) = source.outer_view(bone) {
            for (vertex, &value) in entries.iter() {
                if vertex < cols {
                    row[vertex] = value;
                }
            }
        }
    };

    if rows * cols > PARALLEL_THRESHOLD {
        dense
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(bone, row)| fill(bone, row));
    } else {
        for (bone, row) in dense.axis_iter_mut(Axis(0)).enumerate() {
            fill(bone, row);
        }
    }

    dense
}

/// Build compressed sparse weights from a dense buffer.
///
/// Only cells that compare unequal to zero become entries. The result has
/// exactly the dense buffer's shape.
pub fn from_dense<S: Scalar>(dense: ArrayView2<'_, S>) -> CsMat<S> {
    let (rows, cols) = dense.dim();

    let triplets: Vec<(usize, usize, S)> = if rows * cols > PARALLEL_THRESHOLD {
        dense
            .axis_iter(Axis(0))
            .into_par_iter()
            .enumerate()
            .flat_map_iter(row_triplets)
            .collect()
    } else {
        dense
            .axis_iter(Axis(0))
            .enumerate()
            .flat_map(row_triplets)
            .collect()
    };

    let mut tri = TriMat::with_capacity((rows, cols), triplets.len());
    for (bone, vertex, value) in triplets {
        tri.add_triplet(bone, vertex, value);
    }
    tri.to_csr()
}

/// Build sparse weights from coordinate lists.
///
/// The storage shape grows to fit every index so that nothing is lost before
/// [`to_dense`] applies the reported dimensions. Duplicate coordinates are
/// summed by compression.
pub fn from_triplets<S: Scalar>(
    n_bones: usize,
    n_vertices: usize,
    bones: &[usize],
    vertices: &[usize],
    values: &[S],
) -> CsMat<S> {
    let count = bones.len().min(vertices.len()).min(values.len());
    let rows = bones[..count].iter().map(|&b| b + 1).max().unwrap_or(0).max(n_bones);
    let cols = vertices[..count].iter().map(|&v| v + 1).max().unwrap_or(0).max(n_vertices);

    let mut tri = TriMat::with_capacity((rows, cols), count);
    for i in 0..count {
        tri.add_triplet(bones[i], vertices[i], values[i]);
    }
    tri.to_csr()
}

/// Flatten sparse weights into `(bones, vertices, values)` coordinate lists.
pub fn to_triplets<S: Scalar>(sparse: &CsMat<S>) -> (Vec<usize>, Vec<usize>, Vec<S>) {
    let mut bones = Vec::with_capacity(sparse.nnz());
    let mut vertices = Vec::with_capacity(sparse.nnz());
    let mut values = Vec::with_capacity(sparse.nnz());
    for (&value, (bone, vertex)) in sparse.iter() {
        bones.push(bone);
        vertices.push(vertex);
        values.push(value);
    }
    (bones, vertices, values)
}

fn row_triplets<S: Scalar>((bone, row): (usize, ArrayView1<'_, S>)) -> Vec<(usize, usize, S)> {
    row.iter()
        .enumerate()
        .filter(|(_, &value)| value != S::zero())
        .map(|(vertex, &value)| (bone, vertex, value))
        .collect()
}
