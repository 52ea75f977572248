//! Python functions for the buffer codecs.
//!
//! Numeric work runs with the GIL released.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::convert::{array2_to_rows, array3_to_frames, frames_to_array3, rows_to_array2};
use crate::codec::{bind_pose, transforms, weights};

/// Densify `(bone, vertex, value)` triplets into an `(n_bones, n_vertices)` matrix.
#[pyfunction]
pub fn weights_to_dense(
    py: Python<'_>,
    bones: Vec<usize>,
    vertices: Vec<usize>,
    values: Vec<f64>,
    n_bones: i32,
    n_vertices: i32,
) -> Vec<Vec<f64>> {
    py.detach(|| {
        let sparse = weights::from_triplets(
            n_bones.max(0) as usize,
            n_vertices.max(0) as usize,
            &bones,
            &vertices,
            &values,
        );
        array2_to_rows(&weights::to_dense(&sparse, n_bones, n_vertices))
    })
}

/// Non-zero cells of a dense weight matrix as `(bones, vertices, values)`.
#[pyfunction]
pub fn weights_from_dense(
    py: Python<'_>,
    dense: Vec<Vec<f64>>,
) -> PyResult<(Vec<usize>, Vec<usize>, Vec<f64>)> {
    let dense = rows_to_array2(dense)?;
    Ok(py.detach(|| weights::to_triplets(&weights::from_dense(dense.view()))))
}

/// Expand a flat `(3 * n_frames, 4)` stack into `n_frames` 4x4 matrices.
#[pyfunction]
pub fn unpack_transformations(
    py: Python<'_>,
    flat: Vec<Vec<f64>>,
    n_frames: i32,
) -> PyResult<Vec<Vec<Vec<f64>>>> {
    let flat = rows_to_array2(flat)?;
    Ok(py.detach(|| array3_to_frames(&transforms::unpack(flat.view(), n_frames))))
}

/// Collapse 4x4 matrices into a flat `(3 * n_frames, 4)` stack.
#[pyfunction]
pub fn pack_transformations(
    py: Python<'_>,
    stack: Vec<Vec<Vec<f64>>>,
) -> PyResult<Vec<Vec<f64>>> {
    let stack = frames_to_array3(stack)?;
    Ok(py.detach(|| array2_to_rows(&transforms::pack(stack.view()))))
}

/// Convert `(3 * nB, 4)` bind blocks to the solver's `(3, 4 * nB)` layout.
///
/// Returns the stack and the bone count, raised to fit if needed.
#[pyfunction]
#[pyo3(signature = (blocks, n_bones=0))]
pub fn unpack_bind(blocks: &Bound<'_, PyAny>, n_bones: i32) -> PyResult<(Vec<Vec<f64>>, i32)> {
    let rows: Vec<Vec<f64>> = blocks
        .extract()
        .map_err(|_| PyValueError::new_err("Bind matrix must be 2-dimensional"))?;
    let py = blocks.py();
    let blocks = rows_to_array2(rows)?;
    let mut n_bones = n_bones;
    let stack = py.detach(|| {
        bind_pose::unpack(blocks.view(), &mut n_bones).map(|stack| array2_to_rows(&stack))
    })?;
    Ok((stack, n_bones))
}

/// Convert a `(3, 4 * k)` bind stack to `(3 * nB, 4)` blocks.
#[pyfunction]
pub fn pack_bind(py: Python<'_>, stack: Vec<Vec<f64>>, n_bones: i32) -> PyResult<Vec<Vec<f64>>> {
    let stack = rows_to_array2(stack)?;
    Ok(py.detach(|| array2_to_rows(&bind_pose::pack(stack.view(), n_bones))))
}
