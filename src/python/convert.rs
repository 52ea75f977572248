//! Nested list <-> ndarray conversion for the Python API.

use ndarray::{Array2, Array3};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Build a 2-D array from rows, rejecting ragged input.
pub fn rows_to_array2(rows: Vec<Vec<f64>>) -> PyResult<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("Rows must all have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(format!("Invalid matrix shape: {}", e)))
}

pub fn array2_to_rows(array: &Array2<f64>) -> Vec<Vec<f64>> {
    array.outer_iter().map(|row| row.to_vec()).collect()
}

/// Build a 3-D array from frames of rows, rejecting ragged input.
pub fn frames_to_array3(frames: Vec<Vec<Vec<f64>>>) -> PyResult<Array3<f64>> {
    let n_frames = frames.len();
    let n_rows = frames.first().map_or(0, Vec::len);
    let n_cols = frames.first().and_then(|f| f.first()).map_or(0, Vec::len);
    let regular = frames
        .iter()
        .all(|f| f.len() == n_rows && f.iter().all(|r| r.len() == n_cols));
    if !regular {
        return Err(PyValueError::new_err("Frames must all have the same shape"));
    }
    let flat: Vec<f64> = frames.into_iter().flatten().flatten().collect();
    Array3::from_shape_vec((n_frames, n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(format!("Invalid stack shape: {}", e)))
}

pub fn array3_to_frames(array: &Array3<f64>) -> Vec<Vec<Vec<f64>>> {
    array
        .outer_iter()
        .map(|frame| frame.outer_iter().map(|row| row.to_vec()).collect())
        .collect()
}
