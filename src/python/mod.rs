//! Python bindings for dembones-bridge.
//!
//! Exposes the logger and the buffer codecs to Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod codecs;
mod convert;
mod logger;

pub use logger::{bridge, PyHostSink, PyLogLevel, PyLogger};

impl From<crate::util::Error> for PyErr {
    fn from(err: crate::util::Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Native extension module, named after the library so `import dembones_bridge`
/// finds `PyInit_dembones_bridge`.
#[pymodule]
fn dembones_bridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLogLevel>()?;
    m.add_class::<PyLogger>()?;

    m.add_function(wrap_pyfunction!(codecs::weights_to_dense, m)?)?;
    m.add_function(wrap_pyfunction!(codecs::weights_from_dense, m)?)?;
    m.add_function(wrap_pyfunction!(codecs::unpack_transformations, m)?)?;
    m.add_function(wrap_pyfunction!(codecs::pack_transformations, m)?)?;
    m.add_function(wrap_pyfunction!(codecs::unpack_bind, m)?)?;
    m.add_function(wrap_pyfunction!(codecs::pack_bind, m)?)?;

    m.add("__version__", crate::VERSION)?;

    let bridge = bridge();
    if bridge.config().native {
        crate::logging::init_console();
    }
    bridge.info("dembones-bridge module initialized");
    Ok(())
}
