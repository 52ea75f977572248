//! Python bindings for the logging bridge.
//!
//! The extension module owns the process bridge. Its host sink forwards to
//! `logging.getLogger("dem_bones")` while holding the GIL.

use std::sync::{Arc, OnceLock};

use pyo3::prelude::*;

use crate::logging::{
    init_console, BridgeConfig, HostMethod, HostScope, HostSink, LogLevel, LoggingBridge,
};
use crate::util::{Error, Result};

static BRIDGE: OnceLock<Arc<LoggingBridge>> = OnceLock::new();

/// The module's bridge, created on first use.
///
/// Starts at `INFO` with native and host output enabled, then applies
/// `DEM_BONES_LOG` / `DEM_BONES_LOG_HOST`.
pub fn bridge() -> &'static Arc<LoggingBridge> {
    BRIDGE.get_or_init(|| {
        let config = BridgeConfig::new(LogLevel::Info, true, true).overlay_env();
        Arc::new(LoggingBridge::new(config).with_host_sink(PyHostSink))
    })
}

/// Host sink for the Python `logging` module.
///
/// The GIL is the host-exclusive region; `Python::attach` is scoped and
/// reentrant.
pub struct PyHostSink;

struct PyScope<'py> {
    py: Python<'py>,
}

impl HostScope for PyScope<'_> {
    fn dispatch(&self, channel: &str, method: HostMethod, message: &str) -> Result<()> {
        let forward = || -> PyResult<()> {
            let logging = PyModule::import(self.py, "logging")?;
            let logger = logging.call_method1("getLogger", (channel,))?;
            logger.call_method1(method.name(), (message,))?;
            Ok(())
        };
        forward().map_err(|e| Error::host(e.to_string()))
    }
}

impl HostSink for PyHostSink {
    fn with_exclusive_access(
        &self,
        body: &mut dyn FnMut(&dyn HostScope) -> Result<()>,
    ) -> Result<()> {
        Python::attach(|py| body(&PyScope { py }))
    }
}

/// Log severity levels.
#[pyclass(name = "LogLevel", eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PyLogLevel {
    #[pyo3(name = "TRACE")]
    Trace,
    #[pyo3(name = "DEBUG")]
    Debug,
    #[pyo3(name = "INFO")]
    Info,
    #[pyo3(name = "WARN")]
    Warn,
    #[pyo3(name = "ERROR")]
    Error,
    #[pyo3(name = "CRITICAL")]
    Critical,
}

impl From<PyLogLevel> for LogLevel {
    fn from(level: PyLogLevel) -> Self {
        match level {
            PyLogLevel::Trace => LogLevel::Trace,
            PyLogLevel::Debug => LogLevel::Debug,
            PyLogLevel::Info => LogLevel::Info,
            PyLogLevel::Warn => LogLevel::Warn,
            PyLogLevel::Error => LogLevel::Error,
            PyLogLevel::Critical => LogLevel::Critical,
        }
    }
}

impl From<LogLevel> for PyLogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => PyLogLevel::Trace,
            LogLevel::Debug => PyLogLevel::Debug,
            LogLevel::Info => PyLogLevel::Info,
            LogLevel::Warn => PyLogLevel::Warn,
            LogLevel::Error => PyLogLevel::Error,
            LogLevel::Critical => PyLogLevel::Critical,
        }
    }
}

/// Handle to the module's logging bridge.
#[pyclass(name = "Logger", frozen)]
pub struct PyLogger {
    inner: Arc<LoggingBridge>,
}

#[pymethods]
impl PyLogger {
    /// The single logger of this process.
    #[staticmethod]
    fn instance() -> Self {
        Self { inner: Arc::clone(bridge()) }
    }

    /// Configure level and outputs. Safe to call repeatedly.
    #[pyo3(signature = (level=PyLogLevel::Info, to_console=true, to_python=true))]
    fn init(&self, level: PyLogLevel, to_console: bool, to_python: bool) {
        if to_console {
            init_console();
        }
        self.inner.initialize(level.into(), to_console, to_python);
    }

    fn set_level(&self, level: PyLogLevel) {
        self.inner.set_level(level.into());
    }

    /// Current minimum level.
    #[getter]
    fn level(&self) -> PyLogLevel {
        self.inner.config().min_level.into()
    }

    fn trace(&self, message: &str) {
        self.inner.trace(message);
    }

    fn debug(&self, message: &str) {
        self.inner.debug(message);
    }

    fn info(&self, message: &str) {
        self.inner.info(message);
    }

    fn warn(&self, message: &str) {
        self.inner.warn(message);
    }

    fn error(&self, message: &str) {
        self.inner.error(message);
    }

    fn critical(&self, message: &str) {
        self.inner.critical(message);
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "<Logger level={} console={} python={}>",
            config.min_level, config.native, config.host
        )
    }
}
