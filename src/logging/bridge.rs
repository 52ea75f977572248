//! Dual-channel logging bridge.
//!
//! One bridge exists per process. It is constructed explicitly and handed
//! out by `Arc`, so nothing here relies on global lookup. Configuration is
//! written rarely and read on every event; readers always copy out one
//! complete [`BridgeConfig`].

use std::panic::{self, AssertUnwindSafe};

use parking_lot::RwLock;

use super::level::LogLevel;
use super::sink::{HostSink, NativeSink, TracingSink};
use crate::util::{panic_message, Error, Result};

/// Host logger channel used when none is configured.
pub const DEFAULT_CHANNEL: &str = "dem_bones";

/// Environment variable holding the minimum level name.
pub const LEVEL_ENV: &str = "DEM_BONES_LOG";

/// Environment variable enabling (`1`) or disabling (`0`) host forwarding.
pub const HOST_ENV: &str = "DEM_BONES_LOG_HOST";

/// Bridge configuration snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Events below this level are discarded.
    pub min_level: LogLevel,
    /// Forward events to the native sink.
    pub native: bool,
    /// Forward events to the host sink.
    pub host: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            native: true,
            host: false,
        }
    }
}

impl BridgeConfig {
    pub fn new(min_level: LogLevel, native: bool, host: bool) -> Self {
        Self { min_level, native, host }
    }

    pub fn with_level(mut self, min_level: LogLevel) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_native(mut self, enabled: bool) -> Self {
        self.native = enabled;
        self
    }

    pub fn with_host(mut self, enabled: bool) -> Self {
        self.host = enabled;
        self
    }

    /// Defaults overridden by `DEM_BONES_LOG` and `DEM_BONES_LOG_HOST`.
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// This configuration overridden by `DEM_BONES_LOG` and `DEM_BONES_LOG_HOST`.
    pub fn overlay_env(self) -> Self {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// This configuration overridden by values from `lookup`.
    ///
    /// Unparseable values are ignored.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(LEVEL_ENV).and_then(|v| v.parse().ok()) {
            self.min_level = level;
        }
        match lookup(HOST_ENV).as_deref().map(str::trim) {
            Some("1") => self.host = true,
            Some("0") => self.host = false,
            _ => {}
        }
        self
    }

    /// Whether an event at `level` passes the level filter.
    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Routes leveled events to a native sink and an optional host sink.
pub struct LoggingBridge {
    config: RwLock<BridgeConfig>,
    native: Box<dyn NativeSink>,
    host: Option<Box<dyn HostSink>>,
    channel: String,
}

impl Default for LoggingBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl LoggingBridge {
    /// Create a bridge writing to `tracing` with no host attached.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config: RwLock::new(config),
            native: Box::new(TracingSink),
            host: None,
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }

    pub fn with_native_sink(mut self, sink: impl NativeSink + 'static) -> Self {
        self.native = Box::new(sink);
        self
    }

    pub fn with_host_sink(mut self, sink: impl HostSink + 'static) -> Self {
        self.host = Some(Box::new(sink));
        self
    }

    /// Name of the host logger channel events are dispatched to.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn has_host_sink(&self) -> bool {
        self.host.is_some()
    }

    /// Replace the whole configuration. Last call wins.
    pub fn initialize(&self, min_level: LogLevel, enable_native: bool, enable_host: bool) {
        *self.config.write() = BridgeConfig::new(min_level, enable_native, enable_host);
    }

    /// Change only the minimum level.
    pub fn set_level(&self, level: LogLevel) {
        self.config.write().min_level = level;
    }

    /// Current configuration.
    pub fn config(&self) -> BridgeConfig {
        *self.config.read()
    }

    /// Whether an event at `level` would be dispatched anywhere.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        let config = self.config();
        config.accepts(level) && (config.native || (config.host && self.host.is_some()))
    }

    /// Dispatch one event. Never fails and never panics.
    pub fn log(&self, level: LogLevel, message: &str) {
        let config = self.config();
        if !config.accepts(level) {
            return;
        }

        if config.native {
            self.emit_native(level, message);
        }

        if !config.host {
            return;
        }
        if let Some(host) = &self.host {
            if let Err(e) = self.forward(host.as_ref(), level, message) {
                if config.native {
                    self.emit_native(LogLevel::Error, &format!("Failed to log to host: {}", e));
                }
            }
        }
    }

    /// A panicking native sink loses the event; it never unwinds into the caller.
    fn emit_native(&self, level: LogLevel, message: &str) {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| self.native.emit(level, message)));
    }

    fn forward(&self, host: &dyn HostSink, level: LogLevel, message: &str) -> Result<()> {
        let method = level.host_method();
        let channel = self.channel.as_str();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            host.with_exclusive_access(&mut |scope| scope.dispatch(channel, method, message))
        }));
        match outcome {
            Ok(result) => result,
            Err(payload) => Err(Error::host(panic_message(payload.as_ref()))),
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}
