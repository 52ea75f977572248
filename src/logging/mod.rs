//! Diagnostic bridge from native code into a host logging subsystem.
//!
//! - [`LogLevel`] / [`HostMethod`] - Severities and host method names
//! - [`NativeSink`] / [`TracingSink`] - In-process destination
//! - [`HostSink`] / [`HostScope`] / [`LockedHost`] - Host destination
//! - [`LoggingBridge`] / [`BridgeConfig`] - Routing and filtering
//! - [`init_console`] - stderr output for the native sink

mod bridge;
mod console;
mod level;
mod sink;

pub use bridge::*;
pub use console::*;
pub use level::*;
pub use sink::*;
