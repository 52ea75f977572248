//! Log levels and their host-side method names.

use std::fmt;
use std::str::FromStr;

use crate::util::Error;

/// Severity of a log event, ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    /// All levels in ascending severity.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    /// Lowercase level name.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    /// Host logger method receiving events of this level.
    ///
    /// Hosts have no trace level, so trace shares `debug`.
    pub fn host_method(self) -> HostMethod {
        match self {
            LogLevel::Trace | LogLevel::Debug => HostMethod::Debug,
            LogLevel::Info => HostMethod::Info,
            LogLevel::Warn => HostMethod::Warning,
            LogLevel::Error => HostMethod::Error,
            LogLevel::Critical => HostMethod::Critical,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

/// Level-specific dispatch method on a host logger channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostMethod {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl HostMethod {
    /// Method name as the host spells it.
    pub fn name(self) -> &'static str {
        match self {
            HostMethod::Debug => "debug",
            HostMethod::Info => "info",
            HostMethod::Warning => "warning",
            HostMethod::Error => "error",
            HostMethod::Critical => "critical",
        }
    }
}
