//! Native and host log sinks.

use parking_lot::ReentrantMutex;

use super::level::{HostMethod, LogLevel};
use crate::util::Result;

/// In-process log destination. Must tolerate concurrent calls.
pub trait NativeSink: Send + Sync {
    fn emit(&self, level: LogLevel, message: &str);
}

/// Native sink that emits `tracing` events under the `dem_bones` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NativeSink for TracingSink {
    fn emit(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "dem_bones", "{}", message),
            LogLevel::Debug => tracing::debug!(target: "dem_bones", "{}", message),
            LogLevel::Info => tracing::info!(target: "dem_bones", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "dem_bones", "{}", message),
            LogLevel::Error => tracing::error!(target: "dem_bones", "{}", message),
            LogLevel::Critical => tracing::error!(target: "dem_bones", critical = true, "{}", message),
        }
    }
}

/// Access to the host runtime while its exclusive region is held.
pub trait HostScope {
    /// Resolve the logger channel `channel` and call `method` with `message`.
    fn dispatch(&self, channel: &str, method: HostMethod, message: &str) -> Result<()>;
}

/// Log destination living inside a host runtime.
///
/// The host may only be touched from inside its exclusive execution region
/// (for Python, while holding the GIL).
pub trait HostSink: Send + Sync {
    /// Acquire the exclusive region, run `body`, release the region.
    ///
    /// The region must be released on every exit path, including unwinding,
    /// and re-acquiring it from the same thread must not deadlock.
    fn with_exclusive_access(
        &self,
        body: &mut dyn FnMut(&dyn HostScope) -> Result<()>,
    ) -> Result<()>;
}

/// Host sink for runtimes without a region of their own.
///
/// Serializes dispatches with a reentrant mutex held only for the duration
/// of one dispatch.
pub struct LockedHost<H> {
    region: ReentrantMutex<()>,
    scope: H,
}

impl<H: HostScope + Send + Sync> LockedHost<H> {
    pub fn new(scope: H) -> Self {
        Self {
            region: ReentrantMutex::new(()),
            scope,
        }
    }

    /// Whether some thread currently holds the region.
    pub fn is_locked(&self) -> bool {
        self.region.is_locked()
    }

    pub fn scope(&self) -> &H {
        &self.scope
    }
}

impl<H: HostScope + Send + Sync> HostSink for LockedHost<H> {
    fn with_exclusive_access(
        &self,
        body: &mut dyn FnMut(&dyn HostScope) -> Result<()>,
    ) -> Result<()> {
        let _region = self.region.lock();
        body(&self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Error;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, HostMethod, String)>>,
    }

    impl HostScope for Recorder {
        fn dispatch(&self, channel: &str, method: HostMethod, message: &str) -> Result<()> {
            if channel.is_empty() {
                return Err(Error::host("empty channel name"));
            }
            self.calls.lock().push((channel.to_string(), method, message.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_locked_host_holds_region_during_body() {
        let host = LockedHost::new(Recorder::default());
        assert!(!host.is_locked());
        host.with_exclusive_access(&mut |scope| {
            assert!(host.is_locked());
            scope.dispatch("dem_bones", HostMethod::Info, "hello")
        })
        .unwrap();
        assert!(!host.is_locked());
        assert_eq!(host.scope().calls.lock().len(), 1);
    }

    #[test]
    fn test_locked_host_is_reentrant() {
        let host = LockedHost::new(Recorder::default());
        host.with_exclusive_access(&mut |outer| {
            host.with_exclusive_access(&mut |inner| {
                inner.dispatch("dem_bones", HostMethod::Debug, "inner")
            })?;
            outer.dispatch("dem_bones", HostMethod::Debug, "outer")
        })
        .unwrap();
        let calls = host.scope().calls.lock();
        assert_eq!(calls[0].2, "inner");
        assert_eq!(calls[1].2, "outer");
    }

    #[test]
    fn test_locked_host_releases_on_error() {
        let host = LockedHost::new(Recorder::default());
        let result = host.with_exclusive_access(&mut |scope| {
            scope.dispatch("", HostMethod::Error, "nowhere")
        });
        assert!(result.is_err());
        assert!(!host.is_locked());
    }

    #[test]
    fn test_tracing_sink_accepts_all_levels() {
        for level in LogLevel::ALL {
            TracingSink.emit(level, "smoke");
        }
    }
}
