//! The log context consulted and written by the reporter.
//!
//! The reporter never touches global logging state directly. It is handed a
//! [`LogContext`], which answers whether logging has been initialized and
//! exposes the current [`LogSink`]. [`TracingLog`] is the implementation used
//! by default: it forwards to whatever `tracing` subscriber is current for
//! the calling thread.
//!
//! # Record format
//!
//! [`TracingLog`] emits one event per line under the `escalate` target, with
//! these fields:
//!
//! - `severity` - the [`Severity`] name; `critical` distinguishes fatal lines,
//!   which `tracing` otherwise records at `ERROR`
//! - `source.file`, `source.line`, `source.function` - the [`SourceLocation`]
//!   the report was issued from

use core::fmt;

use tracing::subscriber::NoSubscriber;

use crate::{location::SourceLocation, severity::Severity};

/// A logging backend with a severity threshold.
pub trait LogSink: Send + Sync {
    /// Whether the sink's threshold accepts `level`.
    fn should_log(&self, level: Severity) -> bool;

    /// Writes one line. Failures are swallowed.
    fn log(&self, location: &SourceLocation, level: Severity, text: &str);
}

/// Process logging state, as seen by the reporter.
pub trait LogContext: Send + Sync {
    /// The sink currently in use, or `None` if logging has not been
    /// initialized.
    fn sink(&self) -> Option<&dyn LogSink>;

    /// Whether logging has been initialized.
    fn is_initialized(&self) -> bool {
        self.sink().is_some()
    }
}

/// A [`LogContext`] with no sink. Nothing is ever logged.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoLog;

impl LogContext for NoLog {
    fn sink(&self) -> Option<&dyn LogSink> {
        None
    }
}

/// A [`LogContext`] backed by the current `tracing` dispatcher.
///
/// Logging counts as initialized as soon as any subscriber other than
/// [`NoSubscriber`] is current, whether installed globally or scoped to the
/// thread with [`tracing::subscriber::with_default`].
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingLog;

impl LogContext for TracingLog {
    fn sink(&self) -> Option<&dyn LogSink> {
        if self.is_initialized() {
            Some(self)
        } else {
            None
        }
    }

    fn is_initialized(&self) -> bool {
        tracing::dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>())
    }
}

impl LogSink for TracingLog {
    fn should_log(&self, level: Severity) -> bool {
        match level {
            Severity::Trace => tracing::enabled!(target: "escalate", tracing::Level::TRACE),
            Severity::Debug => tracing::enabled!(target: "escalate", tracing::Level::DEBUG),
            Severity::Info => tracing::enabled!(target: "escalate", tracing::Level::INFO),
            Severity::Warn => tracing::enabled!(target: "escalate", tracing::Level::WARN),
            Severity::Err | Severity::Critical => {
                tracing::enabled!(target: "escalate", tracing::Level::ERROR)
            }
        }
    }

    fn log(&self, location: &SourceLocation, level: Severity, text: &str) {
        macro_rules! emit {
            ($level:expr) => {
                tracing::event!(
                    target: "escalate",
                    $level,
                    severity = level.as_str(),
                    source.file = location.file,
                    source.line = location.line,
                    source.function = location.function,
                    "{}",
                    text
                )
            };
        }

        match level {
            Severity::Trace => emit!(tracing::Level::TRACE),
            Severity::Debug => emit!(tracing::Level::DEBUG),
            Severity::Info => emit!(tracing::Level::INFO),
            Severity::Warn => emit!(tracing::Level::WARN),
            Severity::Err | Severity::Critical => emit!(tracing::Level::ERROR),
        }
    }
}

/// Error returned by [`init_stderr`] when a global subscriber is already set.
pub struct LogInitError(Box<dyn core::error::Error + Send + Sync + 'static>);

impl fmt::Debug for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogInitError").field(&self.0).finish()
    }
}

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to initialize logging: {}", self.0)
    }
}

impl core::error::Error for LogInitError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&*self.0)
    }
}

/// Installs a global `tracing` subscriber writing to standard error, keeping
/// records at `threshold` and above.
///
/// This is a convenience for applications without their own subscriber
/// setup. Any subscriber works with [`TracingLog`].
pub fn init_stderr(threshold: Severity) -> Result<(), LogInitError> {
    tracing_subscriber::fmt()
        .with_max_level(threshold.to_tracing())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(LogInitError)
}
