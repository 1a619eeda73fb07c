//! Severity levels understood by the reporter.

use core::fmt;

/// The severity of a reported message.
///
/// Levels are ordered from the most verbose ([`Trace`](Severity::Trace)) to
/// the most severe ([`Critical`](Severity::Critical)). Only
/// [`Err`](Severity::Err) and [`Critical`](Severity::Critical) are escalated
/// beyond the log; every other level is an ordinary log line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Very fine-grained diagnostics.
    Trace,
    /// Diagnostics useful while debugging.
    Debug,
    /// Informational messages.
    Info,
    /// Something unexpected happened, but execution continues normally.
    Warn,
    /// An error the user should know about. Logged and shown, never fatal.
    Err,
    /// An unrecoverable error. Logged, shown, and the process is terminated.
    Critical,
}

impl Severity {
    /// All severities, from least to most severe.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Err,
        Severity::Critical,
    ];

    /// Whether messages at this level are always logged, regardless of the
    /// state of the log sink.
    #[must_use]
    pub const fn is_escalating(self) -> bool {
        matches!(self, Severity::Err | Severity::Critical)
    }

    /// Lowercase name of the level, as written to log records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Err => "error",
            Severity::Critical => "critical",
        }
    }

    /// The closest [`tracing::Level`]. `tracing` has no critical level, so
    /// both escalating severities map to [`tracing::Level::ERROR`].
    #[must_use]
    pub const fn to_tracing(self) -> tracing::Level {
        match self {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Err | Severity::Critical => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_err_and_critical_escalate() {
        let escalating: Vec<_> = Severity::ALL
            .into_iter()
            .filter(|s| s.is_escalating())
            .collect();
        assert_eq!(escalating, [Severity::Err, Severity::Critical]);
    }

    #[test]
    fn test_ordering() {
        assert!(Severity::Trace < Severity::Warn);
        assert!(Severity::Err < Severity::Critical);
    }

    #[test]
    fn test_tracing_mapping() {
        assert_eq!(Severity::Warn.to_tracing(), tracing::Level::WARN);
        assert_eq!(Severity::Critical.to_tracing(), tracing::Level::ERROR);
        assert_eq!(Severity::Critical.to_string(), "critical");
    }
}
