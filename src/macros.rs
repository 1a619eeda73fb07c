/// Logs a warning through a [`Reporter`](crate::Reporter).
///
/// The message is formatted like [`format!()`] and only when
/// [`Reporter::should_log`](crate::Reporter::should_log) accepts
/// [`Severity::Warn`](crate::Severity::Warn). An optional leading
/// `detail = expr;` supplies the error detail.
///
/// # Examples
///
/// ```
/// use escalate::{Reporter, report_warn};
///
/// let reporter = Reporter::new();
/// let path = "settings.json";
/// report_warn!(reporter, "Falling back to default settings, {path} is missing");
/// report_warn!(reporter, detail = "access denied"; "Could not open {}", path);
/// ```
#[macro_export]
macro_rules! report_warn {
    ($reporter:expr, detail = $detail:expr; $($arg:tt)+) => {{
        let reporter: &$crate::Reporter = &$reporter;
        if reporter.should_log($crate::Severity::Warn) {
            let _ = reporter.report(
                $crate::Severity::Warn,
                &::std::format!($($arg)+),
                &$detail,
                $crate::location!(),
            );
        }
    }};
    ($reporter:expr, $($arg:tt)+) => {
        $crate::report_warn!($reporter, detail = ""; $($arg)+)
    };
}

/// Reports an error through a [`Reporter`](crate::Reporter), returning the
/// [`Outcome`](crate::Outcome).
///
/// Accepts the same arguments as [`report_warn!`].
///
/// # Examples
///
/// ```no_run
/// use escalate::{Reporter, report_error};
///
/// let reporter = Reporter::new();
/// if let Err(error) = std::fs::read("settings.json") {
///     let _ = report_error!(reporter, detail = error.to_string(); "Failed to load settings");
/// }
/// ```
#[macro_export]
macro_rules! report_error {
    ($reporter:expr, detail = $detail:expr; $($arg:tt)+) => {
        $crate::Reporter::error(
            &$reporter,
            &::std::format!($($arg)+),
            &$detail,
            $crate::location!(),
        )
    };
    ($reporter:expr, $($arg:tt)+) => {
        $crate::report_error!($reporter, detail = ""; $($arg)+)
    };
}

/// Reports a fatal error through a [`Reporter`](crate::Reporter) and
/// terminates the process.
///
/// Besides `detail = expr;`, accepts `context = expr;` to supply an
/// [`ErrorContext`](crate::ErrorContext), or both as
/// `detail = expr, context = expr;`.
///
/// # Examples
///
/// ```no_run
/// use escalate::{ErrorContext, PlatformCode, Reporter, report_fatal};
///
/// let reporter = Reporter::new();
/// let context = ErrorContext::new(PlatformCode::FAIL)
///     .with_info(rootcause::report!("swap chain lost"));
/// report_fatal!(reporter, context = context; "Rendering failed");
/// ```
#[macro_export]
macro_rules! report_fatal {
    ($reporter:expr, detail = $detail:expr, context = $context:expr; $($arg:tt)+) => {
        $crate::Reporter::fatal(
            &$reporter,
            &::std::format!($($arg)+),
            &$detail,
            $crate::location!(),
            $context,
        )
    };
    ($reporter:expr, detail = $detail:expr; $($arg:tt)+) => {
        $crate::report_fatal!(
            $reporter,
            detail = $detail,
            context = $crate::ErrorContext::none();
            $($arg)+
        )
    };
    ($reporter:expr, context = $context:expr; $($arg:tt)+) => {
        $crate::report_fatal!($reporter, detail = "", context = $context; $($arg)+)
    };
    ($reporter:expr, $($arg:tt)+) => {
        $crate::report_fatal!(
            $reporter,
            detail = "",
            context = $crate::ErrorContext::none();
            $($arg)+
        )
    };
}
