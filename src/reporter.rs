//! The [`Reporter`] and its builder.

use core::fmt;
use std::{borrow::Cow, sync::Arc};

use rootcause::Report;

use crate::{
    code::{ErrorContext, PlatformCode},
    config::{EnvOptions, ReporterConfig},
    debugger::{Debugger, SystemDebugger},
    dialog::{self, ConsoleDialog, Dialog, DialogHandle, DialogRequest, SystemDialog},
    error_info::{ErrorInfoSink, ProcessErrorInfo},
    location::SourceLocation,
    logging::{LogContext, TracingLog},
    policy::{DebuggerAction, DialogTitle, DialogWait, Policy, PolicyTable},
    severity::Severity,
    template::{LogMessage, TemplatePair},
    terminate::{ProcessTerminator, Termination, Terminator},
};

/// What happened to the dialog step of a report.
#[derive(Debug)]
pub enum Prompt {
    /// The severity does not prompt the user.
    None,
    /// A dialog is up on a detached thread. Dropping the handle keeps it
    /// detached.
    Detached(DialogHandle),
    /// A dialog was shown and dismissed before the report returned.
    Dismissed,
    /// A debugger was attached, and the reporter broke into it.
    DebuggerBreak,
    /// A debugger was attached, and the dialog was skipped.
    Skipped,
    /// The dialog thread could not be spawned.
    Failed,
}

/// The result of a report that returned to its caller.
#[derive(Debug)]
#[must_use]
pub struct Outcome {
    /// Whether a log line was written, to the log sink or, for lines below
    /// its threshold, to an attached debugger.
    pub logged: bool,
    /// What happened to the dialog step.
    pub prompt: Prompt,
}

impl Outcome {
    const SUPPRESSED: Outcome = Outcome {
        logged: false,
        prompt: Prompt::None,
    };
}

/// Decides how far a message is escalated, and escalates it.
///
/// A reporter is stateless apart from its configuration. The process state
/// it acts on (logging, the debugger, dialogs, crash diagnostics,
/// termination) is reached through the collaborators given to its
/// [`ReporterBuilder`].
///
/// # Severities
///
/// - [`Err`](Severity::Err): logged, then shown in a warning dialog on a
///   detached thread, or the debugger is broken into when one is attached.
///   Returns.
/// - [`Critical`](Severity::Critical): logged, then shown in a topmost error
///   dialog the reporter waits for (skipped under a debugger), then the
///   process is terminated. Never returns.
/// - Anything else: logged when [`should_log`](Self::should_log) allows it.
///   Lines below the sink's threshold that pass because a debugger is
///   attached are written with [`Debugger::output`].
///
/// # Examples
///
/// ```no_run
/// use escalate::{Reporter, location};
///
/// let reporter = Reporter::builder().app_name("Taskbar").build();
///
/// if let Err(error) = std::fs::read("settings.json") {
///     let _ = reporter.error("Failed to load settings", &error.to_string(), location!());
/// }
/// ```
pub struct Reporter {
    log: Arc<dyn LogContext>,
    debugger: Arc<dyn Debugger>,
    dialog: Arc<dyn Dialog>,
    error_info: Arc<dyn ErrorInfoSink>,
    terminator: Arc<dyn Terminator>,
    log_templates: TemplatePair,
    policies: PolicyTable,
    config: ReporterConfig,
}

impl Reporter {
    /// A reporter acting on the real process state.
    #[must_use]
    pub fn new() -> Self {
        ReporterBuilder::new().build()
    }

    /// Starts building a reporter. Collaborators default to the system ones.
    #[must_use]
    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::new()
    }

    /// The configuration this reporter was built with.
    #[must_use]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Whether a message at `level` would be logged.
    ///
    /// Always `true` for [`Err`](Severity::Err) and
    /// [`Critical`](Severity::Critical). For other levels, `false` if logging
    /// is not initialized, otherwise whether the sink accepts `level` or a
    /// debugger is attached. Use it to skip formatting suppressed messages.
    #[must_use]
    pub fn should_log(&self, level: Severity) -> bool {
        if level.is_escalating() {
            return true;
        }

        match self.log.sink() {
            Some(sink) => sink.should_log(level) || self.debugger.is_attached(),
            None => false,
        }
    }

    /// Reports a message at any severity.
    ///
    /// Reporting at [`Critical`](Severity::Critical) terminates the process
    /// without structured error info; use [`fatal`](Self::fatal) to supply
    /// some.
    pub fn report(
        &self,
        severity: Severity,
        message: &str,
        detail: &str,
        location: SourceLocation,
    ) -> Outcome {
        self.handle(severity, message, detail, location, ErrorContext::none())
    }

    /// Reports an error. Never terminates.
    pub fn error(&self, message: &str, detail: &str, location: SourceLocation) -> Outcome {
        self.report(Severity::Err, message, detail, location)
    }

    /// Reports a fatal error and terminates the process.
    ///
    /// When `context` carries structured error info and the
    /// [`ErrorInfoSink`] accepts it, the process is terminated with
    /// [`Termination::WithErrorContext`]; otherwise with
    /// [`Termination::FatalAppExit`].
    pub fn fatal(
        &self,
        message: &str,
        detail: &str,
        location: SourceLocation,
        context: ErrorContext,
    ) -> ! {
        let _ = self.handle(Severity::Critical, message, detail, location, context);
        self.terminator.terminate(Termination::FatalAppExit)
    }

    /// Reports a message whose detail is the description of a platform code.
    pub fn report_code(
        &self,
        severity: Severity,
        code: PlatformCode,
        message: &str,
        location: SourceLocation,
    ) -> Outcome {
        if !self.should_log(severity) {
            return Outcome::SUPPRESSED;
        }
        let context = ErrorContext::new(code);
        self.handle(severity, message, &code.describe(), location, context)
    }

    /// Reports a fatal error caused by a platform code, with optional
    /// structured error info, and terminates the process.
    pub fn fatal_code(
        &self,
        code: PlatformCode,
        message: &str,
        location: SourceLocation,
        info: Option<Report>,
    ) -> ! {
        let context = ErrorContext { code, info };
        self.fatal(message, &code.describe(), location, context)
    }

    fn handle(
        &self,
        severity: Severity,
        message: &str,
        detail: &str,
        location: SourceLocation,
        context: ErrorContext,
    ) -> Outcome {
        let Some(policy) = self.policies.get(severity).copied() else {
            return Outcome {
                logged: self.log_line(severity, message, detail, &location),
                prompt: Prompt::None,
            };
        };

        let mut buf = LogMessage::default();

        // Escalating severities are logged whenever logging is up, whatever
        // the sink's threshold.
        let sink = self.log.sink();
        let logged = sink.is_some();
        if let Some(sink) = sink {
            buf.rerender(&policy.log_templates, message, detail);
            sink.log(&location, severity, buf.as_str());
        }

        let prompt = self.prompt(&policy, &mut buf, message, detail, &location);

        if policy.terminates {
            self.conclude(logged, context, &location);
        }

        Outcome { logged, prompt }
    }

    fn prompt(
        &self,
        policy: &Policy,
        buf: &mut LogMessage,
        message: &str,
        detail: &str,
        location: &SourceLocation,
    ) -> Prompt {
        if self.debugger.is_attached() {
            return match policy.on_debugger {
                DebuggerAction::Break => {
                    self.debugger.break_into();
                    Prompt::DebuggerBreak
                }
                DebuggerAction::Skip => Prompt::Skipped,
            };
        }

        buf.rerender(&policy.dialog_templates, message, detail);
        let request = DialogRequest {
            title: match policy.title {
                DialogTitle::Error => self.config.error_title(),
                DialogTitle::FatalError => self.config.fatal_error_title(),
            },
            body: core::mem::take(buf).into_string(),
            style: policy.style,
            language: self.config.dialog_language,
        };
        let thread_name = self
            .config
            .name_dialog_threads
            .then(|| self.config.dialog_thread_name());

        match dialog::spawn(Arc::clone(&self.dialog), request, thread_name) {
            Ok(handle) => match policy.wait {
                DialogWait::Detach => Prompt::Detached(handle),
                DialogWait::Join => {
                    handle.join();
                    Prompt::Dismissed
                }
            },
            Err(error) => {
                self.log_line(
                    Severity::Warn,
                    "Failed to create message box thread",
                    &error.to_string(),
                    location,
                );
                Prompt::Failed
            }
        }
    }

    fn conclude(&self, logged: bool, context: ErrorContext, location: &SourceLocation) -> ! {
        if let Some(info) = context.info {
            match self.error_info.attach(info) {
                Ok(()) => self
                    .terminator
                    .terminate(Termination::WithErrorContext(context.code)),
                Err(error) => {
                    if logged {
                        self.log_line(
                            Severity::Warn,
                            "Failed to set restricted error info",
                            &error.code.describe(),
                            location,
                        );
                    }
                }
            }
        }

        self.terminator.terminate(Termination::FatalAppExit)
    }

    fn log_line(
        &self,
        severity: Severity,
        message: &str,
        detail: &str,
        location: &SourceLocation,
    ) -> bool {
        let Some(sink) = self.log.sink() else {
            return false;
        };

        // A line let through only by the debugger would be dropped by the
        // sink, so it goes to the debugger instead.
        let to_sink = severity.is_escalating() || sink.should_log(severity);
        if !to_sink && !self.debugger.is_attached() {
            return false;
        }

        let text = LogMessage::render(&self.log_templates, message, detail);
        if to_sink {
            sink.log(location, severity, text.as_str());
        } else {
            self.debugger.output(text.as_str());
        }
        true
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("log_templates", &self.log_templates)
            .field("policies", &self.policies)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Reporter`].
///
/// # Examples
///
/// ```
/// use escalate::{
///     Reporter, Severity,
///     dialog::ConsoleDialog,
///     template::{Template, TemplatePair},
/// };
///
/// let reporter = Reporter::builder()
///     .app_name("Taskbar")
///     .dialog(ConsoleDialog)
///     .dialog_templates(
///         Severity::Err,
///         TemplatePair::new(
///             Template::new("Something went wrong.\n\n{message}\n\n{detail}"),
///             Template::new("Something went wrong.\n\n{message}"),
///         ),
///     )
///     .build();
///
/// assert_eq!(reporter.config().error_title(), "Taskbar - Error");
/// ```
pub struct ReporterBuilder {
    log: Arc<dyn LogContext>,
    debugger: Arc<dyn Debugger>,
    dialog: Arc<dyn Dialog>,
    error_info: Arc<dyn ErrorInfoSink>,
    terminator: Arc<dyn Terminator>,
    log_templates: TemplatePair,
    policies: PolicyTable,
    config: ReporterConfig,
}

impl ReporterBuilder {
    /// A builder with the system collaborators and default configuration.
    ///
    /// The dialog is [`SystemDialog`], or [`ConsoleDialog`] when
    /// `ROOTCAUSE_ESCALATE` contains `headless`.
    #[must_use]
    pub fn new() -> Self {
        let dialog: Arc<dyn Dialog> = if EnvOptions::get().headless {
            Arc::new(ConsoleDialog)
        } else {
            Arc::new(SystemDialog)
        };
        let policies = PolicyTable::default();

        Self {
            log: Arc::new(TracingLog),
            debugger: Arc::new(SystemDebugger),
            dialog,
            error_info: Arc::new(ProcessErrorInfo),
            terminator: Arc::new(ProcessTerminator),
            log_templates: policies.critical().log_templates,
            policies,
            config: ReporterConfig::default(),
        }
    }

    /// Sets the log context.
    #[must_use]
    pub fn log_context(mut self, log: impl LogContext + 'static) -> Self {
        self.log = Arc::new(log);
        self
    }

    /// Sets the debugger probe.
    #[must_use]
    pub fn debugger(mut self, debugger: impl Debugger + 'static) -> Self {
        self.debugger = Arc::new(debugger);
        self
    }

    /// Sets the dialog implementation.
    #[must_use]
    pub fn dialog(mut self, dialog: impl Dialog + 'static) -> Self {
        self.dialog = Arc::new(dialog);
        self
    }

    /// Sets the structured error info sink.
    #[must_use]
    pub fn error_info(mut self, error_info: impl ErrorInfoSink + 'static) -> Self {
        self.error_info = Arc::new(error_info);
        self
    }

    /// Sets the terminator.
    #[must_use]
    pub fn terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Arc::new(terminator);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ReporterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the application name used in dialog titles and thread names.
    #[must_use]
    pub fn app_name(mut self, app_name: impl Into<Cow<'static, str>>) -> Self {
        self.config.app_name = app_name.into();
        self
    }

    /// Sets whether dialog threads are named.
    #[must_use]
    pub fn name_dialog_threads(mut self, name_dialog_threads: bool) -> Self {
        self.config.name_dialog_threads = name_dialog_threads;
        self
    }

    /// Sets the language id of dialog buttons.
    #[must_use]
    pub fn dialog_language(mut self, language: u16) -> Self {
        self.config.dialog_language = language;
        self
    }

    /// Sets the templates of every log line.
    #[must_use]
    pub fn log_templates(mut self, templates: TemplatePair) -> Self {
        self.log_templates = templates;
        self.policies.set_log_templates(templates);
        self
    }

    /// Sets the dialog templates of an escalating severity. Ignored for other
    /// severities.
    #[must_use]
    pub fn dialog_templates(mut self, severity: Severity, templates: TemplatePair) -> Self {
        self.policies.set_dialog_templates(severity, templates);
        self
    }

    /// Builds the reporter.
    #[must_use]
    pub fn build(self) -> Reporter {
        Reporter {
            log: self.log,
            debugger: self.debugger,
            dialog: self.dialog,
            error_info: self.error_info,
            terminator: self.terminator,
            log_templates: self.log_templates,
            policies: self.policies,
            config: self.config,
        }
    }
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReporterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterBuilder")
            .field("policies", &self.policies)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Reporter: Send, Sync);
    static_assertions::assert_impl_all!(Outcome: Send);
}
