//! The severity-to-policy table driving escalation.
//!
//! Each escalating [`Severity`] has a [`Policy`] describing every way its
//! handling differs from the other: which templates render the log line and
//! the dialog, how the dialog is presented, whether the reporter waits for
//! it, what happens under a debugger, and whether the process terminates.

use crate::{
    dialog::DialogStyle,
    severity::Severity,
    template::{Template, TemplatePair},
};

/// Templates for persisted log lines.
pub const LOG_TEMPLATES: TemplatePair =
    TemplatePair::new(Template::new("{message}: {detail}"), Template::new("{message}"));

/// Templates for non-fatal error dialogs.
pub const ERROR_TEMPLATES: TemplatePair = TemplatePair::new(
    Template::new("An error has occurred!\n\n{message}\n\n{detail}"),
    Template::new("An error has occurred!\n\n{message}"),
);

/// Templates for fatal error dialogs.
pub const FATAL_ERROR_TEMPLATES: TemplatePair = TemplatePair::new(
    Template::new(
        "A fatal error has occurred and the application will now exit.\n\n{message}\n\n{detail}",
    ),
    Template::new("A fatal error has occurred and the application will now exit.\n\n{message}"),
);

/// Whether the reporter waits for the dialog to be dismissed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DialogWait {
    /// Return immediately; the dialog thread is detached.
    Detach,
    /// Block until the dialog has been dismissed.
    Join,
}

/// What to do instead of showing a dialog when a debugger is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DebuggerAction {
    /// Break into the debugger.
    Break,
    /// Nothing. Used when the process is about to fail fast anyway, which the
    /// debugger catches.
    Skip,
}

/// Which dialog title a policy uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DialogTitle {
    /// [`ReporterConfig::error_title`](crate::ReporterConfig::error_title).
    Error,
    /// [`ReporterConfig::fatal_error_title`](crate::ReporterConfig::fatal_error_title).
    FatalError,
}

/// How one escalating severity is handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    /// The severity this policy handles.
    pub severity: Severity,
    /// Templates for the log line.
    pub log_templates: TemplatePair,
    /// Templates for the dialog body.
    pub dialog_templates: TemplatePair,
    /// The dialog title.
    pub title: DialogTitle,
    /// The dialog icon and z-order.
    pub style: DialogStyle,
    /// Whether the reporter waits for the dialog.
    pub wait: DialogWait,
    /// What happens under a debugger.
    pub on_debugger: DebuggerAction,
    /// Whether the process is terminated afterwards.
    pub terminates: bool,
}

impl Policy {
    /// The policy for [`Severity::Err`].
    pub const ERR: Policy = Policy {
        severity: Severity::Err,
        log_templates: LOG_TEMPLATES,
        dialog_templates: ERROR_TEMPLATES,
        title: DialogTitle::Error,
        style: DialogStyle::WARNING,
        wait: DialogWait::Detach,
        on_debugger: DebuggerAction::Break,
        terminates: false,
    };

    /// The policy for [`Severity::Critical`].
    pub const CRITICAL: Policy = Policy {
        severity: Severity::Critical,
        log_templates: LOG_TEMPLATES,
        dialog_templates: FATAL_ERROR_TEMPLATES,
        title: DialogTitle::FatalError,
        style: DialogStyle::FATAL,
        wait: DialogWait::Join,
        on_debugger: DebuggerAction::Skip,
        terminates: true,
    };
}

/// The policies of all escalating severities.
///
/// Only the templates can be customized, through
/// [`ReporterBuilder`](crate::ReporterBuilder); the presentation and
/// termination behavior of each severity is fixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PolicyTable {
    err: Policy,
    critical: Policy,
}

impl PolicyTable {
    /// The policy for `severity`, or `None` for severities that are only
    /// logged.
    #[must_use]
    pub fn get(&self, severity: Severity) -> Option<&Policy> {
        match severity {
            Severity::Err => Some(&self.err),
            Severity::Critical => Some(&self.critical),
            _ => None,
        }
    }

    /// The [`Severity::Critical`] policy.
    #[must_use]
    pub fn critical(&self) -> &Policy {
        &self.critical
    }

    pub(crate) fn set_log_templates(&mut self, templates: TemplatePair) {
        self.err.log_templates = templates;
        self.critical.log_templates = templates;
    }

    pub(crate) fn set_dialog_templates(&mut self, severity: Severity, templates: TemplatePair) {
        match severity {
            Severity::Err => self.err.dialog_templates = templates,
            Severity::Critical => self.critical.dialog_templates = templates,
            _ => {}
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            err: Policy::ERR,
            critical: Policy::CRITICAL,
        }
    }
}
