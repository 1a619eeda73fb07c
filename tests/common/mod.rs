//! Recording fakes for every reporter collaborator.
//!
//! Every fake writes to a shared [`Journal`], so tests can check both what
//! happened and in which order. [`PanickingTerminator`] stands in for the
//! process boundary: it panics with a [`Terminated`] payload, which
//! [`expect_termination`] catches.

#![allow(dead_code)]

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, Barrier, Mutex},
    thread,
};

use escalate::{
    Debugger, Dialog, ErrorInfoSink, LogContext, LogSink, PlatformCode, Reporter, ReporterBuilder,
    Severity, SourceLocation, Termination, Terminator, dialog::DialogRequest,
    error_info::AttachError,
};

pub const APP_NAME: &str = "Test";

/// `E_INVALIDARG`.
pub const INVALID_ARG: PlatformCode = PlatformCode(0x8007_0057_u32 as i32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Log {
        severity: Severity,
        text: String,
        location: SourceLocation,
    },
    Dialog {
        request: DialogRequest,
        thread: Option<String>,
    },
    Break,
    DebugOutput(String),
    Attach(String),
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn logs(&self) -> Vec<(Severity, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Log { severity, text, .. } => Some((severity, text)),
                _ => None,
            })
            .collect()
    }

    pub fn dialogs(&self) -> Vec<(DialogRequest, Option<String>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Dialog { request, thread } => Some((request, thread)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

struct RecordingLog {
    threshold: Option<Severity>,
    journal: Journal,
}

impl LogSink for RecordingLog {
    fn should_log(&self, level: Severity) -> bool {
        self.threshold.is_some_and(|threshold| level >= threshold)
    }

    fn log(&self, location: &SourceLocation, level: Severity, text: &str) {
        self.journal.push(Event::Log {
            severity: level,
            text: text.to_owned(),
            location: *location,
        });
    }
}

impl LogContext for RecordingLog {
    fn sink(&self) -> Option<&dyn LogSink> {
        self.threshold.map(|_| self as &dyn LogSink)
    }
}

struct FakeDebugger {
    attached: bool,
    journal: Journal,
}

impl Debugger for FakeDebugger {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn break_into(&self) {
        self.journal.push(Event::Break);
    }

    fn output(&self, text: &str) {
        self.journal.push(Event::DebugOutput(text.to_owned()));
    }
}

struct RecordingDialog {
    gate: Option<Arc<Barrier>>,
    journal: Journal,
}

impl Dialog for RecordingDialog {
    fn show(&self, request: &DialogRequest) {
        if let Some(gate) = &self.gate {
            gate.wait();
        }
        self.journal.push(Event::Dialog {
            request: request.clone(),
            thread: thread::current().name().map(str::to_owned),
        });
    }
}

struct FakeErrorInfo {
    accepts: bool,
    journal: Journal,
}

impl ErrorInfoSink for FakeErrorInfo {
    fn attach(&self, info: rootcause::Report) -> Result<(), AttachError> {
        if self.accepts {
            self.journal.push(Event::Attach(info.to_string()));
            Ok(())
        } else {
            Err(AttachError { code: INVALID_ARG })
        }
    }
}

/// The panic payload of [`PanickingTerminator`].
#[derive(Debug)]
pub struct Terminated(pub Termination);

pub struct PanickingTerminator;

impl Terminator for PanickingTerminator {
    fn terminate(&self, reason: Termination) -> ! {
        std::panic::panic_any(Terminated(reason))
    }
}

/// Runs `f`, which must end in termination, and returns how it terminated.
pub fn expect_termination(f: impl FnOnce()) -> Termination {
    let payload = catch_unwind(AssertUnwindSafe(f)).expect_err("report returned to its caller");
    match payload.downcast::<Terminated>() {
        Ok(terminated) => terminated.0,
        Err(other) => std::panic::resume_unwind(other),
    }
}

/// Describes the process state a test reporter sees.
pub struct Fixture {
    /// `None` when logging is not initialized, otherwise the sink threshold.
    pub logging: Option<Severity>,
    pub debugger: bool,
    pub attach_succeeds: bool,
    pub dialog_gate: Option<Arc<Barrier>>,
    pub name_dialog_threads: bool,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            logging: Some(Severity::Info),
            debugger: false,
            attach_succeeds: true,
            dialog_gate: None,
            name_dialog_threads: false,
        }
    }
}

impl Fixture {
    pub fn build(self) -> (Reporter, Journal) {
        let (builder, journal) = self.into_builder();
        (builder.build(), journal)
    }

    pub fn into_builder(self) -> (ReporterBuilder, Journal) {
        let journal = Journal::default();
        let builder = Reporter::builder()
            .app_name(APP_NAME)
            .name_dialog_threads(self.name_dialog_threads)
            .log_context(RecordingLog {
                threshold: self.logging,
                journal: journal.clone(),
            })
            .debugger(FakeDebugger {
                attached: self.debugger,
                journal: journal.clone(),
            })
            .dialog(RecordingDialog {
                gate: self.dialog_gate,
                journal: journal.clone(),
            })
            .error_info(FakeErrorInfo {
                accepts: self.attach_succeeds,
                journal: journal.clone(),
            })
            .terminator(PanickingTerminator);
        (builder, journal)
    }
}

pub fn reporter() -> (Reporter, Journal) {
    Fixture::default().build()
}
