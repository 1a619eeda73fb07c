#![deny(
    missing_docs,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Severity-driven escalation of errors: log, notify the user, and fail fast.
//!
//! ## Overview
//!
//! Most errors are handled where they happen. Some are not: a settings file
//! that cannot be written, a device that disappeared, an invariant that no
//! longer holds. This crate decides what to do with those, based on their
//! [`Severity`]:
//!
//! - [`Err`](Severity::Err) messages are written to the log and shown to the
//!   user in a dialog that does not block the caller. With a debugger
//!   attached, the debugger is broken into instead.
//! - [`Critical`](Severity::Critical) messages are written to the log, shown
//!   in a topmost dialog the caller waits for, and then the process fails
//!   fast. With a debugger attached, the dialog is skipped.
//! - Everything else is an ordinary log line, subject to the log threshold.
//!
//! ## Quick Example
//!
//! ```no_run
//! use escalate::prelude::*;
//!
//! fn main() {
//!     escalate::logging::init_stderr(Severity::Info).expect("failed to initialize logging");
//!     let reporter = Reporter::builder().app_name("Taskbar").build();
//!
//!     if let Err(error) = std::fs::read_to_string("settings.json") {
//!         let _ = report_error!(reporter, detail = error.to_string(); "Failed to load settings");
//!     }
//!
//!     let context = ErrorContext::new(PlatformCode::FAIL)
//!         .with_info(rootcause::report!("swap chain lost"));
//!     report_fatal!(reporter, context = context; "Rendering failed");
//! }
//! ```
//!
//! ## Collaborators
//!
//! A [`Reporter`] holds no process state of its own. Everything it acts on is
//! behind a trait, with a system implementation used by default:
//!
//! | Trait | Default | Role |
//! |---|---|---|
//! | [`LogContext`] | [`TracingLog`](logging::TracingLog) | is logging up, the sink and its threshold |
//! | [`Debugger`] | [`SystemDebugger`](debugger::SystemDebugger) | debugger presence, breakpoints |
//! | [`Dialog`] | [`SystemDialog`](dialog::SystemDialog) | blocking message dialogs |
//! | [`ErrorInfoSink`] | [`ProcessErrorInfo`](error_info::ProcessErrorInfo) | structured info for crash diagnostics |
//! | [`Terminator`] | [`ProcessTerminator`](terminate::ProcessTerminator) | fail-fast |
//!
//! Replacing them through [`Reporter::builder`] makes every path testable,
//! including termination: a [`Terminator`] that panics lets a test observe
//! that a fatal report never returns.
//!
//! ## Structured error info
//!
//! A critical report may carry a [`rootcause::Report`] in its
//! [`ErrorContext`]. If the [`ErrorInfoSink`] accepts it, the process
//! terminates through [`Termination::WithErrorContext`], which keeps the
//! report available to crash diagnostics. If it does not, a warning is logged
//! and the process terminates through [`Termination::FatalAppExit`].

pub mod code;
pub mod config;
pub mod debugger;
pub mod dialog;
pub mod error_info;
mod global;
pub mod location;
pub mod logging;
mod macros;
pub mod policy;
pub mod prelude;
mod reporter;
pub mod severity;
pub mod template;
pub mod terminate;

pub use self::{
    code::{ErrorContext, PlatformCode},
    config::ReporterConfig,
    debugger::Debugger,
    dialog::Dialog,
    error_info::ErrorInfoSink,
    global::{AlreadyInstalledError, global},
    location::SourceLocation,
    logging::{LogContext, LogSink},
    reporter::{Outcome, Prompt, Reporter, ReporterBuilder},
    severity::Severity,
    terminate::{Termination, Terminator},
};
