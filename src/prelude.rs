//! Commonly used items for convenient importing.
//!
//! ```rust
//! use escalate::prelude::*;
//!
//! let reporter = Reporter::new();
//! report_warn!(reporter, "cache miss for {}", "settings.json");
//! assert!(reporter.should_log(Severity::Err));
//! ```

pub use crate::{
    ErrorContext, PlatformCode, Reporter, Severity, SourceLocation, location, report_error,
    report_fatal, report_warn,
};
