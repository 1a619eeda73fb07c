//! The process-wide reporter.
//!
//! Libraries should take a [`Reporter`] as a parameter. Applications that
//! want one reporter for the whole process install it once at startup:
//!
//! ```no_run
//! use escalate::Reporter;
//!
//! Reporter::builder()
//!     .app_name("Taskbar")
//!     .build()
//!     .install()
//!     .expect("failed to install reporter");
//!
//! let _ = escalate::global().error("Something broke", "", escalate::location!());
//! ```

use core::fmt;

use crate::reporter::Reporter;

static GLOBAL: spin::Once<Reporter> = spin::Once::new();

/// Error returned when attempting to install a reporter when one is already
/// installed.
///
/// Contains the reporter that was attempted to be installed.
pub struct AlreadyInstalledError(pub Reporter);

impl fmt::Debug for AlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlreadyInstalledError").finish()
    }
}

impl fmt::Display for AlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a reporter is already installed globally")
    }
}

impl core::error::Error for AlreadyInstalledError {}

impl Reporter {
    /// Installs this reporter as the process-wide reporter returned by
    /// [`global`].
    ///
    /// Fails if a reporter was already installed, or if [`global`] was called
    /// before and installed the default one.
    pub fn install(self) -> Result<&'static Reporter, AlreadyInstalledError> {
        let mut pending = Some(self);
        let installed = GLOBAL.call_once(|| pending.take().unwrap_or_default());
        match pending {
            None => Ok(installed),
            Some(rejected) => Err(AlreadyInstalledError(rejected)),
        }
    }
}

/// The process-wide reporter.
///
/// Installs [`Reporter::new`] if no reporter has been installed yet.
pub fn global() -> &'static Reporter {
    GLOBAL.call_once(Reporter::new)
}
