//! Non-returning process termination.

use core::fmt;
use std::io::Write as _;

use crate::{code::PlatformCode, error_info::ProcessErrorInfo};

/// `FAST_FAIL_FATAL_APP_EXIT`, the reason code of a plain fail-fast.
pub const FAST_FAIL_FATAL_APP_EXIT: u32 = 7;

/// Why the process is being terminated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Structured error info was attached; terminate in a way that preserves
    /// it, reporting `code` as the failure.
    WithErrorContext(PlatformCode),
    /// Unconditional fail-fast with [`FAST_FAIL_FATAL_APP_EXIT`].
    FatalAppExit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::WithErrorContext(code) => {
                write!(f, "fail-fast with error context {code}")
            }
            Termination::FatalAppExit => {
                write!(f, "fail-fast, reason {FAST_FAIL_FATAL_APP_EXIT}")
            }
        }
    }
}

/// Ends the process.
pub trait Terminator: Send + Sync {
    /// Terminates the process. Never returns.
    fn terminate(&self, reason: Termination) -> !;
}

/// Terminates the current process immediately, without unwinding or running
/// destructors.
///
/// On the context-preserving path the error info held by
/// [`ProcessErrorInfo`] is written to standard error first, and on Windows
/// `RoFailFastWithErrorContext` is invoked with the code. Both paths end in
/// [`std::process::abort`], which is `__fastfail(FAST_FAIL_FATAL_APP_EXIT)`
/// on Windows.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProcessTerminator;

impl Terminator for ProcessTerminator {
    fn terminate(&self, reason: Termination) -> ! {
        if let Termination::WithErrorContext(code) = reason {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "fatal error {code}");
            ProcessErrorInfo::with_current(|info| {
                if let Some(info) = info {
                    let _ = writeln!(stderr, "{info}");
                }
            });
            let _ = stderr.flush();
            drop(stderr);

            #[cfg(windows)]
            {
                // SAFETY: RoFailFastWithErrorContext has no preconditions and
                // does not return.
                unsafe {
                    windows::Win32::System::WinRT::RoFailFastWithErrorContext(
                        windows::core::HRESULT(code.0),
                    );
                }
            }
        }

        std::process::abort()
    }
}
