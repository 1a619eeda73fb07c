//! Process-wide structured error info for crash diagnostics.
//!
//! Before terminating, a critical report hands its structured error info to
//! an [`ErrorInfoSink`]. When the sink accepts it, the reporter terminates
//! through the context-preserving path, which can then read the info back
//! (see [`ProcessTerminator`](crate::terminate::ProcessTerminator)).

use core::fmt;

use rootcause::Report;

use crate::code::PlatformCode;

/// Error returned when structured error info could not be attached.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct AttachError {
    /// Why attaching failed.
    pub code: PlatformCode,
}

impl fmt::Debug for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("code", &self.code)
            .finish()
    }
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to attach error info: {}", self.code.describe())
    }
}

impl core::error::Error for AttachError {}

/// Records structured error info for crash diagnostics.
pub trait ErrorInfoSink: Send + Sync {
    /// Makes `info` the process's current error info.
    fn attach(&self, info: Report) -> Result<(), AttachError>;
}

static CURRENT: spin::RwLock<Option<Report>> = spin::RwLock::new(None);

/// The process-wide error info slot.
///
/// Attaching replaces any previous info. It fails rather than blocks when
/// another thread holds the slot, which only happens while that thread is
/// itself terminating the process.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProcessErrorInfo;

impl ProcessErrorInfo {
    /// `HRESULT_FROM_WIN32(ERROR_BUSY)`.
    pub const BUSY: PlatformCode = PlatformCode(0x8007_00AA_u32 as i32);

    /// Runs `f` with the current error info.
    ///
    /// Returns `None` without calling `f` if the slot is contended.
    pub fn with_current<R>(f: impl FnOnce(Option<&Report>) -> R) -> Option<R> {
        let guard = CURRENT.try_read()?;
        Some(f(guard.as_ref()))
    }

    /// Removes and returns the current error info.
    pub fn take() -> Option<Report> {
        CURRENT.try_write()?.take()
    }
}

impl ErrorInfoSink for ProcessErrorInfo {
    fn attach(&self, info: Report) -> Result<(), AttachError> {
        let mut slot = CURRENT.try_write().ok_or(AttachError { code: Self::BUSY })?;
        *slot = Some(info);
        Ok(())
    }
}
