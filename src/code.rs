//! Platform status codes and the context carried by critical reports.

use core::fmt;

use rootcause::Report;

/// A 32-bit platform status code, such as a Windows `HRESULT` or an `errno`
/// value.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlatformCode(pub i32);

impl PlatformCode {
    /// `E_UNEXPECTED`, used when a critical report carries no code of its own.
    pub const UNEXPECTED: PlatformCode = PlatformCode(0x8000_FFFF_u32 as i32);

    /// `E_FAIL`.
    pub const FAIL: PlatformCode = PlatformCode(0x8000_4005_u32 as i32);

    /// The calling thread's last OS error.
    #[must_use]
    pub fn last_os_error() -> Self {
        Self(
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(Self::FAIL.0),
        )
    }

    /// The code reinterpreted as unsigned, the way status codes are usually
    /// written.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }

    /// A human-readable description, suitable as the detail of a report.
    ///
    /// The system message for the code followed by the code itself in hex.
    #[must_use]
    pub fn describe(self) -> String {
        let system = std::io::Error::from_raw_os_error(self.0).to_string();
        format!("{system} ({self})")
    }
}

impl fmt::Display for PlatformCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.as_u32())
    }
}

impl fmt::Debug for PlatformCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlatformCode({self})")
    }
}

impl From<i32> for PlatformCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<&std::io::Error> for PlatformCode {
    fn from(error: &std::io::Error) -> Self {
        Self(error.raw_os_error().unwrap_or(Self::FAIL.0))
    }
}

/// Diagnostic context attached to a critical report before the process is
/// terminated.
///
/// The [`info`](Self::info) report, when present, is handed to the
/// [`ErrorInfoSink`](crate::error_info::ErrorInfoSink). The context is
/// consumed by the report call and never retained by the reporter.
#[derive(Debug)]
pub struct ErrorContext {
    /// The code the context-preserving termination path is invoked with.
    pub code: PlatformCode,
    /// The structured description of the original failure.
    pub info: Option<Report>,
}

impl ErrorContext {
    /// A context carrying only a code.
    #[must_use]
    pub fn new(code: PlatformCode) -> Self {
        Self { code, info: None }
    }

    /// A context with no code and no error info.
    #[must_use]
    pub fn none() -> Self {
        Self::new(PlatformCode::UNEXPECTED)
    }

    /// Adds the structured error info.
    #[must_use]
    pub fn with_info(mut self, info: impl Into<Report>) -> Self {
        self.info = Some(info.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::none()
    }
}
