//! Reporter configuration.
//!
//! Most settings are made through [`ReporterBuilder`](crate::ReporterBuilder).
//! A few can also be controlled from the environment.
//!
//! # Environment Variables
//!
//! - `ROOTCAUSE_ESCALATE` - Comma-separated options:
//!   - `headless` - Write dialogs to standard error instead of showing a
//!     system dialog
//!   - `named-threads` - Name dialog threads even in release builds

use std::{borrow::Cow, sync::OnceLock};

/// `MAKELANGID(LANG_ENGLISH, SUBLANG_NEUTRAL)`.
pub const LANG_ENGLISH_NEUTRAL: u16 = 0x0009;

/// Settings shared by every report of a [`Reporter`](crate::Reporter).
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    /// The application name, used in dialog titles and dialog thread names.
    pub app_name: Cow<'static, str>,
    /// Whether dialog threads get a diagnostic name.
    ///
    /// Defaults to `true` in debug builds.
    pub name_dialog_threads: bool,
    /// The language id dialog buttons are rendered in.
    pub dialog_language: u16,
}

impl ReporterConfig {
    /// The default configuration for an application called `app_name`,
    /// adjusted by the environment.
    #[must_use]
    pub fn new(app_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            app_name: app_name.into(),
            name_dialog_threads: cfg!(debug_assertions) || EnvOptions::get().named_threads,
            dialog_language: LANG_ENGLISH_NEUTRAL,
        }
    }

    /// The title of non-fatal error dialogs.
    #[must_use]
    pub fn error_title(&self) -> String {
        format!("{} - Error", self.app_name)
    }

    /// The title of fatal error dialogs.
    #[must_use]
    pub fn fatal_error_title(&self) -> String {
        format!("{} - Fatal error", self.app_name)
    }

    /// The name given to dialog threads when
    /// [`name_dialog_threads`](Self::name_dialog_threads) is set.
    #[must_use]
    pub fn dialog_thread_name(&self) -> String {
        format!("{} Message Box Thread", self.app_name)
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        let app_name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .map_or(Cow::Borrowed("Application"), Cow::Owned);
        Self::new(app_name)
    }
}

#[derive(Debug, Default)]
pub(crate) struct EnvOptions {
    pub(crate) headless: bool,
    pub(crate) named_threads: bool,
}

impl EnvOptions {
    pub(crate) fn get() -> &'static Self {
        static ROOTCAUSE_ESCALATE_FLAGS: OnceLock<EnvOptions> = OnceLock::new();

        ROOTCAUSE_ESCALATE_FLAGS.get_or_init(|| {
            std::env::var_os("ROOTCAUSE_ESCALATE")
                .map(|var| Self::parse(&var.to_string_lossy()))
                .unwrap_or_default()
        })
    }

    fn parse(var: &str) -> Self {
        let mut options = Self::default();
        for v in var.split(',').map(str::trim) {
            if v.eq_ignore_ascii_case("headless") {
                options.headless = true;
            } else if v.eq_ignore_ascii_case("named-threads") {
                options.named_threads = true;
            }
        }
        options
    }
}
