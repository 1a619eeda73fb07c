//! Modal dialogs and the threads they are shown on.
//!
//! A [`Dialog`] blocks the calling thread until the user dismisses it. The
//! reporter never calls it directly: [`spawn`] runs it on a fresh thread and
//! returns a [`DialogHandle`], which the reporter either joins (fatal
//! errors) or drops, detaching the thread (non-fatal errors).

use std::{
    io::Write as _,
    sync::Arc,
    thread::{self, JoinHandle},
};

/// The icon shown next to the dialog text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DialogIcon {
    /// A warning sign.
    Warning,
    /// An error sign.
    Error,
}

/// How a dialog is presented.
///
/// Dialogs always have a single OK button and request foreground focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DialogStyle {
    /// The icon.
    pub icon: DialogIcon,
    /// Whether the dialog stays above all other windows.
    pub topmost: bool,
}

impl DialogStyle {
    /// The style of non-fatal error dialogs.
    pub const WARNING: DialogStyle = DialogStyle {
        icon: DialogIcon::Warning,
        topmost: false,
    };

    /// The style of fatal error dialogs.
    pub const FATAL: DialogStyle = DialogStyle {
        icon: DialogIcon::Error,
        topmost: true,
    };
}

/// Everything needed to show one dialog. Owned, so it can move to the dialog
/// thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogRequest {
    /// The window title.
    pub title: String,
    /// The fully rendered message.
    pub body: String,
    /// Icon and z-order.
    pub style: DialogStyle,
    /// The language id used for button text.
    pub language: u16,
}

/// A blocking message dialog.
pub trait Dialog: Send + Sync {
    /// Shows the dialog and returns once it has been dismissed.
    fn show(&self, request: &DialogRequest);
}

/// Writes dialogs to standard error and returns immediately.
///
/// Used where no windowing system is available.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConsoleDialog;

impl Dialog for ConsoleDialog {
    fn show(&self, request: &DialogRequest) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[{}]\n{}", request.title, request.body);
    }
}

/// The platform message box.
///
/// `MessageBoxExW` on Windows; [`ConsoleDialog`] elsewhere.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemDialog;

#[cfg(windows)]
impl Dialog for SystemDialog {
    fn show(&self, request: &DialogRequest) {
        use windows::{
            Win32::UI::WindowsAndMessaging::{
                MB_ICONERROR, MB_ICONWARNING, MB_OK, MB_SETFOREGROUND, MB_TOPMOST, MessageBoxExW,
            },
            core::HSTRING,
        };

        let mut style = MB_OK | MB_SETFOREGROUND;
        style |= match request.style.icon {
            DialogIcon::Warning => MB_ICONWARNING,
            DialogIcon::Error => MB_ICONERROR,
        };
        if request.style.topmost {
            style |= MB_TOPMOST;
        }

        let body = HSTRING::from(request.body.as_str());
        let title = HSTRING::from(request.title.as_str());
        // SAFETY: both strings are null-terminated and outlive the call.
        unsafe {
            let _ = MessageBoxExW(None, &body, &title, style, request.language);
        }
    }
}

#[cfg(not(windows))]
impl Dialog for SystemDialog {
    fn show(&self, request: &DialogRequest) {
        ConsoleDialog.show(request);
    }
}

/// A dialog running on its own thread.
///
/// Dropping the handle detaches the thread; the dialog stays up until the
/// user dismisses it.
#[derive(Debug)]
#[must_use = "dropping the handle detaches the dialog thread"]
pub struct DialogHandle(JoinHandle<()>);

impl DialogHandle {
    /// Blocks until the dialog has been dismissed.
    pub fn join(self) {
        // A panicking dialog implementation has already reported itself.
        let _ = self.0.join();
    }

    /// Whether the dialog has been dismissed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// Shows `request` on a newly spawned thread, optionally named `thread_name`.
///
/// Returns an error if the thread could not be spawned.
pub fn spawn(
    dialog: Arc<dyn Dialog>,
    request: DialogRequest,
    thread_name: Option<String>,
) -> std::io::Result<DialogHandle> {
    let mut builder = thread::Builder::new();
    if let Some(name) = thread_name {
        builder = builder.name(name);
    }
    builder
        .spawn(move || dialog.show(&request))
        .map(DialogHandle)
}
