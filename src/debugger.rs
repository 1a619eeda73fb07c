//! Debugger presence, breakpoints and debugger output.

use std::io::Write as _;

/// Queries and interrupts an attached debugger.
pub trait Debugger: Send + Sync {
    /// Whether a debugger is currently attached to the process.
    fn is_attached(&self) -> bool;

    /// Breaks into the attached debugger.
    ///
    /// Only called when [`is_attached`](Self::is_attached) returned `true`.
    fn break_into(&self);

    /// Writes a line the attached debugger can see.
    ///
    /// Receives the lines that are logged only because a debugger is
    /// attached, which the log sink itself would drop. Writes to standard
    /// error unless overridden.
    fn output(&self, text: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{text}");
    }
}

/// The debugger of the current process, as reported by the operating system.
///
/// - Windows: `IsDebuggerPresent`, `DebugBreak` and `OutputDebugStringW`.
/// - Linux: a non-zero `TracerPid` in `/proc/self/status`, and `SIGTRAP`.
///   Output goes to standard error.
/// - Elsewhere: never attached.
///
/// On Linux every ptrace tracer counts, except `strace` and `ltrace`, which
/// would let the `SIGTRAP` kill the process. Run under another tracer that
/// does not handle `SIGTRAP`, an [`Err`](crate::Severity::Err) report
/// terminates the process; install a different [`Debugger`] through
/// [`ReporterBuilder::debugger`](crate::ReporterBuilder::debugger) there.
/// The `/proc` probe is cached for a short while, so a debugger attaching or
/// detaching is noticed with a small delay.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemDebugger;

impl Debugger for SystemDebugger {
    fn is_attached(&self) -> bool {
        imp::is_attached()
    }

    fn break_into(&self) {
        imp::break_into();
    }

    #[cfg(windows)]
    fn output(&self, text: &str) {
        imp::output(text);
    }
}

#[cfg(windows)]
mod imp {
    use windows::{
        Win32::System::Diagnostics::Debug::{DebugBreak, IsDebuggerPresent, OutputDebugStringW},
        core::HSTRING,
    };

    pub(super) fn is_attached() -> bool {
        // SAFETY: IsDebuggerPresent has no preconditions.
        unsafe { IsDebuggerPresent() }.as_bool()
    }

    pub(super) fn break_into() {
        // SAFETY: only reached with a debugger attached, which handles the
        // breakpoint exception.
        unsafe { DebugBreak() }
    }

    pub(super) fn output(text: &str) {
        let line = HSTRING::from(format!("{text}\n"));
        // SAFETY: `line` is a nul-terminated wide string that outlives the call.
        unsafe { OutputDebugStringW(&line) }
    }
}

#[cfg(unix)]
mod imp {
    use std::time::{Duration, Instant};

    use spin::RwLock;

    const PROBE_TTL: Duration = Duration::from_millis(500);

    static PROBE: RwLock<Option<Probe>> = RwLock::new(None);

    #[derive(Copy, Clone, Debug)]
    pub(super) struct Probe {
        pub(super) taken: Instant,
        pub(super) attached: bool,
    }

    impl Probe {
        pub(super) fn fresh(self, now: Instant) -> Option<bool> {
            (now.saturating_duration_since(self.taken) < PROBE_TTL).then_some(self.attached)
        }
    }

    pub(super) fn is_attached() -> bool {
        let now = Instant::now();
        if let Some(attached) = (*PROBE.read()).and_then(|probe| probe.fresh(now)) {
            return attached;
        }

        let attached = probe();
        // Losing the race only means the next call probes again.
        if let Some(mut slot) = PROBE.try_write() {
            *slot = Some(Probe {
                taken: now,
                attached,
            });
        }
        attached
    }

    fn probe() -> bool {
        let tracer = std::fs::read_to_string("/proc/self/status")
            .ok()
            .as_deref()
            .and_then(tracer_pid)
            .filter(|&pid| pid != 0);
        let Some(pid) = tracer else {
            return false;
        };

        let comm = std::fs::read_to_string(format!("/proc/{pid}/comm")).unwrap_or_default();
        !is_tracing_tool(comm.trim())
    }

    pub(super) fn tracer_pid(status: &str) -> Option<u32> {
        status
            .lines()
            .find_map(|line| line.strip_prefix("TracerPid:"))
            .and_then(|pid| pid.trim().parse().ok())
    }

    pub(super) fn is_tracing_tool(comm: &str) -> bool {
        matches!(comm, "strace" | "ltrace")
    }

    pub(super) fn break_into() {
        // SAFETY: raise has no memory-safety preconditions. The tracer
        // intercepts SIGTRAP before its default action applies.
        unsafe {
            libc::raise(libc::SIGTRAP);
        }
    }
}

#[cfg(not(any(windows, unix)))]
mod imp {
    pub(super) fn is_attached() -> bool {
        false
    }

    pub(super) fn break_into() {}
}
