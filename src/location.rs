//! Source code locations recorded with each log line.
//!
//! A [`SourceLocation`] identifies where a report was issued: the file, the
//! line and the enclosing function. The [`location!`](crate::location!) macro
//! captures all three; [`SourceLocation::caller`] captures the file and line
//! of its caller through [`core::panic::Location`], leaving the function
//! empty.

use core::fmt;

/// The file, line and function a report was issued from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// The source file path.
    pub file: &'static str,
    /// The line number within [`file`](Self::file).
    pub line: u32,
    /// The fully qualified path of the enclosing function, or an empty string
    /// when it is unknown.
    pub function: &'static str,
}

impl SourceLocation {
    /// Creates a location from its parts.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Captures the file and line of the caller.
    ///
    /// ```
    /// use escalate::SourceLocation;
    ///
    /// let location = SourceLocation::caller();
    /// assert!(location.file.ends_with(".rs"));
    /// assert!(location.function.is_empty());
    /// ```
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = core::panic::Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            function: "",
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)?;
        if !self.function.is_empty() {
            write!(f, " ({})", self.function)?;
        }
        Ok(())
    }
}

#[doc(hidden)]
pub fn __function_name(raw: &'static str) -> &'static str {
    // `raw` is the type name of a nested `fn __f`, i.e. `path::to::func::__f`.
    let mut name = raw.strip_suffix("::__f").unwrap_or(raw);
    // Closures add `::{{closure}}` segments that say nothing about the caller.
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Captures the [`SourceLocation`] of the macro invocation, including the
/// enclosing function.
///
/// ```
/// fn load() -> escalate::SourceLocation {
///     escalate::location!()
/// }
///
/// let location = load();
/// assert!(location.function.ends_with("load"));
/// ```
#[macro_export]
macro_rules! location {
    () => {
        $crate::SourceLocation::new(::core::file!(), ::core::line!(), {
            fn __f() {}
            fn __type_name_of<T>(_: T) -> &'static str {
                ::core::any::type_name::<T>()
            }
            $crate::location::__function_name(__type_name_of(__f))
        })
    };
}
