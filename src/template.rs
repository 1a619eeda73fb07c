//! Message templates and the rendered [`LogMessage`] buffer.
//!
//! A [`Template`] is a static string with two placeholders: `{message}` and
//! `{detail}`. Templates come in [`TemplatePair`]s, one variant used when an
//! error detail is available and one used when it is not.
//!
//! ```
//! use escalate::template::{LogMessage, Template, TemplatePair};
//!
//! const PAIR: TemplatePair = TemplatePair::new(
//!     Template::new("{message}: {detail}"),
//!     Template::new("{message}"),
//! );
//!
//! assert_eq!(LogMessage::render(&PAIR, "X", "").as_str(), "X");
//! assert_eq!(LogMessage::render(&PAIR, "X", "D").as_str(), "X: D");
//! ```

use core::fmt;

const MESSAGE: &str = "{message}";
const DETAIL: &str = "{detail}";

/// A message template with `{message}` and `{detail}` placeholders.
///
/// Any other text, including other brace pairs, is copied verbatim.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Template(&'static str);

impl Template {
    /// Creates a template from its source text.
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self(source)
    }

    /// The source text of the template.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        self.0
    }

    /// Appends the rendering of this template to `out`.
    pub fn render_into(&self, out: &mut String, message: &str, detail: &str) {
        let mut rest = self.0;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(MESSAGE) {
                out.push_str(message);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(DETAIL) {
                out.push_str(detail);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
    }
}

/// A "with detail" template and a "plain" template.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TemplatePair {
    /// Used when the detail string is non-empty.
    pub with_detail: Template,
    /// Used when the detail string is empty.
    pub plain: Template,
}

impl TemplatePair {
    /// Creates a pair from its two variants.
    #[must_use]
    pub const fn new(with_detail: Template, plain: Template) -> Self {
        Self { with_detail, plain }
    }

    /// Picks the variant matching `detail`.
    #[must_use]
    pub fn select(&self, detail: &str) -> &Template {
        if detail.is_empty() {
            &self.plain
        } else {
            &self.with_detail
        }
    }
}

/// A rendered message. Lives for the duration of a single report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogMessage(String);

impl LogMessage {
    /// Renders `message` and `detail` with the variant of `templates` selected
    /// by whether `detail` is empty.
    #[must_use]
    pub fn render(templates: &TemplatePair, message: &str, detail: &str) -> Self {
        let mut buf = Self::default();
        buf.rerender(templates, message, detail);
        buf
    }

    /// Clears the buffer and renders into it again, reusing its allocation.
    pub fn rerender(&mut self, templates: &TemplatePair, message: &str, detail: &str) {
        self.0.clear();
        templates
            .select(detail)
            .render_into(&mut self.0, message, detail);
    }

    /// The rendered text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the buffer, returning the rendered text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: TemplatePair = TemplatePair::new(
        Template::new("Oops!\n\n{message}\n\n{detail}"),
        Template::new("Oops!\n\n{message}"),
    );

    #[test]
    fn test_plain_variant_without_detail() {
        assert_eq!(LogMessage::render(&PAIR, "X", "").as_str(), "Oops!\n\nX");
    }

    #[test]
    fn test_detail_variant_interpolates_both() {
        assert_eq!(
            LogMessage::render(&PAIR, "X", "D").as_str(),
            "Oops!\n\nX\n\nD"
        );
    }

    #[test]
    fn test_unknown_braces_are_verbatim() {
        let mut out = String::new();
        Template::new("{} {message} {other} {").render_into(&mut out, "m", "d");
        assert_eq!(out, "{} m {other} {");
    }

    #[test]
    fn test_placeholder_text_in_arguments_is_not_expanded() {
        let mut out = String::new();
        Template::new("{message}|{detail}").render_into(&mut out, "{detail}", "x");
        assert_eq!(out, "{detail}|x");
    }

    #[test]
    fn test_rerender_reuses_buffer() {
        let mut msg = LogMessage::render(&PAIR, "first", "detail");
        msg.rerender(&PAIR, "second", "");
        assert_eq!(msg.as_str(), "Oops!\n\nsecond");
    }
}
