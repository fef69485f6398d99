//! Error rendering using ariadne
//!
//! Compilation errors carry their source text, so they are rendered with source snippets
//! and labels. Evaluation and API errors have no location and render as a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expression>";

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use formulet::{compile, render_error};
///
/// if let Err(e) = compile("1 + + ") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for web UIs, logs, etc.)
///
/// # Example
/// ```
/// use formulet::{compile, render_error_to_string};
///
/// let formatted = match compile("a ? b") {
///     Err(e) => render_error_to_string(&e),
///     Ok(_) => unreachable!(),
/// };
/// // Color codes are interleaved with the source snippet.
/// assert!(formatted.contains("\u{1b}["));
/// ```
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// # Example
/// ```
/// use formulet::{compile, render_error_to_string_no_color};
///
/// let e = compile("a ? b").unwrap_err();
/// let formatted = render_error_to_string_no_color(&e);
/// assert!(formatted.contains("a ? b"));
/// assert!(!formatted.contains("\u{1b}["));
/// ```
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation { diagnostics, src } => {
            render_diagnostics(src, diagnostics, writer, use_color)
        }
        Error::Evaluation(err) => writeln!(writer, "Evaluation error: {}", err),
        Error::Api(msg) => writeln!(writer, "API error: {}", msg),
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(
                ariadne::Config::default()
                    .with_color(use_color)
                    .with_index_type(IndexType::Byte),
            );

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((SOURCE_ID, diag.span.0.clone()))
                .with_message(&diag.message)
                .with_color(color),
        );

        for related in &diag.related {
            let color = colors.next();
            report = report.with_label(
                Label::new((SOURCE_ID, related.span.0.clone()))
                    .with_message(&related.message)
                    .with_color(color),
            );
        }

        if let Some(help) = &diag.help {
            report = report.with_help(help);
        }

        // Reborrow so the writer is not moved into the first report.
        report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, EvalError, compile};

    #[test]
    fn test_render_parse_error() {
        let source = "1 + + "; // Missing operand
        let e = compile(source).unwrap_err();
        let output = render_error_to_string_no_color(&e);

        assert!(output.contains("Error") || output.contains("error"));
        // Snippet lines are rendered without trailing whitespace.
        assert!(output.contains(source.trim_end()));
        assert!(output.contains("P001"));
    }

    #[test]
    fn test_render_depth_error_includes_help() {
        let source = "(".repeat(300) + "1" + &")".repeat(300);
        let e = compile(&source).unwrap_err();
        let output = render_error_to_string_no_color(&e);

        assert!(output.contains("P004"));
        assert!(output.contains("Reduce nesting"));
    }

    #[test]
    fn test_colored_render_differs_from_plain() {
        let e = compile("a ? b").unwrap_err();
        let plain = render_error_to_string_no_color(&e);
        let colored = render_error_to_string(&e);

        assert!(plain.contains("a ? b"));
        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('\u{1b}'));
    }

    #[test]
    fn test_render_to_string_captures_output() {
        let e = compile("bad syntax {").unwrap_err();
        let output = render_error_to_string_no_color(&e);

        assert!(!output.is_empty());
        // ariadne output spans several lines
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_evaluation_error() {
        let expr = compile("missing.x").unwrap();
        let e: Error = expr.evaluate(&Context::empty()).unwrap_err().into();
        assert_eq!(
            render_error_to_string_no_color(&e),
            "Evaluation error: cannot read properties of undefined (reading 'x')\n"
        );

        let e = Error::from(EvalError::host("offline"));
        assert_eq!(render_error_to_string_no_color(&e), "Evaluation error: offline\n");
    }

    #[test]
    fn test_render_to_writer() {
        let e = Error::Api("invalid expression tree".to_string());
        let mut buf = Vec::new();
        render_error_to(&e, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "API error: invalid expression tree\n");
    }
}
