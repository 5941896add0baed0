//! Error rendering using ariadne
//!
//! Shows a rejected expression with the offending text underlined, the
//! diagnostic code and any help text.

use ariadne::{ColorGenerator, IndexType, Label, Report, ReportKind, Source};
use numexpr_guard_core::api::Diagnostic;
use numexpr_guard_core::parser::ValidationError;
use std::io::Write;
use std::ops::Range;

const SOURCE_ID: &str = "<expression>";

/// Render a validation error with rich formatting to stderr
///
/// # Example
/// ```no_run
/// use numexpr_guard::{get_matcher, render_error};
///
/// if let Err(e) = get_matcher().check("a = b") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &ValidationError) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &ValidationError, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &ValidationError) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &ValidationError) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &ValidationError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_diagnostic(&error.input, &error.to_diagnostic(), writer, use_color)
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let span = label_range(source, diag.span.0.clone());
    let config = ariadne::Config::default()
        .with_color(use_color)
        .with_index_type(IndexType::Byte);
    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_message(&diag.message)
        .with_config(config);

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new((SOURCE_ID, span))
            .with_message(&diag.message)
            .with_color(colors.next()),
    );

    for help_msg in &diag.help {
        report = report.with_help(help_msg);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}

/// Widen an empty span to cover the character it points at, so the label
/// has something to underline.
fn label_range(source: &str, range: Range<usize>) -> Range<usize> {
    if !range.is_empty() {
        return range;
    }
    match source.get(range.start..).and_then(|rest| rest.chars().next()) {
        Some(c) => range.start..range.start + c.len_utf8(),
        None => range,
    }
}
