//! Log line and block formatters
//!
//! The layout is line-oriented and parsed by external tooling, so spacing is
//! fixed: case lines start with a single space, assertion lines with four,
//! panic blocks are indented by two and failure blocks by four.

/// Prefix of a case line for a normally selected case
pub const NORMAL_PREFIX: &str = " -> ";

/// Prefix of a case line for a focused case
pub const FOCUSED_PREFIX: &str = " -> <FOCUSED> ";

pub fn case_line(prefix: &str, name: &str) -> String {
    format!("{prefix}\"{name}\"\n")
}

pub fn skipped_case_line(name: &str) -> String {
    format!(" -> (skipped) \"{name}\"\n")
}

pub fn assertion_line(description: &str) -> String {
    format!("    + {description}\n")
}

pub fn skipped_assertion_line(description: &str) -> String {
    format!("    + (skipped) {description}\n")
}

/// Row of `*` as wide as the wider of the two lines
fn divider(location: &str, title: &str) -> String {
    "*".repeat(location.chars().count().max(title.chars().count()))
}

/// Format a recovered panic
pub fn format_panic(message: &str, location: &str) -> String {
    let title = format!("PANIC: [{message}]");
    let divider = divider(location, &title);

    format!("\n\n  {divider}\n\n  {title}\n\n  {location}\n\n  {divider}\n")
}

/// Format a failed assertion with the predicate's message
pub fn format_failure(description: &str, result: &str, location: &str) -> String {
    let title = format!("FAILED: \"{description}\"");
    let divider = divider(location, &title);

    let mut output = format!("\n    {divider}\n\n    {title}\n\n");
    for line in result.split('\n') {
        output.push_str("    ");
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&format!("\n\n    {location}\n\n    {divider}\n\n"));
    output
}
