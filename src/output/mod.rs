//! Output formatting
//!
//! Renders case narration, assertion lines and failure blocks for the
//! fixture log.

mod formatter;

pub use formatter::{
    assertion_line, case_line, format_failure, format_panic, skipped_assertion_line,
    skipped_case_line, FOCUSED_PREFIX, NORMAL_PREFIX,
};
