//! Fixture error types
//!
//! Registration violations never abort the caller. They spoil the fixture and
//! are rendered into the fixture log through their `Display` text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Fixture description must be non-blank.")]
    BlankDescription,

    #[error("Test description must be non-blank.")]
    BlankCaseName,

    #[error("Description conflict: action already registered with this description: '{0}'")]
    DuplicateCaseName(String),

    #[error("Failed to start task runtime: {0}")]
    TaskRuntime(#[from] std::io::Error),
}
