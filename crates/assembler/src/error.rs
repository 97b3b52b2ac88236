//! Error types for the GritVM program loader.

use thiserror::Error;

/// Errors produced while assembling program text.
///
/// Line numbers are 1-based and count every line of the source, including
/// blank and comment lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// A numeric literal could not be parsed or does not fit in 64 bits.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },
}

impl AsmError {
    /// The source line the error was reported on.
    pub fn line(&self) -> usize {
        match self {
            AsmError::UnknownOpcode { line, .. }
            | AsmError::InvalidNumber { line, .. }
            | AsmError::UnexpectedToken { line, .. } => *line,
        }
    }
}
