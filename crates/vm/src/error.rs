//! Errors for the GritVM engine.
//!
//! [`LoadError`] is a hard failure: the program source could not be read, so
//! no machine state was touched. [`RuntimeError`] describes why a run ended
//! in a terminal fault status; the engine records it rather than returning
//! it, and `run` reports only the resulting [`Status`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::status::Status;

/// The program source could not be opened or read.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be opened.
    #[error("cannot open program '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a line from the program source failed.
    #[error("cannot read program line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Faults raised while executing a program.
///
/// Every variant that arises from an instruction carries its index (`at`)
/// in instruction memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A jump opcode was given a relative offset of 0.
    #[error("invalid jump argument 0 at instruction {at}")]
    InvalidJumpArgument { at: usize },

    /// CHECKMEM found fewer data cells than required.
    #[error("memory check failed at instruction {at}: need {required} cells, have {length}")]
    InsufficientMemory { at: usize, required: i64, length: usize },

    /// Data memory index outside the valid range.
    #[error("memory index {index} out of bounds (length {length}) at instruction {at}")]
    MemoryOutOfBounds { at: usize, index: i64, length: usize },

    /// Integer division by zero.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// The loader's parse-failure marker reached execution.
    #[error("unknown instruction at instruction {at}")]
    UnknownInstruction { at: usize },

    /// Writing to the output channel failed.
    #[error("output failed at instruction {at}: {message}")]
    Output { at: usize, message: String },

    /// The configured step limit was reached before the program stopped.
    #[error("step limit of {limit} exceeded at instruction {at}")]
    StepLimitExceeded { at: usize, limit: u64 },
}

impl RuntimeError {
    /// The terminal status this fault puts the machine in.
    pub fn status(&self) -> Status {
        match self {
            RuntimeError::UnknownInstruction { .. } => Status::Unknown,
            _ => Status::Errored,
        }
    }

    /// Index of the instruction that raised the fault.
    pub fn at(&self) -> usize {
        match self {
            RuntimeError::InvalidJumpArgument { at }
            | RuntimeError::InsufficientMemory { at, .. }
            | RuntimeError::MemoryOutOfBounds { at, .. }
            | RuntimeError::DivisionByZero { at }
            | RuntimeError::UnknownInstruction { at }
            | RuntimeError::Output { at, .. }
            | RuntimeError::StepLimitExceeded { at, .. } => *at,
        }
    }
}
