//! The GritVM instruction record.

use std::fmt;

use crate::opcode::OpCode;

/// A single instruction: an operation and its integer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The operation to perform.
    pub operation: OpCode,
    /// Operand. Meaning depends on the operation.
    pub argument: i64,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(operation: OpCode, argument: i64) -> Self {
        Self {
            operation,
            argument,
        }
    }

    /// The marker instruction the loader produces for an unparseable line.
    pub fn unknown() -> Self {
        Self::new(OpCode::UnknownInstruction, 0)
    }

    /// Returns true if this is the loader's parse-failure marker.
    pub fn is_unknown(&self) -> bool {
        self.operation == OpCode::UnknownInstruction
    }
}

/// Canonical text form: `MNEMONIC argument`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation.mnemonic(), self.argument)
    }
}
