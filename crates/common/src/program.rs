//! Program representation for GritVM instruction streams.

use crate::instruction::Instruction;

/// A GritVM program: an ordered sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Index of the first loader marker, if the program contains one.
    pub fn first_unknown(&self) -> Option<usize> {
        self.instructions.iter().position(Instruction::is_unknown)
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}
