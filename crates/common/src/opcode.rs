//! Opcode definitions for the GritVM instruction set.
//!
//! Every executable opcode takes a single integer argument. Opcodes that do
//! not need one (CLEAR, NOOP, HALT, OUTPUT) ignore it.

use std::fmt;
use std::str::FromStr;

use crate::error::MnemonicError;

/// Identifies the operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // Accumulator & memory transfer
    /// Set the accumulator to 0.
    Clear,
    /// Load `data[arg]` into the accumulator.
    At,
    /// Store the accumulator into `data[arg]`.
    Set,
    /// Insert the accumulator at position `arg`, shifting later elements right.
    Insert,
    /// Remove the element at position `arg`, shifting later elements left.
    Erase,

    // Arithmetic with an immediate argument
    /// `acc += arg`
    AddConst,
    /// `acc -= arg`
    SubConst,
    /// `acc *= arg`
    MulConst,
    /// `acc /= arg`. Division by zero is a runtime fault.
    DivConst,

    // Arithmetic with a memory operand
    /// `acc += data[arg]`
    AddMem,
    /// `acc -= data[arg]`
    SubMem,
    /// `acc *= data[arg]`
    MulMem,
    /// `acc /= data[arg]`. Division by zero is a runtime fault.
    DivMem,

    // Control flow. A jump argument of 0 is invalid.
    /// Unconditional relative jump.
    JumpRel,
    /// Relative jump if the accumulator is zero.
    JumpZero,
    /// Relative jump if the accumulator is non-zero.
    JumpNZero,

    // Machine control
    /// No operation.
    Noop,
    /// Stop execution.
    Halt,
    /// Write the accumulator to the output channel.
    Output,
    /// Require data memory to hold at least `arg` elements.
    CheckMem,

    /// Produced by the loader for a line it cannot parse. Never executable.
    UnknownInstruction,
}

/// All executable opcodes, in definition order. `UnknownInstruction` is
/// deliberately absent.
pub const ALL_OPCODES: [OpCode; 20] = [
    OpCode::Clear,
    OpCode::At,
    OpCode::Set,
    OpCode::Insert,
    OpCode::Erase,
    OpCode::AddConst,
    OpCode::SubConst,
    OpCode::MulConst,
    OpCode::DivConst,
    OpCode::AddMem,
    OpCode::SubMem,
    OpCode::MulMem,
    OpCode::DivMem,
    OpCode::JumpRel,
    OpCode::JumpZero,
    OpCode::JumpNZero,
    OpCode::Noop,
    OpCode::Halt,
    OpCode::Output,
    OpCode::CheckMem,
];

impl OpCode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            OpCode::Clear => "CLEAR",
            OpCode::At => "AT",
            OpCode::Set => "SET",
            OpCode::Insert => "INSERT",
            OpCode::Erase => "ERASE",
            OpCode::AddConst => "ADDCONST",
            OpCode::SubConst => "SUBCONST",
            OpCode::MulConst => "MULCONST",
            OpCode::DivConst => "DIVCONST",
            OpCode::AddMem => "ADDMEM",
            OpCode::SubMem => "SUBMEM",
            OpCode::MulMem => "MULMEM",
            OpCode::DivMem => "DIVMEM",
            OpCode::JumpRel => "JUMPREL",
            OpCode::JumpZero => "JUMPZERO",
            OpCode::JumpNZero => "JUMPNZERO",
            OpCode::Noop => "NOOP",
            OpCode::Halt => "HALT",
            OpCode::Output => "OUTPUT",
            OpCode::CheckMem => "CHECKMEM",
            OpCode::UnknownInstruction => "UNKNOWN_INSTRUCTION",
        }
    }

    /// Look up an opcode by mnemonic, case-insensitively.
    ///
    /// Unrecognized mnemonics map to [`OpCode::UnknownInstruction`]. The
    /// reserved `UNKNOWN_INSTRUCTION` spelling is itself unrecognized, so a
    /// program cannot smuggle the marker in as text.
    pub fn from_mnemonic(mnemonic: &str) -> OpCode {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
            .copied()
            .unwrap_or(OpCode::UnknownInstruction)
    }
}

impl FromStr for OpCode {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OpCode::from_mnemonic(s) {
            OpCode::UnknownInstruction => Err(MnemonicError(s.to_string())),
            op => Ok(op),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
