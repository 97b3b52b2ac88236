//! GritVM common types.
//!
//! This crate provides the foundational data structures shared by the
//! loader and the virtual machine:
//!
//! - [`OpCode`]: the 20 executable opcodes plus the loader's
//!   `UnknownInstruction` marker
//! - [`Instruction`]: an opcode with a single signed integer argument
//! - [`Program`]: an ordered sequence of instructions
//! - [`MnemonicError`]: strict mnemonic lookup failure

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::MnemonicError;
pub use instruction::Instruction;
pub use opcode::OpCode;
pub use program::Program;
