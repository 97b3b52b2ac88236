//! GritVM program loader: text ↔ instruction translation.
//!
//! Program text is line oriented. Blank lines and lines whose first
//! character is `#` are skipped; every other line is `MNEMONIC [integer]`.
//!
//! Two entry points parse text:
//!
//! - [`parse_instruction`] is total: a line it cannot understand becomes
//!   the `UnknownInstruction` marker, which the VM rejects at load time.
//! - [`assemble`] is strict: it stops at the first bad line and says why.
//!
//! # Usage
//!
//! ```
//! use gritvm_assembler::{assemble, disassemble};
//!
//! let text = "# add five\nADDCONST 5\nOUTPUT\nHALT\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.len(), 3);
//! assert_eq!(disassemble(&program), "ADDCONST 5\nOUTPUT\nHALT\n");
//! ```

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use disassembler::format_instruction;
pub use error::AsmError;

use gritvm_common::{Instruction, Program};
use lexer::tokenize_line;
use parser::parse_line;

/// Returns true for lines the loader skips: empty or whitespace-only lines,
/// and lines whose first character is `#`.
pub fn is_skipped(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Parse a single program line into an instruction.
///
/// Never fails: unrecognized mnemonics, malformed numbers, extra tokens and
/// blank input all yield [`Instruction::unknown`]. Callers are expected to
/// filter skipped lines with [`is_skipped`] first.
pub fn parse_instruction(line: &str) -> Instruction {
    tokenize_line(line, 0)
        .and_then(|tokens| parse_line(&tokens, 0))
        .ok()
        .flatten()
        .unwrap_or_else(Instruction::unknown)
}

/// Assemble program text into a program.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut instructions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if is_skipped(line) {
            continue;
        }
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        if let Some(instr) = parse_line(&tokens, line_num)? {
            instructions.push(instr);
        }
    }

    Ok(Program::new(instructions))
}

/// Disassemble a program into canonical text, one instruction per line.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
