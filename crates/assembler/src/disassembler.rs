//! Formatter: program → canonical program text.
//!
//! One instruction per line, upper-case mnemonic, no comments. Opcodes that
//! ignore their argument are written bare when the argument is 0.

use gritvm_common::{Instruction, OpCode, Program};

fn ignores_argument(op: OpCode) -> bool {
    matches!(op, OpCode::Clear | OpCode::Noop | OpCode::Halt | OpCode::Output)
}

/// Render one instruction as canonical text, without a line terminator.
pub fn format_instruction(instr: &Instruction) -> String {
    if ignores_argument(instr.operation) && instr.argument == 0 {
        instr.operation.mnemonic().to_string()
    } else {
        instr.to_string()
    }
}

/// Disassemble a program into canonical text.
///
/// The output reassembles to an identical program for every program that
/// contains no `UnknownInstruction` marker.
pub fn disassemble(program: &Program) -> String {
    let mut text = String::new();
    for instr in &program.instructions {
        text.push_str(&format_instruction(instr));
        text.push('\n');
    }
    text
}
