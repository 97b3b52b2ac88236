//! Diagnostic rendering of machine state.

use std::io::{self, Write};

use crate::machine::VM;

/// Which optional sections a dump includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// List data memory as `Location i: value`.
    pub data: bool,
    /// List instruction memory as `Instruction i: MNEMONIC argument`.
    pub instructions: bool,
}

impl DumpOptions {
    /// Both optional sections.
    pub fn all() -> Self {
        Self {
            data: true,
            instructions: true,
        }
    }
}

impl<W: Write> VM<W> {
    /// Render status, accumulator, the recorded fault and the requested
    /// memory sections. Never changes machine state.
    pub fn dump(&self, options: DumpOptions) -> String {
        let mut lines = vec![
            "****** Output Dump ******".to_string(),
            format!("Status: {}", self.status),
            format!("Accumulator: {}", self.accumulator),
        ];
        if let Some(fault) = &self.fault {
            lines.push(format!("Fault: {fault}"));
        }

        if options.data {
            lines.push("*** Data Memory ***".to_string());
            lines.extend(
                self.data
                    .iter()
                    .enumerate()
                    .map(|(i, value)| format!("Location {i}: {value}")),
            );
        }

        if options.instructions {
            lines.push("*** Instruction Memory ***".to_string());
            lines.extend(
                self.instructions
                    .iter()
                    .enumerate()
                    .map(|(i, instr)| format!("Instruction {i}: {instr}")),
            );
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Write [`VM::dump`] to `out`.
    pub fn write_dump<O: Write>(&self, out: &mut O, options: DumpOptions) -> io::Result<()> {
        out.write_all(self.dump(options).as_bytes())
    }
}
