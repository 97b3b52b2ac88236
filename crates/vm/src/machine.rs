//! VM state management: registers, memories, status, program loading.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdout, Write};
use std::path::Path;
use std::str;

use gritvm_assembler::{is_skipped, parse_instruction};
use gritvm_common::{Instruction, Program};
use log::{debug, warn};

use crate::error::{LoadError, RuntimeError};
use crate::status::Status;

/// Engine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum number of instructions a run may evaluate. `None` runs until
    /// the program stops by itself.
    pub step_limit: Option<u64>,
}

/// The GritVM accumulator machine.
///
/// `W` is the output channel OUTPUT writes to; standard output by default.
pub struct VM<W = Stdout> {
    /// The single arithmetic/transfer register.
    pub(crate) accumulator: i64,
    /// Data memory.
    pub(crate) data: Vec<i64>,
    /// Instruction memory. Fixed once loading finishes.
    pub(crate) instructions: Vec<Instruction>,
    /// Instruction pointer (index into `instructions`).
    pub(crate) ip: usize,
    pub(crate) status: Status,
    /// Most recent fault, kept for diagnostics until `reset`.
    pub(crate) fault: Option<RuntimeError>,
    /// Instructions evaluated since the last `reset`.
    pub(crate) steps: u64,
    pub(crate) config: VmConfig,
    pub(crate) output: W,
}

impl VM<Stdout> {
    /// Create a machine that writes OUTPUT values to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for VM<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl VM<Vec<u8>> {
    /// Everything OUTPUT has written so far, as text.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<W: Write> VM<W> {
    /// Create a machine that writes OUTPUT values to `output`.
    pub fn with_output(output: W) -> Self {
        Self {
            accumulator: 0,
            data: Vec::new(),
            instructions: Vec::new(),
            ip: 0,
            status: Status::Waiting,
            fault: None,
            steps: 0,
            config: VmConfig::default(),
            output,
        }
    }

    /// Replace the engine settings.
    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> VmConfig {
        self.config
    }

    pub fn set_step_limit(&mut self, limit: Option<u64>) {
        self.config.step_limit = limit;
    }

    /// Load a program file.
    ///
    /// Returns the current status unchanged, without opening the file,
    /// unless the machine is WAITING.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be opened or read. Machine
    /// state is untouched in that case.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        initial_memory: &[i64],
    ) -> Result<Status, LoadError> {
        if self.status != Status::Waiting {
            debug!("load ignored: machine is {}", self.status);
            return Ok(self.status);
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading program from '{}'", path.display());
        self.load_reader(BufReader::new(file), initial_memory)
    }

    /// Load a program from any buffered reader.
    ///
    /// The whole source is read before any state changes, so a read failure
    /// leaves the machine as it was. Lines are split on raw bytes: comment
    /// lines are skipped unread, and a line that is not valid UTF-8 is an
    /// unparseable instruction.
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        initial_memory: &[i64],
    ) -> Result<Status, LoadError> {
        if self.status != Status::Waiting {
            debug!("load ignored: machine is {}", self.status);
            return Ok(self.status);
        }

        let mut instructions = Vec::new();
        for (idx, line) in reader.split(b'\n').enumerate() {
            let mut line = line.map_err(|source| LoadError::Read {
                line: idx + 1,
                source,
            })?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            instructions.extend(parse_raw_line(&line));
        }

        Ok(self.accept(&Program::new(instructions), initial_memory))
    }

    /// Load a program from text already in memory.
    pub fn load_str(&mut self, text: &str, initial_memory: &[i64]) -> Status {
        let instructions = text
            .lines()
            .filter(|line| !is_skipped(line))
            .map(parse_instruction)
            .collect();
        self.accept(&Program::new(instructions), initial_memory)
    }

    /// Load an already parsed program.
    ///
    /// An `UnknownInstruction` marker in `program` is rejected exactly as an
    /// unparseable text line would be.
    pub fn load_program(&mut self, program: &Program, initial_memory: &[i64]) -> Status {
        self.accept(program, initial_memory)
    }

    /// Append `program` to instruction memory, stopping at the first marker.
    fn accept(&mut self, program: &Program, initial_memory: &[i64]) -> Status {
        if self.status != Status::Waiting {
            debug!("load ignored: machine is {}", self.status);
            return self.status;
        }

        if let Some(bad) = program.first_unknown() {
            self.instructions.extend_from_slice(&program.instructions[..bad]);
            warn!(
                "rejecting program: unparseable instruction after {} accepted",
                self.instructions.len()
            );
            self.status = Status::Errored;
            return self.status;
        }
        self.instructions.extend_from_slice(&program.instructions);

        self.data = initial_memory.to_vec();
        self.ip = 0;
        self.status = if self.instructions.is_empty() {
            Status::Waiting
        } else {
            Status::Ready
        };
        debug!(
            "loaded {} instructions, {} data cells: {}",
            self.instructions.len(),
            self.data.len(),
            self.status
        );
        self.status
    }

    /// Clear all registers and memories and return to WAITING.
    pub fn reset(&mut self) -> Status {
        self.accumulator = 0;
        self.data.clear();
        self.instructions.clear();
        self.ip = 0;
        self.fault = None;
        self.steps = 0;
        self.status = Status::Waiting;
        self.status
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    /// Read-only view of data memory.
    pub fn data_memory(&self) -> &[i64] {
        &self.data
    }

    /// Read-only view of instruction memory.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Index of the current instruction. Once the machine stops it stays on
    /// the instruction that stopped it.
    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    /// The fault that ended the last run, if any.
    pub fn last_fault(&self) -> Option<&RuntimeError> {
        self.fault.as_ref()
    }

    /// Instructions evaluated since construction or the last `reset`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Record a fault and move to the status it implies.
    pub(crate) fn record_fault(&mut self, fault: RuntimeError) {
        warn!("run stopped: {fault}");
        self.status = fault.status();
        self.fault = Some(fault);
    }
}

/// Parse one raw source line. `None` for lines the loader skips.
fn parse_raw_line(bytes: &[u8]) -> Option<Instruction> {
    if bytes.first() == Some(&b'#') {
        return None;
    }
    match str::from_utf8(bytes) {
        Ok(line) if is_skipped(line) => None,
        Ok(line) => Some(parse_instruction(line)),
        Err(_) => Some(Instruction::unknown()),
    }
}
