//! Run loop and opcode dispatch for the GritVM.

use std::io::Write;

use gritvm_common::{Instruction, OpCode};
use log::debug;

use crate::error::RuntimeError;
use crate::machine::VM;
use crate::status::Status;

impl<W: Write> VM<W> {
    /// Execute the loaded program until it stops.
    ///
    /// Does nothing unless the machine is READY. Returns the final status:
    /// HALTED, ERRORED or UNKNOWN (or the unchanged status when not READY).
    pub fn run(&mut self) -> Status {
        if self.status != Status::Ready {
            debug!("run ignored: machine is {}", self.status);
            return self.status;
        }

        self.status = Status::Running;
        while !self.status.is_terminal() {
            if let Some(limit) = self.config.step_limit {
                if self.steps >= limit {
                    self.record_fault(RuntimeError::StepLimitExceeded { at: self.ip, limit });
                    break;
                }
            }

            let Some(&instr) = self.instructions.get(self.ip) else {
                // Unreachable while the pointer invariant holds; treat as fall-off.
                self.status = Status::Halted;
                break;
            };
            self.steps += 1;

            match self.evaluate(instr) {
                Ok(jump) => self.advance(jump),
                Err(fault) => self.record_fault(fault),
            }
        }

        debug!(
            "run finished after {} steps: {} (acc {}, ip {})",
            self.steps, self.status, self.accumulator, self.ip
        );
        self.status
    }

    /// Apply one instruction and return the relative jump to take.
    ///
    /// Faults leave the pointer where it is.
    fn evaluate(&mut self, instr: Instruction) -> Result<i64, RuntimeError> {
        let at = self.ip;
        let arg = instr.argument;

        match instr.operation {
            OpCode::Clear => self.accumulator = 0,
            OpCode::At => self.accumulator = self.read(at, arg)?,
            OpCode::Set => {
                let idx = self.index(at, arg)?;
                self.data[idx] = self.accumulator;
            }
            OpCode::Insert => {
                // Inserting at len() appends.
                let idx = usize::try_from(arg)
                    .ok()
                    .filter(|&i| i <= self.data.len())
                    .ok_or_else(|| self.out_of_bounds(at, arg))?;
                self.data.insert(idx, self.accumulator);
            }
            OpCode::Erase => {
                let idx = self.index(at, arg)?;
                self.data.remove(idx);
            }

            OpCode::AddConst => self.accumulator = self.accumulator.wrapping_add(arg),
            OpCode::SubConst => self.accumulator = self.accumulator.wrapping_sub(arg),
            OpCode::MulConst => self.accumulator = self.accumulator.wrapping_mul(arg),
            OpCode::DivConst => self.accumulator = self.divide(at, arg)?,

            OpCode::AddMem => {
                let value = self.read(at, arg)?;
                self.accumulator = self.accumulator.wrapping_add(value);
            }
            OpCode::SubMem => {
                let value = self.read(at, arg)?;
                self.accumulator = self.accumulator.wrapping_sub(value);
            }
            OpCode::MulMem => {
                let value = self.read(at, arg)?;
                self.accumulator = self.accumulator.wrapping_mul(value);
            }
            OpCode::DivMem => {
                let divisor = self.read(at, arg)?;
                self.accumulator = self.divide(at, divisor)?;
            }

            OpCode::JumpRel => return jump_offset(at, arg),
            OpCode::JumpZero => {
                let offset = jump_offset(at, arg)?;
                return Ok(if self.accumulator == 0 { offset } else { 1 });
            }
            OpCode::JumpNZero => {
                let offset = jump_offset(at, arg)?;
                return Ok(if self.accumulator != 0 { offset } else { 1 });
            }

            OpCode::Noop => {}
            OpCode::Halt => self.status = Status::Halted,
            OpCode::Output => {
                write!(self.output, "{}", self.accumulator)
                    .and_then(|()| self.output.flush())
                    .map_err(|e| RuntimeError::Output {
                        at,
                        message: e.to_string(),
                    })?;
            }
            OpCode::CheckMem => {
                // A negative requirement is always met.
                if usize::try_from(arg).is_ok_and(|required| self.data.len() < required) {
                    return Err(RuntimeError::InsufficientMemory {
                        at,
                        required: arg,
                        length: self.data.len(),
                    });
                }
            }

            OpCode::UnknownInstruction => return Err(RuntimeError::UnknownInstruction { at }),
        }

        Ok(1)
    }

    /// Move the pointer by `jump`. Leaving instruction memory in either
    /// direction halts the machine. The pointer is frozen once the machine
    /// has stopped.
    fn advance(&mut self, jump: i64) {
        if self.status != Status::Running {
            return;
        }

        let target = i64::try_from(self.ip)
            .ok()
            .and_then(|ip| ip.checked_add(jump))
            .and_then(|t| usize::try_from(t).ok())
            .filter(|&t| t < self.instructions.len());

        match target {
            Some(t) => self.ip = t,
            None => {
                debug!("jump {jump} from instruction {} leaves the program", self.ip);
                self.status = Status::Halted;
            }
        }
    }

    fn out_of_bounds(&self, at: usize, index: i64) -> RuntimeError {
        RuntimeError::MemoryOutOfBounds {
            at,
            index,
            length: self.data.len(),
        }
    }

    /// Validate a data memory index.
    fn index(&self, at: usize, index: i64) -> Result<usize, RuntimeError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.data.len())
            .ok_or_else(|| self.out_of_bounds(at, index))
    }

    fn read(&self, at: usize, index: i64) -> Result<i64, RuntimeError> {
        let idx = self.index(at, index)?;
        Ok(self.data[idx])
    }

    /// `accumulator / divisor`, truncating toward zero. `i64::MIN / -1` wraps.
    fn divide(&self, at: usize, divisor: i64) -> Result<i64, RuntimeError> {
        if divisor == 0 {
            return Err(RuntimeError::DivisionByZero { at });
        }
        Ok(self.accumulator.wrapping_div(divisor))
    }
}

/// A jump opcode's offset; 0 is rejected.
fn jump_offset(at: usize, offset: i64) -> Result<i64, RuntimeError> {
    if offset == 0 {
        return Err(RuntimeError::InvalidJumpArgument { at });
    }
    Ok(offset)
}
