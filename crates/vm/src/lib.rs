//! GritVM virtual machine: executes accumulator-machine programs.
//!
//! The machine has:
//! - A single signed accumulator register
//! - A resizable data memory of signed integers
//! - A fixed instruction memory and an instruction pointer into it
//! - A [`Status`] that is the only externally visible control signal
//!
//! Lifecycle: a new machine is WAITING; `load` moves it to READY (or
//! ERRORED for an unparseable line); `run` drives it through RUNNING to
//! HALTED, ERRORED or UNKNOWN; `reset` returns it to WAITING.
//!
//! # Usage
//!
//! ```
//! use gritvm_vm::{Status, VM};
//!
//! let mut vm = VM::with_output(Vec::new());
//! assert_eq!(vm.load_str("ADDCONST 5\nOUTPUT\nHALT\n", &[]), Status::Ready);
//! assert_eq!(vm.run(), Status::Halted);
//! assert_eq!(vm.output_text(), "5");
//! ```

pub mod dump;
pub mod error;
pub mod execute;
pub mod machine;
pub mod status;

pub use dump::DumpOptions;
pub use error::{LoadError, RuntimeError};
pub use machine::{VmConfig, VM};
pub use status::Status;

/// Load `text` into a fresh machine and run it, capturing OUTPUT.
///
/// The returned machine has stopped (or never started, if loading did not
/// reach READY); inspect its status, memories and output.
pub fn run_str(text: &str, initial_memory: &[i64]) -> VM<Vec<u8>> {
    let mut vm = VM::with_output(Vec::new());
    vm.load_str(text, initial_memory);
    vm.run();
    vm
}
