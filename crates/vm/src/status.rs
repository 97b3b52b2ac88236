//! Machine status.

use std::fmt;

/// The machine's externally observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Constructed or reset; accepts a `load`.
    Waiting,
    /// A non-empty program is loaded; accepts a `run`.
    Ready,
    /// Executing.
    Running,
    /// Stopped by HALT or by moving off either end of the program.
    Halted,
    /// Stopped by a load failure or a runtime fault.
    Errored,
    /// Stopped by executing the loader's parse-failure marker.
    Unknown,
}

impl Status {
    /// Upper-case name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Status::Waiting => "WAITING",
            Status::Ready => "READY",
            Status::Running => "RUNNING",
            Status::Halted => "HALTED",
            Status::Errored => "ERRORED",
            Status::Unknown => "UNKNOWN",
        }
    }

    /// HALTED, ERRORED and UNKNOWN end a run; only `reset` leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Halted | Status::Errored | Status::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
