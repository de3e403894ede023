//! Supervisor session skipping and unconditional noise drops
//!
//! Both output formats share these rules, so they run before any strategy
//! sees a line.

use crate::constants;

/// Outcome of the shared line gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAdmission {
    /// The line goes on to the report strategy
    Accepted,
    /// The line belongs to a supervisor session
    SupervisorSkipped,
    /// The line carries a fixed noise marker
    Noise,
}

/// Tracks whether the journal is inside a supervisor session
///
/// A session opens on `SUPERVISOR SAFE OPEN` (that line is dropped) and closes
/// on the next card-insert or card-less marker, which is processed normally.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    in_supervisor: bool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what happens to one line, updating the session state
    pub fn admit(&mut self, line: &str) -> LineAdmission {
        if line.contains(constants::SUPERVISOR_SAFE_OPEN) {
            self.in_supervisor = true;
            return LineAdmission::SupervisorSkipped;
        }

        if self.in_supervisor {
            if constants::SUPERVISOR_EXIT_MARKERS
                .iter()
                .any(|marker| line.contains(marker))
            {
                self.in_supervisor = false;
            } else {
                return LineAdmission::SupervisorSkipped;
            }
        }

        if constants::NOISE_MARKERS
            .iter()
            .any(|marker| line.contains(marker))
        {
            return LineAdmission::Noise;
        }

        LineAdmission::Accepted
    }

    pub fn in_supervisor_session(&self) -> bool {
        self.in_supervisor
    }
}
