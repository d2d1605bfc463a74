//! Entity state and the reason code qualifying it

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state written to the `state` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    NoState,
    Running,
    Blocked,
    Paused,
    Shutdown,
    Shutoff,
    Crashed,
    PmSuspended,
}

impl State {
    pub fn code(self) -> i64 {
        match self {
            State::NoState => 0,
            State::Running => 1,
            State::Blocked => 2,
            State::Paused => 3,
            State::Shutdown => 4,
            State::Shutoff => 5,
            State::Crashed => 6,
            State::PmSuspended => 7,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => State::NoState,
            1 => State::Running,
            2 => State::Blocked,
            3 => State::Paused,
            4 => State::Shutdown,
            5 => State::Shutoff,
            6 => State::Crashed,
            7 => State::PmSuspended,
            _ => return None,
        })
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Reason code written to the `reason` column. Its meaning depends on the
/// [`State`] it accompanies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubState(pub i64);

impl SubState {
    pub const NO_STATE_UNKNOWN: SubState = SubState(0);

    pub const RUNNING_UNKNOWN: SubState = SubState(0);
    pub const RUNNING_BOOTED: SubState = SubState(1);
    pub const RUNNING_MIGRATED: SubState = SubState(2);
    pub const RUNNING_RESTORED: SubState = SubState(3);
    pub const RUNNING_FROM_SNAPSHOT: SubState = SubState(4);
    pub const RUNNING_UNPAUSED: SubState = SubState(5);
    pub const RUNNING_MIGRATION_CANCELED: SubState = SubState(6);
    pub const RUNNING_SAVE_CANCELED: SubState = SubState(7);
    pub const RUNNING_WAKEUP: SubState = SubState(8);
    pub const RUNNING_CRASHED: SubState = SubState(9);

    pub const BLOCKED_UNKNOWN: SubState = SubState(0);

    pub const PAUSED_UNKNOWN: SubState = SubState(0);
    pub const PAUSED_USER: SubState = SubState(1);
    pub const PAUSED_MIGRATION: SubState = SubState(2);
    pub const PAUSED_SAVE: SubState = SubState(3);
    pub const PAUSED_DUMP: SubState = SubState(4);
    pub const PAUSED_IO_ERROR: SubState = SubState(5);
    pub const PAUSED_WATCHDOG: SubState = SubState(6);
    pub const PAUSED_FROM_SNAPSHOT: SubState = SubState(7);
    pub const PAUSED_SHUTTING_DOWN: SubState = SubState(8);
    pub const PAUSED_SNAPSHOT: SubState = SubState(9);
    pub const PAUSED_CRASHED: SubState = SubState(10);

    pub const SHUTDOWN_UNKNOWN: SubState = SubState(0);
    pub const SHUTDOWN_USER: SubState = SubState(1);

    pub const SHUTOFF_UNKNOWN: SubState = SubState(0);
    pub const SHUTOFF_SHUTDOWN: SubState = SubState(1);
    pub const SHUTOFF_DESTROYED: SubState = SubState(2);
    pub const SHUTOFF_CRASHED: SubState = SubState(3);
    pub const SHUTOFF_MIGRATED: SubState = SubState(4);
    pub const SHUTOFF_SAVED: SubState = SubState(5);
    pub const SHUTOFF_FAILED: SubState = SubState(6);
    pub const SHUTOFF_FROM_SNAPSHOT: SubState = SubState(7);

    pub const CRASHED_UNKNOWN: SubState = SubState(0);
    pub const CRASHED_PANICKED: SubState = SubState(1);

    pub const PM_SUSPENDED_UNKNOWN: SubState = SubState(0);
}

impl fmt::Display for SubState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes_round_trip() {
        for code in 0..8 {
            assert_eq!(State::from_code(code).unwrap().code(), code);
        }
        assert!(State::from_code(8).is_none());
        assert!(State::from_code(-1).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(State::PmSuspended.to_string(), "PmSuspended");
        assert_eq!(SubState::SHUTOFF_DESTROYED.to_string(), "2");
    }
}
