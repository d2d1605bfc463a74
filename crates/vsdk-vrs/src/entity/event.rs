//! Lifecycle events and their validation table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event category written to the `event` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Defined,
    Undefined,
    Started,
    Suspended,
    Resumed,
    Stopped,
    Shutdown,
    PmSuspended,
    Crashed,
}

/// Number of detail codes each category accepts; valid events are
/// `0..count`.
const EVENT_COUNTS: [(EventCategory, i64); 9] = [
    (EventCategory::Defined, 2),
    (EventCategory::Undefined, 1),
    (EventCategory::Started, 5),
    (EventCategory::Suspended, 7),
    (EventCategory::Resumed, 3),
    (EventCategory::Stopped, 7),
    (EventCategory::Shutdown, 1),
    (EventCategory::PmSuspended, 2),
    (EventCategory::Crashed, 1),
];

impl EventCategory {
    pub fn code(self) -> i64 {
        match self {
            EventCategory::Defined => 0,
            EventCategory::Undefined => 1,
            EventCategory::Started => 2,
            EventCategory::Suspended => 3,
            EventCategory::Resumed => 4,
            EventCategory::Stopped => 5,
            EventCategory::Shutdown => 6,
            EventCategory::PmSuspended => 7,
            EventCategory::Crashed => 8,
        }
    }

    /// How many event codes belong to this category
    pub fn event_count(self) -> i64 {
        EVENT_COUNTS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Event detail written to the `event_type` column, scoped by its
/// [`EventCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(pub i64);

impl Event {
    pub const DEFINED_ADDED: Event = Event(0);
    pub const DEFINED_UPDATED: Event = Event(1);

    pub const UNDEFINED_REMOVED: Event = Event(0);

    pub const STARTED_BOOTED: Event = Event(0);
    pub const STARTED_MIGRATED: Event = Event(1);
    pub const STARTED_RESTORED: Event = Event(2);
    pub const STARTED_FROM_SNAPSHOT: Event = Event(3);
    pub const STARTED_WAKEUP: Event = Event(4);

    pub const SUSPENDED_PAUSED: Event = Event(0);
    pub const SUSPENDED_MIGRATED: Event = Event(1);
    pub const SUSPENDED_IO_ERROR: Event = Event(2);
    pub const SUSPENDED_WATCHDOG: Event = Event(3);
    pub const SUSPENDED_RESTORED: Event = Event(4);
    pub const SUSPENDED_FROM_SNAPSHOT: Event = Event(5);
    pub const SUSPENDED_API_ERROR: Event = Event(6);

    pub const RESUMED_UNPAUSED: Event = Event(0);
    pub const RESUMED_MIGRATED: Event = Event(1);
    pub const RESUMED_FROM_SNAPSHOT: Event = Event(2);

    pub const STOPPED_SHUTDOWN: Event = Event(0);
    pub const STOPPED_DESTROYED: Event = Event(1);
    pub const STOPPED_CRASHED: Event = Event(2);
    pub const STOPPED_MIGRATED: Event = Event(3);
    pub const STOPPED_SAVED: Event = Event(4);
    pub const STOPPED_FAILED: Event = Event(5);
    pub const STOPPED_FROM_SNAPSHOT: Event = Event(6);

    pub const SHUTDOWN_FINISHED: Event = Event(0);

    pub const PM_SUSPENDED_MEMORY: Event = Event(0);
    pub const PM_SUSPENDED_DISK: Event = Event(1);

    pub const CRASHED_PANICKED: Event = Event(0);
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether `event` is one of the codes defined for `category`
pub fn validate_event(category: EventCategory, event: Event) -> bool {
    (0..category.event_count()).contains(&event.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_table_entry() {
        for (category, _) in EVENT_COUNTS {
            assert!(category.event_count() > 0);
        }
        assert_eq!(EVENT_COUNTS.len(), 9);
    }

    #[test]
    fn test_validate_event_bounds() {
        assert!(validate_event(EventCategory::Defined, Event::DEFINED_ADDED));
        assert!(validate_event(EventCategory::Defined, Event::DEFINED_UPDATED));
        assert!(!validate_event(EventCategory::Defined, Event(2)));

        assert!(validate_event(EventCategory::Stopped, Event::STOPPED_FROM_SNAPSHOT));
        assert!(!validate_event(EventCategory::Shutdown, Event(1)));
        assert!(!validate_event(EventCategory::Crashed, Event(-1)));
    }

    #[test]
    fn test_category_codes_are_dense() {
        let codes: Vec<i64> = EVENT_COUNTS.iter().map(|(c, _)| c.code()).collect();
        assert_eq!(codes, (0..9).collect::<Vec<_>>());
    }
}
