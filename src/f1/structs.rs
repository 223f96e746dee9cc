//! Internal data structures for representing Formula 1 session state.
//!
//! This module defines the session life cycle states and the logical
//! ordering of weekend sessions used by the alert tracking logic.

use log::warn;

/// Session code of a sprint session in the weekend timetable.
pub const SPRINT_SESSION_CODE: &str = "s";

/// Session code of the grand prix race, the final session of a weekend.
pub const RACE_SESSION_CODE: &str = "r";

/// Logical session order of a conventional race weekend.
const STANDARD_ORDER: [&str; 5] = ["p1", "p2", "p3", "q", "r"];

/// Logical session order of a sprint race weekend.
const SPRINT_ORDER: [&str; 5] = ["p1", "q", "p2", SPRINT_SESSION_CODE, RACE_SESSION_CODE];

/// Logical session order of a race weekend.
///
/// The timetable reported upstream is already chronological, but the
/// ordering of session codes differs between conventional and sprint
/// weekends. A weekend runs the sprint format when its timetable
/// contains a [`SPRINT_SESSION_CODE`] session.
pub fn logical_session_order(sprint_weekend: bool) -> &'static [&'static str] {
    if sprint_weekend {
        &SPRINT_ORDER
    } else {
        &STANDARD_ORDER
    }
}

/// Life cycle state of a weekend session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The session has not started yet.
    Scheduled,
    /// The session is currently running.
    Active,
    /// The session has finished.
    Completed,
}

impl SessionState {
    /// Convert the raw state string of a timetable entry into a [`SessionState`].
    ///
    /// Unknown states are treated as [`SessionState::Scheduled`] so that a new
    /// upstream state never suppresses alert evaluation for good.
    pub fn parse(state: &str) -> SessionState {
        match state {
            "upcoming" => SessionState::Scheduled,
            "started" | "active" | "ongoing" => SessionState::Active,
            "completed" => SessionState::Completed,
            unknown => {
                warn!("unknown session state '{}', treating as scheduled", unknown);
                SessionState::Scheduled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_states() {
        assert_eq!(SessionState::parse("upcoming"), SessionState::Scheduled);
        assert_eq!(SessionState::parse("started"), SessionState::Active);
        assert_eq!(SessionState::parse("active"), SessionState::Active);
        assert_eq!(SessionState::parse("ongoing"), SessionState::Active);
        assert_eq!(SessionState::parse("completed"), SessionState::Completed);
    }

    #[test]
    fn test_parse_unknown_state_defaults_to_scheduled() {
        assert_eq!(SessionState::parse("delayed"), SessionState::Scheduled);
        assert_eq!(SessionState::parse(""), SessionState::Scheduled);
    }

    #[test]
    fn test_logical_session_order() {
        assert_eq!(
            logical_session_order(false),
            &["p1", "p2", "p3", "q", "r"]
        );
        assert_eq!(logical_session_order(true), &["p1", "q", "p2", "s", "r"]);
    }
}
