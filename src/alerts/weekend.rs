//! Per weekend alert tracking state.
//!
//! This module defines the state kept for the currently tracked race
//! weekend: one alert status per timetable session plus the weekend wide
//! delivery flags.

use crate::f1::{
    RaceInfo, SPRINT_SESSION_CODE, SessionState, TimetableEntry, logical_session_order,
};

/// Identity and location of a race weekend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weekend {
    /// Official meeting name. Unique per weekend, used to detect weekend
    /// changes between polls.
    pub official_name: String,
    /// Country hosting the weekend.
    pub country: String,
    /// Locality of the circuit.
    pub locality: String,
}

impl From<&RaceInfo> for Weekend {
    fn from(race: &RaceInfo) -> Self {
        Weekend {
            official_name: race.meeting_official_name.clone(),
            country: race.meeting_country_name.clone(),
            locality: race.meeting_locality_name.clone(),
        }
    }
}

/// Alert delivery state of a single timetable session.
#[derive(Debug, Clone)]
pub struct SessionAlertStatus {
    /// Short session code, e.g. `q`.
    pub session_code: String,
    /// Session description as last seen upstream.
    pub description: String,
    /// Session state as last seen upstream.
    pub last_known_state: SessionState,
    /// Whether the schedule alert has been sent.
    pub schedule_alert_sent: bool,
    /// Whether the session start alert has been sent.
    pub session_alert_sent: bool,
    /// Whether the results of the session have been shown.
    pub results_shown: bool,
    /// Timetable index of the session whose results must be shown before
    /// this session's schedule alert may fire. Fixed at construction.
    pub preceding_session_index: Option<usize>,
}

/// Alert tracking state of a race weekend.
///
/// Rebuilt from scratch whenever the official meeting name reported by
/// the event tracker changes.
#[derive(Debug)]
pub struct WeekendState {
    /// Identity and location of the weekend.
    pub weekend: Weekend,
    /// One alert status per timetable entry, same ordinal position.
    pub sessions: Vec<SessionAlertStatus>,
    /// Whether the race results have been shown, ending the weekend.
    pub all_results_sent: bool,
    /// Whether the circuit layout photo has been sent.
    pub circuit_photo_sent: bool,
}

impl WeekendState {
    /// Build the tracking state for a new race weekend.
    ///
    /// Sessions already completed at construction time are marked as having
    /// their results shown. Their results were published before tracking
    /// began and must not be re-announced when the bot (re)starts in the
    /// middle of a weekend.
    pub fn new(race: &RaceInfo, timetable: &[TimetableEntry]) -> Self {
        let sprint_weekend = timetable
            .iter()
            .any(|entry| entry.session == SPRINT_SESSION_CODE);
        let order = logical_session_order(sprint_weekend);

        let sessions = timetable
            .iter()
            .map(|entry| {
                let state = SessionState::parse(&entry.state);

                SessionAlertStatus {
                    session_code: entry.session.clone(),
                    description: entry.description.clone(),
                    last_known_state: state,
                    schedule_alert_sent: false,
                    session_alert_sent: false,
                    results_shown: state == SessionState::Completed,
                    preceding_session_index: preceding_session_index(
                        &entry.session,
                        order,
                        timetable,
                    ),
                }
            })
            .collect();

        WeekendState {
            weekend: Weekend::from(race),
            sessions,
            all_results_sent: false,
            circuit_photo_sent: false,
        }
    }
}

/// Timetable index of the session preceding `session_code`.
///
/// The preceding session code is taken from the logical session order and
/// then located in the actual timetable. Returns [`None`] for the first
/// session of the order, for unknown session codes and when the preceding
/// session is missing from the timetable.
fn preceding_session_index(
    session_code: &str,
    order: &[&str],
    timetable: &[TimetableEntry],
) -> Option<usize> {
    let position = order.iter().position(|code| *code == session_code)?;
    if position == 0 {
        return None;
    }

    let preceding_code = order[position - 1];
    timetable
        .iter()
        .position(|entry| entry.session == preceding_code)
}
