//! Formula 1 data integration.
//!
//! This module provides access to the Formula 1 upstream APIs: the event
//! tracker for race weekend timetables, the live timing archive for session
//! status and results, and the Ergast API for championship standings.
//!
//! # Modules
//!
//! - `requester` - HTTP client for making requests to the Formula 1 upstreams
//! - `response_structs` - Data structures for API responses
//! - `structs` - Session states and the logical session order of a weekend

mod requester;
mod response_structs;
mod structs;

#[cfg(test)]
pub use crate::f1::requester::MockFormula1Api;
pub use crate::f1::requester::{Formula1Api, Formula1Requester};
pub use crate::f1::response_structs::{
    ArchiveStatus, ConstructorStanding, DriverResult, DriverStanding, ErgastConstructor,
    ErgastDriver, EventSnapshot, Meeting, RaceInfo, ResultsChannel, ResultsData, SeasonContext,
    SessionResults, SessionSnapshot, TimetableEntry,
};
pub use crate::f1::structs::{
    RACE_SESSION_CODE, SPRINT_SESSION_CODE, SessionState, logical_session_order,
};
