//! Response structures for the Formula 1 data endpoints.
//!
//! This module contains structures for deserializing JSON responses from
//! the event tracker API, the live timing archive and the Ergast API.
//! Each upstream uses its own field naming convention, so the serde
//! renames differ between sections.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Response from `/v1/event-tracker`.
///
/// Describes the currently tracked race weekend: the race metadata and
/// the weekend timetable.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    /// Metadata of the tracked race weekend.
    pub race: RaceInfo,
    /// Season context wrapper holding the weekend timetable.
    pub season_context: SeasonContext,
}

/// Race weekend metadata from the event tracker.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RaceInfo {
    /// Official meeting name, e.g. `FORMULA 1 MAGYAR NAGYDIJ 2026`.
    ///
    /// This name is unique per weekend and identifies it across polls.
    pub meeting_official_name: String,
    /// Country hosting the race weekend.
    pub meeting_country_name: String,
    /// Locality of the circuit.
    pub meeting_locality_name: String,
}

impl fmt::Display for RaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.meeting_official_name, self.meeting_locality_name, self.meeting_country_name
        )
    }
}

/// Season context from the event tracker.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SeasonContext {
    /// Timetable of the weekend sessions, in upstream order.
    pub timetables: Vec<TimetableEntry>,
}

/// A single session entry of the weekend timetable.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    /// Raw session state reported upstream, e.g. `upcoming` or `completed`.
    pub state: String,
    /// Short session code: `p1`, `p2`, `p3`, `q`, `s` or `r`.
    pub session: String,
    /// Human readable session name, e.g. `Qualifying`.
    ///
    /// May change between polls while a weekend is provisional.
    pub description: String,
    /// Session start time in local circuit time, without offset.
    pub start_time: String,
    /// UTC offset of the circuit, e.g. `+02:00`.
    pub gmt_offset: String,
}

impl TimetableEntry {
    /// Combine [`Self::start_time`] and [`Self::gmt_offset`] into an UTC instant.
    ///
    /// Returns [`None`] when the upstream strings do not form a valid
    /// RFC 3339 timestamp.
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        let timestamp = format!("{}{}", self.start_time, self.gmt_offset);
        DateTime::parse_from_rfc3339(&timestamp)
            .ok()
            .map(|start| start.with_timezone(&Utc))
    }
}

impl fmt::Display for TimetableEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, starts {}{})",
            self.session, self.description, self.state, self.start_time, self.gmt_offset
        )
    }
}

/// Response from the live timing `SessionInfo.json` feed.
///
/// Identifies the most recent session and whether its data archive is
/// complete.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SessionSnapshot {
    /// Meeting the session belongs to.
    pub meeting: Meeting,
    /// Archive status of the session data.
    pub archive_status: ArchiveStatus,
    /// Session name, e.g. `Race`. Matches the timetable description.
    pub name: String,
    /// Archive path used to build further live timing requests.
    pub path: String,
}

impl SessionSnapshot {
    /// Whether the session data archive is complete and results are final.
    pub fn is_complete(&self) -> bool {
        self.archive_status.status == "Complete"
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.meeting.name, self.name, self.archive_status.status
        )
    }
}

/// Meeting information from the live timing feed.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Meeting {
    /// Meeting name, e.g. `Hungarian Grand Prix`.
    pub name: String,
}

/// Archive status from the live timing feed.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ArchiveStatus {
    /// Raw status, `Complete` once the session data is final.
    pub status: String,
}

/// Response from the live timing `SPFeed.json` feed of a session archive.
#[derive(Deserialize, Debug)]
pub struct SessionResults {
    /// Free (unauthenticated) data channel.
    pub free: ResultsChannel,
}

/// Free data channel wrapper of the results feed.
#[derive(Deserialize, Debug)]
pub struct ResultsChannel {
    /// Classification data of the session.
    pub data: ResultsData,
}

/// Final classification of a session.
#[derive(Deserialize, Debug)]
pub struct ResultsData {
    /// Race weekend name.
    #[serde(rename = "R")]
    pub race_name: String,
    /// Session name.
    #[serde(rename = "S")]
    pub session_name: String,
    /// Completed laps. Absent for practice and qualifying sessions.
    #[serde(rename = "L", default)]
    pub laps: u64,
    /// Per driver classification lines.
    #[serde(rename = "DR")]
    pub drivers: Vec<DriverResult>,
}

/// Classification line of a single driver.
///
/// The upstream feed packs the line into a positional array mixing
/// strings and numbers, so the fields are kept as raw JSON values and
/// exposed through accessors.
#[derive(Deserialize, Debug)]
pub struct DriverResult {
    /// Positional fields: racing number, driver name, team, position, time.
    #[serde(rename = "F")]
    pub fields: Vec<Value>,
}

impl DriverResult {
    fn field(&self, index: usize) -> String {
        match self.fields.get(index) {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }

    /// Racing number of the driver.
    pub fn racing_number(&self) -> String {
        self.field(0)
    }

    /// Driver name, e.g. `L. HAMILTON`.
    pub fn driver_name(&self) -> String {
        self.field(1)
    }

    /// Final classified position.
    pub fn position(&self) -> String {
        self.field(3)
    }

    /// Total time or gap of the driver.
    pub fn result_time(&self) -> String {
        self.field(4)
    }
}

/// Response from the Ergast `driverStandings.json` endpoint.
#[derive(Deserialize, Debug)]
pub struct DriverStandingsResponse {
    #[serde(rename = "MRData")]
    pub mr_data: DriverStandingsData,
}

#[derive(Deserialize, Debug)]
pub struct DriverStandingsData {
    #[serde(rename = "StandingsTable")]
    pub standings_table: DriverStandingsTable,
}

#[derive(Deserialize, Debug)]
pub struct DriverStandingsTable {
    #[serde(rename = "StandingsLists")]
    pub standings_lists: Vec<DriverStandingsList>,
}

#[derive(Deserialize, Debug)]
pub struct DriverStandingsList {
    #[serde(rename = "DriverStandings")]
    pub driver_standings: Vec<DriverStanding>,
}

/// Championship standing of a single driver.
#[derive(Deserialize, Debug)]
pub struct DriverStanding {
    /// Championship position.
    pub position: String,
    /// Accumulated championship points.
    pub points: String,
    /// Driver identity.
    #[serde(rename = "Driver")]
    pub driver: ErgastDriver,
    /// Constructors the driver has raced for this season.
    #[serde(rename = "Constructors")]
    pub constructors: Vec<ErgastConstructor>,
}

impl fmt::Display for DriverStanding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {} {} ({} pts)",
            self.position, self.driver.given_name, self.driver.family_name, self.points
        )
    }
}

/// Driver identity from the Ergast API.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErgastDriver {
    pub given_name: String,
    pub family_name: String,
}

/// Constructor identity from the Ergast API.
#[derive(Deserialize, Debug)]
pub struct ErgastConstructor {
    pub name: String,
}

/// Response from the Ergast `constructorStandings.json` endpoint.
#[derive(Deserialize, Debug)]
pub struct ConstructorStandingsResponse {
    #[serde(rename = "MRData")]
    pub mr_data: ConstructorStandingsData,
}

#[derive(Deserialize, Debug)]
pub struct ConstructorStandingsData {
    #[serde(rename = "StandingsTable")]
    pub standings_table: ConstructorStandingsTable,
}

#[derive(Deserialize, Debug)]
pub struct ConstructorStandingsTable {
    #[serde(rename = "StandingsLists")]
    pub standings_lists: Vec<ConstructorStandingsList>,
}

#[derive(Deserialize, Debug)]
pub struct ConstructorStandingsList {
    #[serde(rename = "ConstructorStandings")]
    pub constructor_standings: Vec<ConstructorStanding>,
}

/// Championship standing of a single constructor.
#[derive(Deserialize, Debug)]
pub struct ConstructorStanding {
    /// Championship position.
    pub position: String,
    /// Accumulated championship points.
    pub points: String,
    /// Constructor identity.
    #[serde(rename = "Constructor")]
    pub constructor: ErgastConstructor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_snapshot_deserialization() {
        let json = r#"{
            "race": {
                "meetingOfficialName": "FORMULA 1 MAGYAR NAGYDIJ 2026",
                "meetingCountryName": "Hungary",
                "meetingLocalityName": "Budapest",
                "meetingStartDate": "2026-07-17"
            },
            "seasonContext": {
                "id": "2026",
                "timetables": [
                    {
                        "state": "completed",
                        "session": "p1",
                        "description": "Practice 1",
                        "startTime": "2026-07-17T11:00:00",
                        "gmtOffset": "+02:00"
                    },
                    {
                        "state": "upcoming",
                        "session": "q",
                        "description": "Qualifying",
                        "startTime": "2026-07-18T15:00:00",
                        "gmtOffset": "+02:00"
                    }
                ]
            }
        }"#;

        let snapshot: EventSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(
            snapshot.race.meeting_official_name,
            "FORMULA 1 MAGYAR NAGYDIJ 2026"
        );
        assert_eq!(snapshot.race.meeting_country_name, "Hungary");
        assert_eq!(snapshot.race.meeting_locality_name, "Budapest");
        assert_eq!(snapshot.season_context.timetables.len(), 2);
        assert_eq!(snapshot.season_context.timetables[0].session, "p1");
        assert_eq!(snapshot.season_context.timetables[1].state, "upcoming");
        assert_eq!(
            snapshot.season_context.timetables[1].description,
            "Qualifying"
        );
    }

    #[test]
    fn test_event_snapshot_without_race_is_rejected() {
        let json = r#"{"seasonContext": {"timetables": []}}"#;

        assert!(serde_json::from_str::<EventSnapshot>(json).is_err());
    }

    #[test]
    fn test_timetable_entry_start_instant() {
        let entry = TimetableEntry {
            state: "upcoming".to_string(),
            session: "q".to_string(),
            description: "Qualifying".to_string(),
            start_time: "2026-07-18T15:00:00".to_string(),
            gmt_offset: "+02:00".to_string(),
        };

        let instant = entry.start_instant().unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-07-18T13:00:00+00:00");
    }

    #[test]
    fn test_timetable_entry_start_instant_with_invalid_offset() {
        let entry = TimetableEntry {
            state: "upcoming".to_string(),
            session: "q".to_string(),
            description: "Qualifying".to_string(),
            start_time: "2026-07-18T15:00:00".to_string(),
            gmt_offset: "invalid".to_string(),
        };

        assert!(entry.start_instant().is_none());
    }

    #[test]
    fn test_session_snapshot_deserialization() {
        let json = r#"{
            "Meeting": {"Name": "Hungarian Grand Prix", "OfficialName": "FORMULA 1 MAGYAR NAGYDIJ 2026"},
            "ArchiveStatus": {"Status": "Complete"},
            "Name": "Race",
            "Path": "2026/2026-07-19_Hungarian_Grand_Prix/2026-07-19_Race/",
            "StartDate": "2026-07-19T15:10:00"
        }"#;

        let snapshot: SessionSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.meeting.name, "Hungarian Grand Prix");
        assert_eq!(snapshot.name, "Race");
        assert!(snapshot.is_complete());
        assert_eq!(
            snapshot.path,
            "2026/2026-07-19_Hungarian_Grand_Prix/2026-07-19_Race/"
        );
    }

    #[test]
    fn test_session_snapshot_incomplete_archive() {
        let json = r#"{
            "Meeting": {"Name": "Hungarian Grand Prix"},
            "ArchiveStatus": {"Status": "Generating"},
            "Name": "Race",
            "Path": "2026/2026-07-19_Hungarian_Grand_Prix/2026-07-19_Race/"
        }"#;

        let snapshot: SessionSnapshot = serde_json::from_str(json).unwrap();

        assert!(!snapshot.is_complete());
    }

    #[test]
    fn test_session_results_deserialization() {
        let json = r#"{
            "free": {
                "data": {
                    "R": "Hungarian Grand Prix",
                    "S": "Race",
                    "L": 70,
                    "DR": [
                        {"F": ["44", "L. HAMILTON", "Mercedes", 1, "1:36:12.473"]},
                        {"F": ["33", "M. VERSTAPPEN", "Red Bull Racing", 2, "+8.702"]}
                    ]
                }
            }
        }"#;

        let results: SessionResults = serde_json::from_str(json).unwrap();
        let data = &results.free.data;

        assert_eq!(data.race_name, "Hungarian Grand Prix");
        assert_eq!(data.session_name, "Race");
        assert_eq!(data.laps, 70);
        assert_eq!(data.drivers.len(), 2);
        assert_eq!(data.drivers[0].racing_number(), "44");
        assert_eq!(data.drivers[0].driver_name(), "L. HAMILTON");
        assert_eq!(data.drivers[0].position(), "1");
        assert_eq!(data.drivers[0].result_time(), "1:36:12.473");
        assert_eq!(data.drivers[1].position(), "2");
        assert_eq!(data.drivers[1].result_time(), "+8.702");
    }

    #[test]
    fn test_session_results_without_laps() {
        let json = r#"{
            "free": {
                "data": {
                    "R": "Hungarian Grand Prix",
                    "S": "Qualifying",
                    "DR": [{"F": ["44", "L. HAMILTON", "Mercedes", 1, "1:13.447"]}]
                }
            }
        }"#;

        let results: SessionResults = serde_json::from_str(json).unwrap();

        assert_eq!(results.free.data.laps, 0);
        assert_eq!(results.free.data.session_name, "Qualifying");
    }

    #[test]
    fn test_driver_result_with_missing_fields() {
        let result = DriverResult {
            fields: vec![Value::String("44".to_string())],
        };

        assert_eq!(result.racing_number(), "44");
        assert_eq!(result.position(), "");
        assert_eq!(result.result_time(), "");
    }

    #[test]
    fn test_driver_standings_deserialization() {
        let json = r#"{
            "MRData": {
                "StandingsTable": {
                    "StandingsLists": [
                        {
                            "DriverStandings": [
                                {
                                    "position": "1",
                                    "points": "413",
                                    "wins": "11",
                                    "Driver": {
                                        "givenName": "Lewis",
                                        "familyName": "Hamilton",
                                        "code": "HAM"
                                    },
                                    "Constructors": [{"name": "Mercedes"}]
                                }
                            ]
                        }
                    ]
                }
            }
        }"#;

        let response: DriverStandingsResponse = serde_json::from_str(json).unwrap();
        let standings = &response.mr_data.standings_table.standings_lists[0].driver_standings;

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].position, "1");
        assert_eq!(standings[0].points, "413");
        assert_eq!(standings[0].driver.given_name, "Lewis");
        assert_eq!(standings[0].driver.family_name, "Hamilton");
        assert_eq!(standings[0].constructors[0].name, "Mercedes");
    }

    #[test]
    fn test_constructor_standings_deserialization() {
        let json = r#"{
            "MRData": {
                "StandingsTable": {
                    "StandingsLists": [
                        {
                            "ConstructorStandings": [
                                {
                                    "position": "1",
                                    "points": "573",
                                    "wins": "13",
                                    "Constructor": {"name": "Mercedes"}
                                },
                                {
                                    "position": "2",
                                    "points": "319",
                                    "wins": "2",
                                    "Constructor": {"name": "Red Bull"}
                                }
                            ]
                        }
                    ]
                }
            }
        }"#;

        let response: ConstructorStandingsResponse = serde_json::from_str(json).unwrap();
        let standings = &response.mr_data.standings_table.standings_lists[0].constructor_standings;

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].constructor.name, "Mercedes");
        assert_eq!(standings[1].position, "2");
        assert_eq!(standings[1].points, "319");
    }

    #[test]
    fn test_driver_standing_display() {
        let standing = DriverStanding {
            position: "1".to_string(),
            points: "413".to_string(),
            driver: ErgastDriver {
                given_name: "Lewis".to_string(),
                family_name: "Hamilton".to_string(),
            },
            constructors: vec![ErgastConstructor {
                name: "Mercedes".to_string(),
            }],
        };

        assert_eq!(format!("{}", standing), "1. Lewis Hamilton (413 pts)");
    }

    #[test]
    fn test_timetable_entry_display() {
        let entry = TimetableEntry {
            state: "upcoming".to_string(),
            session: "r".to_string(),
            description: "Race".to_string(),
            start_time: "2026-07-19T15:10:00".to_string(),
            gmt_offset: "+02:00".to_string(),
        };

        let display = format!("{}", entry);
        assert!(display.contains("r - Race"));
        assert!(display.contains("upcoming"));
    }
}
