//! HTTP client for the Formula 1 data APIs.
//!
//! This module provides the [`Formula1Requester`] struct for fetching the
//! event tracker state, live timing session data and championship
//! standings.
//!
//! Three upstreams are involved:
//!
//! - the event tracker API (authenticated with an api key) for the
//!   currently tracked race weekend and its timetable
//! - the live timing archive for session completion status and results
//! - the Ergast API for championship standings

use anyhow::Result;
use log::{debug, info};
use mockall::automock;
use reqwest::Client;

use crate::f1::response_structs::{
    ConstructorStanding, ConstructorStandingsResponse, DriverStanding, DriverStandingsResponse,
    EventSnapshot, SessionResults, SessionSnapshot,
};

/// Base URL of the event tracker API.
const EVENT_TRACKER_API_URL: &str = "https://api.formula1.com";

/// Base URL of the live timing static archive.
const LIVE_TIMING_API_URL: &str = "https://livetiming.formula1.com/static";

/// Base URL of the Ergast API.
const ERGAST_API_URL: &str = "https://ergast.com/api/f1";

/// HTTP client for requesting data from the Formula 1 upstreams.
pub struct Formula1Requester {
    /// Api key sent with every event tracker request.
    api_key: String,
    /// Event tracker API base url.
    event_api_url: String,
    /// Live timing archive base url.
    live_timing_url: String,
    /// Ergast API base url.
    ergast_url: String,
    /// HTTP client
    client: Client,
}

/// Trait for fetching Formula 1 data.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Formula1Api {
    /// Fetches the currently tracked race weekend and its timetable.
    async fn get_event_info(&self) -> Result<EventSnapshot>;
    /// Fetches the identity and archive status of the most recent session.
    async fn get_current_session_info(&self) -> Result<SessionSnapshot>;
    /// Fetches the final classification of an archived session.
    async fn get_session_results(&self, session_path: &str) -> Result<SessionResults>;
    /// Fetches the current driver championship standings.
    async fn get_driver_standings(&self) -> Result<Vec<DriverStanding>>;
    /// Fetches the current constructor championship standings.
    async fn get_constructor_standings(&self) -> Result<Vec<ConstructorStanding>>;
}

impl Formula1Requester {
    /// Create a new [Formula1Requester] against the production upstreams.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The api key for the event tracker API.
    pub fn new(api_key: &str) -> Self {
        Formula1Requester {
            api_key: api_key.to_string(),
            event_api_url: EVENT_TRACKER_API_URL.to_string(),
            live_timing_url: LIVE_TIMING_API_URL.to_string(),
            ergast_url: ERGAST_API_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Fetch a live timing document and deserialize it.
    ///
    /// The live timing archive serves JSON prefixed with a UTF-8 BOM,
    /// which serde rejects, so the body is fetched as text and the BOM
    /// stripped before parsing.
    async fn get_live_timing_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let document = serde_json::from_str(body.trim_start_matches('\u{feff}').trim())?;

        Ok(document)
    }
}

impl Formula1Api for Formula1Requester {
    /// Request `/v1/event-tracker` to get the tracked race weekend.
    ///
    /// This api call returns a json object with the race metadata and the
    /// weekend timetable:
    /// ```json
    /// {
    ///   "race": {
    ///     "meetingOfficialName": "FORMULA 1 MAGYAR NAGYDIJ 2026",
    ///     "meetingCountryName": "Hungary",
    ///     "meetingLocalityName": "Budapest"
    ///   },
    ///   "seasonContext": {
    ///     "timetables": [
    ///       { "state": "upcoming", "session": "p1", "description": "Practice 1",
    ///         "startTime": "2026-07-17T11:00:00", "gmtOffset": "+02:00" }
    ///     ]
    ///   }
    /// }
    /// ```
    /// This method transforms this json into an [`EventSnapshot`].
    async fn get_event_info(&self) -> Result<EventSnapshot> {
        let url = format!("{}/v1/event-tracker", &self.event_api_url);
        info!("request event tracker state");
        debug!("request {}", &url);

        let snapshot: EventSnapshot = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("locale", "en")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &snapshot);

        Ok(snapshot)
    }

    /// Request `SessionInfo.json` to get the most recent session.
    ///
    /// This api call returns a json object identifying the session and its
    /// archive status:
    /// ```json
    /// {
    ///   "Meeting": { "Name": "Hungarian Grand Prix" },
    ///   "ArchiveStatus": { "Status": "Complete" },
    ///   "Name": "Race",
    ///   "Path": "2026/2026-07-19_Hungarian_Grand_Prix/2026-07-19_Race/"
    /// }
    /// ```
    /// This method transforms this json into a [`SessionSnapshot`].
    async fn get_current_session_info(&self) -> Result<SessionSnapshot> {
        let url = format!("{}/SessionInfo.json", &self.live_timing_url);
        info!("request current session info");
        debug!("request {}", &url);

        let snapshot: SessionSnapshot = self.get_live_timing_json(&url).await?;

        debug!("response from {} -> {:?}", &url, &snapshot);

        Ok(snapshot)
    }

    /// Request `{session_path}SPFeed.json` to get the classification of an
    /// archived session.
    ///
    /// # Arguments
    ///
    /// * `session_path` - The archive path reported by [`Self::get_current_session_info`],
    ///   including the trailing slash.
    async fn get_session_results(&self, session_path: &str) -> Result<SessionResults> {
        let url = format!("{}/{}SPFeed.json", &self.live_timing_url, session_path);
        info!("request session results for {}", session_path);
        debug!("request {}", &url);

        let results: SessionResults = self.get_live_timing_json(&url).await?;

        debug!(
            "response from {} -> {} classified drivers",
            &url,
            results.free.data.drivers.len()
        );

        Ok(results)
    }

    /// Request `/current/driverStandings.json` to get the driver championship
    /// standings.
    ///
    /// The Ergast response nests the standings inside
    /// `MRData.StandingsTable.StandingsLists`; this method flattens the first
    /// standings list into a [`DriverStanding`] vector.
    async fn get_driver_standings(&self) -> Result<Vec<DriverStanding>> {
        let url = format!("{}/current/driverStandings.json", &self.ergast_url);
        info!("request driver standings");
        debug!("request {}", &url);

        let response: DriverStandingsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let standings = response
            .mr_data
            .standings_table
            .standings_lists
            .into_iter()
            .next()
            .map(|list| list.driver_standings)
            .unwrap_or_default();

        debug!("response from {} -> {} drivers", &url, standings.len());

        Ok(standings)
    }

    /// Request `/current/constructorStandings.json` to get the constructor
    /// championship standings.
    async fn get_constructor_standings(&self) -> Result<Vec<ConstructorStanding>> {
        let url = format!("{}/current/constructorStandings.json", &self.ergast_url);
        info!("request constructor standings");
        debug!("request {}", &url);

        let response: ConstructorStandingsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let standings = response
            .mr_data
            .standings_table
            .standings_lists
            .into_iter()
            .next()
            .map(|list| list.constructor_standings)
            .unwrap_or_default();

        debug!("response from {} -> {} constructors", &url, standings.len());

        Ok(standings)
    }
}
