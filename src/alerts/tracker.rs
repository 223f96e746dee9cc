//! Alert decision logic for race weekends.
//!
//! This module provides the [`SessionAlertTracker`] struct that turns the
//! polled upstream snapshots into channel alerts. The upstream data is
//! noisy: snapshots can be missing or malformed, session descriptions
//! change while a weekend is provisional and completed weekends linger on
//! the results feed. The tracker absorbs all of that and guarantees that
//! every alert of a weekend fires at most once, in session order.

use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

use crate::alerts::weekend::{Weekend, WeekendState};
use crate::circuits::lookup_circuit;
use crate::f1::{EventSnapshot, Formula1Api, RACE_SESSION_CODE, SessionSnapshot, SessionState};
use crate::telegram::Notifier;
use crate::weather::{WeatherApi, fetch_session_weather};

/// Decides which alerts to send for the currently tracked race weekend.
///
/// The tracker is fed one pair of upstream snapshots per poll through
/// [`Self::tick`]: the event tracker state and the live timing session
/// info. Either may be absent when its fetch failed; the corresponding
/// half of the evaluation is skipped and retried on the next poll.
///
/// # Examples
///
/// ```no_run
/// # use f1_alerts_bot::alerts::SessionAlertTracker;
/// # use f1_alerts_bot::f1::{EventSnapshot, Formula1Api, SessionSnapshot};
/// # use f1_alerts_bot::telegram::Notifier;
/// # use f1_alerts_bot::weather::WeatherApi;
/// # use std::sync::Arc;
/// # async fn example<F: Formula1Api, W: WeatherApi, N: Notifier>(
/// #     f1_api: Arc<F>,
/// #     weather_api: Arc<W>,
/// #     notifier: Arc<N>,
/// #     event: EventSnapshot,
/// #     session: SessionSnapshot,
/// # ) {
/// let mut tracker =
///     SessionAlertTracker::new(f1_api, weather_api, notifier, 3_600_000, 900_000, 600_000);
/// tracker.tick(Some(&event), Some(&session), || {}).await;
/// # }
/// ```
pub struct SessionAlertTracker<F: Formula1Api, W: WeatherApi, N: Notifier> {
    /// Formula 1 requester, used to fetch session results.
    f1_api: Arc<F>,
    /// Weather requester, used to enrich session start alerts.
    weather_api: Arc<W>,
    /// Alert delivery.
    notifier: Arc<N>,
    /// How long before its start a session's schedule alert may fire.
    schedule_alert_lead: Duration,
    /// How long before its start a session's start alert may fire.
    session_alert_lead: Duration,
    /// Delay between the race results and the standings update.
    standings_update_delay: std::time::Duration,
    /// State of the currently tracked weekend, if any.
    weekend: Option<WeekendState>,
    /// Bumped on every weekend change to invalidate deferred standings
    /// updates that were scheduled during a previous weekend.
    weekend_generation: Arc<AtomicU64>,
    /// Deferred standings update of the current weekend.
    standings_job: Option<JoinHandle<()>>,
}

impl<F: Formula1Api, W: WeatherApi, N: Notifier> SessionAlertTracker<F, W, N> {
    /// Create a new [SessionAlertTracker].
    ///
    /// # Arguments
    ///
    /// * `f1_api` - Requester for session results.
    /// * `weather_api` - Requester for circuit weather.
    /// * `notifier` - Alert delivery.
    /// * `schedule_alert_lead_ms` - Schedule alert window before a session start.
    /// * `session_alert_lead_ms` - Session start alert window before a session start.
    /// * `standings_update_delay_ms` - Delay between race results and the standings update.
    pub fn new(
        f1_api: Arc<F>,
        weather_api: Arc<W>,
        notifier: Arc<N>,
        schedule_alert_lead_ms: u64,
        session_alert_lead_ms: u64,
        standings_update_delay_ms: u64,
    ) -> Self {
        SessionAlertTracker {
            f1_api,
            weather_api,
            notifier,
            schedule_alert_lead: Duration::milliseconds(schedule_alert_lead_ms as i64),
            session_alert_lead: Duration::milliseconds(session_alert_lead_ms as i64),
            standings_update_delay: std::time::Duration::from_millis(standings_update_delay_ms),
            weekend: None,
            weekend_generation: Arc::new(AtomicU64::new(0)),
            standings_job: None,
        }
    }

    /// Evaluates one pair of upstream snapshots and sends the alerts that
    /// became due.
    ///
    /// Either snapshot may be [`None`] when its fetch failed this poll.
    /// The timetable evaluation only runs with an event snapshot, the
    /// results evaluation only with a session snapshot; previously built
    /// weekend state is kept either way.
    ///
    /// # Arguments
    ///
    /// * `event` - The event tracker state, if it could be fetched.
    /// * `session` - The live timing session info, if it could be fetched.
    /// * `on_standings_due` - Invoked once the standings update becomes due
    ///   after the race results, unless the weekend changes first.
    pub async fn tick(
        &mut self,
        event: Option<&EventSnapshot>,
        session: Option<&SessionSnapshot>,
        on_standings_due: impl FnOnce() + Send + 'static,
    ) {
        self.tick_at(event, session, Utc::now(), on_standings_due)
            .await;
    }

    /// [`Self::tick`] against an explicit clock.
    async fn tick_at(
        &mut self,
        event: Option<&EventSnapshot>,
        session: Option<&SessionSnapshot>,
        now: DateTime<Utc>,
        on_standings_due: impl FnOnce() + Send + 'static,
    ) {
        match event {
            Some(event) => {
                self.sync_weekend(event);
                self.evaluate_timetable(event, now).await;
            }
            None => debug!("no event snapshot this tick, keeping previous weekend state"),
        }

        match session {
            Some(session) => self.evaluate_results(session, on_standings_due).await,
            None => debug!("no session snapshot this tick, skipping results evaluation"),
        }
    }

    /// Rebuilds the weekend state when the official meeting name reported
    /// by the event tracker changes.
    ///
    /// A weekend change aborts the deferred standings update of the
    /// previous weekend and bumps the weekend generation so an already
    /// sleeping update discards itself.
    fn sync_weekend(&mut self, event: &EventSnapshot) {
        let official_name = &event.race.meeting_official_name;
        let changed = match &self.weekend {
            Some(state) => state.weekend.official_name != *official_name,
            None => true,
        };

        if !changed {
            return;
        }

        if let Some(job) = self.standings_job.take() {
            debug!("aborting deferred standings update of the previous weekend");
            job.abort();
        }
        self.weekend_generation.fetch_add(1, Ordering::SeqCst);

        info!("tracking race weekend {}", official_name);
        self.weekend = Some(WeekendState::new(
            &event.race,
            &event.season_context.timetables,
        ));
    }

    /// Walks the timetable in order and sends the schedule and session
    /// start alerts that became due.
    async fn evaluate_timetable(&mut self, event: &EventSnapshot, now: DateTime<Utc>) {
        let Some(state) = self.weekend.as_mut() else {
            return;
        };
        let timetable = &event.season_context.timetables;
        let session_count = state.sessions.len().min(timetable.len());

        for index in 0..session_count {
            let entry = &timetable[index];
            let entry_state = SessionState::parse(&entry.state);

            if entry_state == SessionState::Completed {
                let status = &mut state.sessions[index];
                status.last_known_state = SessionState::Completed;
                // a completed session no longer alerts
                status.schedule_alert_sent = false;
                status.session_alert_sent = false;
                continue;
            }

            {
                let status = &mut state.sessions[index];
                // a session reported as not completed has no final results,
                // whatever the results feed said earlier
                status.results_shown = false;
                status.last_known_state = entry_state;
                if status.description != entry.description {
                    debug!(
                        "session {} renamed from '{}' to '{}'",
                        status.session_code, status.description, entry.description
                    );
                    status.description = entry.description.clone();
                }
            }

            let Some(start) = entry.start_instant() else {
                warn!(
                    "session {} has an unparseable start time '{}{}', skipping alert evaluation",
                    entry.session, entry.start_time, entry.gmt_offset
                );
                continue;
            };
            let until_start = start - now;

            let preceding_results_shown = match state.sessions[index].preceding_session_index {
                Some(preceding) => state
                    .sessions
                    .get(preceding)
                    .map(|status| status.results_shown)
                    .unwrap_or(true),
                None => true,
            };

            if !state.sessions[index].schedule_alert_sent
                && preceding_results_shown
                && until_start > Duration::zero()
                && until_start <= self.schedule_alert_lead
            {
                info!(
                    "sending schedule alert for {} ({})",
                    entry.description, state.weekend.official_name
                );
                if let Err(err) = self
                    .notifier
                    .send_schedule_alert(entry, &state.weekend)
                    .await
                {
                    error!(
                        "failed to deliver schedule alert for {}: {}",
                        entry.description, err
                    );
                }
                state.sessions[index].schedule_alert_sent = true;

                if !state.circuit_photo_sent {
                    if let Err(err) = self.notifier.send_circuit_photo(&state.weekend).await {
                        error!("failed to deliver circuit layout photo: {}", err);
                    }
                    state.circuit_photo_sent = true;
                }
            }

            if !state.sessions[index].session_alert_sent
                && until_start > Duration::zero()
                && until_start <= self.session_alert_lead
            {
                let (city, country) = weather_location(&state.weekend);
                let weather =
                    match fetch_session_weather(self.weather_api.as_ref(), &city, &country).await {
                        Ok(weather) => Some(weather),
                        Err(err) => {
                            warn!(
                                "weather lookup for {} failed, sending alert without weather: {}",
                                city, err
                            );
                            None
                        }
                    };

                info!(
                    "sending session start alert for {} ({})",
                    entry.description, state.weekend.official_name
                );
                if let Err(err) = self
                    .notifier
                    .send_session_alert(entry, &state.weekend, weather)
                    .await
                {
                    error!(
                        "failed to deliver session start alert for {}: {}",
                        entry.description, err
                    );
                }
                state.sessions[index].session_alert_sent = true;
            }
        }
    }

    /// Publishes the results of the completed session identified by the
    /// session snapshot, at most one per tick.
    ///
    /// The snapshot only describes the most recent session, so it is
    /// matched against the tracked weekend by description. Snapshots of
    /// previous weekends or of sessions whose results were already shown
    /// match nothing and are ignored.
    async fn evaluate_results(
        &mut self,
        snapshot: &SessionSnapshot,
        on_standings_due: impl FnOnce() + Send + 'static,
    ) {
        let Some(state) = self.weekend.as_mut() else {
            debug!("no weekend tracked yet, ignoring session snapshot");
            return;
        };

        if state.all_results_sent || !snapshot.is_complete() {
            return;
        }

        let Some(index) = state.sessions.iter().position(|status| {
            status.description == snapshot.name
                && status.last_known_state == SessionState::Completed
                && !status.results_shown
        }) else {
            return;
        };

        let results = match self.f1_api.get_session_results(&snapshot.path).await {
            Ok(results) => results,
            Err(err) => {
                // results_shown stays unset so the fetch is retried next tick
                error!(
                    "failed to fetch session results for {}: {}",
                    snapshot.name, err
                );
                return;
            }
        };

        info!(
            "sending session results ({} - {})",
            snapshot.meeting.name, snapshot.name
        );
        if let Err(err) = self.notifier.send_results_alert(&results).await {
            error!(
                "failed to deliver session results for {}: {}",
                snapshot.name, err
            );
        }
        state.sessions[index].results_shown = true;

        if state.sessions[index].session_code == RACE_SESSION_CODE {
            state.all_results_sent = true;
            info!(
                "race results sent, weekend {} is over",
                state.weekend.official_name
            );
            self.schedule_standings_update(on_standings_due);
        }
    }

    /// Schedules the deferred standings update after the race results.
    ///
    /// The update fires after the configured delay unless the tracked
    /// weekend changes first: a weekend change aborts the task, and a
    /// generation check covers the window where the task is already
    /// running.
    fn schedule_standings_update(&mut self, on_standings_due: impl FnOnce() + Send + 'static) {
        if let Some(job) = self.standings_job.take() {
            job.abort();
        }

        let generation = Arc::clone(&self.weekend_generation);
        let expected_generation = generation.load(Ordering::SeqCst);
        let delay = self.standings_update_delay;
        info!("standings update scheduled in {:?}", delay);

        let job = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if generation.load(Ordering::SeqCst) != expected_generation {
                debug!("discarding standings update scheduled during a previous weekend");
                return;
            }

            on_standings_due();
        });

        self.standings_job = Some(job);
    }
}

/// Location used for weather lookups of a weekend.
///
/// Prefers the circuit table, which carries OpenWeatherMap friendly
/// locality names and country codes, and falls back to the location
/// reported by the event tracker.
fn weather_location(weekend: &Weekend) -> (String, String) {
    match lookup_circuit(&weekend.country) {
        Some(circuit) => (
            circuit.locality.to_string(),
            circuit.country_code.to_string(),
        ),
        None => (weekend.locality.clone(), weekend.country.clone()),
    }
}
