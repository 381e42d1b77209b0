//! Dashboard State
//!
//! Holds the current snapshots and the loading lifecycle.
//!
//! ```text
//! Idle ──► Loading ──► Loaded
//!             │  ▲        │
//!             ▼  └────────┘ (refresh)
//!           Stale ─────────► Loading
//! ```
//!
//! Each refresh takes a generation number. Slot writes from a generation
//! older than the newest one that has already written are dropped, and only
//! the newest issued generation may settle the phase, unless an older one
//! completes after the newer ones failed before writing anything.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{Alert, MarineSnapshot, WeatherSnapshot};

/// Loading lifecycle of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A refresh is in flight
    Loading,
    /// The last refresh completed
    Loaded,
    /// The last refresh failed; earlier data is kept
    Stale,
}

impl LoadPhase {
    /// Whether the dashboard should show its loading screen
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Idle | LoadPhase::Loading)
    }
}

/// A fetched value headed for one of the state slots
#[derive(Debug, Clone)]
pub enum SlotUpdate {
    /// `None` when the feed answered with an empty body such as `null`
    Weather(Option<WeatherSnapshot>),
    Marine(Option<MarineSnapshot>),
    Alerts(Vec<Alert>),
}

/// Snapshots plus lifecycle bookkeeping
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    phase: LoadPhase,
    weather: Option<WeatherSnapshot>,
    marine: Option<MarineSnapshot>,
    alerts: Vec<Alert>,
    last_updated: Option<DateTime<Utc>>,
    last_error: Option<String>,
    /// Newest generation handed out
    issued: u64,
    /// Newest generation that has written a slot
    applied: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn marine(&self) -> Option<&MarineSnapshot> {
        self.marine.as_ref()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Newest generation handed out so far
    pub fn current_generation(&self) -> u64 {
        self.issued
    }

    /// Enter the loading phase and hand out a new generation
    pub fn begin_refresh(&mut self) -> u64 {
        self.issued += 1;
        self.phase = LoadPhase::Loading;
        self.issued
    }

    /// Store a fetched value if its generation is still current
    ///
    /// Returns false when the write was dropped as stale.
    pub fn apply(&mut self, generation: u64, update: SlotUpdate) -> bool {
        if generation < self.applied {
            tracing::debug!(
                generation,
                applied = self.applied,
                "Dropping stale dashboard update"
            );
            return false;
        }

        self.applied = generation;
        match update {
            SlotUpdate::Weather(weather) => self.weather = weather,
            SlotUpdate::Marine(marine) => self.marine = marine,
            SlotUpdate::Alerts(alerts) => self.alerts = alerts,
        }
        true
    }

    /// Leave the loading phase for `generation`
    ///
    /// Returns false if a newer refresh has been issued since, in which case
    /// the phase is left for that refresh to settle. The one exception is an
    /// older refresh that completes after every newer one has failed without
    /// writing: the slots then hold its data, so it settles as `Loaded`.
    pub fn finish(&mut self, generation: u64, error: Option<String>) -> bool {
        if generation != self.issued {
            let owns_slots = generation == self.applied && self.phase == LoadPhase::Stale;
            if error.is_some() || !owns_slots {
                return false;
            }
        }

        match error {
            None => {
                self.phase = LoadPhase::Loaded;
                self.last_updated = Some(Utc::now());
                self.last_error = None;
            }
            Some(message) => {
                self.phase = LoadPhase::Stale;
                self.last_error = Some(message);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::types::Severity;

    #[test]
    fn test_initial_state_is_loading_and_empty() {
        let state = DashboardState::new();
        assert_eq!(state.phase(), LoadPhase::Idle);
        assert!(state.is_loading());
        assert!(state.weather().is_none());
        assert!(state.marine().is_none());
        assert!(state.alerts().is_empty());
        assert!(state.last_updated().is_none());
    }

    #[test]
    fn test_successful_refresh() {
        let mut state = DashboardState::new();
        let generation = state.begin_refresh();
        assert_eq!(state.phase(), LoadPhase::Loading);

        assert!(state.apply(generation, SlotUpdate::Weather(Some(WeatherSnapshot::new(4.0, 12.0, 7000.0)))));
        assert!(state.apply(generation, SlotUpdate::Marine(Some(MarineSnapshot::new(1.1)))));
        assert!(state.apply(generation, SlotUpdate::Alerts(vec![])));
        assert!(state.finish(generation, None));

        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert!(!state.is_loading());
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn test_failed_refresh_keeps_previous_data() {
        let mut state = DashboardState::new();
        let first = state.begin_refresh();
        state.apply(first, SlotUpdate::Weather(Some(WeatherSnapshot::new(4.0, 12.0, 7000.0))));
        state.apply(first, SlotUpdate::Marine(Some(MarineSnapshot::new(1.1))));
        state.finish(first, None);

        let second = state.begin_refresh();
        state.apply(second, SlotUpdate::Weather(Some(WeatherSnapshot::new(9.0, 14.0, 3000.0))));
        state.finish(second, Some("marine request failed".to_string()));

        assert_eq!(state.phase(), LoadPhase::Stale);
        assert!(!state.is_loading());
        assert_eq!(state.weather().unwrap().wind_speed_mps, Some(9.0));
        assert_eq!(state.marine().unwrap().wave_height_m, Some(1.1));
        assert_eq!(state.last_error(), Some("marine request failed"));

        let third = state.begin_refresh();
        state.finish(third, None);
        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut state = DashboardState::new();
        let older = state.begin_refresh();
        let newer = state.begin_refresh();

        assert!(state.apply(newer, SlotUpdate::Weather(Some(WeatherSnapshot::new(2.0, 20.0, 9000.0)))));
        assert!(!state.apply(older, SlotUpdate::Weather(Some(WeatherSnapshot::new(15.0, 5.0, 100.0)))));
        assert!(!state.apply(older, SlotUpdate::Alerts(vec![crate::dashboard::types::Alert::new("1", "old", Severity::High)])));

        assert_eq!(state.weather().unwrap().wind_speed_mps, Some(2.0));
        assert!(state.alerts().is_empty());
    }

    #[test]
    fn test_only_newest_generation_settles_phase() {
        let mut state = DashboardState::new();
        let older = state.begin_refresh();
        let newer = state.begin_refresh();

        assert!(!state.finish(older, None));
        assert_eq!(state.phase(), LoadPhase::Loading);

        assert!(state.finish(newer, None));
        assert_eq!(state.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_late_older_generation_settles_after_newer_failure() {
        let mut state = DashboardState::new();
        let older = state.begin_refresh();
        let newer = state.begin_refresh();

        assert!(state.finish(newer, Some("weather request failed".to_string())));
        assert_eq!(state.phase(), LoadPhase::Stale);

        assert!(state.apply(older, SlotUpdate::Weather(Some(WeatherSnapshot::new(6.0, 11.0, 8000.0)))));
        assert!(state.apply(older, SlotUpdate::Marine(Some(MarineSnapshot::new(1.7)))));
        assert!(state.apply(older, SlotUpdate::Alerts(vec![])));
        assert!(state.finish(older, None));

        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert!(state.last_error().is_none());
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn test_late_older_generation_waits_for_newer_in_flight() {
        let mut state = DashboardState::new();
        let older = state.begin_refresh();
        let newer = state.begin_refresh();

        state.apply(older, SlotUpdate::Alerts(vec![]));
        assert!(!state.finish(older, None));
        assert_eq!(state.phase(), LoadPhase::Loading);

        // A failed older refresh never overrides the newer outcome.
        assert!(state.finish(newer, Some("alerts request failed".to_string())));
        assert!(!state.finish(older, Some("marine request failed".to_string())));
        assert_eq!(state.last_error(), Some("alerts request failed"));
    }

    #[test]
    fn test_older_generation_may_write_before_newer() {
        let mut state = DashboardState::new();
        let older = state.begin_refresh();
        let newer = state.begin_refresh();

        assert!(state.apply(older, SlotUpdate::Marine(Some(MarineSnapshot::new(0.9)))));
        assert!(state.apply(newer, SlotUpdate::Marine(Some(MarineSnapshot::new(2.4)))));
        assert!(!state.apply(older, SlotUpdate::Alerts(vec![])));
        assert_eq!(state.marine().unwrap().wave_height_m, Some(2.4));
    }
}
