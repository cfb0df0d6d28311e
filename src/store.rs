//! In-memory state store
//!
//! Holds the authoritative snapshot of trips, settings, and the
//! loading/error flags, and applies a closed set of transitions. All
//! transitions are synchronous and total; asynchronous work happens in
//! the coordinating layer, which issues a sequence of transitions.

use crate::models::{AppSettings, Trip};

/// Snapshot of application state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub trips: Vec<Trip>,
    pub settings: AppSettings,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            trips: Vec::new(),
            settings: AppSettings::default(),
            loading: true,
            error: None,
        }
    }
}

/// The closed transition vocabulary
#[derive(Debug, Clone)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetTrips(Vec<Trip>),
    AddTrip(Trip),
    /// Replaces the trip with a matching id; silently dropped when no
    /// trip matches, so callers must only update trips known to exist.
    UpdateTrip(Trip),
    DeleteTrip(String),
    SetSettings(AppSettings),
}

/// Single designated owner of the state snapshot
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, read-only
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a transition to the snapshot
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetLoading(loading) => self.state.loading = loading,
            Action::SetError(error) => self.state.error = error,
            Action::SetTrips(trips) => self.state.trips = trips,
            Action::AddTrip(trip) => self.state.trips.push(trip),
            Action::UpdateTrip(trip) => {
                if let Some(slot) = self.state.trips.iter_mut().find(|t| t.id == trip.id) {
                    *slot = trip;
                }
            }
            Action::DeleteTrip(id) => self.state.trips.retain(|t| t.id != id),
            Action::SetSettings(settings) => self.state.settings = settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;

    fn trip(id: &str, title: &str) -> Trip {
        let mut trip = Trip::new(
            title.to_string(),
            "Somewhere".to_string(),
            "2024-06-01".parse().unwrap(),
            "2024-06-03".parse().unwrap(),
        );
        trip.id = id.to_string();
        trip
    }

    #[test]
    fn test_initial_state() {
        let store = Store::new();

        assert!(store.state().trips.is_empty());
        assert!(store.state().loading);
        assert!(store.state().error.is_none());
        assert_eq!(store.state().settings, AppSettings::default());
    }

    #[test]
    fn test_set_and_clear_error() {
        let mut store = Store::new();

        store.dispatch(Action::SetError(Some("Failed to save trip".to_string())));
        assert_eq!(store.state().error.as_deref(), Some("Failed to save trip"));

        store.dispatch(Action::SetError(None));
        assert!(store.state().error.is_none());
    }

    #[test]
    fn test_add_and_delete_trip() {
        let mut store = Store::new();

        store.dispatch(Action::AddTrip(trip("1", "Paris")));
        store.dispatch(Action::AddTrip(trip("2", "Rome")));
        assert_eq!(store.state().trips.len(), 2);

        store.dispatch(Action::DeleteTrip("1".to_string()));
        assert_eq!(store.state().trips.len(), 1);
        assert_eq!(store.state().trips[0].id, "2");
    }

    #[test]
    fn test_delete_unknown_trip_is_noop() {
        let mut store = Store::new();
        store.dispatch(Action::AddTrip(trip("1", "Paris")));

        store.dispatch(Action::DeleteTrip("missing".to_string()));
        assert_eq!(store.state().trips.len(), 1);
    }

    #[test]
    fn test_update_trip_replaces_matching_id() {
        let mut store = Store::new();
        store.dispatch(Action::AddTrip(trip("1", "Paris")));

        store.dispatch(Action::UpdateTrip(trip("1", "Paris 2025")));

        assert_eq!(store.state().trips.len(), 1);
        assert_eq!(store.state().trips[0].title, "Paris 2025");
    }

    #[test]
    fn test_update_unknown_trip_is_dropped() {
        let mut store = Store::new();
        store.dispatch(Action::AddTrip(trip("1", "Paris")));

        store.dispatch(Action::UpdateTrip(trip("ghost", "Nowhere")));

        assert_eq!(store.state().trips.len(), 1);
        assert_eq!(store.state().trips[0].title, "Paris");
    }

    #[test]
    fn test_set_trips_replaces_list_wholesale() {
        let mut store = Store::new();
        store.dispatch(Action::AddTrip(trip("1", "Paris")));

        store.dispatch(Action::SetTrips(vec![trip("2", "Rome"), trip("3", "Oslo")]));

        let ids: Vec<&str> = store.state().trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_set_settings() {
        let mut store = Store::new();

        let settings = AppSettings {
            theme: Theme::Dark,
            notifications: false,
            default_reminder_time: 15,
        };
        store.dispatch(Action::SetSettings(settings.clone()));

        assert_eq!(store.state().settings, settings);
    }
}
