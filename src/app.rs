//! Application wiring and coordinating actions
//!
//! Glue between the persistence gateways and the state store. Every verb
//! persists first and only then applies the matching store transition,
//! so a reader never observes an in-memory change that failed to
//! persist. Write failures set the process-wide error flag and leave the
//! snapshot unchanged.

use crate::error::Result;
use crate::models::{AppSettings, Reminder, Trip};
use crate::services::{MediaPicker, NotificationScheduler, SettingsStore, TripStore};
use crate::storage::{FileKvStore, KvStore};
use crate::store::{Action, AppState, Store};
use std::path::{Path, PathBuf};

/// Central application object holding the store and all services
pub struct App<S: KvStore> {
    store: Store,
    trips: TripStore<S>,
    settings: SettingsStore<S>,
    notifier: NotificationScheduler,
}

impl<S: KvStore> App<S> {
    pub fn new(kv: S) -> Self {
        Self {
            store: Store::new(),
            trips: TripStore::new(kv.clone()),
            settings: SettingsStore::new(kv),
            notifier: NotificationScheduler::new(),
        }
    }

    /// Current snapshot, read-only
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn notifier(&self) -> &NotificationScheduler {
        &self.notifier
    }

    /// Load trips and settings into the snapshot, toggling the loading
    /// flag around the fetch. Unreadable documents degrade to empty or
    /// default values inside the gateways, so loading never fails.
    pub async fn load_trips(&mut self) {
        self.store.dispatch(Action::SetLoading(true));

        let trips = self.trips.get_trips().await;
        let settings = self.settings.get_settings().await;

        self.store.dispatch(Action::SetTrips(trips));
        self.store.dispatch(Action::SetSettings(settings));
        self.store.dispatch(Action::SetLoading(false));
    }

    /// Persist a trip, then mirror it into the snapshot
    pub async fn save_trip(&mut self, trip: Trip) {
        match self.trips.save_trip(&trip).await {
            Ok(()) => {
                let exists = self.store.state().trips.iter().any(|t| t.id == trip.id);
                if exists {
                    self.store.dispatch(Action::UpdateTrip(trip));
                } else {
                    self.store.dispatch(Action::AddTrip(trip));
                }
            }
            Err(e) => {
                tracing::error!("Error saving trip: {}", e);
                self.store
                    .dispatch(Action::SetError(Some("Failed to save trip".to_string())));
            }
        }
    }

    /// Remove a trip from storage, then from the snapshot
    pub async fn delete_trip(&mut self, trip_id: &str) {
        match self.trips.delete_trip(trip_id).await {
            Ok(()) => {
                self.store.dispatch(Action::DeleteTrip(trip_id.to_string()));
            }
            Err(e) => {
                tracing::error!("Error deleting trip: {}", e);
                self.store
                    .dispatch(Action::SetError(Some("Failed to delete trip".to_string())));
            }
        }
    }

    /// Persist new settings, then mirror them into the snapshot
    pub async fn update_settings(&mut self, settings: AppSettings) {
        match self.settings.save_settings(&settings).await {
            Ok(()) => {
                self.store.dispatch(Action::SetSettings(settings));
            }
            Err(e) => {
                tracing::error!("Error updating settings: {}", e);
                self.store.dispatch(Action::SetError(Some(
                    "Failed to update settings".to_string(),
                )));
            }
        }
    }

    /// Generate the missing calendar days for a trip and save the
    /// result. Returns whether any day was added.
    pub async fn fill_trip_days(&mut self, trip_id: &str) -> bool {
        let Some(mut trip) = self.find_trip(trip_id) else {
            return false;
        };

        if !trip.fill_missing_days() {
            return false;
        }

        self.save_trip(trip).await;
        true
    }

    /// Toggle an activity's reminder.
    ///
    /// Turning off cancels the previously issued notification handle.
    /// Turning on schedules a notification with the settings' lead time;
    /// the reminder still flips on when the fire time is already past,
    /// just without a handle. Returns whether the trip was updated.
    pub async fn toggle_reminder(
        &mut self,
        trip_id: &str,
        day_id: &str,
        activity_id: &str,
    ) -> bool {
        let Some(mut trip) = self.find_trip(trip_id) else {
            return false;
        };
        let Some(date) = trip.day(day_id).map(|d| d.date) else {
            return false;
        };
        let Some(activity) = trip.activity(day_id, activity_id).cloned() else {
            return false;
        };

        let reminder = if activity.reminder.is_enabled() {
            if let Some(handle) = activity.reminder.notification_id() {
                self.notifier.cancel(handle).await;
            }
            Reminder::Disabled
        } else {
            let lead = self.store.state().settings.default_reminder_time;
            match self
                .notifier
                .schedule_activity_reminder(&activity.title, &activity.time, date, lead)
                .await
            {
                Ok(notification_id) => Reminder::Enabled { notification_id },
                Err(e) => {
                    tracing::error!("Error toggling reminder: {}", e);
                    return false;
                }
            }
        };

        trip.set_reminder(day_id, activity_id, reminder);
        self.save_trip(trip).await;
        true
    }

    /// Capture a media item via the picker and attach it to an
    /// activity. A cancelled or denied capture produces nothing and is
    /// not an error.
    pub async fn attach_media<P: MediaPicker>(
        &mut self,
        trip_id: &str,
        day_id: &str,
        activity_id: &str,
        picker: &P,
    ) -> bool {
        let Some(item) = picker.pick().await else {
            tracing::debug!("Media capture produced nothing");
            return false;
        };

        let Some(mut trip) = self.find_trip(trip_id) else {
            return false;
        };
        if !trip.add_media(day_id, activity_id, item) {
            return false;
        }

        self.save_trip(trip).await;
        true
    }

    /// Full trip list as pretty-printed JSON
    pub async fn export_trips(&self) -> Result<String> {
        self.trips.export_trips().await
    }

    /// Write the export to a timestamped file inside `dir`
    pub async fn export_to_file(&self, dir: &Path) -> Result<PathBuf> {
        self.trips.export_to_file(dir).await
    }

    /// Start the background reminder dispatch loop
    pub fn start_reminder_loop(&self) {
        self.notifier.start_dispatch_loop();
    }

    fn find_trip(&self, trip_id: &str) -> Option<Trip> {
        self.store
            .state()
            .trips
            .iter()
            .find(|t| t.id == trip_id)
            .cloned()
    }
}

/// Application setup - called once on startup
pub async fn setup(data_dir: PathBuf) -> Result<App<FileKvStore>> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", data_dir);

    let kv = FileKvStore::new(data_dir.join("storage"));
    kv.initialize().await?;

    let mut app = App::new(kv);
    app.load_trips().await;
    app.start_reminder_loop();

    tracing::info!("Application initialized successfully");

    Ok(app)
}
