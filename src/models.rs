//! Core data model
//!
//! Plain data types for the trip object graph (trips → days → activities
//! → media) plus the whole-trip mutation helpers. All types use serde and
//! keep the camelCase field names of the stored JSON documents.
//!
//! Mutation is always whole-trip: callers clone the current `Trip`, apply
//! helpers, and submit the result for persistence. Every helper that
//! changes nested data refreshes `updated_at`.

use crate::config::DEFAULT_REMINDER_LEAD_MINUTES;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a captured photo or video attached to an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    /// Opaque content URI into platform-stored media
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaItem {
    pub fn new(uri: String, kind: MediaKind) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            uri,
            kind,
            timestamp: now,
        }
    }
}

/// Optional scheduled notification tied to an activity's start time.
///
/// `Enabled` carries the handle issued by the notification collaborator;
/// the handle is absent when scheduling was declined (fire time already
/// past).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ReminderRepr", into = "ReminderRepr")]
pub enum Reminder {
    #[default]
    Disabled,
    Enabled { notification_id: Option<String> },
}

impl Reminder {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Reminder::Enabled { .. })
    }

    /// Handle of the scheduled notification, if one was issued
    pub fn notification_id(&self) -> Option<&str> {
        match self {
            Reminder::Enabled {
                notification_id: Some(id),
            } => Some(id),
            _ => None,
        }
    }
}

/// Stored JSON shape of a reminder: `{enabled, notificationId?}`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReminderRepr {
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notification_id: Option<String>,
}

impl From<ReminderRepr> for Reminder {
    fn from(repr: ReminderRepr) -> Self {
        if repr.enabled {
            Reminder::Enabled {
                notification_id: repr.notification_id,
            }
        } else {
            Reminder::Disabled
        }
    }
}

impl From<Reminder> for ReminderRepr {
    fn from(reminder: Reminder) -> Self {
        match reminder {
            Reminder::Disabled => ReminderRepr {
                enabled: false,
                notification_id: None,
            },
            Reminder::Enabled { notification_id } => ReminderRepr {
                enabled: true,
                notification_id,
            },
        }
    }
}

/// A scheduled item within a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    /// Time of day as "HH:MM"; sorted lexicographically for display
    pub time: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub reminder: Reminder,
    #[serde(default)]
    pub completed: bool,
}

impl Activity {
    pub fn new(
        title: String,
        time: String,
        location: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            title,
            time,
            location,
            description,
            media: Vec::new(),
            reminder: Reminder::Disabled,
            completed: false,
        }
    }
}

/// A single calendar date within a trip, holding activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDay {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Top-level planning unit with a date range and nested days.
///
/// Days are owned exclusively by their parent trip; no two days of the
/// same trip share a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: Vec<TripDay>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Create a trip with no days; both timestamps are set to creation
    /// time and the id is a time-derived token.
    pub fn new(
        title: String,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            title,
            destination,
            start_date,
            end_date,
            days: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate one day per calendar date of the trip's range, skipping
    /// dates that already have a day. Days end up sorted ascending by
    /// date. Returns whether anything was added.
    pub fn fill_missing_days(&mut self) -> bool {
        let total = (self.end_date - self.start_date).num_days();
        if total < 0 {
            return false;
        }

        let mut added = false;
        for i in 0..=total {
            let date = self.start_date + Duration::days(i);
            if self.days.iter().any(|d| d.date == date) {
                continue;
            }
            self.days.push(TripDay {
                id: format!("{}-day-{}", self.id, i),
                date,
                activities: Vec::new(),
            });
            added = true;
        }

        if added {
            self.days.sort_by_key(|d| d.date);
            self.touch();
        }

        added
    }

    /// Append an activity to the day with the given id. Returns false
    /// (without touching the trip) when the day is absent.
    pub fn add_activity(&mut self, day_id: &str, activity: Activity) -> bool {
        match self.day_mut(day_id) {
            Some(day) => {
                day.activities.push(activity);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Replace the activity with a matching id inside the given day
    pub fn update_activity(&mut self, day_id: &str, activity: Activity) -> bool {
        let Some(day) = self.day_mut(day_id) else {
            return false;
        };
        match day.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(slot) => {
                *slot = activity;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Flip an activity's completed flag
    pub fn toggle_completed(&mut self, day_id: &str, activity_id: &str) -> bool {
        match self.activity_mut(day_id, activity_id) {
            Some(activity) => {
                activity.completed = !activity.completed;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Replace an activity's reminder descriptor
    pub fn set_reminder(&mut self, day_id: &str, activity_id: &str, reminder: Reminder) -> bool {
        match self.activity_mut(day_id, activity_id) {
            Some(activity) => {
                activity.reminder = reminder;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Attach a media item to an activity
    pub fn add_media(&mut self, day_id: &str, activity_id: &str, item: MediaItem) -> bool {
        match self.activity_mut(day_id, activity_id) {
            Some(activity) => {
                activity.media.push(item);
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn day(&self, day_id: &str) -> Option<&TripDay> {
        self.days.iter().find(|d| d.id == day_id)
    }

    pub fn activity(&self, day_id: &str, activity_id: &str) -> Option<&Activity> {
        self.day(day_id)?.activities.iter().find(|a| a.id == activity_id)
    }

    fn day_mut(&mut self, day_id: &str) -> Option<&mut TripDay> {
        self.days.iter_mut().find(|d| d.id == day_id)
    }

    fn activity_mut(&mut self, day_id: &str, activity_id: &str) -> Option<&mut Activity> {
        self.day_mut(day_id)?
            .activities
            .iter_mut()
            .find(|a| a.id == activity_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    /// Minutes before an activity's start time that its reminder fires
    #[serde(default = "default_reminder_time")]
    pub default_reminder_time: u32,
}

fn default_notifications() -> bool {
    true
}

fn default_reminder_time() -> u32 {
    DEFAULT_REMINDER_LEAD_MINUTES
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications: true,
            default_reminder_time: DEFAULT_REMINDER_LEAD_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn paris_trip() -> Trip {
        Trip::new(
            "Paris".to_string(),
            "Paris, France".to_string(),
            date("2024-06-01"),
            date("2024-06-03"),
        )
    }

    #[test]
    fn test_new_trip_has_no_days_and_equal_timestamps() {
        let trip = paris_trip();

        assert!(!trip.id.is_empty());
        assert!(trip.days.is_empty());
        assert_eq!(trip.created_at, trip.updated_at);
    }

    #[test]
    fn test_fill_missing_days_generates_full_range() {
        let mut trip = paris_trip();

        assert!(trip.fill_missing_days());

        assert_eq!(trip.days.len(), 3);
        let dates: Vec<NaiveDate> = trip.days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-06-01"), date("2024-06-02"), date("2024-06-03")]
        );
    }

    #[test]
    fn test_fill_missing_days_is_idempotent() {
        let mut trip = paris_trip();

        assert!(trip.fill_missing_days());
        assert!(!trip.fill_missing_days());
        assert_eq!(trip.days.len(), 3);
    }

    #[test]
    fn test_fill_missing_days_skips_existing_dates() {
        let mut trip = paris_trip();
        trip.days.push(TripDay {
            id: "existing".to_string(),
            date: date("2024-06-02"),
            activities: Vec::new(),
        });

        assert!(trip.fill_missing_days());

        assert_eq!(trip.days.len(), 3);
        // Kept the pre-existing day and sorted the result
        assert_eq!(trip.days[1].id, "existing");
        assert!(trip.days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_fill_missing_days_inverted_range_is_noop() {
        let mut trip = paris_trip();
        trip.start_date = date("2024-06-05");

        assert!(!trip.fill_missing_days());
        assert!(trip.days.is_empty());
    }

    #[test]
    fn test_add_activity_to_unknown_day_is_rejected() {
        let mut trip = paris_trip();
        trip.fill_missing_days();
        let before = trip.updated_at;

        let activity = Activity::new("Louvre".to_string(), "09:00".to_string(), None, None);
        assert!(!trip.add_activity("no-such-day", activity));
        assert_eq!(trip.updated_at, before);
    }

    #[test]
    fn test_toggle_completed_flips_flag() {
        let mut trip = paris_trip();
        trip.fill_missing_days();
        let day_id = trip.days[0].id.clone();

        let activity = Activity::new("Louvre".to_string(), "09:00".to_string(), None, None);
        let activity_id = activity.id.clone();
        assert!(trip.add_activity(&day_id, activity));

        assert!(trip.toggle_completed(&day_id, &activity_id));
        assert!(trip.activity(&day_id, &activity_id).unwrap().completed);

        assert!(trip.toggle_completed(&day_id, &activity_id));
        assert!(!trip.activity(&day_id, &activity_id).unwrap().completed);
    }

    #[test]
    fn test_reminder_serializes_to_stored_shape() {
        let enabled = Reminder::Enabled {
            notification_id: Some("abc".to_string()),
        };
        let json = serde_json::to_value(&enabled).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"enabled": true, "notificationId": "abc"})
        );

        let disabled = serde_json::to_value(Reminder::Disabled).unwrap();
        assert_eq!(disabled, serde_json::json!({"enabled": false}));
    }

    #[test]
    fn test_reminder_deserializes_from_stored_shape() {
        let reminder: Reminder =
            serde_json::from_str(r#"{"enabled":true,"notificationId":"xyz"}"#).unwrap();
        assert_eq!(reminder.notification_id(), Some("xyz"));

        let reminder: Reminder = serde_json::from_str(r#"{"enabled":false}"#).unwrap();
        assert_eq!(reminder, Reminder::Disabled);
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings.theme, Theme::System);
        assert!(settings.notifications);
        assert_eq!(settings.default_reminder_time, 30);
    }

    #[test]
    fn test_trip_round_trips_through_json() {
        let mut trip = paris_trip();
        trip.fill_missing_days();
        let day_id = trip.days[0].id.clone();
        trip.add_activity(
            &day_id,
            Activity::new(
                "Louvre".to_string(),
                "09:00".to_string(),
                Some("Rue de Rivoli".to_string()),
                None,
            ),
        );

        let json = serde_json::to_string(&trip).unwrap();
        let parsed: Trip = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trip);
    }
}
