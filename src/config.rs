//! Application configuration constants
//!
//! Central location for storage keys, defaults, and limits used
//! throughout the application.

// ===== Storage Keys =====

/// Key under which the full trip list document is stored
pub const TRIPS_KEY: &str = "triptrack_trips";

/// Key under which the settings document is stored
pub const SETTINGS_KEY: &str = "triptrack_settings";

// ===== Defaults =====

/// Default reminder lead time in minutes before an activity starts
pub const DEFAULT_REMINDER_LEAD_MINUTES: u32 = 30;

// ===== Reminders =====

/// Format of an activity's time-of-day string (e.g. "14:00")
pub const ACTIVITY_TIME_FORMAT: &str = "%H:%M";

/// How often the reminder dispatch loop checks for due reminders
pub const REMINDER_CHECK_INTERVAL_SECS: u64 = 60;

// ===== Export =====

/// Filename prefix for trip exports; the ISO calendar date and ".json"
/// are appended.
pub const EXPORT_FILE_PREFIX: &str = "triptrack-backup-";
