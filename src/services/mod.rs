//! Service layer
//!
//! Gateways over the key-value store plus the platform collaborator
//! interfaces (notifications, media capture).

pub mod media;
pub mod notifications;
pub mod settings;
pub mod trips;

pub use media::MediaPicker;
pub use notifications::NotificationScheduler;
pub use settings::SettingsStore;
pub use trips::TripStore;
