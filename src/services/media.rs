//! Media capture collaborator
//!
//! The device camera/gallery picker lives in the platform shell; the
//! core only consumes its result.

use crate::models::MediaItem;

/// Source of captured media. `None` means the user cancelled or a
/// permission was denied — never an error.
pub trait MediaPicker {
    fn pick(&self) -> impl std::future::Future<Output = Option<MediaItem>> + Send;
}
