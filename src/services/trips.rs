//! Trips persistence gateway
//!
//! Durable storage of the trip list as a single JSON document under a
//! fixed key, with whole-document read-modify-write semantics. Reads
//! degrade to an empty list on missing or malformed documents; write
//! failures propagate to the caller.

use crate::config::{EXPORT_FILE_PREFIX, TRIPS_KEY};
use crate::error::Result;
use crate::models::Trip;
use crate::storage::KvStore;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Gateway for the trips document
#[derive(Clone)]
pub struct TripStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> TripStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Load the stored trip list. Missing and malformed documents both
    /// degrade to an empty list; the caller never sees a read error.
    pub async fn get_trips(&self) -> Vec<Trip> {
        let text = match self.kv.get(TRIPS_KEY).await {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Error loading trips: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(trips) => trips,
            Err(e) => {
                tracing::error!("Error decoding trips document: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the stored trip list wholesale
    pub async fn save_trips(&self, trips: &[Trip]) -> Result<()> {
        let text = serde_json::to_string(trips)?;
        self.kv.set(TRIPS_KEY, &text).await?;
        tracing::debug!("Saved {} trips", trips.len());
        Ok(())
    }

    /// Read-modify-write a single trip into the stored list.
    ///
    /// An existing entry (by id) is replaced in place with `updated_at`
    /// stamped to the write time; an unknown id is appended as-is, with
    /// no stamping — creation timestamps are the caller's.
    pub async fn save_trip(&self, trip: &Trip) -> Result<()> {
        let mut trips = self.get_trips().await;

        match trips.iter_mut().find(|t| t.id == trip.id) {
            Some(slot) => {
                let mut updated = trip.clone();
                updated.updated_at = Utc::now();
                *slot = updated;
            }
            None => trips.push(trip.clone()),
        }

        self.save_trips(&trips).await
    }

    /// Remove the trip with the given id; unknown ids write back the
    /// list unchanged.
    pub async fn delete_trip(&self, trip_id: &str) -> Result<()> {
        let mut trips = self.get_trips().await;
        trips.retain(|t| t.id != trip_id);
        self.save_trips(&trips).await
    }

    /// Full trip list as pretty-printed JSON, for backup/share
    pub async fn export_trips(&self) -> Result<String> {
        let trips = self.get_trips().await;
        Ok(serde_json::to_string_pretty(&trips)?)
    }

    /// Write the export to a timestamped file inside `dir` and return
    /// its path. The share handoff itself is the platform's business.
    pub async fn export_to_file(&self, dir: &Path) -> Result<PathBuf> {
        let data = self.export_trips().await?;

        let file_name = format!(
            "{}{}.json",
            EXPORT_FILE_PREFIX,
            Utc::now().format("%Y-%m-%d")
        );
        let path = dir.join(file_name);

        fs::create_dir_all(dir).await?;
        fs::write(&path, data).await?;

        tracing::info!("Exported trips to {:?}", path);

        Ok(path)
    }
}
