//! Settings persistence gateway
//!
//! Stores the settings object as a single JSON document under a fixed
//! key. Absent or malformed documents degrade to defaults.

use crate::config::SETTINGS_KEY;
use crate::error::Result;
use crate::models::AppSettings;
use crate::storage::KvStore;

/// Gateway for the settings document
#[derive(Clone)]
pub struct SettingsStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> SettingsStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Load stored settings, or defaults when the document is absent or
    /// malformed.
    pub async fn get_settings(&self) -> AppSettings {
        let text = match self.kv.get(SETTINGS_KEY).await {
            Ok(Some(text)) => text,
            Ok(None) => return AppSettings::default(),
            Err(e) => {
                tracing::error!("Error loading settings: {}", e);
                return AppSettings::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Error decoding settings document: {}", e);
                AppSettings::default()
            }
        }
    }

    /// Overwrite stored settings wholesale
    pub async fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let text = serde_json::to_string(settings)?;
        self.kv.set(SETTINGS_KEY, &text).await?;
        tracing::debug!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use crate::storage::MemoryKvStore;

    #[tokio::test]
    async fn test_absent_document_yields_defaults() {
        let store = SettingsStore::new(MemoryKvStore::new());

        let settings = store.get_settings().await;

        assert_eq!(settings.theme, Theme::System);
        assert!(settings.notifications);
        assert_eq!(settings.default_reminder_time, 30);
    }

    #[tokio::test]
    async fn test_malformed_document_yields_defaults() {
        let kv = MemoryKvStore::new();
        kv.set(SETTINGS_KEY, "{{{").await.unwrap();
        let store = SettingsStore::new(kv);

        assert_eq!(store.get_settings().await, AppSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips() {
        let store = SettingsStore::new(MemoryKvStore::new());

        let settings = AppSettings {
            theme: Theme::Dark,
            notifications: false,
            default_reminder_time: 10,
        };
        store.save_settings(&settings).await.unwrap();

        assert_eq!(store.get_settings().await, settings);
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let kv = MemoryKvStore::new();
        let store = SettingsStore::new(kv.clone());

        kv.fail_writes(true);

        assert!(store.save_settings(&AppSettings::default()).await.is_err());
    }
}
