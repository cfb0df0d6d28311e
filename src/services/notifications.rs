//! Notification scheduling service
//!
//! Issues opaque handles for activity reminders and keeps the pending
//! set in process. A background dispatch loop checks for due reminders
//! every minute, logs them, and retires them — actual delivery is the
//! platform shell's business.

use crate::config::{ACTIVITY_TIME_FORMAT, REMINDER_CHECK_INTERVAL_SECS};
use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct PendingReminder {
    title: String,
    fire_at: DateTime<Local>,
}

/// Scheduler with an in-process pending-reminder registry
#[derive(Clone, Default)]
pub struct NotificationScheduler {
    pending: Arc<Mutex<HashMap<String, PendingReminder>>>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a reminder `lead_minutes` before the activity starts on
    /// the given calendar day. Returns the issued handle, or `None`
    /// when the computed fire time is already in the past.
    pub async fn schedule_activity_reminder(
        &self,
        title: &str,
        time: &str,
        date: NaiveDate,
        lead_minutes: u32,
    ) -> Result<Option<String>> {
        let time = NaiveTime::parse_from_str(time, ACTIVITY_TIME_FORMAT)
            .map_err(|_| AppError::InvalidTime(time.to_string()))?;

        let starts_at = Local
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(|| AppError::InvalidTime(format!("{} {}", date, time)))?;
        let fire_at = starts_at - Duration::minutes(i64::from(lead_minutes));

        if fire_at <= Local::now() {
            tracing::debug!("Reminder for {:?} would fire in the past, skipping", title);
            return Ok(None);
        }

        let handle = Uuid::new_v4().to_string();
        let mut pending = self.pending.lock().await;
        pending.insert(
            handle.clone(),
            PendingReminder {
                title: title.to_string(),
                fire_at,
            },
        );

        tracing::info!("Scheduled reminder {} for {:?} at {}", handle, title, fire_at);

        Ok(Some(handle))
    }

    /// Cancel a previously issued handle; unknown handles are ignored
    pub async fn cancel(&self, handle: &str) {
        let mut pending = self.pending.lock().await;
        if pending.remove(handle).is_some() {
            tracing::info!("Cancelled reminder {}", handle);
        }
    }

    /// Drop every pending reminder
    pub async fn cancel_all(&self) {
        let mut pending = self.pending.lock().await;
        if !pending.is_empty() {
            tracing::info!("Cancelling {} pending reminders", pending.len());
            pending.clear();
        }
    }

    /// Whether the handle is still pending
    pub async fn is_scheduled(&self, handle: &str) -> bool {
        self.pending.lock().await.contains_key(handle)
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Start the background dispatch loop
    pub fn start_dispatch_loop(&self) {
        let scheduler = self.clone();
        tokio::spawn(async move {
            tracing::info!("Starting reminder dispatch loop");

            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(
                REMINDER_CHECK_INTERVAL_SECS,
            ));

            loop {
                interval.tick().await;
                scheduler.dispatch_due().await;
            }
        });
    }

    /// Retire and log every reminder whose fire time has passed
    async fn dispatch_due(&self) {
        let now = Local::now();
        let mut pending = self.pending.lock().await;

        let due: Vec<String> = pending
            .iter()
            .filter(|(_, r)| r.fire_at <= now)
            .map(|(handle, _)| handle.clone())
            .collect();

        for handle in due {
            if let Some(reminder) = pending.remove(&handle) {
                tracing::info!("Reminder due: {} ({})", reminder.title, handle);
            }
        }
    }
}
