// TripTrack - local-first trip planning data core
// Entry point: boots the store, loads the snapshot, prints a summary.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triptrack::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triptrack=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TripTrack");

    let data_dir = dirs::data_dir()
        .context("no data directory available on this platform")?
        .join("triptrack");

    let app = app::setup(data_dir).await?;

    let state = app.state();
    tracing::info!(
        "Loaded {} trips, theme {:?}, notifications {}",
        state.trips.len(),
        state.settings.theme,
        state.settings.notifications
    );

    for trip in &state.trips {
        println!(
            "{}  {} — {} ({} to {}, {} days)",
            trip.id, trip.title, trip.destination, trip.start_date, trip.end_date,
            trip.days.len()
        );
    }

    Ok(())
}
