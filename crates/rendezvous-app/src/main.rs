//! Entry point for the Rendezvous event planner.
//!
//! Loads configuration, initialises structured logging, reads the planner
//! data file (seeding it with sample data when configured and the file does
//! not exist yet), checks it by loading it into a [`Planner`], logs a
//! summary of every event, and writes the data back.
//!
//! ```text
//! rendezvous-config.yaml --> AppConfig --> JsonPlannerStorage::read
//!                                              |
//!                                  PlannerSnapshot (or sample data)
//!                                              |
//!                                     Planner::load --> summaries
//!                                              |
//!                                  JsonPlannerStorage::save
//! ```

mod config;
mod error;
mod summary;

use std::path::Path;

use rendezvous_model::{Planner, PlannerSnapshot, sample_snapshot};
use rendezvous_storage::JsonPlannerStorage;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, CONFIG_FILE, LogFormat, LoggingConfig};
use crate::error::AppError;
use crate::summary::EventSummary;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the data file, or its contents are
/// invalid, or if the data cannot be written back.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    init_logging(&config.logging);

    info!(
        data_file = %config.storage.data_file.display(),
        seed_sample_data = config.storage.seed_sample_data,
        "rendezvous starting"
    );

    run(&config)?;
    Ok(())
}

/// Load, check, summarise and save the planner.
fn run(config: &AppConfig) -> Result<(), AppError> {
    let storage = JsonPlannerStorage::new(&config.storage.data_file);

    let snapshot = match storage.read()? {
        Some(snapshot) => snapshot,
        None if config.storage.seed_sample_data => {
            info!("No data file found, seeding sample data");
            sample_snapshot()?
        }
        None => {
            info!("No data file found, starting empty");
            PlannerSnapshot::default()
        }
    };

    let planner = Planner::from_snapshot(snapshot)?;

    for event in planner.events() {
        let summary = EventSummary::of(&planner, event);
        info!(
            event = summary.name,
            dates = summary.dates,
            venue = summary.venue.as_deref().unwrap_or("-"),
            roster = summary.roster,
            vendors = summary.vendors,
            coming = summary.coming,
            not_coming = summary.not_coming,
            pending = summary.pending,
            unanswered = summary.unanswered,
            "event"
        );
    }

    storage.save(&planner.snapshot())?;
    info!(
        persons = planner.persons().len(),
        venues = planner.venues().len(),
        vendors = planner.vendors().len(),
        events = planner.events().len(),
        rsvps = planner.rsvps().len(),
        "rendezvous finished"
    );
    Ok(())
}

/// Load `rendezvous-config.yaml`, or defaults (with environment overrides)
/// if it does not exist.
fn load_config() -> Result<AppConfig, AppError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(AppConfig::from_file(config_path)?)
    } else {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
