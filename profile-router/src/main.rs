use std::process::ExitCode;
use std::sync::Arc;

use profile_router::cache::{CacheConfig, ProfileCache};
use profile_router::config::{AppConfig, StationRef};
use profile_router::domain::StationId;
use profile_router::router::Router;
use profile_router::timetable::{MemoryTimetable, Timetable};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Routing failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;

    let timetable = MemoryTimetable::load(&config.timetable_path)?;
    let target = resolve(&config.target, &timetable, "TARGET_STATION")?;
    let origin = config
        .origin
        .as_ref()
        .map(|origin| resolve(origin, &timetable, "ORIGIN_STATION"))
        .transpose()?;

    let router = Router::new(Arc::new(timetable), config.router.clone())?;
    let cache = ProfileCache::new(router, &CacheConfig::default());
    let profile = cache.profile(config.date, target).await?;
    let timetable = profile.timetable();

    info!(
        date = %config.date,
        target = %timetable.station_name(target)?,
        tuples = profile.tuple_count(),
        "Computed profile"
    );

    match origin {
        Some(origin) => {
            let journeys = profile.journeys(origin)?;
            if journeys.is_empty() {
                println!(
                    "No journeys from {} to {} on {}",
                    timetable.station_name(origin)?,
                    timetable.station_name(target)?,
                    config.date
                );
            }
            for journey in &journeys {
                println!("{journey}");
            }
        }
        None => {
            println!(
                "Journey options to {} on {}:",
                timetable.station_name(target)?,
                config.date
            );
            for (station, front) in profile.iter() {
                if station != target {
                    println!("  {:>4}  {}", front.len(), timetable.station_name(station)?);
                }
            }
        }
    }

    Ok(())
}

fn resolve(
    station: &StationRef,
    timetable: &MemoryTimetable,
    name: &'static str,
) -> Result<StationId, String> {
    station
        .resolve(timetable)
        .ok_or_else(|| format!("{name}: unknown station {station:?}"))
}
