//! Application context - dependency injection container

use std::sync::Arc;

use staybook_core::{
    AvailabilityService, BookingPolicy, BookingService, CalendarEventService, Clock, SystemClock,
};
use staybook_domain::{Config, Result};
use staybook_infra::{
    build_provider, DbManager, HttpClient, HttpPropertyDirectory, SqliteAvailabilityRepository,
    SqliteBookingRepository,
};
use tracing::{info, instrument};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub availability: Arc<AvailabilityService>,
    pub calendar: Arc<CalendarEventService>,
    pub bookings: Arc<BookingService>,
}

impl AppContext {
    /// Wire every adapter from `config` using the system clock.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Wire every adapter from `config` with an explicit clock.
    #[instrument(skip_all, fields(db_path = %config.database.path))]
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let http = HttpClient::from_config(&config.http)?;

        let availability = Arc::new(AvailabilityService::new(Arc::new(
            SqliteAvailabilityRepository::new(Arc::clone(&db)),
        )));

        let provider = build_provider(&config.calendar, http.clone())?;
        let calendar = Arc::new(
            CalendarEventService::new(provider)
                .with_calendar_id(config.calendar.calendar_id.clone())
                .with_time_zone(config.calendar.time_zone.clone()),
        );

        let properties = Arc::new(HttpPropertyDirectory::from_config(&config.properties, http)?);
        let policy = BookingPolicy::from(&config.booking);

        let bookings = Arc::new(
            BookingService::new(
                Arc::new(SqliteBookingRepository::new(Arc::clone(&db))),
                Arc::clone(&availability),
                Arc::clone(&calendar),
                properties,
            )
            .with_clock(clock)
            .with_policy(policy),
        );

        info!(
            calendar_enabled = config.calendar.enabled,
            serialize_per_property = policy.serialize_per_property,
            cancellation_notice_hours = policy.cancellation_notice.num_hours(),
            "application context ready"
        );

        Ok(Self { config, db, availability, calendar, bookings })
    }

    /// Database connectivity plus calendar configuration state.
    pub async fn health_check(&self) -> HealthStatus {
        let db = Arc::clone(&self.db);
        let database = match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(err)) => ComponentHealth::unhealthy("database", err.to_string()),
            Err(err) => ComponentHealth::unhealthy("database", format!("health probe failed: {err}")),
        };

        let calendar = if self.config.calendar.enabled {
            ComponentHealth::healthy("calendar").non_critical()
        } else {
            ComponentHealth::unhealthy("calendar", "calendar integration is disabled").non_critical()
        };

        HealthStatus::from_components(vec![database, calendar])
    }
}
