//! # passierschein-observability
//!
//! Observability-Crate fuer Passierschein:
//! - Health-Check-Endpunkt (`/health`) mit periodischer DB-Pruefung
//! - Structured Logging via tracing-subscriber (Text oder JSON)
//! - Request-Timing Middleware

pub mod health;
pub mod logging;
pub mod middleware;

pub use health::{db_pruefung_starten, health_router, HealthResponse, HealthState, HealthStatus};
pub use logging::logging_initialisieren;
pub use middleware::timing_middleware;
