//! # zero-observability
//!
//! Logging-Setup fuer den Zero-Client:
//! - Structured Logging via tracing-subscriber (Text oder JSON)
//! - Konfiguration per `ZERO_LOG_LEVEL` / `ZERO_LOG_FORMAT` mit Fallback
//!   auf die Konfigurationsdatei
//!
//! Ausgaben gehen nach stderr; stdout bleibt fuer Links und Notizen frei.

pub mod logging;

pub use logging::{
    log_level_gueltig, logging_initialisieren, LogEinstellung, LogFormat, LoggingError,
    ENV_LOG_FORMAT, ENV_LOG_LEVEL,
};
