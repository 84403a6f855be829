//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `ZERO_LOG_LEVEL`: Log-Level (trace/debug/info/warn/error), Standard: info
//! - `ZERO_LOG_FORMAT`: Format (text/json), Standard: text
//!
//! Umgebungsvariablen haben Vorrang vor der Konfigurationsdatei.
//! HTTP-Interna (hyper, reqwest) werden auf `warn` gedrosselt.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "ZERO_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "ZERO_LOG_FORMAT";

/// Direktiven, die unabhaengig vom Level angehaengt werden
const GEDROSSELT: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Ungueltiges Log-Level: {0}")]
    UngueltigesLevel(String),

    #[error("Ungueltiges Log-Format: {0}")]
    UngueltigesFormat(String),

    #[error("Logging bereits initialisiert")]
    BereitsInitialisiert,
}

/// Ausgabeformat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            anders => Err(LoggingError::UngueltigesFormat(anders.to_string())),
        }
    }
}

/// Aufgeloeste Logging-Einstellung
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEinstellung {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogEinstellung {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LogEinstellung {
    /// Loest Level und Format auf: Umgebung vor Konfiguration
    ///
    /// `env` liefert den Wert einer Umgebungsvariable (in Tests ersetzbar).
    pub fn aufloesen(
        konfig_level: &str,
        konfig_format: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LoggingError> {
        let level = env(ENV_LOG_LEVEL).unwrap_or_else(|| konfig_level.to_string());
        if !log_level_gueltig(&level) {
            return Err(LoggingError::UngueltigesLevel(level));
        }

        let format = env(ENV_LOG_FORMAT)
            .unwrap_or_else(|| konfig_format.to_string())
            .parse()?;

        Ok(Self { level, format })
    }

    /// Wie `aufloesen`, mit der echten Prozess-Umgebung
    pub fn aus_umgebung(konfig_level: &str, konfig_format: &str) -> Result<Self, LoggingError> {
        Self::aufloesen(konfig_level, konfig_format, |name| std::env::var(name).ok())
    }

    /// Filter-Direktiven fuer den EnvFilter
    pub fn filter_direktiven(&self) -> String {
        format!("{},{}", self.level, GEDROSSELT)
    }
}

/// Initialisiert das Logging-System.
///
/// Darf pro Prozess genau einmal erfolgreich aufgerufen werden.
pub fn logging_initialisieren(einstellung: &LogEinstellung) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(einstellung.filter_direktiven())
        .map_err(|_| LoggingError::UngueltigesLevel(einstellung.level.clone()))?;

    let ergebnis = match einstellung.format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init(),
    };

    ergebnis.map_err(|_| LoggingError::BereitsInitialisiert)
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_aus(paare: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = paare
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn log_level_gueltige_werte() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(log_level_gueltig(level));
        }
    }

    #[test]
    fn log_level_ungueltige_werte() {
        assert!(!log_level_gueltig("verbose"));
        assert!(!log_level_gueltig("INFO")); // Gross-/Kleinschreibung
        assert!(!log_level_gueltig(""));
    }

    #[test]
    fn format_parsen() {
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("JSON".parse::<LogFormat>().is_err());
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn konfiguration_ohne_umgebung() {
        let e = LogEinstellung::aufloesen("debug", "json", env_aus(&[])).unwrap();
        assert_eq!(e.level, "debug");
        assert_eq!(e.format, LogFormat::Json);
    }

    #[test]
    fn umgebung_hat_vorrang() {
        let env = env_aus(&[("ZERO_LOG_LEVEL", "trace"), ("ZERO_LOG_FORMAT", "text")]);
        let e = LogEinstellung::aufloesen("warn", "json", env).unwrap();
        assert_eq!(e.level, "trace");
        assert_eq!(e.format, LogFormat::Text);
    }

    #[test]
    fn ungueltige_werte_werden_abgelehnt() {
        let env = env_aus(&[("ZERO_LOG_LEVEL", "laut")]);
        assert_eq!(
            LogEinstellung::aufloesen("info", "text", env),
            Err(LoggingError::UngueltigesLevel("laut".into()))
        );
        assert!(LogEinstellung::aufloesen("info", "yaml", env_aus(&[])).is_err());
    }

    #[test]
    fn http_interna_werden_gedrosselt() {
        let d = LogEinstellung::default().filter_direktiven();
        assert!(d.starts_with("info,"));
        assert!(d.contains("reqwest=warn"));
    }
}
