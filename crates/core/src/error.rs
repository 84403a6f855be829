//! Fehlertypen fuer den Geheimkanal
//!
//! Zentraler Fehler-Enum fuer Token-Pruefung, Transport und Kryptografie.
//! Auf dem Lesepfad werden alle Varianten zu derselben Anzeige
//! ("No note available") normalisiert, auf dem Sendepfad zu einem
//! scheinbaren Erfolg. Die Unterscheidung existiert nur fuer die lokale
//! Diagnose (tracing).

use thiserror::Error;

/// Result-Alias fuer den Geheimkanal
pub type ChannelResult<T> = std::result::Result<T, ChannelError>;

/// Alle Fehlerzustaende des Geheimkanals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    // --- Token ---
    #[error("Pruefzeichen stimmt nicht: erwartet={erwartet}, erhalten={erhalten}")]
    Validierung { erwartet: char, erhalten: char },

    // --- Transport ---
    #[error("Netzwerkfehler: {0}")]
    Netzwerk(String),

    #[error("Zeitlimit ueberschritten: {0}")]
    Zeitlimit(String),

    #[error("Rate-Limit des Remote-Stores erreicht")]
    RateLimitiert,

    // --- Kryptografie ---
    #[error("Kryptografiefehler: {0}")]
    Krypto(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),
}

impl ChannelError {
    /// Gibt true zurueck wenn der Fehler die Erreichbarkeit des Stores betrifft
    ///
    /// Zeitlimit und Rate-Limit zaehlen zur selben Klasse wie Transportfehler.
    pub fn ist_nicht_erreichbar(&self) -> bool {
        matches!(
            self,
            Self::Netzwerk(_) | Self::Zeitlimit(_) | Self::RateLimitiert
        )
    }

    /// Kurzer, geheimnisfreier Klassenname fuer Log-Felder
    pub fn klasse(&self) -> &'static str {
        match self {
            Self::Validierung { .. } => "validierung",
            Self::Netzwerk(_) => "netzwerk",
            Self::Zeitlimit(_) => "zeitlimit",
            Self::RateLimitiert => "rate_limit",
            Self::Krypto(_) => "krypto",
            Self::Konfiguration(_) => "konfiguration",
        }
    }
}
