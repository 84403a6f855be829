//! Client-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Client ohne Konfigurationsdatei
//! lauffaehig ist. `ZERO_REMOTE_URL` ueberschreibt die Basis-URL.

use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use zero_channel::{NoiseIntervall, ReadContract};

pub const ENV_CONFIG: &str = "ZERO_CONFIG";
pub const ENV_REMOTE_URL: &str = "ZERO_REMOTE_URL";
pub const STANDARD_PFAD: &str = "zero.toml";

/// Vollstaendige Client-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeroConfig {
    /// Remote-Store
    pub remote: RemoteEinstellungen,
    /// Rausch-Generator
    pub rauschen: RauschEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Remote-Store-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteEinstellungen {
    /// Basis-URL, an die `send`, `read`, `panic` und `heartbeat` angehaengt werden
    pub basis_url: String,
    /// Zeitlimit pro Anfrage in Millisekunden
    pub zeitlimit_ms: u64,
    /// Deutung des Lese-Inhalts: "client_decrypt" oder "server_resolved"
    pub lese_vertrag: ReadContract,
}

impl Default for RemoteEinstellungen {
    fn default() -> Self {
        Self {
            basis_url: "http://localhost:8080/api".into(),
            zeitlimit_ms: 15_000,
            lese_vertrag: ReadContract::ClientDecrypt,
        }
    }
}

/// Rausch-Generator-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RauschEinstellungen {
    pub aktiviert: bool,
    /// Kleinster Abstand zwischen zwei Rausch-Anfragen
    pub min_ms: u64,
    /// Groesster Abstand (exklusiv)
    pub max_ms: u64,
}

impl Default for RauschEinstellungen {
    fn default() -> Self {
        Self {
            aktiviert: true,
            min_ms: 45_000,
            max_ms: 90_000,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl ZeroConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Uebernimmt Ueberschreibungen aus der Umgebung
    pub fn umgebung_anwenden(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(ENV_REMOTE_URL) {
            self.remote.basis_url = url;
        }
    }

    /// Prueft die Werte auf Plausibilitaet
    pub fn validieren(&self) -> Result<()> {
        if self.remote.basis_url.trim().is_empty() {
            bail!("remote.basis_url darf nicht leer sein");
        }
        if self.remote.zeitlimit_ms == 0 {
            bail!("remote.zeitlimit_ms muss groesser als 0 sein");
        }
        if self.rauschen.min_ms == 0 || self.rauschen.min_ms >= self.rauschen.max_ms {
            bail!(
                "rauschen.min_ms ({}) muss groesser als 0 und kleiner als rauschen.max_ms ({}) sein",
                self.rauschen.min_ms,
                self.rauschen.max_ms
            );
        }
        Ok(())
    }

    pub fn zeitlimit(&self) -> Duration {
        Duration::from_millis(self.remote.zeitlimit_ms)
    }

    pub fn rausch_intervall(&self) -> Result<NoiseIntervall> {
        Ok(NoiseIntervall::neu(
            Duration::from_millis(self.rauschen.min_ms),
            Duration::from_millis(self.rauschen.max_ms),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ZeroConfig::default();
        assert_eq!(cfg.remote.basis_url, "http://localhost:8080/api");
        assert_eq!(cfg.remote.lese_vertrag, ReadContract::ClientDecrypt);
        assert_eq!(cfg.zeitlimit(), Duration::from_secs(15));
        assert_eq!(cfg.rausch_intervall().unwrap(), NoiseIntervall::STANDARD);
        assert!(cfg.validieren().is_ok());
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [remote]
            basis_url = "https://notes.example.org/api"
            lese_vertrag = "server_resolved"

            [rauschen]
            aktiviert = false
        "#;
        let cfg: ZeroConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.remote.basis_url, "https://notes.example.org/api");
        assert_eq!(cfg.remote.lese_vertrag, ReadContract::ServerResolved);
        assert!(!cfg.rauschen.aktiviert);
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.remote.zeitlimit_ms, 15_000);
        assert_eq!(cfg.rauschen.min_ms, 45_000);
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn fehlende_datei_liefert_standardwerte() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("gibt-es-nicht.toml");
        let cfg = ZeroConfig::laden(pfad.to_str().unwrap()).unwrap();
        assert_eq!(cfg.remote.zeitlimit_ms, 15_000);
    }

    #[test]
    fn datei_wird_gelesen() {
        let mut datei = tempfile::NamedTempFile::new().unwrap();
        writeln!(datei, "[remote]\nzeitlimit_ms = 2500").unwrap();
        let cfg = ZeroConfig::laden(datei.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.zeitlimit(), Duration::from_millis(2500));
    }

    #[test]
    fn kaputte_datei_ist_ein_fehler() {
        let mut datei = tempfile::NamedTempFile::new().unwrap();
        writeln!(datei, "[remote\nbasis_url = ").unwrap();
        assert!(ZeroConfig::laden(datei.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn umgebung_ueberschreibt_url() {
        let mut cfg = ZeroConfig::default();
        cfg.umgebung_anwenden(|name| {
            (name == "ZERO_REMOTE_URL").then(|| "http://10.0.0.2:9000/api".to_string())
        });
        assert_eq!(cfg.remote.basis_url, "http://10.0.0.2:9000/api");

        let mut cfg = ZeroConfig::default();
        cfg.umgebung_anwenden(|_| None);
        assert_eq!(cfg.remote.basis_url, "http://localhost:8080/api");
    }

    #[test]
    fn validierung_lehnt_unsinn_ab() {
        let mut cfg = ZeroConfig::default();
        cfg.remote.basis_url = "  ".into();
        assert!(cfg.validieren().is_err());

        let mut cfg = ZeroConfig::default();
        cfg.remote.zeitlimit_ms = 0;
        assert!(cfg.validieren().is_err());

        let mut cfg = ZeroConfig::default();
        cfg.rauschen.min_ms = 90_000;
        assert!(cfg.validieren().is_err());
        assert!(cfg.rausch_intervall().is_err());
    }
}
