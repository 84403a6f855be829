//! zero-app – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Remote-Store, Kanal-Service und
//! Rausch-Generator fuer das Binary `zero`.

pub mod config;

use std::sync::Arc;

use anyhow::Result;
use config::ZeroConfig;
use zeroize::Zeroizing;
use zero_channel::{ChannelService, HttpRemoteStore, NoiseGenerator, ReaderSession, RemoteStore};

/// Haelt den verdrahteten Client-Zustand zusammen
pub struct App {
    pub config: ZeroConfig,
    store: Arc<dyn RemoteStore>,
    service: ChannelService,
}

impl App {
    /// Erstellt den Client aus einer (validierten) Konfiguration
    pub fn neu(config: ZeroConfig) -> Result<Self> {
        config.validieren()?;

        let store: Arc<dyn RemoteStore> = Arc::new(HttpRemoteStore::neu(
            config.remote.basis_url.clone(),
            config.zeitlimit(),
        )?);
        let service = ChannelService::neu(Arc::clone(&store))
            .mit_vertrag(config.remote.lese_vertrag)
            .mit_zeitlimit(config.zeitlimit());

        tracing::debug!(
            basis_url = %config.remote.basis_url,
            vertrag = ?config.remote.lese_vertrag,
            "Client verdrahtet"
        );

        Ok(Self {
            config,
            store,
            service,
        })
    }

    pub fn service(&self) -> &ChannelService {
        &self.service
    }

    /// Liest eine Eingabe wie die Lese-Ansicht (Hinweis, Oeffnen, Schliessen)
    ///
    /// Liefert den optionalen Tippfehler-Hinweis und den anzuzeigenden Text.
    pub async fn lesen(&self, eingabe: &str) -> (Option<&'static str>, Option<Zeroizing<String>>) {
        let mut sitzung = ReaderSession::neu();
        sitzung.eingabe_aendern(eingabe);
        let hinweis = sitzung.hinweis_text();
        let anzeige = sitzung
            .oeffnen(&self.service)
            .await
            .map(|ergebnis| Zeroizing::new(ergebnis.anzeige().to_string()));
        sitzung.schliessen();
        (hinweis, anzeige)
    }

    /// Vor dem Beenden: laufende Panik-Meldungen zustellen lassen
    pub async fn abschliessen(&self) {
        let fertig = self
            .service
            .ausstehende_meldungen_abwarten(self.config.zeitlimit())
            .await;
        tracing::trace!(fertig, "Hintergrund-Meldungen abgeschlossen");
    }

    /// Rausch-Generator mit den konfigurierten Grenzen
    pub fn rausch_generator(&self) -> Result<NoiseGenerator> {
        Ok(NoiseGenerator::neu(Arc::clone(&self.store))
            .mit_intervall(self.config.rausch_intervall()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_aus_standardkonfiguration() {
        let app = App::neu(ZeroConfig::default()).unwrap();
        assert_eq!(
            app.service().vertrag(),
            zero_channel::ReadContract::ClientDecrypt
        );
    }

    #[test]
    fn ungueltige_konfiguration_wird_abgelehnt() {
        let mut config = ZeroConfig::default();
        config.remote.zeitlimit_ms = 0;
        assert!(App::neu(config).is_err());
    }
}
