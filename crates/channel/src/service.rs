//! ChannelService – Senden und Lesen ueber den Geheimkanal
//!
//! ## Senden
//! Frischer Schluessel -> beide Realitaeten verschluesseln -> Blobs und
//! Tokens an den Store -> Link `<rxToken>#<fragment>` genau einmal anzeigen.
//! Der Schluessel verlaesst den Client ausschliesslich im Link.
//!
//! ## Lesen
//! Duress-Pruefung -> Link am ersten `#` zerlegen -> nur den Token senden ->
//! Antwort je nach `ReadContract` anzeigen. Jeder Fehlerfall (Sentinel,
//! Netzwerk, Rate-Limit, Zeitlimit, Krypto) endet im selben
//! `ReadOutcome::NichtVerfuegbar`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use zero_core::{ChannelError, ChannelResult, NO_NOTE_AVAILABLE};
use zero_crypto::{Aes256GcmProvider, CryptoProvider};
use zero_protocol::{checksum_hint, split_link, Link, ReadRequest, SendRequest};
use zeroize::Zeroizing;

use crate::duress::DuressGuard;
use crate::store::RemoteStore;

/// Standard-Zeitlimit pro Store-Anfrage
pub const STANDARD_ZEITLIMIT: Duration = Duration::from_secs(15);

/// Meldung, die der Sender nach jedem Absenden sieht
pub const ERFOLGS_MELDUNG: &str = "Note Secured";

/// Wie der Lese-Inhalt des Stores zu deuten ist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadContract {
    /// Inhalt ist der gespeicherte Blob; Entschluesselung mit dem Link-Fragment
    #[default]
    ClientDecrypt,
    /// Inhalt ist bereits Klartext und wird unveraendert angezeigt
    ServerResolved,
}

// ---------------------------------------------------------------------------
// Ergebnisse
// ---------------------------------------------------------------------------

/// Ergebnis eines Sendevorgangs
///
/// Der Sender sieht immer `ERFOLGS_MELDUNG`. Ein Link existiert nur, wenn
/// der Store die Notiz tatsaechlich angenommen hat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendReceipt {
    link: Option<Link>,
}

impl SendReceipt {
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn meldung(&self) -> &'static str {
        ERFOLGS_MELDUNG
    }

    /// Nullt den Link (Fragment) sofort
    pub fn vergessen(&mut self) {
        self.link = None;
    }
}

/// Ergebnis eines Lesevorgangs
#[derive(Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Anzuzeigender Inhalt (Klartext, ggf. Decoy)
    Inhalt(Zeroizing<String>),
    /// Verbrannt, unbekannt oder fehlgeschlagen
    NichtVerfuegbar,
}

impl ReadOutcome {
    /// Text, den der Leser sieht
    pub fn anzeige(&self) -> &str {
        match self {
            Self::Inhalt(text) => text.as_str(),
            Self::NichtVerfuegbar => NO_NOTE_AVAILABLE,
        }
    }

    pub fn ist_verfuegbar(&self) -> bool {
        matches!(self, Self::Inhalt(_))
    }
}

impl std::fmt::Debug for ReadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inhalt(_) => f.write_str("Inhalt([REDACTED])"),
            Self::NichtVerfuegbar => f.write_str("NichtVerfuegbar"),
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Sende-/Lese-Service des Clients
#[derive(Clone)]
pub struct ChannelService {
    store: Arc<dyn RemoteStore>,
    crypto: Arc<dyn CryptoProvider>,
    vertrag: ReadContract,
    duress: DuressGuard,
    zeitlimit: Duration,
    /// Laufende Panik-Meldungen (geteilt zwischen Klonen)
    meldungen: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ChannelService {
    /// Service mit AES-256-GCM, `ClientDecrypt` und Standard-Zeitlimit
    pub fn neu(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            crypto: Arc::new(Aes256GcmProvider),
            vertrag: ReadContract::default(),
            duress: DuressGuard::default(),
            zeitlimit: STANDARD_ZEITLIMIT,
            meldungen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn mit_crypto(mut self, crypto: Arc<dyn CryptoProvider>) -> Self {
        self.crypto = crypto;
        self
    }

    pub fn mit_vertrag(mut self, vertrag: ReadContract) -> Self {
        self.vertrag = vertrag;
        self
    }

    pub fn mit_duress(mut self, duress: DuressGuard) -> Self {
        self.duress = duress;
        self
    }

    pub fn mit_zeitlimit(mut self, zeitlimit: Duration) -> Self {
        self.zeitlimit = zeitlimit;
        self
    }

    pub fn vertrag(&self) -> ReadContract {
        self.vertrag
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    /// Sendet eine Notiz mit zwei Realitaeten
    ///
    /// Der Aufrufer sieht in jedem Fall Erfolg; Fehler landen nur im Log.
    pub async fn send(
        &self,
        reality_a: &str,
        reality_b: &str,
        tx_token: &str,
        rx_token: &str,
    ) -> SendReceipt {
        if let Some(hinweis) = checksum_hint(rx_token) {
            tracing::debug!(fehler = %hinweis, "Empfaenger-Token mit ungueltiger Pruefziffer");
        }

        match self.try_send(reality_a, reality_b, tx_token, rx_token).await {
            Ok(link) => {
                tracing::debug!(token = %link.token(), "Notiz abgelegt");
                SendReceipt { link: Some(link) }
            }
            Err(e) => {
                tracing::warn!(klasse = e.klasse(), fehler = %e, "Senden fehlgeschlagen");
                SendReceipt::default()
            }
        }
    }

    async fn try_send(
        &self,
        reality_a: &str,
        reality_b: &str,
        tx_token: &str,
        rx_token: &str,
    ) -> ChannelResult<Link> {
        let key = self.crypto.generate_key()?;
        let fragment = self.crypto.export_key(&key);
        let blob_a = self.crypto.encrypt(reality_a, &key)?;
        let blob_b = self.crypto.encrypt(reality_b, &key)?;
        key.vernichten();

        let anfrage = SendRequest {
            reality_a: blob_a.into_string(),
            reality_b: blob_b.into_string(),
            tx_token: tx_token.to_string(),
            rx_token: rx_token.to_string(),
        };
        self.begrenzt(self.store.send(&anfrage)).await?;

        Ok(Link::neu(rx_token, fragment))
    }

    /// Liest eine Notiz anhand einer Nutzereingabe (Link, Token oder Codewort)
    ///
    /// Muss innerhalb einer Tokio-Runtime gepollt werden. Beim Codewort
    /// kehrt der Aufruf sofort mit dem Decoy zurueck; die Panik-Meldung
    /// laeuft weiter, bis `ausstehende_meldungen_abwarten` sie einsammelt.
    pub async fn read(&self, eingabe: &str) -> ReadOutcome {
        if let Some((decoy, meldung)) = self.duress.pruefen(eingabe, &self.store, self.zeitlimit) {
            if let Some(meldung) = meldung {
                let mut meldungen = self.meldungen.lock().await;
                meldungen.retain(|m| !m.is_finished());
                meldungen.push(meldung);
            }
            return ReadOutcome::Inhalt(decoy);
        }

        match self.try_read(eingabe).await {
            Ok(ergebnis) => ergebnis,
            Err(e) => {
                tracing::debug!(klasse = e.klasse(), "Lesen fehlgeschlagen");
                ReadOutcome::NichtVerfuegbar
            }
        }
    }

    async fn try_read(&self, eingabe: &str) -> ChannelResult<ReadOutcome> {
        let (token, fragment) = split_link(eingabe);
        let antwort = self.begrenzt(self.store.read(&ReadRequest::neu(token))).await?;

        if antwort.ist_verbrannt() {
            return Ok(ReadOutcome::NichtVerfuegbar);
        }

        match self.vertrag {
            ReadContract::ServerResolved => Ok(ReadOutcome::Inhalt(Zeroizing::new(antwort.content))),
            ReadContract::ClientDecrypt => {
                let fragment = fragment
                    .ok_or_else(|| ChannelError::Krypto("Link ohne Schluessel-Fragment".into()))?;
                let key = self.crypto.import_key(fragment)?;
                let klartext = self.crypto.decrypt(&antwort.content, &key)?;
                key.vernichten();
                Ok(ReadOutcome::Inhalt(Zeroizing::new(klartext)))
            }
        }
    }

    /// Wartet auf noch laufende Panik-Meldungen, hoechstens `zeitlimit`
    ///
    /// Vor dem Beenden der Runtime aufrufen, sonst werden Meldungen
    /// abgebrochen, bevor sie den Store erreichen. Liefert die Anzahl der
    /// abgeschlossenen Meldungen.
    pub async fn ausstehende_meldungen_abwarten(&self, zeitlimit: Duration) -> usize {
        let meldungen: Vec<_> = self.meldungen.lock().await.drain(..).collect();
        if meldungen.is_empty() {
            return 0;
        }

        let frist = tokio::time::Instant::now() + zeitlimit;
        let mut fertig = 0;
        for meldung in meldungen {
            match tokio::time::timeout_at(frist, meldung).await {
                Ok(_) => fertig += 1,
                Err(_) => tracing::trace!("Panik-Meldung beim Beenden noch offen"),
            }
        }
        fertig
    }

    /// Lebenszeichen an den Store
    pub async fn heartbeat(&self) -> ChannelResult<()> {
        self.begrenzt(self.store.heartbeat()).await
    }

    /// Begrenzt eine Store-Anfrage auf das Zeitlimit
    async fn begrenzt<T>(&self, anfrage: impl Future<Output = ChannelResult<T>>) -> ChannelResult<T> {
        tokio::time::timeout(self.zeitlimit, anfrage)
            .await
            .map_err(|_| ChannelError::Zeitlimit(format!("{} ms", self.zeitlimit.as_millis())))?
    }
}

impl std::fmt::Debug for ChannelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelService")
            .field("vertrag", &self.vertrag)
            .field("zeitlimit", &self.zeitlimit)
            .finish_non_exhaustive()
    }
}
