//! Rausch-Generator
//!
//! Schickt in zufaelligen Abstaenden Lese-Anfragen mit Zufalls-Tokens an den
//! Remote-Store, damit echte Lesezugriffe im Verkehrsmuster untergehen.
//! Der Abstand wird ab dem Absenden der vorigen Anfrage gemessen und ist
//! gleichverteilt in `[min, max)`. Antworten und Fehler werden verworfen.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use zero_core::{ChannelError, ChannelResult};
use zero_protocol::{generate_noise_token, ReadRequest};

use crate::store::RemoteStore;

/// Grenzen des Rausch-Intervalls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseIntervall {
    min: Duration,
    max: Duration,
}

impl NoiseIntervall {
    pub const STANDARD: Self = Self {
        min: Duration::from_millis(45_000),
        max: Duration::from_millis(90_000),
    };

    /// Erstellt ein Intervall; `min` muss echt kleiner als `max` sein
    pub fn neu(min: Duration, max: Duration) -> ChannelResult<Self> {
        if min.is_zero() || min >= max {
            return Err(ChannelError::Konfiguration(format!(
                "Ungueltiges Rausch-Intervall: {} ms .. {} ms",
                min.as_millis(),
                max.as_millis()
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Zieht einen Abstand gleichverteilt aus `[min, max)`
    pub fn ziehen(&self) -> Duration {
        let nanos = rand::thread_rng().gen_range(self.min.as_nanos()..self.max.as_nanos());
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for NoiseIntervall {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Konfigurierter, noch nicht gestarteter Generator
pub struct NoiseGenerator {
    store: Arc<dyn RemoteStore>,
    intervall: NoiseIntervall,
}

impl NoiseGenerator {
    pub fn neu(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            intervall: NoiseIntervall::STANDARD,
        }
    }

    pub fn mit_intervall(mut self, intervall: NoiseIntervall) -> Self {
        self.intervall = intervall;
        self
    }

    /// Startet den Hintergrund-Task
    ///
    /// Der Task laeuft, bis `NoiseHandle::stoppen` aufgerufen oder das
    /// Handle gedroppt wird.
    pub fn starten(self) -> NoiseHandle {
        let (stopp_tx, stopp_rx) = watch::channel(false);
        let task = tokio::spawn(rausch_schleife(self.store, self.intervall, stopp_rx));

        tracing::debug!(
            min_ms = self.intervall.min.as_millis() as u64,
            max_ms = self.intervall.max.as_millis() as u64,
            "Rausch-Generator gestartet"
        );

        NoiseHandle {
            stopp_tx,
            task: Some(task),
        }
    }
}

/// Handle auf den laufenden Generator
pub struct NoiseHandle {
    stopp_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl NoiseHandle {
    /// Stoppt den Generator und wartet auf das Ende des Tasks
    ///
    /// Eine gerade laufende Rausch-Anfrage wird abgebrochen; danach wird
    /// keine weitere mehr abgeschickt.
    pub async fn stoppen(mut self) {
        let _ = self.stopp_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        tracing::debug!("Rausch-Generator gestoppt");
    }

    pub fn ist_aktiv(&self) -> bool {
        !*self.stopp_tx.borrow()
            && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for NoiseHandle {
    fn drop(&mut self) {
        let _ = self.stopp_tx.send(true);
    }
}

async fn rausch_schleife(
    store: Arc<dyn RemoteStore>,
    intervall: NoiseIntervall,
    mut stopp_rx: watch::Receiver<bool>,
) {
    let mut anker = Instant::now();

    loop {
        let abstand = intervall.ziehen();

        tokio::select! {
            _ = stopp_rx.changed() => break,
            _ = tokio::time::sleep_until(anker + abstand) => {}
        }

        anker = Instant::now();
        let anfrage = ReadRequest::neu(generate_noise_token());

        // Jede Anfrage endet spaetestens vor dem fruehesten naechsten Termin
        tokio::select! {
            _ = stopp_rx.changed() => break,
            ergebnis = tokio::time::timeout(intervall.min, store.read(&anfrage)) => {
                match ergebnis {
                    Ok(Ok(_)) => tracing::trace!("Rausch-Anfrage beantwortet"),
                    Ok(Err(e)) => tracing::trace!(klasse = e.klasse(), "Rausch-Anfrage fehlgeschlagen"),
                    Err(_) => tracing::trace!("Rausch-Anfrage abgelaufen"),
                }
            }
        }
    }
}
