//! Duress-Override
//!
//! Wird statt eines Links das Codewort eingegeben, zeigt der Client einen
//! harmlosen Decoy-Inhalt und meldet im Hintergrund still eine Panik an den
//! Remote-Store. Der Vergleich ist exakt (gross-/kleinschreibungssensitiv,
//! kein Trimmen) und findet vor jeder Link-Zerlegung statt. Die Anzeige
//! haengt weder von der Erreichbarkeit noch von der Antwort des Stores ab.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use zeroize::Zeroizing;

use crate::store::RemoteStore;

pub const DURESS_CODEWORT: &str = "agent457";
pub const DECOY_INHALT: &str = "My bank PIN is 1234";

/// Erkennt das Codewort und liefert den Decoy
#[derive(Debug, Clone)]
pub struct DuressGuard {
    codewort: String,
    decoy: String,
}

impl Default for DuressGuard {
    fn default() -> Self {
        Self {
            codewort: DURESS_CODEWORT.to_string(),
            decoy: DECOY_INHALT.to_string(),
        }
    }
}

impl DuressGuard {
    pub fn neu(codewort: impl Into<String>, decoy: impl Into<String>) -> Self {
        Self {
            codewort: codewort.into(),
            decoy: decoy.into(),
        }
    }

    pub fn ist_codewort(&self, eingabe: &str) -> bool {
        eingabe == self.codewort
    }

    /// Prueft die Eingabe; bei Treffer wird die Panik gemeldet und der Decoy geliefert
    ///
    /// Die Meldung laeuft im Hintergrund und ist auf `zeitlimit` begrenzt.
    /// Das zurueckgegebene Handle (falls eine Runtime laeuft) erlaubt es,
    /// vor dem Beenden des Prozesses auf die Zustellung zu warten.
    pub fn pruefen(
        &self,
        eingabe: &str,
        store: &Arc<dyn RemoteStore>,
        zeitlimit: Duration,
    ) -> Option<(Zeroizing<String>, Option<JoinHandle<()>>)> {
        if !self.ist_codewort(eingabe) {
            return None;
        }

        let meldung = panik_melden(Arc::clone(store), zeitlimit);
        Some((Zeroizing::new(self.decoy.clone()), meldung))
    }
}

/// Feuert genau eine Panik-Meldung im Hintergrund ab
///
/// Fehler und Zeitueberschreitung werden verworfen und nur auf Trace-Ebene
/// notiert. Ohne laufende Tokio-Runtime wird nichts gesendet.
pub fn panik_melden(store: Arc<dyn RemoteStore>, zeitlimit: Duration) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::debug!("Keine Tokio-Runtime, Panik-Meldung entfaellt");
        return None;
    };

    Some(runtime.spawn(async move {
        match tokio::time::timeout(zeitlimit, store.panic()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::trace!(klasse = e.klasse(), "Panik-Meldung nicht zugestellt"),
            Err(_) => tracing::trace!("Panik-Meldung abgelaufen"),
        }
    }))
}
