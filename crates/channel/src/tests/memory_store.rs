//! In-Memory-Double fuer den Remote-Store
//!
//! Verhaelt sich wie der echte Store (zwei Realitaeten pro Token, Suffix
//! waehlt, erstes Lesen verbrennt) und zeichnet alle Anfragen auf.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use zero_core::{ChannelError, ChannelResult, Reality};
use zero_protocol::{ReadRequest, ReadResponse, SendRequest};

use crate::store::RemoteStore;

/// Verhalten des Doubles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modus {
    Normal,
    /// Jede Anfrage scheitert mit einem Transportfehler
    Offline,
    /// Lese-Anfragen werden mit 429 beantwortet
    RateLimit,
    /// Jede Anfrage haengt (bis das Zeitlimit greift)
    Haengt,
    /// Jede Anfrage dauert so lange
    Langsam(Duration),
}

#[derive(Debug)]
pub struct MemoryStore {
    modus: Mutex<Modus>,
    notizen: Mutex<HashMap<String, (String, String)>>,
    pub sends: Mutex<Vec<SendRequest>>,
    pub reads: Mutex<Vec<(Instant, String)>>,
    pub panics: AtomicUsize,
    pub heartbeats: AtomicUsize,
}

impl MemoryStore {
    pub fn neu() -> Self {
        Self::mit_modus(Modus::Normal)
    }

    pub fn mit_modus(modus: Modus) -> Self {
        Self {
            modus: Mutex::new(modus),
            notizen: Mutex::new(HashMap::new()),
            sends: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
            panics: AtomicUsize::new(0),
            heartbeats: AtomicUsize::new(0),
        }
    }

    pub fn modus_setzen(&self, modus: Modus) {
        *self.modus.lock().unwrap() = modus;
    }

    /// Legt eine Notiz direkt ab (ohne Sendepfad)
    pub fn ablegen(&self, token: &str, a: &str, b: &str) {
        self.notizen
            .lock()
            .unwrap()
            .insert(token.to_string(), (a.to_string(), b.to_string()));
    }

    pub fn read_anzahl(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    pub fn read_zeitpunkte(&self) -> Vec<Instant> {
        self.reads.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn panic_anzahl(&self) -> usize {
        self.panics.load(Ordering::SeqCst)
    }

    /// Verhalten vor jeder Anfrage anwenden
    async fn verhalten(&self, ist_lesen: bool) -> ChannelResult<()> {
        let modus = *self.modus.lock().unwrap();
        match modus {
            Modus::Normal => Ok(()),
            Modus::Offline => Err(ChannelError::Netzwerk("connection refused".into())),
            Modus::RateLimit if ist_lesen => Err(ChannelError::RateLimitiert),
            Modus::RateLimit => Ok(()),
            Modus::Haengt => std::future::pending().await,
            Modus::Langsam(dauer) => {
                tokio::time::sleep(dauer).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn send(&self, anfrage: &SendRequest) -> ChannelResult<()> {
        self.sends.lock().unwrap().push(anfrage.clone());
        self.verhalten(false).await?;
        self.ablegen(&anfrage.rx_token, &anfrage.reality_a, &anfrage.reality_b);
        Ok(())
    }

    async fn read(&self, anfrage: &ReadRequest) -> ChannelResult<ReadResponse> {
        self.reads
            .lock()
            .unwrap()
            .push((Instant::now(), anfrage.rx_token.clone()));
        self.verhalten(true).await?;

        let token = anfrage.rx_token.as_str();
        let (basis, realitaet) = match Reality::aus_token(token) {
            Some(r) => (&token[..token.len() - r.suffix().len()], r),
            None => (token, Reality::A),
        };

        let notiz = self.notizen.lock().unwrap().remove(basis);
        Ok(match notiz {
            Some((a, _)) if realitaet == Reality::A => ReadResponse::neu(a),
            Some((_, b)) => ReadResponse::neu(b),
            None => ReadResponse::nicht_verfuegbar(),
        })
    }

    async fn panic(&self) -> ChannelResult<()> {
        self.panics.fetch_add(1, Ordering::SeqCst);
        self.verhalten(false).await
    }

    async fn heartbeat(&self) -> ChannelResult<()> {
        self.heartbeats.fetch_add(1, Ordering::SeqCst);
        self.verhalten(false).await
    }
}
