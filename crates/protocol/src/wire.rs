//! Wire-Typen fuer den Remote-Store (JSON ueber HTTP)
//!
//! ## Endpunkte
//!
//! ```text
//! POST {basis}/send       {realityA, realityB, txToken, rxToken} -> Quittung (Text)
//! POST {basis}/read       {rxToken}                              -> {content, padding?}
//! POST {basis}/panic      (kein Body)                            -> Quittung
//! POST {basis}/heartbeat  (kein Body)                            -> Quittung
//! ```
//!
//! Der Store antwortet auf Lese-Anfragen mit fester Groesse; `padding` ist
//! reiner Fuellstoff und wird ignoriert. Status 429 signalisiert Rate-Limit.

use serde::{Deserialize, Serialize};
use zero_core::NO_NOTE_AVAILABLE;

pub const ENDPOINT_SEND: &str = "send";
pub const ENDPOINT_READ: &str = "read";
pub const ENDPOINT_PANIC: &str = "panic";
pub const ENDPOINT_HEARTBEAT: &str = "heartbeat";

/// Sende-Anfrage: zwei verschluesselte Realitaeten plus Token-Paar
///
/// Enthaelt nie Klartext und nie Schluesselmaterial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub reality_a: String,
    pub reality_b: String,
    pub tx_token: String,
    pub rx_token: String,
}

/// Lese-Anfrage (auch Form der Rausch-Anfragen)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRequest {
    pub rx_token: String,
}

impl ReadRequest {
    pub fn neu(rx_token: impl Into<String>) -> Self {
        Self {
            rx_token: rx_token.into(),
        }
    }
}

/// Lese-Antwort des Remote-Stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub padding: String,
}

impl ReadResponse {
    pub fn neu(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            padding: String::new(),
        }
    }

    /// Antwort fuer verbrannte oder unbekannte Notizen
    pub fn nicht_verfuegbar() -> Self {
        Self::neu(NO_NOTE_AVAILABLE)
    }

    /// Ist der Inhalt der Sentinel?
    pub fn ist_verbrannt(&self) -> bool {
        self.content == NO_NOTE_AVAILABLE
    }
}
