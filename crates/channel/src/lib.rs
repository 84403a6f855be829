//! zero-channel – Das Geheimkanal-Protokoll
//!
//! Dieses Crate implementiert:
//! - `ChannelService`: Senden (zwei Realitaeten, clientseitig verschluesselt)
//!   und Lesen (Token + Schluessel-Fragment, Sentinel-Normalisierung)
//! - `DuressGuard`: Codewort-Erkennung mit Decoy-Inhalt und stiller Panik-Meldung
//! - `NoiseGenerator`: Abbrechbarer Hintergrund-Task fuer Rausch-Anfragen
//! - `RemoteStore`-Trait + `HttpRemoteStore` (reqwest)
//! - `ComposeSession` / `ReaderSession`: Ansichtszustand, der beim Schliessen genullt wird
//!
//! # Beispiel
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use zero_channel::{ChannelService, HttpRemoteStore, NoiseGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(
//!         HttpRemoteStore::neu("http://localhost:8080/api", Duration::from_secs(15)).unwrap(),
//!     );
//!     let service = ChannelService::neu(store.clone());
//!     let rauschen = NoiseGenerator::neu(store).starten();
//!
//!     let quittung = service
//!         .send("ops at 5pm", "dinner at 5pm", "TX-server7", "RX-eagle784-O")
//!         .await;
//!     if let Some(link) = quittung.link() {
//!         println!("{}", link.anzeigen().as_str());
//!     }
//!
//!     rauschen.stoppen().await;
//! }
//! ```

pub mod duress;
pub mod http;
pub mod noise;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

// Bequeme Re-Exporte
pub use duress::{DuressGuard, DECOY_INHALT, DURESS_CODEWORT};
pub use http::HttpRemoteStore;
pub use noise::{NoiseGenerator, NoiseHandle, NoiseIntervall};
pub use service::{ChannelService, ReadContract, ReadOutcome, SendReceipt};
pub use session::{ComposeSession, ReaderSession};
pub use store::RemoteStore;
