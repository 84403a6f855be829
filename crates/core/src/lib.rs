//! zero-core – Gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die von allen anderen
//! Zero-Crates gemeinsam genutzt werden: die Fehler-Taxonomie des
//! Geheimkanals und die Realitaets-Auswahl.

pub mod error;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{ChannelError, ChannelResult};
pub use types::{Reality, NO_NOTE_AVAILABLE};
