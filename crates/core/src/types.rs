//! Gemeinsame Typen fuer den Geheimkanal

use serde::{Deserialize, Serialize};

/// Sentinel-Inhalt fuer verbrannte, unbekannte oder nicht erreichbare Notizen
///
/// Wird vom Remote-Store geliefert und vom Client wortgleich angezeigt.
pub const NO_NOTE_AVAILABLE: &str = "No note available";

/// Eine der beiden alternativen Klartext-Realitaeten einer Nachricht
///
/// Welche Realitaet beim Lesen ausgeliefert wird, entscheidet der
/// Remote-Store. Der Client kann nur einen Wunsch als Token-Suffix
/// (`-A` / `-B`) mitschicken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reality {
    /// Oberflaechen-Bedeutung
    A,
    /// Verborgene Bedeutung
    B,
}

impl Reality {
    /// Token-Suffix fuer diese Realitaet
    pub fn suffix(self) -> &'static str {
        match self {
            Reality::A => "-A",
            Reality::B => "-B",
        }
    }

    /// Liest ein Realitaets-Suffix am Ende eines Tokens
    pub fn aus_token(token: &str) -> Option<Self> {
        if token.ends_with("-A") {
            Some(Reality::A)
        } else if token.ends_with("-B") {
            Some(Reality::B)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Reality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reality::A => write!(f, "A"),
            Reality::B => write!(f, "B"),
        }
    }
}
