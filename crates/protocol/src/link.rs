//! Link-Format `<empfaengerToken>#<base64url(schluessel)>`
//!
//! Der Link wird genau einmal angezeigt und vom Nutzer ausserhalb des
//! Kanals weitergegeben. Er wird nie gespeichert und nie gesendet; der
//! Remote-Store sieht nur den Teil vor dem `#`.

use zeroize::Zeroizing;

/// Trennzeichen zwischen Token und Schluessel-Fragment
pub const FRAGMENT_TRENNER: char = '#';

/// Vollstaendiger Link aus Empfaenger-Token und Schluessel-Fragment
#[derive(Clone, PartialEq, Eq)]
pub struct Link {
    token: String,
    fragment: Zeroizing<String>,
}

impl Link {
    pub fn neu(token: impl Into<String>, fragment: Zeroizing<String>) -> Self {
        Self {
            token: token.into(),
            fragment,
        }
    }

    /// Routing-Teil (geht an den Remote-Store)
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Schluessel-Fragment (verlaesst den Client nur ueber die Anzeige)
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Anzeigetext fuer den Nutzer; wird beim Drop genullt
    pub fn anzeigen(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "{}{}{}",
            self.token,
            FRAGMENT_TRENNER,
            self.fragment.as_str()
        ))
    }
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("token", &self.token)
            .field("fragment", &"[REDACTED]")
            .finish()
    }
}

/// Zerlegt eine Nutzereingabe am ersten `#`
///
/// Liefert den Routing-Teil und das (moeglicherweise fehlende) Fragment.
/// Ein leeres Fragment zaehlt als fehlend.
pub fn split_link(eingabe: &str) -> (&str, Option<&str>) {
    match eingabe.split_once(FRAGMENT_TRENNER) {
        Some((token, fragment)) if !fragment.is_empty() => (token, Some(fragment)),
        Some((token, _)) => (token, None),
        None => (eingabe, None),
    }
}
