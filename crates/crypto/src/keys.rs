//! Ephemere Nachrichten-Schluessel
//!
//! Pro ausgehender Nachricht wird ein frischer 256-Bit-Schluessel erzeugt.
//! Er wird als base64url-Fragment (ohne Padding) exportiert und nur ueber
//! den angezeigten Link weitergegeben, niemals an den Remote-Store.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};
use crate::types::{ChannelKey, KEY_LEN};

/// Erzeugt einen frischen 256-Bit-Schluessel aus dem OS-CSPRNG
pub fn generate_key() -> CryptoResult<ChannelKey> {
    let mut raw = Zeroizing::new([0u8; KEY_LEN]);
    OsRng
        .try_fill_bytes(&mut raw[..])
        .map_err(|e| CryptoError::SchluesselGenerierung(e.to_string()))?;
    ChannelKey::from_slice(&raw[..])
}

/// Exportiert die Rohbytes als URL-sicheres base64 ohne Padding
///
/// `+` wird zu `-`, `/` zu `_`, abschliessende `=` entfallen.
pub fn export_key(key: &ChannelKey) -> Zeroizing<String> {
    Zeroizing::new(URL_SAFE_NO_PAD.encode(key.as_bytes()))
}

/// Rekonstruiert einen Schluessel aus einem Link-Fragment
///
/// Zeichen werden zurueckgetauscht und das Standard-Padding wird
/// aufgefuellt, bis die Laenge ein Vielfaches von 4 ist. Alles ausser
/// genau 32 dekodierten Bytes ist ungueltiges Schluesselmaterial.
pub fn import_key(fragment: &str) -> CryptoResult<ChannelKey> {
    let mut b64 = Zeroizing::new(fragment.replace('-', "+").replace('_', "/"));
    while b64.len() % 4 != 0 {
        b64.push('=');
    }

    let raw = Zeroizing::new(STANDARD.decode(b64.as_bytes())?);
    ChannelKey::from_slice(&raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
