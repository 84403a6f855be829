//! Blob-Verschluesselung mit AES-256-GCM
//!
//! ## Format
//! ```text
//! base64( [iv(12)] [ciphertext] [auth_tag(16)] )
//! ```
//!
//! Jeder Aufruf von `encrypt` zieht einen frischen Zufalls-IV, auch wenn
//! beide Realitaeten einer Nachricht unter demselben Schluessel laufen.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce as AesNonce,
};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};
use crate::types::{ChannelKey, EncryptedBlob, IV_LEN};

/// Verschluesselt einen Klartext (UTF-8) zu einem opaken Blob
pub fn encrypt(plaintext: &str, key: &ChannelKey) -> CryptoResult<EncryptedBlob> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| CryptoError::Verschluesselung(e.to_string()))?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|e| CryptoError::Verschluesselung(e.to_string()))?;

    Ok(EncryptedBlob::aus_teilen(&iv, &ciphertext))
}

/// Entschluesselt einen Blob
///
/// Schlaegt mit `CryptoError` fehl bei ungueltigem base64, zu kurzem Blob,
/// falschem Schluessel, manipuliertem Inhalt oder ungueltigem UTF-8.
/// Es wird niemals unauthentifizierter Klartext zurueckgegeben.
pub fn decrypt(blob: &str, key: &ChannelKey) -> CryptoResult<String> {
    let (iv, ciphertext) = EncryptedBlob::zerlegen(blob)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let plaintext = cipher
        .decrypt(AesNonce::from_slice(&iv), ciphertext.as_slice())
        .map_err(|e| CryptoError::Entschluesselung(e.to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::UngueltigeDaten("Klartext ist kein UTF-8".to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_key;
    use crate::types::TAG_LEN;
    use base64::{engine::general_purpose::STANDARD, Engine};

    #[test]
    fn roundtrip_ascii() {
        let key = generate_key().unwrap();
        let blob = encrypt("ops at 5pm", &key).unwrap();
        assert_eq!(decrypt(blob.as_str(), &key).unwrap(), "ops at 5pm");
    }

    #[test]
    fn roundtrip_leerer_text() {
        let key = generate_key().unwrap();
        let blob = encrypt("", &key).unwrap();
        assert_eq!(decrypt(blob.as_str(), &key).unwrap(), "");
    }

    #[test]
    fn roundtrip_nicht_ascii() {
        let key = generate_key().unwrap();
        let text = "Grüße aus Köln – 東京で会おう 🦅";
        let blob = encrypt(text, &key).unwrap();
        assert_eq!(decrypt(blob.as_str(), &key).unwrap(), text);
    }

    #[test]
    fn blob_laenge_ist_iv_plus_text_plus_tag() {
        let key = generate_key().unwrap();
        let blob = encrypt("abcde", &key).unwrap();
        let raw = STANDARD.decode(blob.as_str()).unwrap();
        assert_eq!(raw.len(), IV_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn jede_verschluesselung_hat_eigenen_iv() {
        let key = generate_key().unwrap();
        let a = encrypt("dinner at 5pm", &key).unwrap();
        let b = encrypt("dinner at 5pm", &key).unwrap();

        let (iv_a, _) = EncryptedBlob::zerlegen(a.as_str()).unwrap();
        let (iv_b, _) = EncryptedBlob::zerlegen(b.as_str()).unwrap();
        assert_ne!(iv_a, iv_b);
        assert_ne!(a, b);
    }

    #[test]
    fn falscher_schluessel_schlaegt_fehl() {
        let key1 = generate_key().unwrap();
        let key2 = generate_key().unwrap();
        let blob = encrypt("geheim", &key1).unwrap();

        assert!(matches!(
            decrypt(blob.as_str(), &key2),
            Err(CryptoError::Entschluesselung(_))
        ));
    }

    #[test]
    fn jedes_gekippte_bit_schlaegt_fehl() {
        let key = generate_key().unwrap();
        let blob = encrypt("burn", &key).unwrap();
        let raw = STANDARD.decode(blob.as_str()).unwrap();

        for byte in 0..raw.len() {
            for bit in 0..8 {
                let mut manipuliert = raw.clone();
                manipuliert[byte] ^= 1 << bit;
                let b64 = STANDARD.encode(&manipuliert);
                assert!(
                    decrypt(&b64, &key).is_err(),
                    "Bit {bit} in Byte {byte} wurde nicht erkannt"
                );
            }
        }
    }

    #[test]
    fn abgeschnittener_blob_schlaegt_fehl() {
        let key = generate_key().unwrap();
        let blob = encrypt("abgeschnitten", &key).unwrap();
        let raw = STANDARD.decode(blob.as_str()).unwrap();
        let kurz = STANDARD.encode(&raw[..raw.len() - 1]);
        assert!(decrypt(&kurz, &key).is_err());
    }

    #[test]
    fn klartext_sentinel_ist_kein_blob() {
        let key = generate_key().unwrap();
        assert!(decrypt("No note available", &key).is_err());
    }
}
