//! Gemeinsame Typen fuer das Kryptografie-Subsystem

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};

/// Laenge des symmetrischen Schluessels (AES-256)
pub const KEY_LEN: usize = 32;
/// Laenge des Initialisierungsvektors (GCM-Nonce)
pub const IV_LEN: usize = 12;
/// Laenge des GCM-Auth-Tags
pub const TAG_LEN: usize = 16;

/// Sicherer Schluessel-Container (wird beim Drop genullt)
#[derive(Clone)]
pub struct SecretBytes(Vec<u8>);

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([REDACTED] {} bytes)", self.0.len())
    }
}

impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nullt den Inhalt sofort (nicht erst beim Drop)
    pub fn wipe(&mut self) {
        self.0.zeroize();
    }
}

/// Ephemerer AES-256-GCM Schluessel fuer genau eine Nachricht
///
/// Lebt nur im fluechtigen Speicher und im Link-Fragment. Wird beim Drop
/// (bzw. beim Schliessen der Ansicht) genullt.
#[derive(Clone)]
pub struct ChannelKey {
    bytes: SecretBytes,
}

impl ChannelKey {
    /// Erstellt einen Schluessel aus genau 32 Rohbytes
    pub fn from_slice(raw: &[u8]) -> CryptoResult<Self> {
        if raw.len() != KEY_LEN {
            return Err(CryptoError::UngueltigeSchluesselLaenge {
                erwartet: KEY_LEN,
                erhalten: raw.len(),
            });
        }
        Ok(Self {
            bytes: SecretBytes::new(raw.to_vec()),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_bytes()
    }

    /// Explizites Vernichten beim Teardown
    pub fn vernichten(mut self) {
        self.bytes.wipe();
    }
}

impl std::fmt::Debug for ChannelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChannelKey([REDACTED])")
    }
}

/// Verschluesselter Blob: base64( IV(12) || Ciphertext || Tag(16) )
///
/// Pro Realitaet und Sendevorgang entsteht genau ein Blob. Fuer den
/// Remote-Store ist der Inhalt opak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    /// Baut den Blob aus IV und Ciphertext (inkl. Tag)
    pub fn aus_teilen(iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Self {
        let mut combined = Vec::with_capacity(IV_LEN + ciphertext.len());
        combined.extend_from_slice(iv);
        combined.extend_from_slice(ciphertext);
        Self(STANDARD.encode(combined))
    }

    /// Zerlegt einen base64-Blob in IV und Ciphertext (inkl. Tag)
    pub fn zerlegen(blob: &str) -> CryptoResult<([u8; IV_LEN], Vec<u8>)> {
        let combined = STANDARD.decode(blob.as_bytes())?;
        if combined.len() < IV_LEN + TAG_LEN {
            return Err(CryptoError::UngueltigeDaten(format!(
                "Blob zu kurz: {} Bytes",
                combined.len()
            )));
        }
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&combined[..IV_LEN]);
        Ok((iv, combined[IV_LEN..].to_vec()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncryptedBlob {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EncryptedBlob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EncryptedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
