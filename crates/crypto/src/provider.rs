//! Capability-Trait ueber den Krypto-Primitiven
//!
//! Der Kanal-Service kennt nur diesen Trait. Jede Bibliothek, die
//! AES-256-GCM anbietet, kann ihn erfuellen; `Aes256GcmProvider` nutzt die
//! RustCrypto-Implementierung aus `aes-gcm`.

use zeroize::Zeroizing;

use crate::error::CryptoResult;
use crate::types::{ChannelKey, EncryptedBlob};

/// Schluessel- und Verschluesselungs-Faehigkeiten des Clients
pub trait CryptoProvider: Send + Sync {
    /// Frischer 256-Bit-Schluessel aus einer kryptografisch sicheren Quelle
    fn generate_key(&self) -> CryptoResult<ChannelKey>;

    /// base64url-Fragment ohne Padding
    fn export_key(&self, key: &ChannelKey) -> Zeroizing<String>;

    /// Umkehrung von `export_key`
    fn import_key(&self, fragment: &str) -> CryptoResult<ChannelKey>;

    fn encrypt(&self, plaintext: &str, key: &ChannelKey) -> CryptoResult<EncryptedBlob>;

    fn decrypt(&self, blob: &str, key: &ChannelKey) -> CryptoResult<String>;
}

/// Standard-Provider auf Basis von `aes-gcm` und dem OS-Zufallsgenerator
#[derive(Debug, Default, Clone, Copy)]
pub struct Aes256GcmProvider;

impl CryptoProvider for Aes256GcmProvider {
    fn generate_key(&self) -> CryptoResult<ChannelKey> {
        crate::keys::generate_key()
    }

    fn export_key(&self, key: &ChannelKey) -> Zeroizing<String> {
        crate::keys::export_key(key)
    }

    fn import_key(&self, fragment: &str) -> CryptoResult<ChannelKey> {
        crate::keys::import_key(fragment)
    }

    fn encrypt(&self, plaintext: &str, key: &ChannelKey) -> CryptoResult<EncryptedBlob> {
        crate::aead::encrypt(plaintext, key)
    }

    fn decrypt(&self, blob: &str, key: &ChannelKey) -> CryptoResult<String> {
        crate::aead::decrypt(blob, key)
    }
}
