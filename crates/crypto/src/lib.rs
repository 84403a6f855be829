//! # zero-crypto
//!
//! Clientseitige Verschluesselung fuer den Zero-Geheimkanal. Der
//! Remote-Store sieht ausschliesslich verschluesselte Blobs, der Schluessel
//! verlaesst den Client nur als Link-Fragment.
//!
//! ## Module
//! - `keys` - Ephemere 256-Bit-Schluessel, Export/Import als base64url-Fragment
//! - `aead` - AES-256-GCM Blob-Verschluesselung (IV + Ciphertext + Tag)
//! - `provider` - Capability-Trait ueber den Primitiven
//! - `types` - ChannelKey, EncryptedBlob, SecretBytes
//! - `error` - Fehlertypen

pub mod aead;
pub mod error;
pub mod keys;
pub mod provider;
pub mod types;

// Bequeme Re-Exports
pub use aead::{decrypt, encrypt};
pub use error::{CryptoError, CryptoResult};
pub use keys::{export_key, generate_key, import_key};
pub use provider::{Aes256GcmProvider, CryptoProvider};
pub use types::{ChannelKey, EncryptedBlob, SecretBytes, IV_LEN, KEY_LEN, TAG_LEN};
