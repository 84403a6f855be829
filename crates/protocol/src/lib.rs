//! zero-protocol – Token-, Link- und Wire-Format des Geheimkanals
//!
//! Dieses Crate definiert alles, was zwischen Client und Remote-Store
//! ausgetauscht oder vom Nutzer abgetippt wird: Empfaenger-Tokens mit
//! Pruefzeichen, den Link mit Schluessel-Fragment und die JSON-Anfragen.

pub mod link;
pub mod token;
pub mod wire;

pub use link::{split_link, Link};
pub use token::{
    checksum_hint, compute_checksum, generate_noise_token, generate_sender_token,
    generate_token, validate_checksum, Token,
};
pub use wire::{ReadRequest, ReadResponse, SendRequest};
