//! Abstraktion des Remote-Stores
//!
//! Der Store haelt pro Empfaenger-Token zwei opake Blobs und liefert beim
//! Lesen genau einen davon (Realitaet A oder B, anhand des Token-Suffix).
//! Nach dem ersten Lesen ist die Notiz verbrannt; danach und fuer unbekannte
//! Tokens antwortet er mit dem Sentinel.

use async_trait::async_trait;
use zero_core::ChannelResult;
use zero_protocol::{ReadRequest, ReadResponse, SendRequest};

/// Operationen gegen den Remote-Store
///
/// `HttpRemoteStore` spricht JSON ueber HTTP; Tests nutzen In-Memory-Doubles.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Legt beide verschluesselten Realitaeten ab. Die Quittung wird nicht ausgewertet.
    async fn send(&self, anfrage: &SendRequest) -> ChannelResult<()>;

    /// Holt (und verbrennt) eine Notiz
    async fn read(&self, anfrage: &ReadRequest) -> ChannelResult<ReadResponse>;

    /// Stille Duress-Meldung
    async fn panic(&self) -> ChannelResult<()>;

    /// Lebenszeichen
    async fn heartbeat(&self) -> ChannelResult<()>;
}
