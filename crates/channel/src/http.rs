//! HTTP-Implementierung des Remote-Stores (reqwest, JSON)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use zero_core::{ChannelError, ChannelResult};
use zero_protocol::wire::{ENDPOINT_HEARTBEAT, ENDPOINT_PANIC, ENDPOINT_READ, ENDPOINT_SEND};
use zero_protocol::{ReadRequest, ReadResponse, SendRequest};

use crate::store::RemoteStore;

/// Remote-Store hinter einer Basis-URL, z.B. `http://localhost:8080/api`
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    basis_url: String,
}

impl HttpRemoteStore {
    /// Erstellt einen Store-Client mit festem Zeitlimit pro Anfrage
    pub fn neu(basis_url: impl Into<String>, zeitlimit: Duration) -> ChannelResult<Self> {
        let client = Client::builder()
            .timeout(zeitlimit)
            .build()
            .map_err(|e| ChannelError::Konfiguration(format!("HTTP-Client: {e}")))?;

        Ok(Self {
            client,
            basis_url: basis_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn basis_url(&self) -> &str {
        &self.basis_url
    }

    fn url(&self, endpunkt: &str) -> String {
        format!("{}/{}", self.basis_url, endpunkt)
    }

    /// Schickt eine vorbereitete Anfrage ab und prueft den Status
    async fn abschicken(&self, anfrage: RequestBuilder) -> ChannelResult<Response> {
        let antwort = anfrage.send().await.map_err(transport_fehler)?;
        status_pruefen(antwort.status())?;
        Ok(antwort)
    }
}

fn transport_fehler(e: reqwest::Error) -> ChannelError {
    if e.is_timeout() {
        ChannelError::Zeitlimit(e.to_string())
    } else {
        ChannelError::Netzwerk(e.to_string())
    }
}

fn status_pruefen(status: StatusCode) -> ChannelResult<()> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ChannelError::RateLimitiert);
    }
    if !status.is_success() {
        return Err(ChannelError::Netzwerk(format!("HTTP-Status {status}")));
    }
    Ok(())
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn send(&self, anfrage: &SendRequest) -> ChannelResult<()> {
        // Quittung ist Klartext und wird nicht geparst
        self.abschicken(self.client.post(self.url(ENDPOINT_SEND)).json(anfrage))
            .await?;
        Ok(())
    }

    async fn read(&self, anfrage: &ReadRequest) -> ChannelResult<ReadResponse> {
        let antwort = self
            .abschicken(self.client.post(self.url(ENDPOINT_READ)).json(anfrage))
            .await?;
        antwort
            .json::<ReadResponse>()
            .await
            .map_err(|e| ChannelError::Netzwerk(format!("Ungueltige Lese-Antwort: {e}")))
    }

    async fn panic(&self) -> ChannelResult<()> {
        self.abschicken(self.client.post(self.url(ENDPOINT_PANIC)))
            .await?;
        Ok(())
    }

    async fn heartbeat(&self) -> ChannelResult<()> {
        self.abschicken(self.client.post(self.url(ENDPOINT_HEARTBEAT)))
            .await?;
        Ok(())
    }
}
