//! Ansichtszustand fuer Verfassen und Lesen
//!
//! Beide Sitzungen halten Klartext, Tokens und Links nur so lange, wie die
//! Ansicht offen ist. `schliessen` nullt den gesamten Zustand; danach ist
//! die Sitzung wieder leer.

use zero_core::ChannelError;
use zero_protocol::{checksum_hint, generate_sender_token, split_link, Token};
use zeroize::{Zeroize, Zeroizing};

use crate::service::{ChannelService, ReadOutcome, SendReceipt};

/// Hinweistext bei ungueltiger Pruefziffer
pub const HINWEIS_TIPPFEHLER: &str = "Invalid Format (Check for typos)";

// ---------------------------------------------------------------------------
// Verfassen
// ---------------------------------------------------------------------------

/// Sitzung der Verfassen-Ansicht
///
/// Beim Oeffnen werden ein Absender- und ein Empfaenger-Token vorbelegt.
pub struct ComposeSession {
    reality_a: Zeroizing<String>,
    reality_b: Zeroizing<String>,
    tx_token: String,
    rx_token: Token,
    quittung: Option<SendReceipt>,
}

impl ComposeSession {
    pub fn neu() -> Self {
        Self {
            reality_a: Zeroizing::new(String::new()),
            reality_b: Zeroizing::new(String::new()),
            tx_token: generate_sender_token(),
            rx_token: Token::neu_empfaenger(),
            quittung: None,
        }
    }

    pub fn reality_a_setzen(&mut self, text: &str) {
        self.reality_a = Zeroizing::new(text.to_string());
    }

    pub fn reality_b_setzen(&mut self, text: &str) {
        self.reality_b = Zeroizing::new(text.to_string());
    }

    pub fn tx_token_setzen(&mut self, token: &str) {
        self.tx_token = token.trim().to_string();
    }

    pub fn rx_token_setzen(&mut self, token: &str) {
        self.rx_token = Token::parse(token);
    }

    pub fn tx_token(&self) -> &str {
        &self.tx_token
    }

    pub fn rx_token(&self) -> &Token {
        &self.rx_token
    }

    /// Beratender Pruefziffer-Hinweis zum Empfaenger-Token
    pub fn hinweis(&self) -> Option<ChannelError> {
        checksum_hint(self.rx_token.as_str())
    }

    /// Sendet die Notiz; die Quittung bleibt bis zum Schliessen erhalten
    pub async fn absenden(&mut self, service: &ChannelService) -> &SendReceipt {
        let quittung = service
            .send(
                &self.reality_a,
                &self.reality_b,
                &self.tx_token,
                self.rx_token.as_str(),
            )
            .await;
        self.quittung.insert(quittung)
    }

    pub fn quittung(&self) -> Option<&SendReceipt> {
        self.quittung.as_ref()
    }

    pub fn schliessen(&mut self) {
        self.reality_a.zeroize();
        self.reality_b.zeroize();
        self.tx_token.zeroize();
        self.rx_token = Token::parse("");
        if let Some(mut quittung) = self.quittung.take() {
            quittung.vergessen();
        }
    }
}

impl Default for ComposeSession {
    fn default() -> Self {
        Self::neu()
    }
}

// ---------------------------------------------------------------------------
// Lesen
// ---------------------------------------------------------------------------

/// Sitzung der Lese-Ansicht
#[derive(Default)]
pub struct ReaderSession {
    eingabe: Zeroizing<String>,
    hinweis: Option<ChannelError>,
    ergebnis: Option<ReadOutcome>,
}

impl ReaderSession {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Uebernimmt die Eingabe und aktualisiert den Hinweis
    ///
    /// Geprueft wird nur der Token-Teil vor dem `#`.
    pub fn eingabe_aendern(&mut self, text: &str) {
        self.eingabe = Zeroizing::new(text.to_string());
        let (token, _) = split_link(text);
        self.hinweis = checksum_hint(token);
    }

    pub fn hinweis(&self) -> Option<&ChannelError> {
        self.hinweis.as_ref()
    }

    pub fn hinweis_text(&self) -> Option<&'static str> {
        self.hinweis.as_ref().map(|_| HINWEIS_TIPPFEHLER)
    }

    /// Oeffnet die Notiz; ohne Eingabe passiert nichts
    ///
    /// Ein Hinweis blockiert das Oeffnen nicht.
    pub async fn oeffnen(&mut self, service: &ChannelService) -> Option<&ReadOutcome> {
        if self.eingabe.is_empty() {
            return None;
        }
        let ergebnis = service.read(&self.eingabe).await;
        Some(&*self.ergebnis.insert(ergebnis))
    }

    pub fn ergebnis(&self) -> Option<&ReadOutcome> {
        self.ergebnis.as_ref()
    }

    pub fn schliessen(&mut self) {
        self.eingabe.zeroize();
        self.hinweis = None;
        self.ergebnis = None;
    }
}
