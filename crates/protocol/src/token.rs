//! Token-Service
//!
//! Empfaenger-Tokens haben die Form `RX-<wort><3 ziffern>-<pruefzeichen>`,
//! optional gefolgt von einem Realitaets-Suffix `-A` / `-B`.
//!
//! Das Pruefzeichen ist die Summe der Zeichencodes der Basis modulo 36,
//! abgebildet auf `0-9A-Z`. Es schuetzt nur gegen Tippfehler und ist kein
//! Autorisierungsnachweis.

use rand::Rng;
use zero_core::{ChannelError, ChannelResult, Reality};

/// Praefix fuer Empfaenger-Tokens
pub const RECEIVER_PREFIX: &str = "RX-";
/// Praefix fuer Absender-Tokens
pub const SENDER_PREFIX: &str = "TX-";
/// Praefix fuer Rausch-Tokens (kollidiert nie mit `RX-`)
pub const NOISE_PREFIX: &str = "NOISE-";

/// Feste Wortliste fuer Empfaenger-Tokens
pub const WORTLISTE: [&str; 6] = ["eagle", "hawk", "falcon", "osprey", "swift", "kite"];

const PRUEF_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE36_KLEIN: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Eingaben unterhalb dieser Laenge gelten ohne Pruefung als gueltig
pub const MIN_PRUEF_LAENGE: usize = 5;

/// Laenge des Zufallsteils eines Rausch-Tokens
const RAUSCH_LAENGE: usize = 10;

/// Berechnet das Pruefzeichen einer Token-Basis
///
/// Summiert werden UTF-16-Codeeinheiten; ein Zeichen ausserhalb der BMP
/// (z.B. Emoji) zaehlt als zwei Surrogate.
pub fn compute_checksum(base: &str) -> char {
    let summe: u64 = base.encode_utf16().map(u64::from).sum();
    PRUEF_ALPHABET[(summe % 36) as usize] as char
}

/// Erzeugt ein neues Empfaenger-Token, z.B. `RX-eagle784-O`
///
/// Ein Pruefzeichen `A` oder `B` wuerde wie ein Realitaets-Suffix aussehen,
/// solche Kandidaten werden neu gewuerfelt.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    loop {
        let wort = WORTLISTE[rng.gen_range(0..WORTLISTE.len())];
        let nummer: u16 = rng.gen_range(100..1000);
        let base = format!("{RECEIVER_PREFIX}{wort}{nummer}");
        let pruef = compute_checksum(&base);
        if pruef != 'A' && pruef != 'B' {
            return format!("{base}-{pruef}");
        }
    }
}

/// Erzeugt das vorbelegte (vom Nutzer editierbare) Absender-Token
pub fn generate_sender_token() -> String {
    let nummer: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{SENDER_PREFIX}server{nummer}")
}

/// Erzeugt ein Token fuer eine Rausch-Anfrage
pub fn generate_noise_token() -> String {
    let mut rng = rand::thread_rng();
    let zufall: String = (0..RAUSCH_LAENGE)
        .map(|_| BASE36_KLEIN[rng.gen_range(0..BASE36_KLEIN.len())] as char)
        .collect();
    format!("{NOISE_PREFIX}{zufall}")
}

/// Prueft das Pruefzeichen eines eingegebenen Tokens
///
/// Ein Suffix `-A`/`-B` wird entfernt, das letzte Zeichen ist das
/// behauptete Pruefzeichen, ein direkt davor stehender Trennstrich gehoert
/// nicht zur Basis. Eingaben mit weniger als 5 UTF-16-Codeeinheiten
/// gelten immer als gueltig.
pub fn validate_checksum(token: &str) -> bool {
    pruefzeichen_pruefen(token).is_ok()
}

/// Wie `validate_checksum`, liefert aber erwartetes und erhaltenes Zeichen
pub fn pruefzeichen_pruefen(token: &str) -> ChannelResult<()> {
    if utf16_laenge(token) < MIN_PRUEF_LAENGE {
        return Ok(());
    }

    let ohne_suffix = match Reality::aus_token(token) {
        Some(reality) => &token[..token.len() - reality.suffix().len()],
        None => token,
    };

    let mut zeichen = ohne_suffix.chars();
    let Some(erhalten) = zeichen.next_back() else {
        return Err(ChannelError::Validierung {
            erwartet: compute_checksum(""),
            erhalten: ' ',
        });
    };
    let rest = zeichen.as_str();
    let base = rest.strip_suffix('-').unwrap_or(rest);

    let erwartet = compute_checksum(base);
    if erwartet == erhalten {
        Ok(())
    } else {
        Err(ChannelError::Validierung { erwartet, erhalten })
    }
}

/// Hinweis waehrend der Eingabe
///
/// Nur Eingaben mit mehr als 5 UTF-16-Codeeinheiten werden beanstandet. Der Hinweis ist
/// rein beratend und blockiert das Absenden nie.
pub fn checksum_hint(eingabe: &str) -> Option<ChannelError> {
    if utf16_laenge(eingabe) <= MIN_PRUEF_LAENGE {
        return None;
    }
    pruefzeichen_pruefen(eingabe).err()
}

fn utf16_laenge(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Hat die Eingabe das Empfaenger-Praefix?
pub fn ist_empfaenger_token(token: &str) -> bool {
    token.starts_with(RECEIVER_PREFIX)
}

/// Hat die Eingabe das Absender-Praefix?
pub fn ist_sender_token(token: &str) -> bool {
    token.starts_with(SENDER_PREFIX)
}

/// Ein eingegebenes oder erzeugtes Token mit optionaler Realitaets-Wahl
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn parse(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    /// Erzeugt ein frisches Empfaenger-Token
    pub fn neu_empfaenger() -> Self {
        Self(generate_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gewuenschte Realitaet aus dem Suffix
    pub fn reality(&self) -> Option<Reality> {
        Reality::aus_token(&self.0)
    }

    /// Token ohne Realitaets-Suffix
    pub fn base(&self) -> &str {
        match self.reality() {
            Some(r) => &self.0[..self.0.len() - r.suffix().len()],
            None => &self.0,
        }
    }

    /// Gleiches Token mit anderer Realitaets-Wahl
    pub fn mit_realitaet(&self, reality: Reality) -> Self {
        Self(format!("{}{}", self.base(), reality.suffix()))
    }

    pub fn ist_wohlgeformt(&self) -> bool {
        validate_checksum(&self.0)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pruefzeichen_bekannte_werte() {
        assert_eq!(compute_checksum("RX-eagle784"), 'O');
        assert_eq!(compute_checksum("RX-eagle785"), 'P');
        assert_eq!(compute_checksum("RX-hawk100"), 'V');
        assert_eq!(compute_checksum(""), '0');
    }

    #[test]
    fn bekanntes_token_ist_gueltig() {
        assert!(validate_checksum("RX-eagle784-O"));
        assert!(validate_checksum("RX-eagle784O"));
    }

    #[test]
    fn tippfehler_wird_erkannt() {
        assert!(!validate_checksum("RX-eagle785-O"));
        assert_eq!(
            pruefzeichen_pruefen("RX-eagle785-O"),
            Err(ChannelError::Validierung {
                erwartet: 'P',
                erhalten: 'O'
            })
        );
    }

    #[test]
    fn realitaets_suffix_wird_entfernt() {
        assert!(validate_checksum("RX-eagle784-O-A"));
        assert!(validate_checksum("RX-eagle784-O-B"));
        assert!(!validate_checksum("RX-eagle785-O-B"));
    }

    #[test]
    fn kurze_eingaben_sind_immer_gueltig() {
        for eingabe in ["", "a", "ab", "RX-", "zzzz", "äöü!"] {
            assert!(validate_checksum(eingabe), "{eingabe:?} sollte gueltig sein");
        }
        assert!(!validate_checksum("abcdZ"));
    }

    #[test]
    fn erzeugte_tokens_sind_gueltig() {
        for _ in 0..500 {
            let token = generate_token();
            assert!(validate_checksum(&token), "{token} ist ungueltig");
        }
    }

    #[test]
    fn erzeugte_tokens_haben_format() {
        for _ in 0..200 {
            let token = generate_token();
            let rest = token.strip_prefix("RX-").unwrap();
            let wort = WORTLISTE
                .iter()
                .find(|w| rest.starts_with(**w))
                .expect("Wort aus der Wortliste");
            let rest = &rest[wort.len()..];
            let (nummer, pruef) = rest.split_once('-').unwrap();
            assert_eq!(nummer.len(), 3);
            let n: u16 = nummer.parse().unwrap();
            assert!((100..1000).contains(&n));
            assert_eq!(pruef.len(), 1);
            assert!(pruef != "A" && pruef != "B");
            assert_eq!(Token::parse(&token).reality(), None);
        }
    }

    #[test]
    fn einzelne_ziffer_oder_buchstabe_wird_immer_erkannt() {
        // Abstaende < 36 aendern die Summe modulo 36 immer
        let pruef = compute_checksum("RX-falcon123");
        assert_eq!(pruef, 'K');
        let original = format!("RX-falcon123-{pruef}");
        let base_laenge = "RX-falcon123".len();

        for pos in 0..base_laenge {
            let orig = original.as_bytes()[pos];
            let kandidaten: Vec<u8> = if orig.is_ascii_digit() {
                (b'0'..=b'9').collect()
            } else if orig.is_ascii_lowercase() {
                (b'a'..=b'z').collect()
            } else if orig.is_ascii_uppercase() {
                (b'A'..=b'Z').collect()
            } else {
                continue;
            };
            for c in kandidaten.into_iter().filter(|c| *c != orig) {
                let mut bytes = original.clone().into_bytes();
                bytes[pos] = c;
                let kaputt = String::from_utf8(bytes).unwrap();
                assert!(!validate_checksum(&kaputt), "{kaputt} nicht erkannt");
            }
        }
    }

    #[test]
    fn erkennungsrate_ueber_druckbares_ascii() {
        // Jede Ersetzung eines Basis-Zeichens durch druckbares ASCII:
        // hoechstens 1 von 36 darf unerkannt bleiben.
        let mut gesamt = 0u32;
        let mut unerkannt = 0u32;
        for _ in 0..20 {
            let token = generate_token();
            let base_laenge = token.len() - 2;
            for pos in 0..base_laenge {
                let orig = token.as_bytes()[pos];
                for c in (0x20u8..=0x7e).filter(|c| *c != orig) {
                    let mut bytes = token.clone().into_bytes();
                    bytes[pos] = c;
                    let kaputt = String::from_utf8(bytes).unwrap();
                    gesamt += 1;
                    if validate_checksum(&kaputt) {
                        unerkannt += 1;
                    }
                }
            }
        }
        assert!(unerkannt * 36 <= gesamt, "{unerkannt} von {gesamt} unerkannt");
    }

    #[test]
    fn hinweis_nur_fuer_lange_eingaben() {
        assert!(checksum_hint("abcdZ").is_none());
        assert!(checksum_hint("RX-eagle784-O").is_none());
        assert!(checksum_hint("RX-eagle785-O").is_some());
    }

    #[test]
    fn sender_token_format() {
        for _ in 0..50 {
            let tx = generate_sender_token();
            assert!(ist_sender_token(&tx));
            let n: u16 = tx.strip_prefix("TX-server").unwrap().parse().unwrap();
            assert!(n < 1000);
        }
    }

    #[test]
    fn rausch_token_kollidiert_nie_mit_empfaenger() {
        for _ in 0..200 {
            let noise = generate_noise_token();
            assert!(noise.starts_with(NOISE_PREFIX));
            assert!(!ist_empfaenger_token(&noise));
            assert_eq!(noise.len(), NOISE_PREFIX.len() + 10);
        }
        assert_ne!(generate_noise_token(), generate_noise_token());
    }

    #[test]
    fn token_realitaet_und_basis() {
        let t = Token::parse(" RX-hawk100-V-B ");
        assert_eq!(t.as_str(), "RX-hawk100-V-B");
        assert_eq!(t.reality(), Some(Reality::B));
        assert_eq!(t.base(), "RX-hawk100-V");
        assert!(t.ist_wohlgeformt());

        let a = t.mit_realitaet(Reality::A);
        assert_eq!(a.as_str(), "RX-hawk100-V-A");
    }

    #[test]
    fn neues_empfaenger_token() {
        let t = Token::neu_empfaenger();
        assert!(ist_empfaenger_token(t.as_str()));
        assert!(t.ist_wohlgeformt());
    }

    #[test]
    fn emoji_zaehlt_als_zwei_codeeinheiten() {
        // 0xD83E + 0xDD85 = 112067, mod 36 = 35
        assert_eq!(compute_checksum("\u{1F985}"), 'Z');

        // 4 Codeeinheiten: zu kurz, immer gueltig
        assert!(validate_checksum("ab\u{1F985}"));
        // 5 Codeeinheiten (nur 4 chars): wird geprueft und scheitert
        assert!(!validate_checksum("abc\u{1F985}"));

        assert!(checksum_hint("abc\u{1F985}").is_none());
        assert!(checksum_hint("abcd\u{1F985}").is_some());
    }
}
