//! Zero – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und fuehrt einen
//! Unterbefehl aus. Links und Notizen gehen nach stdout, alles andere
//! nach stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use zero_app::config::{ZeroConfig, ENV_CONFIG, STANDARD_PFAD};
use zero_app::App;
use zero_channel::ComposeSession;
use zero_observability::{logging_initialisieren, LogEinstellung};
use zero_protocol::{generate_token, token::pruefzeichen_pruefen};

/// Zero – Notizen mit zwei Bedeutungen
#[derive(Parser)]
#[command(name = "zero")]
#[command(version)]
#[command(about = "Ephemere Notizen ueber einen getarnten Kanal")]
struct Cli {
    /// Pfad zur Konfigurationsdatei (sonst ZERO_CONFIG oder zero.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    befehl: Befehl,
}

#[derive(Subcommand)]
enum Befehl {
    /// Erzeugt ein neues Empfaenger-Token
    Token,

    /// Prueft das Pruefzeichen eines Tokens
    Pruefen {
        token: String,
    },

    /// Sendet eine Notiz mit zwei Realitaeten
    Senden {
        /// Oberflaechen-Bedeutung
        #[arg(long)]
        a: String,

        /// Verborgene Bedeutung
        #[arg(long)]
        b: String,

        /// Absender-Token (Standard: zufaellig)
        #[arg(long)]
        tx: Option<String>,

        /// Empfaenger-Token (Standard: zufaellig)
        #[arg(long)]
        rx: Option<String>,
    },

    /// Liest eine Notiz (Link, Token oder Codewort)
    Lesen {
        eingabe: String,
    },

    /// Erzeugt Rausch-Verkehr bis Ctrl-C
    Rauschen,

    /// Schickt ein Lebenszeichen an den Remote-Store
    Heartbeat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Konfigurationsdatei-Pfad aus Argument, Umgebungsvariable oder Standard
    let config_pfad = cli
        .config
        .clone()
        .or_else(|| std::env::var(ENV_CONFIG).ok())
        .unwrap_or_else(|| STANDARD_PFAD.into());

    let mut config = ZeroConfig::laden(&config_pfad)?;
    config.umgebung_anwenden(|name| std::env::var(name).ok());

    let einstellung = LogEinstellung::aus_umgebung(&config.logging.level, &config.logging.format)?;
    logging_initialisieren(&einstellung)?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Zero wird initialisiert"
    );

    match cli.befehl {
        Befehl::Token => println!("{}", generate_token()),
        Befehl::Pruefen { token } => match pruefzeichen_pruefen(&token) {
            Ok(()) => println!("OK"),
            Err(e) => {
                eprintln!("{e}");
                println!("{}", zero_channel::session::HINWEIS_TIPPFEHLER);
            }
        },
        befehl => ausfuehren(befehl, App::neu(config)?).await?,
    }

    Ok(())
}

/// Befehle, die den Remote-Store brauchen
async fn ausfuehren(befehl: Befehl, app: App) -> Result<()> {
    match befehl {
        Befehl::Senden { a, b, tx, rx } => {
            let mut sitzung = ComposeSession::neu();
            sitzung.reality_a_setzen(&a);
            sitzung.reality_b_setzen(&b);
            if let Some(tx) = tx {
                sitzung.tx_token_setzen(&tx);
            }
            if let Some(rx) = rx {
                sitzung.rx_token_setzen(&rx);
            }
            if sitzung.hinweis().is_some() {
                eprintln!("{}", zero_channel::session::HINWEIS_TIPPFEHLER);
            }

            let quittung = sitzung.absenden(app.service()).await;
            println!("{}", quittung.meldung());
            if let Some(link) = quittung.link() {
                println!("{}", link.anzeigen().as_str());
            }
            sitzung.schliessen();
        }
        Befehl::Lesen { eingabe } => {
            let (hinweis, anzeige) = app.lesen(&eingabe).await;
            if let Some(hinweis) = hinweis {
                eprintln!("{hinweis}");
            }
            if let Some(anzeige) = anzeige {
                println!("{}", anzeige.as_str());
            }
        }
        Befehl::Rauschen => {
            if !app.config.rauschen.aktiviert {
                tracing::warn!("Rausch-Generator ist in der Konfiguration deaktiviert");
                return Ok(());
            }
            let handle = app.rausch_generator()?.starten();
            tokio::signal::ctrl_c()
                .await
                .context("Ctrl-C-Handler konnte nicht registriert werden")?;
            handle.stoppen().await;
        }
        Befehl::Heartbeat => {
            app.service()
                .heartbeat()
                .await
                .context("Heartbeat fehlgeschlagen")?;
            println!("OK");
        }
        Befehl::Token | Befehl::Pruefen { .. } => {}
    }

    // Runtime endet mit main; offene Panik-Meldungen muessen vorher raus
    app.abschliessen().await;
    Ok(())
}
