//! Bon Coin Bon Prix CLI - the storefront client in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! bonprix cart show
//!
//! # Add one unit of a product
//! bonprix cart add 7 "Câble USB-C" 15000
//!
//! # Hand the cart over to WhatsApp
//! bonprix checkout -n "Mariama Diallo" -q Kaloum
//!
//! # Talk to Chérif
//! bonprix ask "quel téléphone me conseilles-tu ?"
//! bonprix chat
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit the persisted cart
//! - `checkout` - Record the order and open the WhatsApp handoff
//! - `ask` / `chat` - Assistant, one-shot or interactive
//! - `theme` / `speaker` - Preferences

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use bonprix_storefront::config::ClientConfig;
use bonprix_storefront::error::{self, ClientError};
use bonprix_storefront::state::ClientState;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "bonprix")]
#[command(author, version, about = "Bon Coin Bon Prix storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Send the cart as a WhatsApp order
    Checkout {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Delivery neighbourhood
        #[arg(short, long)]
        quartier: String,
    },
    /// Ask the assistant one question
    Ask {
        /// The question
        question: String,
    },
    /// Chat with the assistant interactively
    Chat,
    /// Light or dark theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Read-aloud for assistant replies
    Speaker {
        #[command(subcommand)]
        action: SpeakerAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart page
    Show,
    /// Add one unit of a product
    Add {
        /// Product identifier
        id: String,
        /// Product name
        name: String,
        /// Unit price in GNF
        price: String,
    },
    /// Change a line's quantity by a signed delta
    Adjust {
        /// Product identifier
        id: String,
        /// Quantity change, e.g. 1 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a line after confirmation
    Remove {
        /// Product identifier
        id: String,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

#[derive(Subcommand)]
enum SpeakerAction {
    /// Read replies aloud
    On,
    /// Stay silent
    Off,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bonprix_storefront=info,bonprix_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is needed for Sentry init, which must precede tracing
    let config = ClientConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    let code = exit_code(&result);
    if let Err(e) = &result {
        error::capture(e);
    }
    // Dropping the guard flushes queued events
    drop(sentry_guard);
    code
}

fn exit_code(result: &Result<(), ClientError>) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), ClientError> {
    let state = ClientState::new(config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id, name, price } => commands::cart::add(&state, &id, &name, &price)?,
            CartAction::Adjust { id, delta } => commands::cart::adjust(&state, &id, delta)?,
            CartAction::Remove { id } => commands::cart::remove(&state, &id)?,
        },
        Commands::Checkout { name, quartier } => {
            commands::checkout::run(&state, name, quartier).await?;
        }
        Commands::Ask { question } => commands::assistant::ask(&state, &question).await,
        Commands::Chat => commands::assistant::chat(&state).await?,
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::preferences::show_theme(&state),
            ThemeAction::Toggle => commands::preferences::toggle_theme(&state),
        },
        Commands::Speaker { action } => {
            commands::preferences::set_speaker(&state, matches!(action, SpeakerAction::On));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_reflects_result() {
        assert_eq!(exit_code(&Ok(())), ExitCode::SUCCESS);
        assert_eq!(
            exit_code(&Err(ClientError::NotInCart("7".to_string()))),
            ExitCode::FAILURE
        );
    }

    #[test]
    fn test_sentry_is_off_without_dsn() {
        let config = ClientConfig::from_lookup(|key| match key {
            "BONPRIX_BASE_URL" => Some("http://localhost:3000".to_string()),
            _ => None,
        });
        assert!(init_sentry(&config.unwrap()).is_none());
    }
}
