//! 404 Redirect CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! redirect404 migrate
//!
//! # Show or change a shop's redirect setting
//! redirect404 settings show --shop example.myshopify.com
//! redirect404 settings set --shop example.myshopify.com --url https://example.com/
//! redirect404 settings set --shop example.myshopify.com --url https://example.com/ --disabled
//! redirect404 settings delete --shop example.myshopify.com
//!
//! # Produce a signed App Proxy query string for local testing
//! redirect404 sign --secret "$SHOPIFY_API_SECRET" -p shop=example.myshopify.com -p timestamp=1700000000
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `settings` - Manage per-shop redirect settings
//! - `sign` - Sign App Proxy query parameters

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "redirect404")]
#[command(author, version, about = "404 Redirect app CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage per-shop redirect settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Sign App Proxy query parameters and print the query string
    Sign {
        /// App API secret used as the HMAC key
        #[arg(short, long, env = "SHOPIFY_API_SECRET", hide_env_values = true)]
        secret: String,

        /// Query parameter as `key=value` (repeatable)
        #[arg(short, long = "param", value_parser = commands::sign::parse_param)]
        params: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show a shop's redirect setting
    Show {
        /// Shop domain (e.g. `example.myshopify.com`)
        #[arg(short, long)]
        shop: String,
    },
    /// Create or update a shop's redirect setting
    Set {
        /// Shop domain (e.g. `example.myshopify.com`)
        #[arg(short, long)]
        shop: String,

        /// Redirect destination URL
        #[arg(short, long, default_value = "")]
        url: String,

        /// Store the setting with the redirect turned off
        #[arg(long)]
        disabled: bool,
    },
    /// Delete a shop's redirect setting
    Delete {
        /// Shop domain (e.g. `example.myshopify.com`)
        #[arg(short, long)]
        shop: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Settings { action } => match action {
            SettingsAction::Show { shop } => commands::settings::show(&shop).await?,
            SettingsAction::Set {
                shop,
                url,
                disabled,
            } => commands::settings::set(&shop, url, !disabled).await?,
            SettingsAction::Delete { shop } => commands::settings::delete(&shop).await?,
        },
        Commands::Sign { secret, params } => commands::sign::run(&secret, params)?,
    }
    Ok(())
}
