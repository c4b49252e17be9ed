//! promo-notify CLI
//!
//! Checks a carrier's promotions page and mails new half-price offers.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use promo_notify::{
    error::{AppError, Result},
    models::{Config, RunContext},
    pipeline,
    services::{HttpDocumentSource, MailgunNotifier, load_recipients},
    storage::{HookStore, KeyValueStore, LocalStore, SentSetStore},
    utils::http,
};

/// promo-notify - Carrier Promotion Notifier
#[derive(Parser, Debug)]
#[command(
    name = "promo-notify",
    version,
    about = "Mail subscribers about new carrier promotions"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check one provider and notify subscribers
    Run {
        /// Provider name (see `providers`)
        #[arg(short, long)]
        provider: String,

        /// File with one recipient address per line
        #[arg(short, long)]
        recipient_file: PathBuf,

        #[command(flatten)]
        store: StoreArgs,

        /// Mailgun sending domain (overrides mailgun.domain)
        #[arg(long, env = "MG_DOMAIN")]
        mg_domain: Option<String>,

        /// Mailgun API key
        #[arg(long, env = "MG_API_KEY", hide_env_values = true)]
        mg_api_key: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Show the persisted ledger for a provider
    Ledger {
        /// Provider name
        #[arg(short, long)]
        provider: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// List configured providers
    Providers,
}

#[derive(clap::Args, Debug)]
struct StoreArgs {
    /// Ledger backend
    #[arg(long, value_enum, default_value_t = StoreKind::Hook)]
    store: StoreKind,

    /// Directory for the local backend
    #[arg(long, default_value = "storage")]
    storage_dir: PathBuf,

    /// hook.io private key for the hook backend
    #[arg(long, env = "HOOK_PRIVATE_KEY", hide_env_values = true)]
    hook_private_key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// hook.io datastore
    Hook,
    /// JSON files under --storage-dir
    Local,
}

impl StoreArgs {
    fn open(&self, config: &Config, client: &reqwest::Client) -> Result<Box<dyn KeyValueStore>> {
        match self.store {
            StoreKind::Hook => {
                let key = self.hook_private_key.clone().unwrap_or_default();
                Ok(Box::new(HookStore::new(
                    client.clone(),
                    &config.datastore.api_url,
                    key,
                )?))
            }
            StoreKind::Local => Ok(Box::new(LocalStore::new(&self.storage_dir))),
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn format_timestamp(secs: i64) -> String {
    Utc.timestamp_opt(secs, 0)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Run {
            provider,
            recipient_file,
            store,
            mg_domain,
            mg_api_key,
        } => {
            let recipients = load_recipients(&recipient_file)?;
            if recipients.is_empty() {
                log::warn!("No subscriber");
                return Ok(());
            }
            log::info!("Loaded {} subscriber(s)", recipients.len());

            if let Some(domain) = mg_domain {
                config.mailgun.domain = domain;
            }
            let ctx = RunContext::from_config(&config, &provider, recipients)?;

            let client = http::create_client(&config.http)?;
            let source = HttpDocumentSource::new(client.clone());
            let notifier = MailgunNotifier::new(
                client.clone(),
                &config.mailgun,
                mg_api_key.unwrap_or_default(),
            )?;
            let store = store.open(&config, &client)?;

            let report =
                pipeline::run_notifier(&ctx, &source, store.as_ref(), &notifier).await?;
            for (label, value) in report.summary() {
                log::info!("{label}: {value}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} provider(s), marker '{}')",
                config.providers.len(),
                config.filter.marker
            );
        }

        Command::Ledger { provider, store } => {
            let ctx = RunContext::from_config(&config, &provider, Vec::new())?;
            let client = http::create_client(&config.http)?;
            let store = store.open(&config, &client)?;

            let ledger = SentSetStore::new(store.as_ref(), ctx.ledger_key());
            let (sent, origin) = ledger.load().await;
            println!("Ledger: {} ({})", ledger.key(), origin);
            println!("Entries: {}", sent.len());
            match sent.last_sent_at() {
                Some(ts) => println!("Last notification: {}", format_timestamp(ts)),
                None => println!("Last notification: never"),
            }
        }

        Command::Providers => {
            if config.providers.is_empty() {
                return Err(AppError::config("No providers configured"));
            }
            for (name, provider) in &config.providers {
                println!("{name}\t{}", provider.url);
            }
        }
    }

    Ok(())
}
