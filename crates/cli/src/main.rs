//! Mini Shop CLI - browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally searched, filtered and sorted
//! shop products --search shirt --category clothing --sort low-high
//!
//! # List categories
//! shop categories
//!
//! # Manage the persisted cart
//! shop cart show
//! shop cart add 1
//! shop cart update 1 3
//! shop cart remove 1
//! ```
//!
//! # Commands
//!
//! - `products` - Filtered, sorted product list with stock and cart counts
//! - `categories` - Categories present in the catalog
//! - `cart` - Show the cart or change a line

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mini_shop_core::ProductId;
use mini_shop_storefront::{AppError, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Mini Shop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category to show
        #[arg(short, long)]
        category: Option<String>,

        /// Price order (`low-high`, `high-low`)
        #[arg(long)]
        sort: Option<String>,
    },
    /// List catalog categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a line's quantity (clamped to the available stock)
    Update {
        /// Product ID
        id: ProductId,

        /// Requested quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
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
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mini_shop_storefront=info,mini_shop_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            AppError::from(e).report();
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, config).await {
        e.report();
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> mini_shop_storefront::Result<()> {
    let mut controller = commands::start(&config).await?;

    match cli.command {
        Commands::Products {
            search,
            category,
            sort,
        } => commands::catalog::products(&mut controller, search, category, sort).await?,
        Commands::Categories => commands::catalog::categories(&controller),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&controller),
            CartAction::Add { id } => commands::cart::add(&mut controller, id)?,
            CartAction::Remove { id } => commands::cart::remove(&mut controller, id)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut controller, id, quantity)?;
            }
        },
    }
    Ok(())
}
