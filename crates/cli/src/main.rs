//! DARIY CLI - browse the catalog and drive the cart and favorites.
//!
//! # Usage
//!
//! ```bash
//! # List the women's collection
//! dariy catalog list --collection women
//!
//! # Add a dress in size M to the cart
//! dariy cart add dress-01 --size M
//!
//! # Show the cart with totals
//! dariy cart show
//!
//! # Open a WhatsApp order with the cart contents
//! dariy checkout whatsapp
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, show and summarize products
//! - `cart` - Show and edit the cart
//! - `favorites` - List and toggle favorite products
//! - `checkout` - Build an order link for a contact channel
//!
//! State is persisted under `DARIY_STORAGE_DIR` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use dariy_storefront::Storefront;
use dariy_storefront::config::StorefrontConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

const DEFAULT_LOG_FILTER: &str = "dariy_storefront=info,dariy_cli=info";

#[derive(Parser)]
#[command(name = "dariy")]
#[command(author, version, about = "DARIY storefront CLI")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List and toggle favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Print the order and a link that sends it to the shop
    Checkout {
        /// Contact channel (`telegram`, `whatsapp`, `phone`, `email`)
        channel: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally one collection only
    List {
        /// Collection slug (`men`, `women`, `kids`)
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
    /// List the sizes, colors, genders and categories on offer
    Facets,
}

/// Identifies a cart line by product and variant.
#[derive(Args)]
struct LineArgs {
    /// Product ID
    id: String,

    /// Selected size
    #[arg(short, long)]
    size: Option<String>,

    /// Selected color
    #[arg(short, long)]
    color: Option<String>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product to the cart
    Add {
        #[command(flatten)]
        line: LineArgs,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Increase a line's quantity by one
    Inc {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Decrease a line's quantity by one, removing it at zero
    Dec {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Remove a line
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite products
    List,
    /// Add or remove a product from favorites
    Toggle {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut shop = Storefront::open(config).await?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { collection } => {
                commands::catalog::list(&shop, collection.as_deref())?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&shop, &id)?,
            CatalogAction::Facets => commands::catalog::facets(&shop),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { line, qty } => {
                commands::cart::add(&mut shop, &line.id, line.size, line.color, qty)?;
            }
            CartAction::Inc { line } => {
                commands::cart::increment(&mut shop, &commands::line_key(&line))?;
            }
            CartAction::Dec { line } => {
                commands::cart::decrement(&mut shop, &commands::line_key(&line))?;
            }
            CartAction::Remove { line } => {
                commands::cart::remove(&mut shop, &commands::line_key(&line))?;
            }
            CartAction::Clear => commands::cart::clear(&mut shop),
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&shop),
            FavoritesAction::Toggle { id } => commands::favorites::toggle(&mut shop, &id),
        },
        Commands::Checkout { channel } => commands::checkout::run(&shop, &channel)?,
    }

    commands::print_toast(&mut shop);
    Ok(())
}
