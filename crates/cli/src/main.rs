//! Neon CLI - catalog browsing, cart simulation and inventory tools.
//!
//! # Usage
//!
//! ```bash
//! # List electronics, cheapest first
//! neon catalog list --category electronics --sort price_asc
//!
//! # Show a product with related products
//! neon catalog show prod_1
//!
//! # Simulate a cart
//! neon cart simulate --add prod_1:2:M:purple --add prod_3 --set prod_3=4
//!
//! # Inventory report
//! neon admin inventory --search hoodie
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Filter, sort and paginate products
//! - `catalog show` - Product details and related products
//! - `cart simulate` - Apply cart operations and print the resulting cart
//! - `admin inventory` - Stock levels per product
//! - `admin dashboard` - Catalog summary
//!
//! Set `NEON_LOG_FORMAT=json` for JSON log lines. Logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neon_core::{ActorRole, ProductId};
use neon_storefront::catalog::ProductSort;

mod commands;

use commands::cart::{AddArg, SetArg};

#[derive(Parser)]
#[command(name = "neon")]
#[command(author, version, about = "Neon storefront CLI tools")]
struct Cli {
    /// JSON or YAML catalog file (overrides `STOREFRONT_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

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
    /// Simulate cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Back-office reports
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching the filters
    List {
        /// Category slug
        #[arg(long)]
        category: Option<String>,

        /// Collection slug
        #[arg(long)]
        collection: Option<String>,

        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Offered color (repeatable)
        #[arg(long = "color")]
        colors: Vec<String>,

        /// Offered size (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// Case-insensitive name or description search
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (`price_asc`, `price_desc`, `newest`, `popular`)
        #[arg(long)]
        sort: Option<ProductSort>,

        /// Page number, starting at 1
        #[arg(short, long)]
        page: Option<u32>,

        /// Products per page
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show a product and related products
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Apply adds, then quantity sets, then removals, and print the cart
    Simulate {
        /// Product to add, as `id[:qty[:size[:color]]]` (repeatable)
        #[arg(long = "add")]
        adds: Vec<AddArg>,

        /// Quantity to set, as `id=qty` (repeatable)
        #[arg(long = "set")]
        sets: Vec<SetArg>,

        /// Product to remove (repeatable)
        #[arg(long = "remove")]
        removes: Vec<ProductId>,

        /// Open the cart drawer
        #[arg(long)]
        open: bool,

        /// Run as a signed-out visitor
        #[arg(long)]
        signed_out: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List stock levels
    Inventory {
        /// Case-insensitive product name search
        #[arg(short, long)]
        search: Option<String>,

        /// Acting role (`guest`, `customer`, `admin`)
        #[arg(short, long, default_value = "admin")]
        role: ActorRole,

        /// Low-stock threshold (overrides `STOREFRONT_LOW_STOCK_THRESHOLD`)
        #[arg(short, long)]
        threshold: Option<u32>,
    },
    /// Show catalog summary figures
    Dashboard {
        /// Acting role (`guest`, `customer`, `admin`)
        #[arg(short, long, default_value = "admin")]
        role: ActorRole,

        /// Low-stock threshold (overrides `STOREFRONT_LOW_STOCK_THRESHOLD`)
        #[arg(short, long)]
        threshold: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "neon_storefront=info,neon_cli=info".into());

    let json = std::env::var("NEON_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let (json_layer, text_layer) = if json {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::load(cli.catalog).await?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                collection,
                min_price,
                max_price,
                colors,
                sizes,
                search,
                sort,
                page,
                limit,
            } => {
                let query = neon_storefront::catalog::ProductQuery {
                    category,
                    collection,
                    min_price,
                    max_price,
                    colors,
                    sizes,
                    search,
                    sort,
                    page,
                    limit,
                };
                commands::catalog::list(&ctx, &query).await?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, &id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Simulate {
                adds,
                sets,
                removes,
                open,
                signed_out,
            } => {
                let plan = commands::cart::Plan {
                    adds,
                    sets,
                    removes,
                    open,
                    signed_out,
                };
                commands::cart::simulate(&ctx, plan).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Inventory {
                search,
                role,
                threshold,
            } => commands::admin::inventory(&ctx, search.as_deref(), role, threshold).await?,
            AdminAction::Dashboard { role, threshold } => {
                commands::admin::dashboard(&ctx, role, threshold).await?;
            }
        },
    }
    Ok(())
}
