//! `ShopEasy` CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse products
//! shopeasy products list --category electronics --sort price-asc
//! shopeasy products show 1
//!
//! # Manage the cart
//! shopeasy cart add 1
//! shopeasy cart set 1 3
//! shopeasy cart show --promo DISCOUNT10
//!
//! # Save for later and move into the cart
//! shopeasy wishlist add 5
//! shopeasy wishlist move 5
//!
//! # Log in and check out
//! shopeasy login -e shopper@example.com -p hunter22
//! shopeasy checkout --first-name Ada --last-name Lovelace ...
//! ```
//!
//! State is kept in `SHOPEASY_DATA_DIR` (default `.shopeasy`) between runs.
//! Logs go to stderr; set `RUST_LOG` to change the level.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shopeasy_core::ProductId;
use shopeasy_storefront::config::StorefrontConfig;
use shopeasy_storefront::{AppError, AppState};

mod commands;
mod render;

use commands::checkout::CheckoutArgs;

#[derive(Parser)]
#[command(name = "shopeasy")]
#[command(author, version, about = "ShopEasy command-line storefront")]
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
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// List product categories
    Categories,
    /// View and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// View and change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Log in with the demo account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Place an order for the cart
    Checkout(CheckoutArgs),
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Match title, description or category
        #[arg(short, long)]
        search: Option<String>,

        /// price-asc, price-desc, name-asc, name-desc or rating-desc
        #[arg(long)]
        sort: Option<String>,

        /// Maximum number of products (0 for all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,
    },
    /// Show one product
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and order summary
    Show {
        /// Promo code to apply to the summary
        #[arg(long)]
        promo: Option<String>,
    },
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
    /// Set a product's quantity (0 or less removes it)
    Set {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product
    Add { id: ProductId },
    /// Remove a saved product
    Remove { id: ProductId },
    /// Move a saved product into the cart
    Move { id: ProductId },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        render::error(&e);
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopeasy=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let mut app = AppState::from_config(config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                sort,
                limit,
            } => {
                commands::products::list(&app, category.as_deref(), search, sort.as_deref(), limit)
                    .await?;
            }
            ProductsAction::Show { id } => commands::products::show(&app, id).await?,
        },
        Commands::Categories => commands::products::categories(&app).await?,
        Commands::Cart { action } => match action {
            CartAction::Show { promo } => commands::cart::show(&app, promo.as_deref())?,
            CartAction::Add { id } => commands::cart::add(&mut app, id).await?,
            CartAction::Remove { id } => commands::cart::remove(&mut app, id),
            CartAction::Set { id, quantity } => commands::cart::set(&mut app, id, quantity),
            CartAction::Clear => commands::cart::clear(&mut app),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&app),
            WishlistAction::Add { id } => commands::wishlist::add(&mut app, id).await?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut app, id)?,
            WishlistAction::Move { id } => commands::wishlist::move_to_cart(&mut app, id)?,
        },
        Commands::Login { email, password } => {
            commands::account::login(&mut app, &email, password)?;
        }
        Commands::Logout => commands::account::logout(&mut app),
        Commands::Checkout(args) => commands::checkout::run(&mut app, args)?,
    }
    Ok(())
}
