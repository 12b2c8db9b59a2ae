//! Fake Store CLI - browse the catalog, manage an account and a cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! fakestore products --category electronics --search ssd
//! fakestore product 9
//! fakestore categories
//!
//! # Account
//! fakestore register -f Ada -l Lovelace -e ada@example.com -p secret
//! fakestore login -e ada@example.com -p secret
//! fakestore whoami
//! fakestore logout
//!
//! # Cart (requires a login)
//! fakestore cart add 9
//! fakestore cart set 9 3
//! fakestore cart show
//! ```
//!
//! # Environment Variables
//!
//! - `FAKESTORE_API_URL` - Catalog API root (default: `https://fakestoreapi.com`)
//! - `FAKESTORE_DATA_DIR` - Where users, the session and carts are stored
//!   (default: `.fakestore`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use fakestore_core::ProductId;
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::StorefrontConfig;
use fakestore_storefront::storage::FileStore;
use fakestore_storefront::{AppError, Storefront};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "fakestore")]
#[command(author, version, about = "Fake Store command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category ("all" shows every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Only show products whose title or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List product categories
    Categories,
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        first_name: String,

        #[arg(short, long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out (the cart is kept for next time)
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a product's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything from the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for the CLI if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fakestore=info,fakestore_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.is_internal() {
            tracing::debug!(error = %e, "Command failed");
        }
        tracing::error!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let store = FileStore::open(&config.data_dir)?;
    let client = CatalogClient::new(&config.api_url);
    let mut shop = Storefront::open(store, client)?;

    match cli.command {
        Commands::Products { category, search } => {
            commands::catalog::products(&mut shop, category, search).await?;
        }
        Commands::Product { id } => commands::catalog::product(&mut shop, id).await?,
        Commands::Categories => commands::catalog::categories(&mut shop).await?,
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => commands::account::register(&mut shop, first_name, last_name, email, password)?,
        Commands::Login { email, password } => {
            commands::account::login(&mut shop, &email, &password)?;
        }
        Commands::Logout => commands::account::logout(&mut shop)?,
        Commands::Whoami => commands::account::whoami(&shop),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop)?,
            CartAction::Add { id } => commands::cart::add(&mut shop, id).await?,
            CartAction::Remove { id } => commands::cart::remove(&mut shop, id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&mut shop, id, quantity)?,
            CartAction::Clear => commands::cart::clear(&mut shop)?,
        },
    }
    Ok(())
}
