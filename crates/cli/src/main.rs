//! Shop Front CLI - Drive the marketplace client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (tokens are persisted under SHOP_FRONT_STORAGE_DIR)
//! shop-front login -u alice -p secret
//!
//! # Browse
//! shop-front shops list
//! shop-front products list 3
//!
//! # Cart and orders (requires a session)
//! shop-front cart add 12 2
//! shop-front orders create --user-id 7 --item 12:2:19.90:Teapot
//!
//! # Run the navigation guard
//! shop-front navigate /merchant/home
//! ```
//!
//! # Commands
//!
//! - `login`, `logout`, `refresh`, `whoami`, `register` - Account and session
//! - `shops`, `products`, `orders`, `cart` - Remote service operations
//! - `navigate` - Resolve a path through the route table and guard
//! - `cache` - Inspect the namespaced local cache

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shop_front_client::ClientConfig;
use shop_front_core::{
    CartItemId, Email, OrderId, OrderStatus, Price, ProductId, ShopId, UserId, UserRole,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "shop-front")]
#[command(author, version, about = "Shop Front marketplace client")]
struct Cli {
    /// Remote service base address (overrides `SHOP_FRONT_API_BASE`)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the session
    Logout,
    /// Exchange the stored refresh token for new tokens
    Refresh,
    /// Show the current session (tokens redacted)
    Whoami,
    /// Register a new account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: Email,

        #[arg(short, long)]
        password: String,

        /// Account role (`customer`, `merchant`, `admin`)
        #[arg(short, long, default_value = "customer")]
        role: UserRole,
    },
    /// Browse and create shops
    Shops {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Browse and create products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List, place and update orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Resolve a path through the route table and navigation guard
    Navigate {
        /// Path to enter, e.g. `/cart` or `/products/3?ref=home`
        path: String,
    },
    /// Inspect the local cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// List all shops
    List,
    /// Show one shop
    Get { id: ShopId },
    /// Create a shop
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        owner_id: UserId,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List the products of a shop
    List { shop_id: ShopId },
    /// Show one product
    Get { id: ProductId },
    /// Add a product to a shop
    Create {
        shop_id: ShopId,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        price: Price,

        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List,
    /// Place an order
    Create {
        #[arg(long)]
        user_id: UserId,

        /// Order line as `product_id:quantity:price[:name]` (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    /// Move an order to a new status
    Status { id: OrderId, status: OrderStatus },
}

#[derive(Subcommand)]
enum CartAction {
    /// List the cart
    List,
    /// Add a product
    Add { product_id: ProductId, quantity: u32 },
    /// Change the quantity of a line
    Update { item_id: CartItemId, quantity: u32 },
    /// Remove a line
    Remove { item_id: CartItemId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print a cached value (`null` when absent or unreadable)
    Get { key: String },
    /// Store a JSON value
    Set { key: String, value: String },
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

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.api_base.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shop_front_cli=info,shop_front_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli.command, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn load_config(api_base: Option<&str>) -> Result<ClientConfig, shop_front_client::ConfigError> {
    let config = ClientConfig::from_env()?;
    match api_base {
        Some(api_base) => config.with_api_base(api_base),
        None => Ok(config),
    }
}

async fn run(command: Commands, config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open(config)?;

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Refresh => commands::auth::refresh(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::Register {
            username,
            email,
            password,
            role,
        } => commands::auth::register(&ctx, username, email, password, role).await?,
        Commands::Shops { action } => match action {
            ShopAction::List => commands::shops::list(&ctx).await?,
            ShopAction::Get { id } => commands::shops::get(&ctx, id).await?,
            ShopAction::Create {
                name,
                description,
                owner_id,
            } => commands::shops::create(&ctx, name, description, owner_id).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List { shop_id } => commands::shops::list_products(&ctx, shop_id).await?,
            ProductAction::Get { id } => commands::shops::get_product(&ctx, id).await?,
            ProductAction::Create {
                shop_id,
                name,
                description,
                price,
                stock,
                image,
            } => {
                let product = shop_front_client::api::types::NewProduct {
                    name,
                    description,
                    price,
                    stock,
                    product_img: image,
                };
                commands::shops::create_product(&ctx, shop_id, &product).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&ctx).await?,
            OrderAction::Create { user_id, items } => {
                commands::orders::create(&ctx, user_id, &items).await?;
            }
            OrderAction::Status { id, status } => {
                commands::orders::update_status(&ctx, id, status).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&ctx).await?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&ctx, product_id, quantity).await?,
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(&ctx, item_id, quantity).await?;
            }
            CartAction::Remove { item_id } => commands::cart::remove(&ctx, item_id).await?,
            CartAction::Clear => commands::cart::clear(&ctx).await?,
        },
        Commands::Navigate { path } => commands::navigate::navigate(&ctx, &path)?,
        Commands::Cache { action } => match action {
            CacheAction::Get { key } => commands::cache::get(&ctx, &key)?,
            CacheAction::Set { key, value } => commands::cache::set(&ctx, &key, &value)?,
        },
    }
    Ok(())
}
