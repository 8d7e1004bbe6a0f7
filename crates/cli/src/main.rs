//! Online Marketplace CLI - drive the client cart, checkout and session.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product to the cart
//! mp-cli cart add --id p-laptop --name "Laptop" --price 15999000 --stock 5 -q 2
//!
//! # Add a product from a catalog JSON document
//! mp-cli cart add --product product.json
//!
//! # Show the cart with totals
//! mp-cli cart show
//!
//! # Preview the order request, then confirm it with the backend's order id
//! mp-cli checkout --address "Jl. Merdeka 1" --phone 081234567890
//! mp-cli checkout --address "Jl. Merdeka 1" --phone 081234567890 --order-id ORD-42
//!
//! # Store a login session
//! mp-cli session login --token "$TOKEN" --name "Budi" --email budi@example.com
//!
//! # Look up an order from a saved backend response
//! mp-cli order show ORD-123456 --response order.json
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and mutate the persisted cart
//! - `checkout` - Validate, preview and complete an order
//! - `order` - Look up an order or list order history
//! - `product` - Validate admin product forms
//! - `session` - Show, store or clear the login session

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use marketplace_core::{Email, OrderStatus, PaymentMethod};
use marketplace_storefront::{FileStorage, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(author, version, about = "Online marketplace client tools")]
struct Cli {
    /// Override the storage directory (`MARKETPLACE_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Validate the checkout form and create or preview an order
    Checkout(CheckoutArgs),
    /// Look up orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Admin product tools
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the login session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart lines and totals
    Show {
        /// Print the raw line items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product (merges with an existing line)
    Add {
        /// Catalog product JSON file (`_id`, `name`, `price`, `stock`, `images`)
        #[arg(long, conflicts_with_all = ["id", "name", "price", "stock", "image"])]
        product: Option<PathBuf>,

        /// Product ID
        #[arg(long, required_unless_present = "product")]
        id: Option<String>,

        /// Product name
        #[arg(long, required_unless_present = "product")]
        name: Option<String>,

        /// Unit price in Rupiah
        #[arg(long, required_unless_present = "product")]
        price: Option<u64>,

        /// Units in stock
        #[arg(long, required_unless_present = "product")]
        stock: Option<u32>,

        /// Primary image URL
        #[arg(long)]
        image: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: String,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Customer name (defaults to the logged-in user's name)
    #[arg(long)]
    name: Option<String>,

    /// Shipping address
    #[arg(long)]
    address: String,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Notes for the seller
    #[arg(long, default_value = "")]
    notes: String,

    /// Payment method (`whatsapp`, `bank_transfer`, `cod`)
    #[arg(long, default_value = "whatsapp")]
    payment: PaymentMethod,

    /// Order ID returned by the backend; completes checkout and clears the cart
    #[arg(long)]
    order_id: Option<String>,

    /// Order status returned by the backend
    #[arg(long, default_value = "pending", requires = "order_id")]
    status: OrderStatus,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Look up one order by ID
    Show {
        /// Order ID
        id: String,

        /// Backend response body to render instead of printing the request
        #[arg(long)]
        response: Option<PathBuf>,
    },
    /// List the logged-in user's orders
    History {
        /// Page number
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Orders per page
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,

        /// Backend response body to render instead of printing the request
        #[arg(long)]
        response: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Validate a product form JSON document
    Check {
        /// Product form file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the current session
    Show,
    /// Store a login session issued by the backend
    Login {
        /// Bearer token
        #[arg(long)]
        token: String,

        /// User display name
        #[arg(short, long)]
        name: String,

        /// User email address
        #[arg(short, long)]
        email: Email,

        /// User role
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// Clear the session and the cart
    Logout,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marketplace_storefront=info,mp_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> marketplace_storefront::Result<()> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    let storage = FileStorage::open(&config.storage_dir)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show { json } => commands::cart::show(&config, &storage, json)?,
            CartAction::Add {
                product,
                id,
                name,
                price,
                stock,
                image,
                quantity,
            } => {
                let product = match product {
                    Some(path) => commands::cart::product_from_file(&path)?,
                    None => commands::cart::product_from_args(id, name, price, stock, image)?,
                };
                commands::cart::add(&config, &storage, &product, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&config, &storage, &id),
            CartAction::Update { id, quantity } => {
                commands::cart::update(&config, &storage, &id, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&config, &storage),
        },
        Commands::Checkout(args) => {
            let input = commands::checkout::CheckoutInput {
                name: args.name,
                address: args.address,
                phone: args.phone,
                notes: args.notes,
                payment_method: args.payment,
                order_id: args.order_id,
                status: args.status,
            };
            commands::checkout::run(&config, &storage, input)?;
        }
        Commands::Order { action } => match action {
            OrderAction::Show { id, response } => {
                commands::order::show(&config, &storage, &id, response.as_deref())?;
            }
            OrderAction::History {
                page,
                limit,
                response,
            } => commands::order::history(&config, &storage, page, limit, response.as_deref())?,
        },
        Commands::Product { action } => match action {
            ProductAction::Check { file } => commands::product::check(&file)?,
        },
        Commands::Session { action } => match action {
            SessionAction::Show => commands::session::show(&config, &storage),
            SessionAction::Login {
                token,
                name,
                email,
                role,
            } => commands::session::login(&config, &storage, token, name, email, role)?,
            SessionAction::Logout => commands::session::logout(&config, &storage)?,
        },
    }
    Ok(())
}
