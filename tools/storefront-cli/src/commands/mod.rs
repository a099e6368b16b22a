//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products.
    List {
        /// Category slug (e.g., "men", "accessories").
        #[arg(long)]
        category: Option<String>,

        /// Search term; takes precedence over --category when fetching.
        #[arg(short, long)]
        search: Option<String>,

        /// Price bucket number from `--buckets` (1-5).
        #[arg(short, long, conflicts_with_all = ["min", "max"])]
        price: Option<usize>,

        /// Minimum price in dollars.
        #[arg(long)]
        min: Option<i64>,

        /// Maximum price in dollars.
        #[arg(long)]
        max: Option<i64>,

        /// List the price buckets and categories and exit.
        #[arg(long)]
        buckets: bool,
    },
    /// Show one product.
    Show {
        /// Product ID.
        id: u64,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and order summary.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        product_id: u64,

        /// Quantity to add.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set the quantity of a product already in the cart.
    Update {
        /// Product ID.
        product_id: u64,

        /// New quantity (at least 1).
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        product_id: u64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Pay with PayPal instead of a card.
    #[arg(long)]
    pub paypal: bool,

    /// Skip the final confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,

    /// Show only the last N orders.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders, newest first.
    List,
    /// Show details for a specific order.
    Show {
        /// Order ID.
        id: u64,
    },
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in.
    Login {
        /// Email address (prompted if omitted).
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Create an account and sign in.
    Register {
        /// Username (prompted if omitted).
        #[arg(short, long)]
        username: Option<String>,

        /// Email address (prompted if omitted).
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Sign out and forget the stored token.
    Logout,
    /// Show the signed-in user.
    Whoami,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
