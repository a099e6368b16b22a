//! Storefront CLI - browse the catalog, manage a cart and place orders.
//!
//! Commands:
//! - `storefront products` - List and inspect products
//! - `storefront cart` - Show and edit the local cart
//! - `storefront checkout` - Walk through checkout and place an order
//! - `storefront orders` - Order history
//! - `storefront auth` - Sign in, register, sign out
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AuthArgs, CartArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductsArgs};

/// Storefront CLI - shop from the terminal
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Named environment from the config file
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(ProductsArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Check out the current cart
    Checkout(CheckoutArgs),

    /// View order history
    Orders(OrdersArgs),

    /// Sign in and out
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config and local state
    let loaded = context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output.clone());
    let mut ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &mut ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &mut ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &mut ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &mut ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` asks for debug output.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::CartCommand;

    fn cart_command(args: &[&str]) -> Option<CartCommand> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Commands::Cart(args) => args.command,
            _ => None,
        }
    }

    #[test]
    fn test_negative_quantity_reaches_the_command() {
        match cart_command(&["storefront", "cart", "update", "5", "-1"]) {
            Some(CartCommand::Update {
                product_id,
                quantity,
            }) => {
                assert_eq!(product_id, 5);
                assert_eq!(quantity, -1);
            }
            _ => panic!("expected cart update"),
        }

        match cart_command(&["storefront", "cart", "add", "5", "-q", "-2"]) {
            Some(CartCommand::Add { quantity, .. }) => assert_eq!(quantity, -2),
            _ => panic!("expected cart add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["storefront", "orders", "--json", "--env", "staging"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.env.as_deref(), Some("staging"));
    }
}
