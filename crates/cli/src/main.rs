//! Vitrina CLI - catalog and order tooling.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file (or URL)
//! vitrina catalog check crates/storefront/static/data/productos.json
//!
//! # Run the catalog filter from the command line
//! vitrina catalog list productos.json --category Vestidos --sort price-asc
//!
//! # Preview the order message for a cart
//! vitrina order preview productos.json --add 1 --add 1 --add 4 --phone 18095550100
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Load and validate a catalog
//! - `catalog list` - Filter and sort a catalog
//! - `order preview` - Build a cart and print the order message

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use vitrina_core::SortMode;
use vitrina_storefront::config::CatalogSource;

mod commands;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about = "Vitrina CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with order messages
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load and validate a catalog
    Check {
        /// Catalog file path or http(s) URL
        source: CatalogSource,
    },
    /// List products through the catalog filter
    List {
        /// Catalog file path or http(s) URL
        source: CatalogSource,

        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Highest price to include
        #[arg(short, long)]
        max_price: Option<String>,

        /// Sort order (`default`, `price-asc`, `price-desc`)
        #[arg(long, default_value = "default")]
        sort: SortMode,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Build a cart and print the order message
    Preview {
        /// Catalog file path or http(s) URL
        source: CatalogSource,

        /// Product ID to add (repeat to add more units)
        #[arg(short, long = "add", required = true)]
        add: Vec<i32>,

        /// Shop name used in the greeting
        #[arg(long, env = "STOREFRONT_SHOP_NAME", default_value = "Rosa's Shop")]
        shop: String,

        /// Destination number; prints the order link when set
        #[arg(long, env = "STOREFRONT_ORDER_PHONE")]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env so `--shop`/`--phone` pick up the storefront settings
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { source } => commands::catalog::check(&source).await?,
            CatalogAction::List {
                source,
                search,
                categories,
                max_price,
                sort,
                json,
            } => {
                let query = commands::catalog::ListQuery {
                    search,
                    categories,
                    max_price,
                    sort,
                };
                commands::catalog::list(&source, &query, json).await?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Preview {
                source,
                add,
                shop,
                phone,
            } => commands::order::preview(&source, &add, &shop, phone.as_deref()).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_arguments() {
        let cli = Cli::try_parse_from([
            "vitrina",
            "catalog",
            "list",
            "productos.json",
            "--category",
            "Vestidos",
            "--category",
            "Blusas",
            "--sort",
            "price-desc",
        ])
        .unwrap();

        let Commands::Catalog {
            action: CatalogAction::List {
                categories, sort, ..
            },
        } = cli.command
        else {
            panic!("expected catalog list");
        };
        assert_eq!(categories, ["Vestidos", "Blusas"]);
        assert_eq!(sort, SortMode::PriceDesc);
    }

    #[test]
    fn test_order_preview_requires_products() {
        assert!(Cli::try_parse_from(["vitrina", "order", "preview", "productos.json"]).is_err());
    }
}
