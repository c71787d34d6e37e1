//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! vitrina order preview productos.json --add 1 --add 1 --add 2 --phone 18095550100
//! ```

use vitrina_core::{Cart, Catalog, OrderMessage, OrderPhone, ProductId};
use vitrina_storefront::{catalog::load_catalog, config::CatalogSource};

use super::CliError;

/// Add each ID to a fresh cart, one unit per occurrence.
///
/// Unknown IDs are skipped with a warning, as the storefront does.
fn build_cart(catalog: &Catalog, ids: &[i32]) -> Cart {
    let mut cart = Cart::new();
    for &id in ids {
        if cart.add(catalog, ProductId::new(id)).is_none() {
            tracing::warn!("Skipping unknown product ID {id}");
        }
    }
    cart
}

/// Print the order message a visitor with this cart would send.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the cart ends up empty,
/// or the phone number is invalid.
#[allow(clippy::print_stdout)]
pub async fn preview(
    source: &CatalogSource,
    ids: &[i32],
    shop_name: &str,
    phone: Option<&str>,
) -> Result<(), CliError> {
    let catalog = load_catalog(source).await?;
    let cart = build_cart(&catalog, ids);
    let message = OrderMessage::from_cart(&cart, shop_name)?;

    println!("{}", message.text());
    println!();
    tracing::info!("Lines: {}", cart.len());
    tracing::info!("Items: {}", cart.item_count());
    tracing::info!("Total: {}", message.total());

    if let Some(phone) = phone {
        let phone = OrderPhone::parse(phone)?;
        let link = message.link(&phone)?;
        println!("{link}");
    }

    Ok(())
}
