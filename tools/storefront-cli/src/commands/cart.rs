//! Cart commands.
//!
//! Lines are addressed by product id; the cart merges repeat adds of the same
//! product, so there is at most one line per product.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_core::cart::{validate_quantity, CartStore, OrderSummary};
use storefront_core::ids::{LineItemId, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &mut Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx),
        Some(CartCommand::Add {
            product_id,
            quantity,
        }) => add_to_cart(ProductId::new(product_id), quantity, ctx).await,
        Some(CartCommand::Update {
            product_id,
            quantity,
        }) => update_quantity(ProductId::new(product_id), quantity, ctx),
        Some(CartCommand::Remove { product_id }) => remove_item(ProductId::new(product_id), ctx),
        Some(CartCommand::Clear { yes }) => clear_cart(yes, ctx),
    }
}

fn show_cart(ctx: &Context) -> Result<()> {
    let summary = ctx.cart.summary(&ctx.config.pricing);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": ctx.cart.cart(),
            "summary": summary,
        }));
        return Ok(());
    }

    ctx.output.header("Shopping Cart");

    if ctx.cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output
            .info("Run `storefront products list` to find something you like.");
        return Ok(());
    }

    print_lines(&ctx.cart, ctx);
    print_summary(&summary, ctx);
    Ok(())
}

async fn add_to_cart(product_id: ProductId, quantity: i64, ctx: &mut Context) -> Result<()> {
    let quantity = validate_quantity(quantity)?;

    let spinner = ctx.output.spinner("Looking up product...");
    let fetched = ctx.api.get_product(product_id).await;
    spinner.finish_and_clear();
    let product = fetched.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if !product.is_available() {
        bail!("{} is out of stock", product.name);
    }

    ctx.cart.add_item(product.to_cart_item(quantity));

    let in_cart = ctx
        .cart
        .item_for_product(&product_id)
        .map_or(quantity, |line| line.quantity);
    ctx.output.success(&format!(
        "Added {} x {} ({} in cart)",
        quantity, product.name, in_cart
    ));
    ctx.output
        .kv("Cart total", &ctx.cart.cart().total_amount.display());

    if ctx.output.is_json() {
        ctx.output.json(ctx.cart.cart());
    }
    Ok(())
}

fn update_quantity(product_id: ProductId, quantity: i64, ctx: &mut Context) -> Result<()> {
    let quantity = validate_quantity(quantity)?;
    let line = line_for_product(&ctx.cart, product_id)?;

    ctx.cart.update_quantity(&line, quantity);
    ctx.output
        .success(&format!("Quantity set to {}", quantity));
    ctx.output
        .kv("Cart total", &ctx.cart.cart().total_amount.display());
    Ok(())
}

fn remove_item(product_id: ProductId, ctx: &mut Context) -> Result<()> {
    let line = line_for_product(&ctx.cart, product_id)?;
    let name = ctx
        .cart
        .cart()
        .get_item(&line)
        .map(|item| item.name.clone())
        .unwrap_or_default();

    ctx.cart.remove_item(&line);
    ctx.output.success(&format!("Removed {}", name));
    Ok(())
}

fn clear_cart(yes: bool, ctx: &mut Context) -> Result<()> {
    if ctx.cart.is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from your cart?",
                ctx.cart.cart().total_items
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    ctx.cart.clear();
    ctx.output.success("Cart cleared");
    Ok(())
}

fn line_for_product(cart: &CartStore, product_id: ProductId) -> Result<LineItemId> {
    match cart.item_for_product(&product_id) {
        Some(line) => Ok(line.id),
        None => bail!("Product {} is not in your cart", product_id),
    }
}

/// Print the cart lines as a table.
pub(crate) fn print_lines(cart: &CartStore, ctx: &Context) {
    let widths = [6, 30, 10, 4, 10];
    ctx.output
        .table_header(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    for item in cart.items() {
        let id = item.product_id.to_string();
        let name = truncate(&item.name, widths[1]);
        let price = item.price.display();
        let quantity = item.quantity.to_string();
        let total = item.line_total().display();
        ctx.output
            .table_row(&[&id, &name, &price, &quantity, &total], &widths);
    }
}

/// Print subtotal, shipping, tax and total.
pub(crate) fn print_summary(summary: &OrderSummary, ctx: &Context) {
    ctx.output.info("");
    ctx.output
        .kv(&format!("Subtotal ({} items)", summary.item_count), &summary.subtotal.display());
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
}
