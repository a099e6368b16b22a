//! Order history commands.

use anyhow::Result;
use storefront_core::checkout::Order;
use storefront_core::ids::OrderId;

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{format_timestamp, order_status_badge, payment_status_badge, truncate};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &mut Context) -> Result<()> {
    ctx.require_user().await?;

    match args.command {
        Some(OrdersCommand::List) | None => list_orders(args.limit, ctx).await,
        Some(OrdersCommand::Show { id }) => show_order(OrderId::new(id), ctx).await,
    }
}

async fn list_orders(limit: Option<usize>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading orders...");
    let fetched = ctx.api.user_orders().await;
    spinner.finish_and_clear();
    let mut orders = fetched.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    // The backend returns newest first
    if let Some(limit) = limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Your Orders");

    if orders.is_empty() {
        ctx.output.info("You haven't placed any orders yet.");
        return Ok(());
    }

    let widths = [8, 18, 10, 10, 12];
    ctx.output
        .table_header(&["ORDER", "PLACED", "ITEMS", "TOTAL", "STATUS"], &widths);
    for order in &orders {
        let id = format!("#{}", order.id);
        let placed = format_timestamp(&order.created_at);
        let items = order.item_count().to_string();
        let total = order.total_amount.display();
        let status = order_status_badge(order.status);
        ctx.output
            .table_row(&[&id, &placed, &items, &total, &status], &widths);
    }

    Ok(())
}

async fn show_order(id: OrderId, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading order...");
    let fetched = ctx.api.get_order(id).await;
    spinner.finish_and_clear();
    let order = fetched.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    print_order(&order, ctx);
    Ok(())
}

fn print_order(order: &Order, ctx: &Context) {
    ctx.output.header(&format!("Order #{}", order.id));
    ctx.output.kv("Placed", &format_timestamp(&order.created_at));
    ctx.output.kv("Status", &order_status_badge(order.status));
    ctx.output
        .kv("Payment", &payment_status_badge(order.payment_status));
    if let Some(method) = order.payment_method {
        ctx.output.kv("Method", method.display_name());
    }

    ctx.output.info("");
    let widths = [30, 10, 4, 10];
    ctx.output
        .table_header(&["PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    for item in &order.items {
        let name = truncate(&item.name, widths[0]);
        let price = item.price.display();
        let quantity = item.quantity.to_string();
        let total = item.line_total().display();
        ctx.output
            .table_row(&[&name, &price, &quantity, &total], &widths);
    }

    ctx.output.info("");
    ctx.output.kv("Total", &order.total_amount.display());
    ctx.output
        .kv("Ship to", &order.shipping_address.one_line());
    ctx.output
        .kv("Bill to", &order.billing_address.one_line());
}
