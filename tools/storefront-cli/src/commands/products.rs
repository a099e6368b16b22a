//! Catalog browsing commands.

use anyhow::{bail, Result};
use storefront_core::catalog::{
    CatalogFilter, Category, ListingSource, PriceRange, Product, PRICE_BUCKETS,
};
use storefront_core::ids::ProductId;
use storefront_core::Money;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List {
            category,
            search,
            price,
            min,
            max,
            buckets,
        } => {
            if buckets {
                return show_buckets(ctx);
            }
            let filter = build_filter(category, search, price, min, max)?;
            list_products(&filter, ctx).await
        }
        ProductsCommand::Show { id } => show_product(ProductId::new(id), ctx).await,
    }
}

async fn list_products(filter: &CatalogFilter, ctx: &Context) -> Result<()> {
    let source = ListingSource::for_navigation(filter.search.as_deref(), filter.category.as_deref());

    let spinner = ctx.output.spinner("Loading products...");
    let fetched = ctx.api.fetch_listing(&source).await;
    spinner.finish_and_clear();
    let products = fetched.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let visible = filter.apply(&products);

    if ctx.output.is_json() {
        ctx.output.json(&visible);
        return Ok(());
    }

    ctx.output
        .header(&Category::collection_title(filter.category.as_deref()));

    if visible.is_empty() {
        ctx.output.info("No products found matching your criteria.");
        return Ok(());
    }

    let widths = [6, 32, 12, 10, 9];
    ctx.output
        .table_header(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &visible {
        let id = product.id.to_string();
        let name = truncate(&product.name, widths[1]);
        let price = product.price.display();
        let stock = if product.is_available() { "in stock" } else { "sold out" };
        ctx.output
            .table_row(&[&id, &name, &product.category, &price, stock], &widths);
    }
    ctx.output.info(&format!(
        "{} of {} product(s) shown",
        visible.len(),
        products.len()
    ));

    Ok(())
}

async fn show_product(id: ProductId, ctx: &Context) -> Result<()> {
    let product = ctx
        .api
        .get_product(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    print_product(&product, ctx);

    if let Some(line) = ctx.cart.item_for_product(&product.id) {
        ctx.output
            .info(&format!("{} already in your cart", line.quantity));
    }

    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Price", &product.price.display());
    let category = Category::display_name(&product.category).unwrap_or(product.category.as_str());
    ctx.output.kv("Category", category);
    ctx.output.kv(
        "Availability",
        if product.is_available() { "In stock" } else { "Out of stock" },
    );
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }
}

fn show_buckets(ctx: &Context) -> Result<()> {
    ctx.output.header("Price ranges");
    for (i, bucket) in PRICE_BUCKETS.iter().enumerate() {
        ctx.output.list_item(&format!("{}: {}", i + 1, bucket.label));
    }

    ctx.output.header("Categories");
    for category in Category::standard() {
        ctx.output
            .list_item(&format!("{} ({})", category.name, category.id));
    }
    Ok(())
}

/// Turn command-line flags into a catalog filter.
fn build_filter(
    category: Option<String>,
    search: Option<String>,
    price: Option<usize>,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<CatalogFilter> {
    let mut filter = CatalogFilter::new();

    if let Some(category) = category {
        filter.select_category(category.trim());
    }
    if let Some(search) = search {
        filter.set_search(search.trim());
    }

    if let Some(n) = price {
        let Some(bucket) = n.checked_sub(1).and_then(|i| PRICE_BUCKETS.get(i)) else {
            bail!("Price bucket must be between 1 and {}", PRICE_BUCKETS.len());
        };
        filter.price = bucket.range;
    } else if min.is_some() || max.is_some() {
        let default = PriceRange::default();
        let range = PriceRange::new(
            dollar_bound("--min", min)?.unwrap_or(default.min),
            dollar_bound("--max", max)?.unwrap_or(default.max),
        );
        if range.min > range.max {
            bail!("--min must not exceed --max");
        }
        filter.price = range;
    }

    Ok(filter)
}

fn dollar_bound(flag: &str, dollars: Option<i64>) -> Result<Option<Money>> {
    match dollars {
        None => Ok(None),
        Some(dollars) => match Money::checked_from_dollars(dollars) {
            Some(amount) => Ok(Some(amount)),
            None => bail!("{} is out of range", flag),
        },
    }
}
