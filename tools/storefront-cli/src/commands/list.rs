//! Product listing command.

use anyhow::Result;
use storefront_catalog::{resolve_image_url, Product};

use super::{load_catalog, ListArgs};
use crate::context::Context;
use crate::output::{favorite_marker, price_label, truncate};

const TITLE_WIDTH: usize = 40;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = load_catalog(ctx).await?;

    let filter = args.filter();
    let mut products = store.search(&filter);
    let matched = products.len();
    if let Some(limit) = args.limit {
        products.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        if filter.is_empty() {
            ctx.output.warn("The catalog returned no products");
        } else {
            ctx.output.info("No products match the filter");
        }
        return Ok(());
    }

    ctx.output.header(&format!("Products ({} of {})", products.len(), store.products().len()));
    print_rows(&products, ctx);

    if matched > products.len() {
        ctx.output
            .info(&format!("{} more not shown", matched - products.len()));
    }

    Ok(())
}

/// Print products as table rows.
pub fn print_rows(products: &[Product], ctx: &Context) {
    let currency = ctx.config.display.currency;
    let widths = [1, 6, TITLE_WIDTH, 14, 16];

    ctx.output
        .table_row(&["", "ID", "TITLE", "CATEGORY", "PRICE"], &widths);
    for product in products {
        let marker = favorite_marker(product.is_favorite);
        let id = product.id.to_string();
        let title = truncate(&product.title, TITLE_WIDTH);
        let price = price_label(product, currency);
        ctx.output.table_row(
            &[
                marker.as_str(),
                id.as_str(),
                title.as_str(),
                product.category.as_str(),
                price.as_str(),
            ],
            &widths,
        );
        if ctx.config.display.image_urls {
            ctx.output.kv(
                "image",
                &resolve_image_url(&product.image, &ctx.config.api.image_origin),
            );
        }
    }
}
