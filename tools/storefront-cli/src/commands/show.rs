//! Product detail command.

use anyhow::Result;
use serde_json::json;
use storefront_catalog::{resolve_image_url, CatalogError, Operation, PriceQuote, Quantity};

use super::{load_catalog, take_error, with_spinner, ShowArgs};
use crate::context::Context;
use crate::output::{favorite_marker, money};

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let quantity = Quantity::try_from(args.quantity)?;

    let store = if args.from_list {
        load_catalog(ctx).await?
    } else {
        ctx.store()?
    };

    with_spinner(
        ctx,
        store.watch_loading(Operation::Detail),
        &format!("Loading product {}...", args.id),
        store.open_product(args.id),
    )
    .await;
    take_error(&store, Operation::Detail)?;

    let product = store
        .selected_product()
        .ok_or(CatalogError::ProductNotFound(args.id))?;
    let quote = PriceQuote::new(&product, quantity);
    let image_url = resolve_image_url(&product.image, &ctx.config.api.image_origin);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "image_url": image_url,
            "quote": quote,
        }));
        return Ok(());
    }

    let currency = ctx.config.display.currency;
    ctx.output.header(&format!(
        "{} {}",
        favorite_marker(product.is_favorite),
        product.title
    ));
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("category", &product.category);
    if let Some(brand) = &product.brand {
        ctx.output.kv("brand", brand);
    }
    if let Some(model) = &product.model {
        ctx.output.kv("model", model);
    }
    if let Some(color) = &product.color {
        ctx.output.kv("color", color);
    }
    ctx.output.kv("image", &image_url);
    ctx.output.kv("price", &money(quote.unit_price, currency));
    ctx.output.kv("quantity", &quote.quantity.get().to_string());
    ctx.output.kv("total", &money(quote.total, currency));
    if quote.discount_percent > 0 {
        ctx.output.kv(
            "discount",
            &format!(
                "{}% (save {})",
                quote.discount_percent,
                money(quote.savings(), currency)
            ),
        );
        ctx.output
            .kv("you pay", &money(quote.discounted_total, currency));
    }

    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    Ok(())
}
