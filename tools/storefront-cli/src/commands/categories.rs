//! Category listing command.

use anyhow::Result;
use serde::Serialize;
use storefront_catalog::ProductFilter;

use super::{load_catalog, CategoriesArgs};
use crate::context::Context;

#[derive(Serialize)]
struct CategoryCount {
    name: String,
    products: usize,
}

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let store = load_catalog(ctx).await?;

    let counts: Vec<CategoryCount> = store
        .categories()
        .into_iter()
        .map(|name| {
            let products = store.search(&ProductFilter::new().category(&name)).len();
            CategoryCount { name, products }
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &counts {
        if args.counts {
            ctx.output
                .list_item(&format!("{} ({})", category.name, category.products));
        } else {
            ctx.output.list_item(&category.name);
        }
    }

    Ok(())
}
