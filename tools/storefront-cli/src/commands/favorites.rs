//! Favorites command.
//!
//! Favorites live only in the store, so toggles apply to this run's listing.

use anyhow::Result;

use super::{filter_from, load_catalog, list::print_rows, FavoritesArgs};
use crate::context::Context;

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    let store = load_catalog(ctx).await?;

    for id in &args.toggle {
        let now_favorite = store.toggle_favorite_by_id(*id)?;
        ctx.output.debug(&format!(
            "{} {}",
            if now_favorite { "Added" } else { "Removed" },
            id
        ));
    }

    let favorites = store.search_favorites(&filter_from(args.search.as_deref(), None));

    if ctx.output.is_json() {
        ctx.output.json(&favorites);
        return Ok(());
    }

    if favorites.is_empty() {
        ctx.output.info("No favorites yet. Use --toggle <ID> to add some.");
        return Ok(());
    }

    ctx.output.header(&format!("Favorites ({})", favorites.len()));
    print_rows(&favorites, ctx);

    Ok(())
}
