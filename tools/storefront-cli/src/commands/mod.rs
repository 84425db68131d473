//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod favorites;
pub mod list;
pub mod show;

use std::future::Future;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use indicatif::ProgressBar;
use storefront_catalog::{Operation, ProductFilter, ProductId, StateStream};

use crate::context::{Context, Store};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only products whose title or brand contains this text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only products in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Show at most this many products.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    pub fn filter(&self) -> ProductFilter {
        filter_from(self.search.as_deref(), self.category.as_deref())
    }
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Also print how many products each category holds.
    #[arg(long)]
    pub counts: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: ProductId,

    /// Quantity to price.
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Load the catalog first and serve the product from it when present.
    #[arg(long)]
    pub from_list: bool,
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    /// Toggle the favorite mark of these product ids before listing.
    #[arg(short, long, num_args = 1..)]
    pub toggle: Vec<ProductId>,

    /// Only favorites whose title or brand contains this text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., api.base_url)
        key: String,
    },

    /// Set a configuration value in the active config file
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Initialize a new config file
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

fn filter_from(search: Option<&str>, category: Option<&str>) -> ProductFilter {
    let mut filter = ProductFilter::new();
    if let Some(text) = search {
        filter = filter.text(text);
    }
    if let Some(category) = category {
        filter = filter.category(category);
    }
    filter
}

/// Drive `work` to completion, showing a spinner while `loading` reports true.
pub async fn with_spinner<F: Future>(
    ctx: &Context,
    mut loading: StateStream<bool>,
    msg: &str,
    work: F,
) -> F::Output {
    tokio::pin!(work);
    let mut spinner: Option<ProgressBar> = None;

    loop {
        tokio::select! {
            output = &mut work => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
                return output;
            }
            Some(is_loading) = loading.next() => {
                if is_loading && spinner.is_none() {
                    spinner = Some(ctx.output.spinner(msg));
                } else if !is_loading {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                }
            }
        }
    }
}

/// Fail with the store's error for `operation`, clearing it first.
pub fn take_error(store: &Store, operation: Operation) -> Result<()> {
    if let Some(message) = store.error(operation) {
        store.clear_error(operation);
        bail!(message);
    }
    Ok(())
}

/// Build a store and load the product list into it.
pub async fn load_catalog(ctx: &Context) -> Result<Store> {
    let store = ctx.store()?;
    ctx.output
        .debug(&format!("Fetching products from {}", ctx.config.api.base_url));

    with_spinner(
        ctx,
        store.watch_loading(Operation::List),
        "Loading products...",
        store.fetch_products(),
    )
    .await;
    take_error(&store, Operation::List)?;

    Ok(store)
}
