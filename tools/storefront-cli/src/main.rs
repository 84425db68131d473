//! Storefront CLI - browse the product catalog from a terminal.
//!
//! Commands:
//! - `storefront list` - List products, optionally filtered
//! - `storefront categories` - List product categories
//! - `storefront show` - Show one product with a price quote
//! - `storefront favorites` - Toggle and list favorites
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CategoriesArgs, ConfigArgs, FavoritesArgs, ListArgs, ShowArgs};

/// Storefront CLI - Browse the product catalog
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    List(ListArgs),

    /// List product categories
    Categories(CategoriesArgs),

    /// Show a single product
    Show(ShowArgs),

    /// Toggle and list favorite products
    Favorites(FavoritesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    let output = output::Output::new(cli.verbose > 0, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Favorites(args) => commands::favorites::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
