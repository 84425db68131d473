//! Configuration management commands.

use anyhow::{anyhow, bail, Result};
use storefront_catalog::Currency;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output
        .kv("product_lookup", ctx.config.api.product_lookup.as_str());
    ctx.output.kv("image_origin", &ctx.config.api.image_origin);

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("currency", ctx.config.display.currency.code());
    ctx.output
        .kv("image_urls", &ctx.config.display.image_urls.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `storefront config init` to create one.");
    };

    let mut config = StorefrontConfig::load(path)?;
    set_config_value(&mut config, key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &StorefrontConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(config.api.base_url.clone()),
        ["api", "product_lookup"] => Ok(config.api.product_lookup.as_str().to_string()),
        ["api", "image_origin"] => Ok(config.api.image_origin.clone()),
        ["display", "currency"] => Ok(config.display.currency.code().to_string()),
        ["display", "image_urls"] => Ok(config.display.image_urls.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut StorefrontConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "product_lookup"] => {
            config.api.product_lookup = value.parse()?
        }
        ["api", "image_origin"] => config.api.image_origin = value.to_string(),
        ["display", "currency"] => {
            config.display.currency = Currency::from_code(value)
                .ok_or_else(|| anyhow!("Unsupported currency: {}", value))?
        }
        ["display", "image_urls"] => config.display.image_urls = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}
