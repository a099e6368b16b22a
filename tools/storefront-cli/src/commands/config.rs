//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
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

    // API section
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output
        .kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("data_dir", &ctx.config.data_dir().display().to_string());

    // Pricing section
    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "free_shipping_threshold",
        &pricing.free_shipping_threshold.display(),
    );
    ctx.output
        .kv("flat_shipping", &pricing.flat_shipping.display());
    ctx.output
        .kv("tax_rate_percent", &pricing.tax_rate_percent.to_string());

    // Environments
    if !ctx.config.environments.is_empty() {
        ctx.output.info("");
        ctx.output.info("Environments:");
        let mut names: Vec<&String> = ctx.config.environments.keys().collect();
        names.sort();
        for env in names {
            ctx.output.list_item(env);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
