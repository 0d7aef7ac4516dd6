//! Config command - show how the client configuration resolves.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Run the config command.
pub async fn run(_args: ConfigArgs, ctx: &Context) -> Result<()> {
    let config = ctx.builder()?.resolve()?;

    let api_key = match (config.api_key(), config.api_key_source()) {
        (Some(key), Some(source)) => format!("{} ({})", redact(key), source),
        _ => "not set".to_string(),
    };

    if ctx.json_output {
        return ctx.print_value(&json!({
            "protocol": config.protocol().to_string(),
            "base_url": config.base_url(),
            "base_url_source": config.base_url_source().to_string(),
            "execute_url": config.execute_url(),
            "api_key": api_key,
            "timeout_secs": config.timeout().as_secs_f64(),
            "user_agent": config.user_agent(),
        }));
    }

    println!("Configuration");
    println!("-------------");
    println!("Protocol:    {}", config.protocol());
    println!("Base URL:    {} ({})", config.base_url(), config.base_url_source());
    println!("Execute URL: {}", config.execute_url());
    println!("API key:     {}", api_key);
    println!("Timeout:     {:?}", config.timeout());
    if ctx.verbose {
        println!("User-Agent:  {}", config.user_agent());
    }

    Ok(())
}

/// Keep only enough of a key to tell keys apart.
fn redact(key: &str) -> String {
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if key.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{}", tail)
    }
}
