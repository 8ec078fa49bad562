//! `switches` command: list every switch

use anyhow::{Context, Result};
use colored::*;

use super::SwitchesArgs;
use crate::api::{KildaClient, SwitchService};
use crate::config::Config;

pub async fn handle_switches_command(args: SwitchesArgs, config: &Config) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let client = KildaClient::new(&config.api)?;
    let switches = client
        .list_switches()
        .await
        .context("Failed to list switches")?;

    if switches.is_empty() {
        println!("{}", "No switches found".yellow());
        return Ok(());
    }

    println!(
        "{:<26}{:<24}{}",
        "SWITCH ID".bold(),
        "NAME".bold(),
        "STATE".bold()
    );
    for switch in &switches {
        let state = match switch.state.to_ascii_uppercase().as_str() {
            "ACTIVATED" | "ACTIVE" => switch.state.bright_green(),
            _ => switch.state.bright_red(),
        };
        println!("{:<26}{:<24}{}", switch.switch_id.cyan(), switch.name, state);
    }
    println!();
    println!("{} switches", switches.len().to_string().bold());
    Ok(())
}
