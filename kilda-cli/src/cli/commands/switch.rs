//! `switch` command: print one switch's details

use anyhow::{Context, Result};
use colored::*;

use super::SwitchArgs;
use crate::api::{KildaClient, MaskMode, SwitchDetail, SwitchService, transform};
use crate::config::Config;
use crate::tui::apps::switch_detail::state::{DiscrepancyData, NOT_REPORTED};

pub async fn handle_switch_command(args: SwitchArgs, config: &Config) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    // The backend addresses switches by their native id
    let switch_id = if args.switch_id.to_ascii_uppercase().starts_with("SW") {
        transform(&args.switch_id, MaskMode::Kilda)
    } else {
        args.switch_id.clone()
    };

    let client = KildaClient::new(&config.api)?;
    let detail = client
        .switch_detail(&switch_id)
        .await
        .with_context(|| format!("Failed to load switch {}", switch_id))?
        .ok_or_else(|| anyhow::anyhow!("No Switch Found: {}", switch_id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detail.raw)?);
        return Ok(());
    }

    print_detail(&detail, args.legacy);
    Ok(())
}

fn print_detail(detail: &SwitchDetail, legacy: bool) {
    let mode = if legacy { MaskMode::Legacy } else { MaskMode::Kilda };
    let state = match detail.state.to_ascii_uppercase().as_str() {
        "ACTIVATED" | "ACTIVE" => detail.state.bright_green(),
        "" => NOT_REPORTED.dimmed(),
        _ => detail.state.bright_red(),
    };

    println!("{}", detail.name.bold());
    println!("  {:<13}{}", "Switch ID", transform(&detail.switch_id, mode).cyan());
    println!("  {:<13}{}", "Address", or_dash(&detail.address));
    println!("  {:<13}{}", "Hostname", or_dash(&detail.hostname));
    println!("  {:<13}{}", "Description", or_dash(&detail.description));
    println!("  {:<13}{}", "State", state);

    if let Some(status) = detail.status_discrepancy() {
        let data = DiscrepancyData {
            controller: status.controller_status.clone().unwrap_or_else(|| NOT_REPORTED.to_string()),
            inventory: status.inventory_status.clone().unwrap_or_else(|| NOT_REPORTED.to_string()),
        };
        println!();
        println!("{}", "Status discrepancy".yellow().bold());
        println!("  {:<13}{}", "Controller", data.controller);
        println!("  {:<13}{}", "Inventory", data.inventory);
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { NOT_REPORTED } else { value }
}
