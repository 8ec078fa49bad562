pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kilda-cli")]
#[command(about = "A terminal console for OpenKilda switches")]
#[command(version)]
pub struct Cli {
    /// OpenKilda GUI API base url, overriding config and KILDA_URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive console (default)
    Tui(commands::TuiArgs),
    /// Show one switch's details
    Switch(commands::SwitchArgs),
    /// List every switch the controller knows
    Switches(commands::SwitchesArgs),
}
