pub mod switch;
pub mod switches;

use clap::Args;

use crate::tui::router;

#[derive(Args, Default)]
pub struct TuiArgs {
    /// Open this switch's detail page instead of the switch list
    #[arg(long)]
    pub switch: Option<String>,

    /// Open the port view of the switch given with --switch
    #[arg(long, requires = "switch")]
    pub port: Option<String>,
}

impl TuiArgs {
    /// Url the console starts on
    pub fn initial_url(&self) -> String {
        match (&self.switch, &self.port) {
            (Some(switch_id), Some(port)) => router::port_url(switch_id, port),
            (Some(switch_id), None) => router::switch_url(switch_id),
            _ => router::SWITCHES_URL.to_string(),
        }
    }
}

#[derive(Args)]
pub struct SwitchArgs {
    /// Switch id, in colon-separated or legacy `SW` form
    pub switch_id: String,

    /// Print the raw record as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the switch id in legacy `SW` form
    #[arg(long)]
    pub legacy: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args)]
pub struct SwitchesArgs {
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_url() {
        assert_eq!(TuiArgs::default().initial_url(), "/switches");

        let args = TuiArgs {
            switch: Some("00:00:00:00:00:00:00:01".to_string()),
            port: None,
        };
        assert_eq!(args.initial_url(), "/switches/00:00:00:00:00:00:00:01");

        let args = TuiArgs {
            switch: Some("00:00:00:00:00:00:00:01".to_string()),
            port: Some("5".to_string()),
        };
        assert_eq!(args.initial_url(), "/switches/00:00:00:00:00:00:00:01/port/5");
    }
}
