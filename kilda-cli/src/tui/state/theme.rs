use ratatui::style::Color;

/// Colors shared by every view
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent_primary: Color,
    pub accent_success: Color,
    pub accent_warning: Color,
    pub accent_error: Color,
    pub border_primary: Color,
    pub border_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent_primary: Color::Cyan,
            accent_success: Color::Green,
            accent_warning: Color::Yellow,
            accent_error: Color::Red,
            border_primary: Color::Cyan,
            border_secondary: Color::DarkGray,
        }
    }
}
