//! Rendering for the Switch Detail App

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use super::state::{DetailTab, RouteContext, State};
use crate::tui::resource::Resource;
use crate::tui::state::Theme;

pub fn render(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    match &state.switch_detail {
        Resource::NotAsked | Resource::Loading => render_message(frame, area, "Loading switch details...", theme),
        Resource::Failure(err) => render_message(frame, area, &format!("Error: {}", err), theme),
        Resource::Success(_) => match state.current_route {
            RouteContext::SwitchDetails => render_switch_details(state, frame, area, theme),
            RouteContext::PortDetails => render_port_details(state, frame, area, theme),
        },
    }
}

pub fn state_color(switch_state: &str, theme: &Theme) -> Color {
    match switch_state.to_ascii_uppercase().as_str() {
        "ACTIVATED" | "ACTIVE" | "UP" => theme.accent_success,
        "DEACTIVATED" | "INACTIVE" | "DOWN" => theme.accent_error,
        _ => theme.text_secondary,
    }
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let widget = Paragraph::new(text.to_string())
        .style(Style::default().fg(theme.text_secondary))
        .block(panel("Switch Details", theme));
    frame.render_widget(widget, area);
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_secondary))
        .title(Span::styled(title, Style::default().fg(theme.accent_primary)))
}

fn field_line(label: &str, value: &str, theme: &Theme) -> Line<'static> {
    let value = if value.is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(format!("{:<13}", label), Style::default().fg(theme.text_secondary)),
        Span::styled(value.to_string(), Style::default().fg(theme.text_primary)),
    ])
}

fn render_switch_details(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let discrepancy_height = if state.status_discrepancy { 4 } else { 0 };
    let [info_area, discrepancy_area, tabs_area, body_area] = Layout::vertical([
        Constraint::Length(8),
        Constraint::Length(discrepancy_height),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let mask = if state.mask_checked { "[x] legacy" } else { "[ ] legacy" };
    let mut id_line = field_line("Switch ID", state.displayed_switch_id(), theme);
    id_line.push_span(Span::styled(format!("  {}", mask), Style::default().fg(theme.text_secondary)));

    let state_value = if state.fields.state.is_empty() { "-" } else { state.fields.state.as_str() };
    let state_line = Line::from(vec![
        Span::styled(format!("{:<13}", "State"), Style::default().fg(theme.text_secondary)),
        Span::styled(
            state_value.to_string(),
            Style::default().fg(state_color(&state.fields.state, theme)),
        ),
    ]);

    let info = Paragraph::new(vec![
        field_line("Name", &state.fields.name, theme),
        id_line,
        field_line("Address", &state.fields.address, theme),
        field_line("Hostname", &state.fields.hostname, theme),
        field_line("Description", &state.fields.description, theme),
        state_line,
    ])
    .wrap(Wrap { trim: true })
    .block(panel("Switch Details", theme));
    frame.render_widget(info, info_area);

    if state.status_discrepancy {
        let lines = vec![
            field_line("Controller", &state.discrepancy.controller, theme),
            field_line("Inventory", &state.discrepancy.inventory, theme),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_warning))
            .title(Span::styled("Status Discrepancy", Style::default().fg(theme.accent_warning)));
        frame.render_widget(Paragraph::new(lines).block(block), discrepancy_area);
    }

    let titles: Vec<Line> = DetailTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.opened_tab.index())
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(
            Style::default()
                .fg(theme.accent_primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border_secondary)));
    frame.render_widget(tabs, tabs_area);

    let body = if state.is_loader_active {
        format!("Loading {}...", state.opened_tab.label().to_lowercase())
    } else {
        format!(
            "{} of {}",
            state.opened_tab.label(),
            if state.fields.name.is_empty() { state.displayed_switch_id() } else { state.fields.name.as_str() }
        )
    };
    frame.render_widget(
        Paragraph::new(body)
            .style(Style::default().fg(theme.text_secondary))
            .block(panel(state.opened_tab.label(), theme)),
        body_area,
    );
}

fn render_port_details(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let port = state.port.as_deref().unwrap_or("-");
    let lines = vec![
        field_line("Switch", state.displayed_switch_id(), theme),
        field_line("Name", &state.fields.name, theme),
        field_line("Port", port, theme),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(panel("Port Details", theme)),
        area,
    );
}
