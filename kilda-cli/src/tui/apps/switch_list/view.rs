use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::api::SwitchDetail;
use crate::tui::apps::switch_detail::view::state_color;
use crate::tui::resource::Resource;
use crate::tui::state::Theme;

use super::state::State;

pub fn render(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_primary))
        .title(Span::styled("Switches", Style::default().fg(theme.accent_primary)));

    match &state.switches {
        Resource::NotAsked | Resource::Loading => {
            let widget = Paragraph::new("Loading switches...")
                .style(Style::default().fg(theme.text_secondary))
                .block(block);
            frame.render_widget(widget, area);
        }
        Resource::Failure(err) => {
            let widget = Paragraph::new(Line::from(vec![
                Span::styled("Error: ", Style::default().fg(theme.accent_error)),
                Span::styled(err.clone(), Style::default().fg(theme.text_primary)),
            ]))
            .block(block);
            frame.render_widget(widget, area);
        }
        Resource::Success(switches) if switches.is_empty() => {
            let widget = Paragraph::new("No switches found. Press r to refresh.")
                .style(Style::default().fg(theme.text_secondary))
                .block(block);
            frame.render_widget(widget, area);
        }
        Resource::Success(switches) => {
            let items: Vec<ListItem> = switches.iter().map(|s| switch_item(s, theme)).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            let mut list_state = ListState::default().with_selected(Some(state.selected));
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn switch_item(switch: &SwitchDetail, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(format!("{:<26}", switch.switch_id), Style::default().fg(theme.text_primary)),
        Span::styled(format!("{:<24}", switch.name), Style::default().fg(theme.text_secondary)),
        Span::styled(switch.state.clone(), Style::default().fg(state_color(&switch.state, theme))),
    ]))
}
