//! Multi-app runtime: owns the terminal loop and swaps apps as the route changes
//!
//! Exactly one app is live at a time. After every batch of messages the
//! router's current route decides which app that should be; when it differs
//! from the live one, the live app is torn down before its successor starts.

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;

use super::apps::{SwitchDetailApp, SwitchListApp};
use super::router::Route;
use super::runtime::{AppRuntime, Runtime};
use super::state::Theme;
use crate::services::{Overlays, Services, ToastLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppId {
    SwitchList,
    SwitchDetail,
}

impl AppId {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::SwitchDetail { .. } | Route::PortDetail { .. } => AppId::SwitchDetail,
            Route::Switches | Route::NotFound(_) => AppId::SwitchList,
        }
    }
}

pub struct MultiAppRuntime {
    services: Services,
    overlays: Overlays,
    theme: Theme,
    tick_rate: Duration,
    active: Box<dyn Runtime>,
    active_id: AppId,
    quit: bool,
}

impl MultiAppRuntime {
    /// Start the app matching the router's current route.
    /// Must be called from within a tokio runtime.
    pub fn new(services: Services, overlays: Overlays, tick_rate: Duration) -> Self {
        let active_id = AppId::for_route(&services.router.route());
        let active = start_app(active_id, services.clone());

        Self {
            services,
            overlays,
            theme: Theme::default(),
            tick_rate,
            active,
            active_id,
            quit: false,
        }
    }

    pub fn active_app(&self) -> AppId {
        self.active_id
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply pending app messages, then follow any route change
    pub fn tick(&mut self) {
        self.active.process_pending();
        self.sync_route();
        if self.active.quit_requested() {
            self.quit = true;
        }
    }

    fn sync_route(&mut self) {
        let target = AppId::for_route(&self.services.router.route());
        if target == self.active_id {
            return;
        }

        log::info!("Switching app {:?} -> {:?}", self.active_id, target);
        self.active.teardown();
        self.active = start_app(target, self.services.clone());
        self.active_id = target;
        set_terminal_title(self.active.title());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if self.active.handle_key(&key) {
            return;
        }
        if key.code == KeyCode::Char('q') {
            self.quit = true;
        }
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.tick_rate);
        set_terminal_title(self.active.title());

        while !self.quit {
            self.tick();
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                _ = ticker.tick() => {}
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        log::error!("Terminal event error: {}", e);
                        self.quit = true;
                    }
                    None => self.quit = true,
                },
            }
        }

        self.active.teardown();
        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [header_area, body_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header = Line::from(vec![
            Span::styled(
                self.active.title(),
                Style::default()
                    .fg(self.theme.accent_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.services.router.url()),
                Style::default().fg(self.theme.text_secondary),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        self.active.render(frame, body_area, &self.theme);

        if let Some(status) = self.active.status() {
            frame.render_widget(Paragraph::new(status), status_area);
        }
        frame.render_widget(Paragraph::new(self.help_line()), help_area);

        self.draw_toasts(frame, body_area);
        if let Some(caption) = self.overlays.loader.caption() {
            draw_loader(frame, body_area, &caption, &self.theme);
        }
    }

    fn help_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        let mut seen = Vec::new();
        for (key, description) in self.active.key_hints() {
            // Arrow and paging keys share one description
            if seen.contains(&description) {
                continue;
            }
            seen.push(description.clone());
            spans.push(Span::styled(key, Style::default().fg(self.theme.accent_primary)));
            spans.push(Span::styled(
                format!(" {}  ", description),
                Style::default().fg(self.theme.text_secondary),
            ));
        }
        spans.push(Span::styled("q", Style::default().fg(self.theme.accent_primary)));
        spans.push(Span::styled(" Quit", Style::default().fg(self.theme.text_secondary)));
        Line::from(spans)
    }

    fn draw_toasts(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(40);
        let mut y = area.y;

        for toast in self.overlays.toasts.active().iter().rev() {
            if y + 3 > area.y + area.height {
                break;
            }
            let color = match toast.level {
                ToastLevel::Error => self.theme.accent_error,
                ToastLevel::Success => self.theme.accent_success,
            };
            let rect = Rect::new(area.x + area.width - width, y, width, 3);
            let widget = Paragraph::new(toast.message.clone())
                .style(Style::default().fg(self.theme.text_primary))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .title(Span::styled(toast.title.clone(), Style::default().fg(color))),
                );
            frame.render_widget(Clear, rect);
            frame.render_widget(widget, rect);
            y += 3;
        }
    }
}

fn start_app(id: AppId, services: Services) -> Box<dyn Runtime> {
    match id {
        AppId::SwitchList => Box::new(AppRuntime::<SwitchListApp>::new(services)),
        AppId::SwitchDetail => Box::new(AppRuntime::<SwitchDetailApp>::new(services)),
    }
}

fn draw_loader(frame: &mut Frame, area: Rect, caption: &str, theme: &Theme) {
    let width = (caption.len() as u16 + 6).min(area.width);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(3) / 2,
        width,
        3.min(area.height),
    );
    let widget = Paragraph::new(format!("{}...", caption))
        .style(Style::default().fg(theme.accent_warning))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent_warning)),
        );
    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}

fn set_terminal_title(title: &str) {
    if let Err(e) = crossterm::execute!(std::io::stdout(), crossterm::terminal::SetTitle(title)) {
        log::debug!("Could not set terminal title: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, FakeSwitchService, Reply};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    const SWITCH_ID: &str = "00:00:00:00:00:00:00:01";

    async fn settle(runtime: &mut MultiAppRuntime) {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            runtime.tick();
        }
    }

    fn runtime(url: &str, reply: Reply) -> MultiAppRuntime {
        let (services, doubles) = test_support::services(url, FakeSwitchService::new(reply), false);
        let overlays = Overlays {
            toasts: doubles.toasts.clone(),
            loader: doubles.loader.clone(),
        };
        MultiAppRuntime::new(services, overlays, Duration::from_millis(50))
    }

    fn screen(runtime: &MultiAppRuntime) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| runtime.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_app_for_route() {
        assert_eq!(AppId::for_route(&Route::parse("/switches")), AppId::SwitchList);
        assert_eq!(AppId::for_route(&Route::parse("/switches/a")), AppId::SwitchDetail);
        assert_eq!(AppId::for_route(&Route::parse("/switches/a/port/1")), AppId::SwitchDetail);
        assert_eq!(AppId::for_route(&Route::parse("/flows")), AppId::SwitchList);
    }

    #[tokio::test]
    async fn test_navigation_swaps_apps() {
        let body = json!({ "switch_id": SWITCH_ID, "name": "sw-lab-1", "state": "ACTIVATED" });
        let mut runtime = runtime("/switches", Reply::Body(body));
        settle(&mut runtime).await;
        assert_eq!(runtime.active_app(), AppId::SwitchList);

        runtime.services.router.navigate(&format!("/switches/{}", SWITCH_ID));
        settle(&mut runtime).await;

        assert_eq!(runtime.active_app(), AppId::SwitchDetail);
        assert!(screen(&runtime).contains("sw-lab-1"));
    }

    #[tokio::test]
    async fn test_missing_switch_returns_to_list_with_toast() {
        let mut runtime = runtime(&format!("/switches/{}", SWITCH_ID), Reply::Body(json!({})));
        settle(&mut runtime).await;

        assert_eq!(runtime.active_app(), AppId::SwitchList);
        assert!(screen(&runtime).contains("No Switch Found"));
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut runtime = runtime("/switches", Reply::Body(json!(null)));
        runtime.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(runtime.should_quit());
    }
}
