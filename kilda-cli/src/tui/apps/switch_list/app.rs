use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::Frame;

use crate::services::Services;
use crate::tui::app::App;
use crate::tui::command::Command;
use crate::tui::resource::Resource;
use crate::tui::router;
use crate::tui::state::Theme;
use crate::tui::subscription::Subscription;

use super::state::{Msg, State};
use super::view;

pub const PAGE_TITLE: &str = "OPEN KILDA - Switches";

pub struct SwitchListApp;

impl App for SwitchListApp {
    type State = State;
    type Msg = Msg;
    type InitParams = Services;

    fn init(services: Services) -> (State, Command<Msg>) {
        let mut state = State {
            services,
            switches: Resource::NotAsked,
            selected: 0,
        };
        let cmd = load_switches(&mut state);
        (state, cmd)
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::SwitchesLoaded(result) => {
                match &result {
                    Ok(switches) => log::info!("Loaded {} switches", switches.len()),
                    Err(e) => log::error!("Failed to load switches: {}", e),
                }
                state.switches = Resource::from(result);
                state.handle_key(KeyCode::Null);
                Command::None
            }
            Msg::Refresh => load_switches(state),
            Msg::ListNavigate(key) => {
                state.handle_key(key);
                Command::None
            }
            Msg::OpenSelected => {
                if let Some(switch) = state.selected_switch() {
                    let url = router::switch_url(&switch.switch_id);
                    state.services.router.navigate(&url);
                }
                Command::None
            }
            Msg::Quit => Command::quit_self(),
        }
    }

    fn view(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
        view::render(state, frame, area, theme);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            Subscription::keyboard(KeyCode::Char('r'), "Refresh", Msg::Refresh),
            Subscription::keyboard(KeyCode::Esc, "Quit", Msg::Quit),
        ];

        if state.switches.is_success() {
            for key in [KeyCode::Up, KeyCode::Down, KeyCode::PageUp, KeyCode::PageDown, KeyCode::Home, KeyCode::End] {
                subs.push(Subscription::keyboard(key, "Navigate", Msg::ListNavigate(key)));
            }
            subs.push(Subscription::keyboard(KeyCode::Enter, "Open", Msg::OpenSelected));
        }

        subs
    }

    fn title() -> &'static str {
        PAGE_TITLE
    }

    fn status(state: &State) -> Option<Line<'static>> {
        match &state.switches {
            Resource::Success(switches) => Some(Line::from(format!("{} switches", switches.len()))),
            _ => None,
        }
    }
}

fn load_switches(state: &mut State) -> Command<Msg> {
    state.switches = Resource::Loading;
    let switches = state.services.switches.clone();
    Command::perform(
        async move { switches.list_switches().await.map_err(|e| format!("{:#}", e)) },
        Msg::SwitchesLoaded,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SwitchDetail;
    use crate::test_support::{self, FakeSwitchService, Reply};
    use crate::tui::runtime::{AppRuntime, Runtime};
    use std::time::Duration;

    const IDLE: Duration = Duration::from_millis(50);

    fn listing() -> Vec<SwitchDetail> {
        ["00:00:00:00:00:00:00:01", "00:00:00:00:00:00:00:02", "00:00:00:00:00:00:00:03"]
            .iter()
            .map(|id| SwitchDetail {
                switch_id: id.to_string(),
                name: format!("sw-{}", &id[id.len() - 2..]),
                ..Default::default()
            })
            .collect()
    }

    async fn start(reply: Reply) -> AppRuntime<SwitchListApp> {
        let switches = FakeSwitchService::new(reply).with_listing(listing());
        let (services, _doubles) = test_support::services(router::SWITCHES_URL, switches, false);
        let mut runtime = AppRuntime::<SwitchListApp>::new(services);
        runtime.settle(IDLE).await;
        runtime
    }

    #[tokio::test]
    async fn test_loads_listing() {
        let runtime = start(Reply::Body(serde_json::Value::Null)).await;
        match &runtime.state().switches {
            Resource::Success(switches) => assert_eq!(switches.len(), 3),
            _ => panic!("switches not loaded"),
        }
        assert_eq!(runtime.state().selected, 0);
    }

    #[tokio::test]
    async fn test_selection_is_clamped() {
        let mut runtime = start(Reply::Body(serde_json::Value::Null)).await;

        runtime.dispatch(Msg::ListNavigate(KeyCode::Up));
        assert_eq!(runtime.state().selected, 0);

        for _ in 0..5 {
            runtime.dispatch(Msg::ListNavigate(KeyCode::Down));
        }
        assert_eq!(runtime.state().selected, 2);

        runtime.dispatch(Msg::ListNavigate(KeyCode::Home));
        assert_eq!(runtime.state().selected, 0);
    }

    #[tokio::test]
    async fn test_open_selected_navigates_to_detail() {
        let mut runtime = start(Reply::Body(serde_json::Value::Null)).await;

        runtime.dispatch(Msg::ListNavigate(KeyCode::Down));
        runtime.dispatch(Msg::OpenSelected);

        assert_eq!(
            runtime.state().services.router.url(),
            "/switches/00:00:00:00:00:00:00:02"
        );
    }

    #[tokio::test]
    async fn test_failed_listing_is_shown() {
        let runtime = start(Reply::Error("connection refused".to_string())).await;
        assert_eq!(
            runtime.state().switches,
            Resource::Failure("connection refused".to_string())
        );
        assert!(runtime.state().selected_switch().is_none());
    }

    #[tokio::test]
    async fn test_escape_requests_quit() {
        let mut runtime = start(Reply::Body(serde_json::Value::Null)).await;
        let key = crossterm::event::KeyEvent::from(KeyCode::Esc);

        assert!(runtime.handle_key(&key));
        assert!(runtime.quit_requested());
    }
}
