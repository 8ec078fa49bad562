//! Switch Detail App - Main Application
//!
//! Binds one switch's detail page to backend data. Every listener it opens
//! is keyed, so the runtime's disposal group replaces or releases it; a
//! route change never stacks a second store-setting listener on the first.

use crossterm::event::KeyCode;
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::api::{CacheBuster, MaskMode, transform};
use crate::config::settings::{SWITCH_DETAILS_JSON, has_store_setting};
use crate::services::Services;
use crate::tui::app::App;
use crate::tui::command::Command;
use crate::tui::resource::Resource;
use crate::tui::router::{self, Route};
use crate::tui::state::Theme;
use crate::tui::subscription::{Subscription, broadcast_stream, watch_stream};

use super::msg::Msg;
use super::state::{
    ClipboardItem, ClipboardItems, DetailTab, DiscrepancyData, NOT_REPORTED, RouteContext,
    State, SwitchFields,
};
use super::view;

pub const PAGE_TITLE: &str = "OPEN KILDA - View Switch";
pub const LOADING_CAPTION: &str = "Loading Switch Details";
pub const NOT_FOUND_MESSAGE: &str = "No Switch Found";
pub const NOT_FOUND_TITLE: &str = "Error";

pub const ROUTE_PARAMS_LISTENER: &str = "route-params";
pub const NAVIGATION_LISTENER: &str = "navigation";
pub const STORE_SETTING_LISTENER: &str = "store-setting";

pub struct SwitchDetailApp;

impl App for SwitchDetailApp {
    type State = State;
    type Msg = Msg;
    type InitParams = Services;

    fn init(services: Services) -> (State, Command<Msg>) {
        let state = State::new(services);
        let router = state.services.router.clone();

        // Receivers first, so the forced navigation below is not missed
        let params = router.subscribe_params();
        let events = router.subscribe_events();

        // Deep links into the port view need the route resolved again
        if router.url().contains("/port") {
            router.renavigate();
        }

        let settings = state.services.settings.clone();
        let cmd = Command::batch(vec![
            Command::perform(
                async move { has_store_setting(settings.as_ref()).await },
                Msg::StoreFlagRead,
            ),
            Command::listen(
                ROUTE_PARAMS_LISTENER,
                watch_stream(params)
                    .filter_map(|switch_id| futures::future::ready(switch_id.map(Msg::RouteParams))),
            ),
            Command::listen(
                NAVIGATION_LISTENER,
                broadcast_stream(events).map(Msg::NavigationEnd),
            ),
        ]);

        (state, cmd)
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            // === Routing ===
            Msg::RouteParams(switch_id) => {
                log::info!("Switch detail route param: {}", switch_id);
                state.switch_id = Some(switch_id.clone());
                load_switch_detail(state, switch_id)
            }
            Msg::NavigationEnd(event) => {
                state.current_route = RouteContext::from_url(&event.url);
                state.port = match Route::parse(&event.url) {
                    Route::PortDetail { port, .. } => Some(port),
                    _ => None,
                };
                Command::None
            }
            Msg::Back => {
                let target = match (state.current_route, &state.switch_id) {
                    (RouteContext::PortDetails, Some(switch_id)) => router::switch_url(switch_id),
                    _ => router::SWITCHES_URL.to_string(),
                };
                state.services.router.navigate(&target);
                Command::None
            }

            // === Loading ===
            Msg::StoreFlagRead(enabled) => {
                state.has_store_setting = enabled;
                Command::None
            }
            Msg::StoreSettingReceived(setting) => {
                log::debug!("Store setting received: {:?}", setting);
                match state.switch_id.clone() {
                    Some(switch_id) => fetch_switch_detail(state, switch_id),
                    None => Command::None,
                }
            }
            Msg::StoreCheckFinished(result) => {
                if let Err(e) = result {
                    log::warn!("Switch store check failed: {}", e);
                }
                Command::None
            }
            Msg::SwitchDetailLoaded {
                switch_id,
                has_store_setting,
                result,
            } => {
                if state.switch_id.as_deref() != Some(switch_id.as_str()) {
                    log::debug!("Dropping stale detail for {}", switch_id);
                    return Command::None;
                }
                state.has_store_setting = has_store_setting;
                handle_detail_loaded(state, result)
            }
            Msg::DetailPersisted(result) => {
                if let Err(e) = result {
                    log::error!("Failed to persist {}: {}", SWITCH_DETAILS_JSON, e);
                }
                Command::None
            }

            // === UI callbacks ===
            Msg::ToggleTab(tab, enable_loader) => {
                toggle_tab(state, tab, enable_loader);
                Command::None
            }
            Msg::NextTab => {
                let next = state.opened_tab.next();
                toggle_tab(state, next, false);
                Command::None
            }
            Msg::MaskSwitchId(checked) => {
                mask_switch_id(state, checked);
                Command::None
            }
            Msg::ToggleMask => {
                let checked = !state.mask_checked;
                mask_switch_id(state, checked);
                Command::None
            }
            Msg::CopyToClip(item) => {
                copy_to_clip(state, item);
                Command::None
            }
        }
    }

    fn view(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
        view::render(state, frame, area, theme);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            Subscription::keyboard(KeyCode::Esc, "Back", Msg::Back),
        ];

        if state.current_route == RouteContext::SwitchDetails {
            for (i, tab) in DetailTab::ALL.iter().enumerate() {
                let key = char::from_digit(i as u32 + 1, 10).unwrap_or('1');
                subs.push(Subscription::keyboard(KeyCode::Char(key), tab.label(), Msg::ToggleTab(*tab, false)));
            }
            subs.push(Subscription::keyboard(KeyCode::Tab, "Next tab", Msg::NextTab));
        }

        if state.switch_detail.is_success() {
            let mask_label = if state.mask_checked { "Kilda ID" } else { "Legacy ID" };
            subs.push(Subscription::keyboard(KeyCode::Char('m'), mask_label, Msg::ToggleMask));
            subs.push(Subscription::keyboard(
                KeyCode::Char('n'),
                "Copy name",
                Msg::CopyToClip(ClipboardItem::SourceSwitchName),
            ));
            subs.push(Subscription::keyboard(
                KeyCode::Char('i'),
                "Copy ID",
                Msg::CopyToClip(ClipboardItem::SourceSwitch),
            ));
            subs.push(Subscription::keyboard(
                KeyCode::Char('h'),
                "Copy hostname",
                Msg::CopyToClip(ClipboardItem::TargetSwitchName),
            ));
        }

        subs
    }

    fn title() -> &'static str {
        PAGE_TITLE
    }

    fn status(state: &State) -> Option<Line<'static>> {
        let theme = Theme::default();
        let switch_id = state.displayed_switch_id().to_string();
        if switch_id.is_empty() {
            return None;
        }

        let mut spans = vec![Span::raw(switch_id)];
        if !state.fields.state.is_empty() {
            spans.push(Span::raw(" · "));
            spans.push(Span::styled(
                state.fields.state.clone(),
                Style::default().fg(view::state_color(&state.fields.state, &theme)),
            ));
        }
        if state.status_discrepancy {
            spans.push(Span::styled(
                " · status discrepancy",
                Style::default().fg(theme.accent_warning),
            ));
        }
        Some(Line::from(spans))
    }

    fn on_destroy(state: &mut State) -> Command<Msg> {
        match state.setting_subscription.take() {
            Some(key) => Command::cancel(key),
            None => Command::None,
        }
    }
}

/// Show the loader, listen for the store setting and trigger a store check.
/// The detail fetch itself runs when the setting arrives.
fn load_switch_detail(state: &mut State, switch_id: String) -> Command<Msg> {
    state.services.loader.show(LOADING_CAPTION);
    state.switch_detail = Resource::Loading;

    // Same key as any previous listener, which the runtime cancels
    let settings_rx = state.services.store_settings.subscribe();
    state.setting_subscription = Some(STORE_SETTING_LISTENER.to_string());
    let listen = Command::listen(
        STORE_SETTING_LISTENER,
        broadcast_stream(settings_rx).map(Msg::StoreSettingReceived),
    );

    log::debug!("Checking switch store details before loading {}", switch_id);
    let store_settings = state.services.store_settings.clone();
    let check = Command::perform(
        async move {
            store_settings
                .check_switch_store_details(CacheBuster::now())
                .await
                .map_err(|e| format!("{:#}", e))
        },
        Msg::StoreCheckFinished,
    );

    Command::batch(vec![listen, check])
}

/// Re-read the persisted store flag, then fetch the switch
fn fetch_switch_detail(state: &State, switch_id: String) -> Command<Msg> {
    let settings = state.services.settings.clone();
    let switches = state.services.switches.clone();

    Command::perform(
        async move {
            let has_store_setting = has_store_setting(settings.as_ref()).await;
            let result = switches
                .switch_detail(&switch_id)
                .await
                .map_err(|e| format!("{:#}", e));
            Msg::SwitchDetailLoaded {
                switch_id,
                has_store_setting,
                result,
            }
        },
        std::convert::identity,
    )
}

fn handle_detail_loaded(
    state: &mut State,
    result: Result<Option<crate::api::SwitchDetail>, String>,
) -> Command<Msg> {
    let detail = match result {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            log::warn!("Switch {:?} not found", state.switch_id);
            return switch_not_found(state, NOT_FOUND_MESSAGE.to_string());
        }
        Err(e) => {
            log::warn!("Failed to load switch {:?}: {}", state.switch_id, e);
            return switch_not_found(state, e);
        }
    };

    state.services.loader.hide();

    state.fields = SwitchFields::from(&detail);
    state.clipboard_items = ClipboardItems::from_detail(&detail);
    // Records arrive in native format
    state.mask_checked = false;
    // No tab content loads behind the default tab
    state.is_loader_active = false;

    state.status_discrepancy = false;
    state.discrepancy = DiscrepancyData::default();
    if let Some(status) = detail.status_discrepancy() {
        state.status_discrepancy = true;
        state.discrepancy = DiscrepancyData {
            controller: status
                .controller_status
                .clone()
                .unwrap_or_else(|| NOT_REPORTED.to_string()),
            inventory: status
                .inventory_status
                .clone()
                .unwrap_or_else(|| NOT_REPORTED.to_string()),
        };
    }

    // Persist the body as received, not the typed view
    let raw = detail.raw.to_string();
    let settings = state.services.settings.clone();
    let persist = Command::perform(
        async move {
            settings
                .set(SWITCH_DETAILS_JSON, &raw)
                .await
                .map_err(|e| format!("{:#}", e))
        },
        Msg::DetailPersisted,
    );

    state.switch_detail = Resource::Success(detail);
    persist
}

/// Missing and failed loads end the same way: a toast and the switch list
fn switch_not_found(state: &mut State, reason: String) -> Command<Msg> {
    state.services.loader.hide();
    state.switch_detail = Resource::Failure(reason);
    state
        .services
        .notifier
        .error(NOT_FOUND_MESSAGE, NOT_FOUND_TITLE);
    state.services.router.navigate(router::SWITCHES_URL);
    Command::None
}

fn toggle_tab(state: &mut State, tab: DetailTab, enable_loader: bool) {
    state.opened_tab = tab;
    state.is_loader_active = enable_loader;
}

fn mask_switch_id(state: &mut State, checked: bool) {
    state.mask_checked = checked;
    let mode = if checked { MaskMode::Legacy } else { MaskMode::Kilda };

    if let Some(detail) = state.switch_detail.as_mut() {
        detail.switch_id = transform(&detail.switch_id, mode);
        state.clipboard_items.source_switch = detail.switch_id.clone();
    }
}

fn copy_to_clip(state: &State, item: ClipboardItem) {
    let text = state.clipboard_items.get(item);
    match state.services.clipboard.copy_from_content(text) {
        Ok(()) => {
            log::info!("Copied {} to clipboard", item.label());
            state
                .services
                .notifier
                .success(&format!("{} copied", item.label()), "Clipboard");
        }
        Err(e) => log::error!("Clipboard copy of {} failed: {:#}", item.label(), e),
    }
}
