//! The Elm-style app contract
//!
//! An app owns a `State`, reacts to `Msg`s in `update` and describes its
//! side effects as [`Command`]s; the runtime performs them and delivers the
//! results back as messages. `update` is the only place state changes.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::Frame;

use super::command::Command;
use super::state::Theme;
use super::subscription::Subscription;

pub trait App: 'static {
    type State;
    type Msg: Clone + Send + 'static;
    type InitParams;

    fn init(params: Self::InitParams) -> (Self::State, Command<Self::Msg>);

    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    fn view(state: &Self::State, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Keyboard shortcuts active for the current state
    fn subscriptions(_state: &Self::State) -> Vec<Subscription<Self::Msg>> {
        Vec::new()
    }

    fn title() -> &'static str;

    fn status(_state: &Self::State) -> Option<Line<'static>> {
        None
    }

    /// Called once before the app is dropped. Listener tasks are disposed by
    /// the runtime right after the returned command runs.
    fn on_destroy(_state: &mut Self::State) -> Command<Self::Msg> {
        Command::None
    }
}
