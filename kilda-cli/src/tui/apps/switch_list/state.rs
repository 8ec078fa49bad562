use crossterm::event::KeyCode;

use crate::api::SwitchDetail;
use crate::services::Services;
use crate::tui::resource::Resource;

pub struct State {
    pub services: Services,
    pub switches: Resource<Vec<SwitchDetail>>,
    pub selected: usize,
}

impl State {
    pub fn selected_switch(&self) -> Option<&SwitchDetail> {
        match &self.switches {
            Resource::Success(switches) => switches.get(self.selected),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        match &self.switches {
            Resource::Success(switches) => switches.len(),
            _ => 0,
        }
    }

    /// Move the selection for an arrow/paging key, clamped to the list
    pub fn handle_key(&mut self, key: KeyCode) {
        let len = self.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len - 1;
        self.selected = match key {
            KeyCode::Up => self.selected.saturating_sub(1),
            KeyCode::Down => (self.selected + 1).min(last),
            KeyCode::PageUp => self.selected.saturating_sub(PAGE_SIZE),
            KeyCode::PageDown => (self.selected + PAGE_SIZE).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => self.selected,
        };
    }
}

const PAGE_SIZE: usize = 10;

#[derive(Clone)]
pub enum Msg {
    // Data loading
    SwitchesLoaded(Result<Vec<SwitchDetail>, String>),
    Refresh,

    // List navigation
    ListNavigate(KeyCode),
    OpenSelected,

    Quit,
}
