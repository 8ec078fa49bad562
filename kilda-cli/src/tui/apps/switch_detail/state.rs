//! State types for the Switch Detail App

use crate::api::SwitchDetail;
use crate::services::Services;
use crate::tui::resource::Resource;

/// Placeholder for a status the backend did not report
pub const NOT_REPORTED: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    #[default]
    Port,
    Rules,
    Flows,
    Meters,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Port,
        DetailTab::Rules,
        DetailTab::Flows,
        DetailTab::Meters,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Port => "Ports",
            DetailTab::Rules => "Rules",
            DetailTab::Flows => "Flows",
            DetailTab::Meters => "Meters",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> DetailTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Which of the two mutually exclusive sub-views is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteContext {
    #[default]
    SwitchDetails,
    PortDetails,
}

impl RouteContext {
    pub fn from_url(url: &str) -> Self {
        if url.contains("/port") {
            RouteContext::PortDetails
        } else {
            RouteContext::SwitchDetails
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardItem {
    SourceSwitchName,
    SourceSwitch,
    TargetSwitchName,
}

impl ClipboardItem {
    pub fn label(&self) -> &'static str {
        match self {
            ClipboardItem::SourceSwitchName => "Switch name",
            ClipboardItem::SourceSwitch => "Switch ID",
            ClipboardItem::TargetSwitchName => "Hostname",
        }
    }
}

/// Strings offered for copying, kept in step with the loaded switch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardItems {
    pub source_switch_name: String,
    pub source_switch: String,
    pub target_switch_name: String,
}

impl ClipboardItems {
    pub fn from_detail(detail: &SwitchDetail) -> Self {
        Self {
            source_switch_name: detail.name.clone(),
            source_switch: detail.switch_id.clone(),
            target_switch_name: detail.hostname.clone(),
        }
    }

    pub fn get(&self, item: ClipboardItem) -> &str {
        match item {
            ClipboardItem::SourceSwitchName => &self.source_switch_name,
            ClipboardItem::SourceSwitch => &self.source_switch,
            ClipboardItem::TargetSwitchName => &self.target_switch_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscrepancyData {
    pub controller: String,
    pub inventory: String,
}

impl Default for DiscrepancyData {
    fn default() -> Self {
        Self {
            controller: NOT_REPORTED.to_string(),
            inventory: NOT_REPORTED.to_string(),
        }
    }
}

/// Display fields as fetched, before any masking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchFields {
    pub switch_id: String,
    pub name: String,
    pub address: String,
    pub hostname: String,
    pub description: String,
    pub state: String,
}

impl From<&SwitchDetail> for SwitchFields {
    fn from(detail: &SwitchDetail) -> Self {
        Self {
            switch_id: detail.switch_id.clone(),
            name: detail.name.clone(),
            address: detail.address.clone(),
            hostname: detail.hostname.clone(),
            description: detail.description.clone(),
            state: detail.state.clone(),
        }
    }
}

pub struct State {
    pub services: Services,

    /// Switch id from the route
    pub switch_id: Option<String>,
    /// The record as displayed; masking rewrites its `switch_id`
    pub switch_detail: Resource<SwitchDetail>,
    pub fields: SwitchFields,
    pub clipboard_items: ClipboardItems,

    pub opened_tab: DetailTab,
    pub current_route: RouteContext,
    /// Port number while the port sub-view is active
    pub port: Option<String>,

    pub has_store_setting: bool,
    pub status_discrepancy: bool,
    pub discrepancy: DiscrepancyData,
    pub is_loader_active: bool,
    pub mask_checked: bool,

    /// Key of the live store-setting listener
    pub setting_subscription: Option<String>,
}

impl State {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            switch_id: None,
            switch_detail: Resource::NotAsked,
            fields: SwitchFields::default(),
            clipboard_items: ClipboardItems::default(),
            opened_tab: DetailTab::default(),
            current_route: RouteContext::default(),
            port: None,
            has_store_setting: false,
            status_discrepancy: false,
            discrepancy: DiscrepancyData::default(),
            is_loader_active: true,
            mask_checked: false,
            setting_subscription: None,
        }
    }

    /// The switch id as currently displayed (masked or not)
    pub fn displayed_switch_id(&self) -> &str {
        match &self.switch_detail {
            Resource::Success(detail) => &detail.switch_id,
            _ => self.switch_id.as_deref().unwrap_or_default(),
        }
    }
}
