//! Tabbed settings dashboard

use serde::Serialize;

use super::forms::{ChatPanel, ChatPanelView, FormView, ResourceForm, WidgetCode};
use super::Route;
use crate::client::{
    ApiClient, AuthContext, BusinessInfoResource, CampaignsResource, ClientResult,
    IntegrationsResource, RulesResource, TemplatesResource, TokenStoreError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Chat,
    Business,
    Campaigns,
    Templates,
    Rules,
    Integrations,
    Widget,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 7] = [
        DashboardTab::Chat,
        DashboardTab::Business,
        DashboardTab::Campaigns,
        DashboardTab::Templates,
        DashboardTab::Rules,
        DashboardTab::Integrations,
        DashboardTab::Widget,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DashboardTab::Chat => "chat",
            DashboardTab::Business => "business",
            DashboardTab::Campaigns => "campaigns",
            DashboardTab::Templates => "templates",
            DashboardTab::Rules => "rules",
            DashboardTab::Integrations => "integrations",
            DashboardTab::Widget => "widget",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Chat => "Chat",
            DashboardTab::Business => "Business Info",
            DashboardTab::Campaigns => "Campaigns",
            DashboardTab::Templates => "Templates",
            DashboardTab::Rules => "Rules",
            DashboardTab::Integrations => "Integrations",
            DashboardTab::Widget => "Widget",
        }
    }
}

impl std::str::FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardTab::ALL
            .iter()
            .copied()
            .find(|tab| tab.id() == s.to_lowercase())
            .ok_or_else(|| format!("unknown dashboard tab: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarTab {
    pub tab: DashboardTab,
    pub label: &'static str,
    pub active: bool,
}

/// The single panel below the navbar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
pub enum PanelView {
    Chat(ChatPanelView),
    Business(FormView),
    Campaigns(FormView),
    Templates(FormView),
    Rules(FormView),
    Integrations(FormView),
    Widget { endpoint: String, snippet: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub navbar: Vec<NavbarTab>,
    pub panel: PanelView,
}

pub struct SettingsDashboard {
    active_tab: DashboardTab,
    pub chat: ChatPanel,
    pub business: ResourceForm<BusinessInfoResource>,
    pub campaigns: ResourceForm<CampaignsResource>,
    pub templates: ResourceForm<TemplatesResource>,
    pub rules: ResourceForm<RulesResource>,
    pub integrations: ResourceForm<IntegrationsResource>,
    pub widget: WidgetCode,
}

impl SettingsDashboard {
    /// `base_url` is where the widget snippet posts to
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            active_tab: DashboardTab::default(),
            chat: ChatPanel::new(),
            business: ResourceForm::new(),
            campaigns: ResourceForm::new(),
            templates: ResourceForm::new(),
            rules: ResourceForm::new(),
            integrations: ResourceForm::new(),
            widget: WidgetCode::new(base_url),
        }
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: DashboardTab) {
        self.active_tab = tab;
    }

    /// Load the data behind the active panel
    pub async fn refresh(&mut self, client: &ApiClient) -> ClientResult<()> {
        match self.active_tab {
            DashboardTab::Chat => self.chat.refresh(client).await,
            DashboardTab::Business => self.business.load(client).await,
            DashboardTab::Campaigns => self.campaigns.load(client).await,
            DashboardTab::Templates => self.templates.load(client).await,
            DashboardTab::Rules => self.rules.load(client).await,
            DashboardTab::Integrations => self.integrations.load(client).await,
            DashboardTab::Widget => Ok(()),
        }
    }

    /// Sign out: drop the token and go to the login page
    pub fn logout(&self, auth: &AuthContext) -> Result<Route, TokenStoreError> {
        auth.clear_token()?;
        tracing::info!("Signed out");
        Ok(Route::Login)
    }

    pub fn render(&self) -> DashboardView {
        let navbar = DashboardTab::ALL
            .iter()
            .map(|&tab| NavbarTab {
                tab,
                label: tab.label(),
                active: tab == self.active_tab,
            })
            .collect();

        let panel = match self.active_tab {
            DashboardTab::Chat => PanelView::Chat(self.chat.render()),
            DashboardTab::Business => PanelView::Business(self.business.render()),
            DashboardTab::Campaigns => PanelView::Campaigns(self.campaigns.render()),
            DashboardTab::Templates => PanelView::Templates(self.templates.render()),
            DashboardTab::Rules => PanelView::Rules(self.rules.render()),
            DashboardTab::Integrations => PanelView::Integrations(self.integrations.render()),
            DashboardTab::Widget => PanelView::Widget {
                endpoint: self.widget.endpoint(),
                snippet: self.widget.snippet(),
            },
        };

        DashboardView { navbar, panel }
    }
}
