//! UI View-Models
//!
//! Headless state for the two screens of the web app. Each component owns
//! its state, exposes the interactions the page allows, and produces a
//! plain serializable view value from `render()`. Rendering that value
//! (terminal, HTML, JSON) is left to the caller.
//!
//! ## Screens
//!
//! - [`dashboard::SettingsDashboard`]: tabbed settings pages backed by the
//!   REST client
//! - [`inbox::Inbox`]: the messaging inbox (navigation, sidebar,
//!   conversation list, chat thread, customer profile)
//!
//! The marketing [`navigation::Header`] is shared by public pages.

pub mod chat_interface;
pub mod conversation_list;
pub mod customer_profile;
pub mod dashboard;
pub mod forms;
pub mod inbox;
pub mod mock;
pub mod navigation;
pub mod sidebar;

pub use chat_interface::{ChatInterface, ChatView, ThreadLine};
pub use conversation_list::{ConversationList, ConversationListView, ConversationRow, ConversationTab};
pub use customer_profile::{CustomerProfile, ProfileTab, ProfileView};
pub use dashboard::{DashboardTab, DashboardView, PanelView, SettingsDashboard};
pub use forms::{ChatPanel, ChatPanelView, FormResource, FormRow, FormView, ResourceForm, WidgetCode};
pub use inbox::{Inbox, InboxView};
pub use mock::{ActivityItem, ActivityKind, CustomerCard, InboxData, ConversationSummary, ThreadMessage};
pub use navigation::{Header, HeaderLink, HeaderView, NavItem, NavigationView, TopNavigation};
pub use sidebar::{ConversationFilter, Sidebar, SidebarSection, SidebarView};

use serde::Serialize;

/// Pages of the web app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// The messaging inbox
    Inbox,
    Login,
    Dashboard,
    Features,
    About,
    Contact,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Inbox => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Features => "/#features",
            Route::About => "/about",
            Route::Contact => "/contact",
        }
    }
}
