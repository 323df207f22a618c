//! Messaging inbox screen
//!
//! Composes the top navigation, sidebar, conversation list, chat thread
//! and the optional customer profile around one selected conversation.

use chrono::Local;
use serde::Serialize;

use super::chat_interface::{ChatInterface, ChatView};
use super::conversation_list::{ConversationList, ConversationListView};
use super::customer_profile::{CustomerProfile, ProfileView};
use super::mock::InboxData;
use super::navigation::{NavigationView, TopNavigation};
use super::sidebar::{Sidebar, SidebarView};
use crate::models::LeadStatus;

/// Conversation opened when the inbox loads
pub const DEFAULT_CONVERSATION: &str = "will-pantente";

#[derive(Debug, Clone, Serialize)]
pub struct InboxView {
    pub navigation: NavigationView,
    pub sidebar: SidebarView,
    pub conversations: ConversationListView,
    /// `None` if the selected id is not in the data set
    pub chat: Option<ChatView>,
    pub profile: Option<ProfileView>,
}

#[derive(Debug, Clone)]
pub struct Inbox {
    data: InboxData,
    selected: String,
    sidebar_collapsed: bool,
    profile_visible: bool,
    pub navigation: TopNavigation,
    pub sidebar: Sidebar,
    pub conversation_list: ConversationList,
    pub chat: ChatInterface,
    pub profile: CustomerProfile,
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new(InboxData::demo())
    }
}

impl Inbox {
    pub fn new(data: InboxData) -> Self {
        Self {
            data,
            selected: DEFAULT_CONVERSATION.to_string(),
            sidebar_collapsed: false,
            profile_visible: false,
            navigation: TopNavigation::new(),
            sidebar: Sidebar::new(),
            conversation_list: ConversationList::new(),
            chat: ChatInterface::new(),
            profile: CustomerProfile::new(),
        }
    }

    pub fn data(&self) -> &InboxData {
        &self.data
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Open another conversation. Unknown ids are ignored.
    pub fn select_conversation(&mut self, id: &str) -> bool {
        if !self.data.contains(id) {
            tracing::debug!(id, "Ignoring unknown conversation");
            return false;
        }
        self.selected = id.to_string();
        true
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn is_profile_visible(&self) -> bool {
        self.profile_visible
    }

    pub fn toggle_profile(&mut self) {
        self.profile_visible = !self.profile_visible;
    }

    pub fn close_profile(&mut self) {
        self.profile_visible = false;
    }

    /// Send the composer draft into the selected thread.
    ///
    /// Returns the sent text, or `None` if the draft was blank.
    pub fn send_message(&mut self) -> Option<String> {
        let text = self.chat.take_draft()?;
        let timestamp = Local::now().format("%-I:%M %p").to_string();
        self.data
            .push_agent_message(&self.selected, text.clone(), timestamp);
        Some(text)
    }

    /// Set the lead status of the selected customer
    pub fn choose_status(&mut self, status: LeadStatus) {
        if let Some(customer) = self.data.customer_mut(&self.selected) {
            self.profile.choose_status(customer, status);
        }
    }

    pub fn render(&self) -> InboxView {
        let chat = self.data.conversation(&self.selected).map(|conversation| {
            self.chat.render(
                conversation,
                self.data.customer(&self.selected),
                self.data.thread(&self.selected),
                self.profile_visible,
            )
        });

        let profile = if self.profile_visible {
            self.data
                .customer(&self.selected)
                .map(|customer| self.profile.render(customer))
        } else {
            None
        };

        InboxView {
            navigation: self.navigation.render(),
            sidebar: self.sidebar.render(self.sidebar_collapsed),
            conversations: self.conversation_list.render(&self.data, &self.selected),
            chat,
            profile,
        }
    }
}
