//! Searchable list of open or closed conversations

use serde::Serialize;

use super::mock::InboxData;
use crate::models::ConversationStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationTab {
    #[default]
    Open,
    Closed,
}

impl ConversationTab {
    fn matches(&self, status: ConversationStatus) -> bool {
        match self {
            ConversationTab::Open => status == ConversationStatus::Open,
            ConversationTab::Closed => status == ConversationStatus::Closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationRow {
    pub id: String,
    pub customer_name: String,
    pub last_message: String,
    pub timestamp: String,
    pub avatar: String,
    /// Badge text, upper-cased
    pub lead_status: String,
    pub selected: bool,
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationListView {
    pub title: &'static str,
    pub tab: ConversationTab,
    pub search: String,
    pub rows: Vec<ConversationRow>,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationList {
    tab: ConversationTab,
    search: String,
}

impl ConversationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ConversationTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ConversationTab) {
        self.tab = tab;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Rows matching the tab and a case-insensitive name search, in data
    /// order
    pub fn render(&self, data: &InboxData, selected: &str) -> ConversationListView {
        let needle = self.search.to_lowercase();

        let rows = data
            .conversations()
            .iter()
            .filter(|c| self.tab.matches(c.status))
            .filter(|c| c.customer_name.to_lowercase().contains(&needle))
            .map(|c| ConversationRow {
                id: c.id.clone(),
                customer_name: c.customer_name.clone(),
                last_message: c.last_message.clone(),
                timestamp: c.timestamp.clone(),
                avatar: c.avatar.clone(),
                lead_status: data
                    .customer(&c.id)
                    .map(|card| card.lead_status.label().to_uppercase())
                    .unwrap_or_default(),
                selected: c.id == selected,
                unread: c.unread,
            })
            .collect();

        ConversationListView {
            title: "All Conversations",
            tab: self.tab,
            search: self.search.clone(),
            rows,
        }
    }
}
