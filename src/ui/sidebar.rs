//! Inbox sidebar: conversation filters, activity shortcuts, lead status

use serde::Serialize;

use crate::models::LeadStatus;

/// Workspace name shown in the sidebar header
pub const WORKSPACE_NAME: &str = "Venture Auto";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationFilter {
    #[default]
    All,
    Assigned,
    Unassigned,
}

impl ConversationFilter {
    pub const ALL: [ConversationFilter; 3] = [
        ConversationFilter::All,
        ConversationFilter::Assigned,
        ConversationFilter::Unassigned,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ConversationFilter::All => "all",
            ConversationFilter::Assigned => "assigned",
            ConversationFilter::Unassigned => "unassigned",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConversationFilter::All => "All Conversations",
            ConversationFilter::Assigned => "Assigned to You",
            ConversationFilter::Unassigned => "Unassigned",
        }
    }
}

/// Collapsible groups of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarSection {
    Conversations,
    Activity,
    Status,
}

impl SidebarSection {
    pub fn title(&self) -> &'static str {
        match self {
            SidebarSection::Conversations => "CONVERSATIONS",
            SidebarSection::Activity => "ACTIVITY",
            SidebarSection::Status => "STATUS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub section: SidebarSection,
    pub title: &'static str,
    pub expanded: bool,
    /// Empty while the section is folded
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub collapsed: bool,
    /// Hidden while collapsed
    pub workspace: Option<&'static str>,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    conversation_filter: ConversationFilter,
    status_filter: LeadStatus,
    show_conversations: bool,
    show_activity: bool,
    show_status: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            conversation_filter: ConversationFilter::All,
            status_filter: LeadStatus::NewLead,
            show_conversations: true,
            show_activity: true,
            show_status: true,
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_filter(&self) -> ConversationFilter {
        self.conversation_filter
    }

    pub fn status_filter(&self) -> LeadStatus {
        self.status_filter
    }

    pub fn set_conversation_filter(&mut self, filter: ConversationFilter) {
        self.conversation_filter = filter;
    }

    pub fn set_status_filter(&mut self, status: LeadStatus) {
        self.status_filter = status;
    }

    pub fn is_expanded(&self, section: SidebarSection) -> bool {
        match section {
            SidebarSection::Conversations => self.show_conversations,
            SidebarSection::Activity => self.show_activity,
            SidebarSection::Status => self.show_status,
        }
    }

    pub fn toggle_section(&mut self, section: SidebarSection) {
        let flag = match section {
            SidebarSection::Conversations => &mut self.show_conversations,
            SidebarSection::Activity => &mut self.show_activity,
            SidebarSection::Status => &mut self.show_status,
        };
        *flag = !*flag;
    }

    pub fn render(&self, collapsed: bool) -> SidebarView {
        if collapsed {
            return SidebarView {
                collapsed,
                workspace: None,
                sections: Vec::new(),
            };
        }

        let conversations = ConversationFilter::ALL
            .iter()
            .map(|f| SidebarItem {
                id: f.id(),
                label: f.label(),
                active: *f == self.conversation_filter,
            })
            .collect();

        // Shortcuts only, nothing is selectable here
        let activity = vec![
            SidebarItem {
                id: "reviews",
                label: "Reviews",
                active: false,
            },
            SidebarItem {
                id: "calls",
                label: "Calls",
                active: false,
            },
        ];

        let statuses = LeadStatus::all()
            .iter()
            .map(|s| SidebarItem {
                id: s.id(),
                label: s.label(),
                active: *s == self.status_filter,
            })
            .collect();

        let sections = [
            (SidebarSection::Conversations, conversations),
            (SidebarSection::Activity, activity),
            (SidebarSection::Status, statuses),
        ]
        .into_iter()
        .map(|(section, items)| {
            let expanded = self.is_expanded(section);
            SectionView {
                section,
                title: section.title(),
                expanded,
                items: if expanded { items } else { Vec::new() },
            }
        })
        .collect();

        SidebarView {
            collapsed,
            workspace: Some(WORKSPACE_NAME),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sidebar = Sidebar::new();
        assert_eq!(sidebar.conversation_filter(), ConversationFilter::All);
        assert_eq!(sidebar.status_filter(), LeadStatus::NewLead);

        let view = sidebar.render(false);
        assert_eq!(view.workspace, Some("Venture Auto"));
        assert_eq!(view.sections.len(), 3);
        assert!(view.sections.iter().all(|s| s.expanded));
        assert_eq!(view.sections[2].items.len(), 8);
    }

    #[test]
    fn test_collapsed_hides_sections() {
        let view = Sidebar::new().render(true);
        assert!(view.sections.is_empty());
        assert!(view.workspace.is_none());
    }

    #[test]
    fn test_toggle_section() {
        let mut sidebar = Sidebar::new();
        sidebar.toggle_section(SidebarSection::Activity);

        let view = sidebar.render(false);
        assert!(!view.sections[1].expanded);
        assert!(view.sections[1].items.is_empty());
        assert!(view.sections[0].expanded);

        sidebar.toggle_section(SidebarSection::Activity);
        assert!(sidebar.is_expanded(SidebarSection::Activity));
    }

    #[test]
    fn test_filters_mark_active_item() {
        let mut sidebar = Sidebar::new();
        sidebar.set_conversation_filter(ConversationFilter::Unassigned);
        sidebar.set_status_filter(LeadStatus::Won);

        let view = sidebar.render(false);
        let active_filter: Vec<_> = view.sections[0]
            .items
            .iter()
            .filter(|i| i.active)
            .map(|i| i.id)
            .collect();
        assert_eq!(active_filter, ["unassigned"]);

        let active_status: Vec<_> = view.sections[2]
            .items
            .iter()
            .filter(|i| i.active)
            .map(|i| i.label)
            .collect();
        assert_eq!(active_status, ["Won"]);
    }
}
