//! Top navigation bar of the inbox and the marketing header

use serde::Serialize;

use super::Route;

/// Entries of the inbox top navigation bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavItem {
    Home,
    #[default]
    Inbox,
    Contacts,
    Marketing,
    Payments,
    Reporting,
    Insights,
    Automations,
}

impl NavItem {
    pub const ALL: [NavItem; 8] = [
        NavItem::Home,
        NavItem::Inbox,
        NavItem::Contacts,
        NavItem::Marketing,
        NavItem::Payments,
        NavItem::Reporting,
        NavItem::Insights,
        NavItem::Automations,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            NavItem::Home => "home",
            NavItem::Inbox => "inbox",
            NavItem::Contacts => "contacts",
            NavItem::Marketing => "marketing",
            NavItem::Payments => "payments",
            NavItem::Reporting => "reporting",
            NavItem::Insights => "insights",
            NavItem::Automations => "automations",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Home => "Home",
            NavItem::Inbox => "Inbox",
            NavItem::Contacts => "Contacts",
            NavItem::Marketing => "Marketing",
            NavItem::Payments => "Payments",
            NavItem::Reporting => "Reporting",
            NavItem::Insights => "Insights",
            NavItem::Automations => "Automations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub item: NavItem,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub entries: Vec<NavEntry>,
    pub mobile_menu_open: bool,
}

/// Inbox top navigation state
#[derive(Debug, Clone, Default)]
pub struct TopNavigation {
    active: NavItem,
    mobile_menu_open: bool,
}

impl TopNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> NavItem {
        self.active
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Activate an entry; also closes the mobile menu
    pub fn click(&mut self, item: NavItem) {
        self.active = item;
        self.mobile_menu_open = false;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn render(&self) -> NavigationView {
        NavigationView {
            entries: NavItem::ALL
                .iter()
                .map(|&item| NavEntry {
                    item,
                    label: item.label(),
                    active: item == self.active,
                })
                .collect(),
            mobile_menu_open: self.mobile_menu_open,
        }
    }
}

// ============================================
// Marketing header
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderLink {
    Features,
    About,
    Contact,
    SignIn,
    Dashboard,
}

impl HeaderLink {
    pub fn label(&self) -> &'static str {
        match self {
            HeaderLink::Features => "Features",
            HeaderLink::About => "About",
            HeaderLink::Contact => "Contact",
            HeaderLink::SignIn => "Sign In",
            HeaderLink::Dashboard => "Dashboard",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            HeaderLink::Features => Route::Features,
            HeaderLink::About => Route::About,
            HeaderLink::Contact => Route::Contact,
            HeaderLink::SignIn => Route::Login,
            HeaderLink::Dashboard => Route::Dashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub links: Vec<HeaderLink>,
    /// Empty when the page hides the auth buttons
    pub auth_links: Vec<HeaderLink>,
    pub mobile_menu_open: bool,
}

/// Header of the public marketing pages
#[derive(Debug, Clone)]
pub struct Header {
    show_auth_buttons: bool,
    mobile_menu_open: bool,
}

impl Default for Header {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Header {
    pub fn new(show_auth_buttons: bool) -> Self {
        Self {
            show_auth_buttons,
            mobile_menu_open: false,
        }
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    /// Follow a link: closes the mobile menu and returns the target page
    pub fn follow(&mut self, link: HeaderLink) -> Route {
        self.mobile_menu_open = false;
        link.route()
    }

    pub fn render(&self) -> HeaderView {
        HeaderView {
            links: vec![HeaderLink::Features, HeaderLink::About, HeaderLink::Contact],
            auth_links: if self.show_auth_buttons {
                vec![HeaderLink::SignIn, HeaderLink::Dashboard]
            } else {
                Vec::new()
            },
            mobile_menu_open: self.mobile_menu_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_active_item() {
        let nav = TopNavigation::new();
        let view = nav.render();

        assert_eq!(view.entries.len(), 8);
        let active: Vec<_> = view.entries.iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].item, NavItem::Inbox);
    }

    #[test]
    fn test_click_closes_mobile_menu() {
        let mut nav = TopNavigation::new();
        nav.toggle_mobile_menu();
        assert!(nav.is_mobile_menu_open());

        nav.click(NavItem::Payments);
        assert_eq!(nav.active(), NavItem::Payments);
        assert!(!nav.is_mobile_menu_open());
    }

    #[test]
    fn test_header_follow() {
        let mut header = Header::default();
        header.toggle_mobile_menu();

        assert_eq!(header.follow(HeaderLink::SignIn), Route::Login);
        assert!(!header.render().mobile_menu_open);
    }

    #[test]
    fn test_header_without_auth_buttons() {
        let view = Header::new(false).render();
        assert!(view.auth_links.is_empty());
        assert_eq!(view.links.len(), 3);
    }
}
