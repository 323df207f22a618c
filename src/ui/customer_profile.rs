//! Customer side panel with details, recent activity and lead status

use serde::Serialize;

use super::mock::{ActivityItem, CustomerCard};
use crate::models::LeadStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileTab {
    #[default]
    Details,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusOption {
    pub status: LeadStatus,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub tab: ProfileTab,
    pub name: String,
    pub avatar: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub lead_status: &'static str,
    /// e.g. `Visa **** 1234`
    pub card_on_file: Option<String>,
    pub card_expires: Option<String>,
    pub tags: Vec<String>,
    pub recent_activity: Vec<ActivityItem>,
    /// Present while the status dropdown is open
    pub status_options: Option<Vec<StatusOption>>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerProfile {
    tab: ProfileTab,
    status_dropdown_open: bool,
}

impl CustomerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ProfileTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: ProfileTab) {
        self.tab = tab;
    }

    pub fn is_status_dropdown_open(&self) -> bool {
        self.status_dropdown_open
    }

    pub fn toggle_status_dropdown(&mut self) {
        self.status_dropdown_open = !self.status_dropdown_open;
    }

    /// Pick a lead status: closes the dropdown and updates the customer
    pub fn choose_status(&mut self, customer: &mut CustomerCard, status: LeadStatus) {
        customer.lead_status = status;
        self.status_dropdown_open = false;
    }

    pub fn render(&self, customer: &CustomerCard) -> ProfileView {
        let status_options = self.status_dropdown_open.then(|| {
            LeadStatus::all()
                .iter()
                .map(|&status| StatusOption {
                    status,
                    label: status.label(),
                    selected: status == customer.lead_status,
                })
                .collect()
        });

        ProfileView {
            tab: self.tab,
            name: customer.name.clone(),
            avatar: customer.avatar.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            lead_status: customer.lead_status.label(),
            card_on_file: customer.card_on_file.as_ref().map(|c| c.masked()),
            card_expires: customer.card_on_file.as_ref().map(|c| c.expires.clone()),
            tags: customer.tags.clone(),
            recent_activity: customer.activity.clone(),
            status_options,
        }
    }
}
