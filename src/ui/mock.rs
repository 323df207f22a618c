//! Demo inbox content
//!
//! The inbox screen is not wired to the backend yet; it renders this fixed
//! data set of six open conversations for the "Venture Auto" workspace.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{CardOnFile, ConversationStatus, LeadStatus, Sender};

/// Agent initials shown on outgoing messages
const AGENT_AVATAR: &str = "FK";
const AGENT_ID: &str = "frankie-k";

/// Row data for the conversation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub id: String,
    pub customer_name: String,
    pub last_message: String,
    /// Relative, as displayed ("5 min ago")
    pub timestamp: String,
    pub status: ConversationStatus,
    pub avatar: String,
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    /// Wall-clock, as displayed ("10:42 AM")
    pub timestamp: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Feedback,
    Payment,
    Call,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub title: String,
    pub timestamp: String,
    /// completed / received / missed
    pub outcome: String,
}

/// Everything the profile panel shows about a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerCard {
    pub name: String,
    pub avatar: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Location line under the name in the chat header
    pub location: String,
    pub lead_status: LeadStatus,
    pub card_on_file: Option<CardOnFile>,
    pub tags: Vec<String>,
    pub activity: Vec<ActivityItem>,
}

/// Conversations, threads and customers backing the inbox
#[derive(Debug, Clone, Default)]
pub struct InboxData {
    conversations: Vec<ConversationSummary>,
    threads: HashMap<String, Vec<ThreadMessage>>,
    customers: HashMap<String, CustomerCard>,
}

impl InboxData {
    pub fn new(
        conversations: Vec<ConversationSummary>,
        threads: HashMap<String, Vec<ThreadMessage>>,
        customers: HashMap<String, CustomerCard>,
    ) -> Self {
        Self {
            conversations,
            threads,
            customers,
        }
    }

    /// The fixed demo workspace
    pub fn demo() -> Self {
        let conversations = vec![
            summary("james-thanks", "James", "You: Hi James! Thanks for reaching out to...", "5 min ago", "J", false),
            summary("frankie-villa", "Frankie Villa", "You: Sounds good! We definitely have what...", "6 min ago", "FV", false),
            summary("lisa-bartemi", "Lisa Bartemi", "Amazing! It looks so sleek. I'd love to stop in...", "11 min ago", "LB", false),
            summary("cam-yahway", "Cam Yahway", "You: $99 Payment Request", "24 min ago", "CY", false),
            summary("will-pantente", "Will Pantente", "You: Of course! Those are the best for car...", "31 min ago", "WP", true),
            summary("samantha-price", "Samantha Price", "You: Hey there, Samantha! Sorry we missed...", "1 hr ago", "SP", false),
        ];

        let mut threads = HashMap::new();
        let mut customers = HashMap::new();

        for conversation in &conversations {
            threads.insert(conversation.id.clone(), single_message_thread(conversation));
            customers.insert(
                conversation.id.clone(),
                CustomerCard {
                    name: conversation.customer_name.clone(),
                    avatar: conversation.avatar.clone(),
                    phone: None,
                    email: None,
                    location: "Venture Auto ...".to_string(),
                    lead_status: LeadStatus::NewLead,
                    card_on_file: None,
                    tags: Vec::new(),
                    activity: Vec::new(),
                },
            );
        }

        threads.insert("will-pantente".to_string(), will_thread());
        customers.insert("will-pantente".to_string(), will_card());

        Self::new(conversations, threads, customers)
    }

    /// All conversations in display order
    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn conversation(&self, id: &str) -> Option<&ConversationSummary> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversation(id).is_some()
    }

    pub fn thread(&self, id: &str) -> &[ThreadMessage] {
        self.threads.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn customer(&self, id: &str) -> Option<&CustomerCard> {
        self.customers.get(id)
    }

    pub fn customer_mut(&mut self, id: &str) -> Option<&mut CustomerCard> {
        self.customers.get_mut(id)
    }

    /// Append an outgoing agent message to a thread
    pub fn push_agent_message(&mut self, conversation_id: &str, content: String, timestamp: String) {
        let thread = self.threads.entry(conversation_id.to_string()).or_default();
        let id = (thread.len() + 1).to_string();
        thread.push(ThreadMessage {
            id,
            sender: Sender::agent(AGENT_ID),
            content,
            timestamp,
            avatar: AGENT_AVATAR.to_string(),
        });
    }
}

fn summary(
    id: &str,
    name: &str,
    last_message: &str,
    timestamp: &str,
    avatar: &str,
    unread: bool,
) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        customer_name: name.to_string(),
        last_message: last_message.to_string(),
        timestamp: timestamp.to_string(),
        status: ConversationStatus::Open,
        avatar: avatar.to_string(),
        unread,
    }
}

/// Thread holding only the preview line. Lines starting with `You: ` were
/// sent by the agent.
fn single_message_thread(conversation: &ConversationSummary) -> Vec<ThreadMessage> {
    let (sender, content, avatar) = match conversation.last_message.strip_prefix("You: ") {
        Some(rest) => (Sender::agent(AGENT_ID), rest, AGENT_AVATAR),
        None => (
            Sender::customer(),
            conversation.last_message.as_str(),
            conversation.avatar.as_str(),
        ),
    };

    vec![ThreadMessage {
        id: "1".to_string(),
        sender,
        content: content.to_string(),
        timestamp: conversation.timestamp.clone(),
        avatar: avatar.to_string(),
    }]
}

fn will_thread() -> Vec<ThreadMessage> {
    let customer = |id: &str, content: &str, at: &str| ThreadMessage {
        id: id.to_string(),
        sender: Sender::customer(),
        content: content.to_string(),
        timestamp: at.to_string(),
        avatar: "WP".to_string(),
    };
    let agent = |id: &str, content: &str, at: &str| ThreadMessage {
        id: id.to_string(),
        sender: Sender::agent(AGENT_ID),
        content: content.to_string(),
        timestamp: at.to_string(),
        avatar: AGENT_AVATAR.to_string(),
    };

    vec![
        customer("1", "Hey there! What family car models do you carry?", "10:42 AM"),
        agent(
            "2",
            "Hi Will! We have quite a few that are perfect for families. How many seats do you need?",
            "10:42 AM",
        ),
        customer(
            "3",
            "Great! I need at least 6 seats, and I was hoping they'd have those screens for the backseat.",
            "10:44 AM",
        ),
        agent("4", "Of course! Those are the best for car rides", "10:45 AM"),
    ]
}

fn will_card() -> CustomerCard {
    CustomerCard {
        name: "Will Pantente".to_string(),
        avatar: "WP".to_string(),
        phone: Some("(555) 555-5555".to_string()),
        email: Some("will@email.com".to_string()),
        location: "Venture Auto ...".to_string(),
        lead_status: LeadStatus::NewLead,
        card_on_file: Some(CardOnFile {
            brand: "Visa".to_string(),
            last4: "1234".to_string(),
            expires: "12/26".to_string(),
        }),
        tags: Vec::new(),
        activity: vec![
            ActivityItem {
                kind: ActivityKind::Feedback,
                title: "Completed Feedback Survey".to_string(),
                timestamp: "59m".to_string(),
                outcome: "completed".to_string(),
            },
            ActivityItem {
                kind: ActivityKind::Payment,
                title: "$149.00 payment received".to_string(),
                timestamp: "2d".to_string(),
                outcome: "received".to_string(),
            },
            ActivityItem {
                kind: ActivityKind::Call,
                title: "Missed call".to_string(),
                timestamp: "3d".to_string(),
                outcome: "missed".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_order() {
        let data = InboxData::demo();
        let ids: Vec<_> = data.conversations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "james-thanks",
                "frankie-villa",
                "lisa-bartemi",
                "cam-yahway",
                "will-pantente",
                "samantha-price"
            ]
        );
        assert!(data.conversations().iter().all(|c| c.status == ConversationStatus::Open));
    }

    #[test]
    fn test_only_will_is_unread() {
        let data = InboxData::demo();
        let unread: Vec<_> = data
            .conversations()
            .iter()
            .filter(|c| c.unread)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(unread, ["will-pantente"]);
    }

    #[test]
    fn test_preview_threads() {
        let data = InboxData::demo();

        let lisa = data.thread("lisa-bartemi");
        assert_eq!(lisa.len(), 1);
        assert!(lisa[0].sender.is_customer());

        let cam = data.thread("cam-yahway");
        assert_eq!(cam[0].content, "$99 Payment Request");
        assert!(!cam[0].sender.is_customer());

        assert_eq!(data.thread("will-pantente").len(), 4);
        assert!(data.thread("nobody").is_empty());
    }

    #[test]
    fn test_will_card() {
        let data = InboxData::demo();
        let will = data.customer("will-pantente").unwrap();
        assert_eq!(will.card_on_file.as_ref().unwrap().masked(), "Visa **** 1234");
        assert_eq!(will.activity.len(), 3);
    }

    #[test]
    fn test_push_agent_message() {
        let mut data = InboxData::demo();
        data.push_agent_message("will-pantente", "See you Friday".to_string(), "now".to_string());

        let thread = data.thread("will-pantente");
        assert_eq!(thread.len(), 5);
        assert_eq!(thread[4].id, "5");
        assert_eq!(thread[4].avatar, "FK");
    }
}
