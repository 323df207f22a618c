//! Chat thread of the selected conversation plus the message composer

use serde::Serialize;

use super::mock::{ConversationSummary, CustomerCard, ThreadMessage};

pub const THREAD_INTRO: &str = "This is the beginning of your email conversation.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadLine {
    pub from_customer: bool,
    pub avatar: String,
    pub content: String,
    pub timestamp: String,
}

impl From<&ThreadMessage> for ThreadLine {
    fn from(message: &ThreadMessage) -> Self {
        Self {
            from_customer: message.sender.is_customer(),
            avatar: message.avatar.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub conversation_id: String,
    pub customer_name: String,
    pub avatar: String,
    pub location: String,
    pub intro: &'static str,
    pub lines: Vec<ThreadLine>,
    pub draft: String,
    pub send_enabled: bool,
    /// Highlights the profile toggle button
    pub profile_visible: bool,
}

/// Message composer state
#[derive(Debug, Clone, Default)]
pub struct ChatInterface {
    draft: String,
}

impl ChatInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Take the draft for sending, clearing the composer.
    ///
    /// Returns `None` and keeps the draft when it is blank.
    pub fn take_draft(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let text = self.draft.trim().to_string();
        self.draft.clear();
        Some(text)
    }

    pub fn render(
        &self,
        conversation: &ConversationSummary,
        customer: Option<&CustomerCard>,
        thread: &[ThreadMessage],
        profile_visible: bool,
    ) -> ChatView {
        ChatView {
            conversation_id: conversation.id.clone(),
            customer_name: conversation.customer_name.clone(),
            avatar: conversation.avatar.clone(),
            location: customer.map(|c| c.location.clone()).unwrap_or_default(),
            intro: THREAD_INTRO,
            lines: thread.iter().map(ThreadLine::from).collect(),
            draft: self.draft.clone(),
            send_enabled: self.can_send(),
            profile_visible,
        }
    }
}
