//! Settings dashboard panels
//!
//! One generic CRUD form per resource, the live chat panel and the
//! embeddable widget snippet.

use serde::Serialize;

use crate::client::{
    ApiClient, BusinessInfoResource, CallsResource, CampaignsResource, ClientResult,
    CrudResource, CustomersResource, IntegrationsResource, OrganizationsResource, RulesResource,
    TemplatesResource, UsersResource, API_PREFIX,
};
use crate::models::{Ack, ChatMessageRequest, Message, MessageType, Record};

/// A CRUD resource that has a dashboard form
pub trait FormResource: CrudResource {
    const TITLE: &'static str;

    /// One-line description of a record for list rows
    fn summary(fields: &Self::Fields) -> String;
}

impl FormResource for BusinessInfoResource {
    const TITLE: &'static str = "Business Info";

    fn summary(f: &Self::Fields) -> String {
        if f.industry.is_empty() {
            f.name.clone()
        } else {
            format!("{} ({})", f.name, f.industry)
        }
    }
}

impl FormResource for CampaignsResource {
    const TITLE: &'static str = "Campaigns";

    fn summary(f: &Self::Fields) -> String {
        format!("{} [{}] {} on {}", f.name, f.status, f.kind, f.schedule_date)
    }
}

impl FormResource for TemplatesResource {
    const TITLE: &'static str = "Templates";

    fn summary(f: &Self::Fields) -> String {
        format!("{} [{}] {}", f.name, f.status, f.kind)
    }
}

impl FormResource for RulesResource {
    const TITLE: &'static str = "Rules";

    fn summary(f: &Self::Fields) -> String {
        format!("{} [{}] when {} -> {}", f.name, f.status, f.trigger, f.action)
    }
}

impl FormResource for IntegrationsResource {
    const TITLE: &'static str = "Integrations";

    fn summary(f: &Self::Fields) -> String {
        format!("{} ({}) {}", f.name, f.settings.kind(), f.status)
    }
}

impl FormResource for CustomersResource {
    const TITLE: &'static str = "Customers";

    fn summary(f: &Self::Fields) -> String {
        let contact = f.phone.as_deref().or(f.email.as_deref()).unwrap_or("-");
        let status = f
            .metadata
            .as_ref()
            .and_then(|m| m.lead_status)
            .unwrap_or_default();
        format!("{} {} [{}]", f.name, contact, status.label())
    }
}

impl FormResource for OrganizationsResource {
    const TITLE: &'static str = "Organizations";

    fn summary(f: &Self::Fields) -> String {
        f.name.clone()
    }
}

impl FormResource for UsersResource {
    const TITLE: &'static str = "Users";

    fn summary(f: &Self::Fields) -> String {
        format!("{} <{}> {}", f.name, f.email, f.role)
    }
}

impl FormResource for CallsResource {
    const TITLE: &'static str = "Calls";

    fn summary(f: &Self::Fields) -> String {
        match f.duration {
            Some(secs) => format!("{} -> {} {} ({}s)", f.from, f.to, f.status, secs),
            None => format!("{} -> {} {}", f.from, f.to, f.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRow {
    pub id: String,
    pub summary: String,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub rows: Vec<FormRow>,
    pub editing: Option<String>,
    pub error: Option<String>,
}

/// List plus create/edit form for one resource
pub struct ResourceForm<R: CrudResource> {
    items: Vec<Record<R::Fields>>,
    editing: Option<String>,
    last_error: Option<String>,
}

impl<R: CrudResource> Default for ResourceForm<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            editing: None,
            last_error: None,
        }
    }
}

impl<R: FormResource> ResourceForm<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Record<R::Fields>] {
        &self.items
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Keep a user-facing message for failures, clear it on success
    fn track<T>(&mut self, action: &str, result: ClientResult<T>) -> ClientResult<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(format!("Failed to {} {}: {}", action, R::LABEL, e)),
        }
        result
    }

    pub async fn load(&mut self, client: &ApiClient) -> ClientResult<()> {
        let result = client.resource::<R>().list().await;
        let items = self.track("load", result)?;
        self.items = items;
        Ok(())
    }

    /// Create a record, or update the one being edited with every field
    pub async fn save(
        &mut self,
        client: &ApiClient,
        fields: R::Fields,
    ) -> ClientResult<Record<R::Fields>> {
        match self.editing.clone() {
            Some(id) => {
                let patch = R::Patch::from(fields);
                let result = client.resource::<R>().update(&id, &patch).await;
                let record = self.track("update", result)?;
                match self.items.iter_mut().find(|item| item.id == id) {
                    Some(slot) => *slot = record.clone(),
                    None => self.items.push(record.clone()),
                }
                self.editing = None;
                Ok(record)
            }
            None => {
                let result = client.resource::<R>().create(&fields).await;
                let record = self.track("create", result)?;
                self.items.push(record.clone());
                Ok(record)
            }
        }
    }

    pub async fn remove(&mut self, client: &ApiClient, id: &str) -> ClientResult<Ack> {
        let result = client.resource::<R>().delete(id).await;
        let ack = self.track("delete", result)?;
        self.items.retain(|item| item.id != id);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        Ok(ack)
    }

    /// Start editing a loaded record; returns its fields to prefill the form
    pub fn begin_edit(&mut self, id: &str) -> Option<&R::Fields> {
        let item = self.items.iter().find(|item| item.id == id)?;
        self.editing = Some(id.to_string());
        Some(&item.data)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn render(&self) -> FormView {
        FormView {
            title: R::TITLE,
            rows: self
                .items
                .iter()
                .map(|item| FormRow {
                    id: item.id.clone(),
                    summary: R::summary(&item.data),
                    editing: self.editing.as_deref() == Some(item.id.as_str()),
                })
                .collect(),
            editing: self.editing.clone(),
            error: self.last_error.clone(),
        }
    }
}

// ============================================
// Chat panel
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLine {
    pub sender: String,
    pub from_customer: bool,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPanelView {
    pub conversation_id: Option<String>,
    pub lines: Vec<ChatLine>,
    pub draft: String,
    pub send_enabled: bool,
    pub error: Option<String>,
}

/// Live chat against the backend
#[derive(Debug, Clone, Default)]
pub struct ChatPanel {
    conversation_id: Option<String>,
    messages: Vec<Message>,
    draft: String,
    last_error: Option<String>,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch conversation; `None` shows every chat message. Drops the
    /// loaded history.
    pub fn set_conversation(&mut self, id: Option<String>) {
        self.conversation_id = id;
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub async fn refresh(&mut self, client: &ApiClient) -> ClientResult<()> {
        match client.chat().messages(self.conversation_id.as_deref()).await {
            Ok(messages) => {
                self.messages = messages;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to load messages: {}", e));
                Err(e)
            }
        }
    }

    /// Send the draft. Blank drafts are not sent and yield `Ok(None)`; the
    /// draft is kept when sending fails.
    pub async fn send(&mut self, client: &ApiClient) -> ClientResult<Option<Message>> {
        if !self.can_send() {
            return Ok(None);
        }

        let request = ChatMessageRequest {
            conversation_id: self.conversation_id.clone(),
            content: self.draft.trim().to_string(),
            kind: Some(MessageType::Text),
        };

        match client.chat().send_message(&request).await {
            Ok(message) => {
                self.messages.push(message.clone());
                self.draft.clear();
                self.last_error = None;
                Ok(Some(message))
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to send message: {}", e));
                Err(e)
            }
        }
    }

    pub fn render(&self) -> ChatPanelView {
        ChatPanelView {
            conversation_id: self.conversation_id.clone(),
            lines: self
                .messages
                .iter()
                .map(|m| ChatLine {
                    sender: m.sender.to_string(),
                    from_customer: m.sender.is_customer(),
                    content: m.content.clone(),
                })
                .collect(),
            draft: self.draft.clone(),
            send_enabled: self.can_send(),
            error: self.last_error.clone(),
        }
    }
}

// ============================================
// Widget code
// ============================================

/// Embeddable lead-capture snippet for customer websites
#[derive(Debug, Clone)]
pub struct WidgetCode {
    base_url: String,
}

impl WidgetCode {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint the widget form posts to
    pub fn endpoint(&self) -> String {
        format!("{}{}/widget", self.base_url, API_PREFIX)
    }

    pub fn snippet(&self) -> String {
        format!(
            r#"<!-- Podium chat widget -->
<form id="podium-widget">
  <input name="username" placeholder="Your name" required>
  <input name="phone" placeholder="Mobile phone" required>
  <textarea name="message" placeholder="How can we help?" required></textarea>
  <button type="submit">Send</button>
</form>
<script>
  document.getElementById("podium-widget").addEventListener("submit", function (e) {{
    e.preventDefault();
    var form = new FormData(e.target);
    fetch("{endpoint}", {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify({{
        username: form.get("username"),
        phone: form.get("phone"),
        message: form.get("message")
      }})
    }}).then(function () {{ e.target.reset(); }});
  }});
</script>"#,
            endpoint = self.endpoint()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActiveStatus, TemplateFields, TemplateType};

    fn template(name: &str) -> Record<TemplateFields> {
        Record::new(
            name.to_lowercase(),
            TemplateFields {
                name: name.to_string(),
                content: "Hi {{name}}".to_string(),
                kind: TemplateType::Sms,
                status: ActiveStatus::Active,
                category: String::new(),
            },
        )
    }

    #[test]
    fn test_begin_and_cancel_edit() {
        let mut form = ResourceForm::<TemplatesResource>::new();
        form.items = vec![template("Welcome"), template("Reminder")];

        assert!(form.begin_edit("missing").is_none());
        assert!(form.editing().is_none());

        let fields = form.begin_edit("reminder").unwrap();
        assert_eq!(fields.name, "Reminder");
        assert_eq!(form.editing(), Some("reminder"));

        let view = form.render();
        assert_eq!(view.title, "Templates");
        assert!(view.rows[1].editing);
        assert_eq!(view.rows[1].summary, "Reminder [active] sms");

        form.cancel_edit();
        assert!(form.editing().is_none());
    }

    #[test]
    fn test_chat_panel_blank_draft() {
        let mut panel = ChatPanel::new();
        panel.set_draft("  ");
        assert!(!panel.can_send());
        assert!(!panel.render().send_enabled);
    }

    #[test]
    fn test_widget_snippet_points_at_backend() {
        let widget = WidgetCode::new("http://localhost:3001/");
        assert_eq!(widget.endpoint(), "http://localhost:3001/api/v1/widget");

        let snippet = widget.snippet();
        assert!(snippet.contains(r#"fetch("http://localhost:3001/api/v1/widget""#));
        assert!(snippet.contains("username: form.get(\"username\")"));
    }
}
