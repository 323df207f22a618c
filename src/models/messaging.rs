//! Inbox entities: conversations, messages, customers, calls, plus the
//! request/response shapes of the chat, channel and widget endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::Record;

// ============================================
// Messages
// ============================================

/// Who wrote a message.
///
/// Serialized as `{"kind": "customer" | "agent" | "system", "id": …}`.
/// Older backends send a bare string (`"customer"`, `"AI"`, or an agent
/// id) or `{"userId": …}`; those shapes are mapped onto the same variants
/// when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", try_from = "Value")]
pub enum Sender {
    Customer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Agent {
        id: String,
    },
    System {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl Sender {
    pub fn customer() -> Self {
        Sender::Customer { id: None }
    }

    pub fn agent(id: impl Into<String>) -> Self {
        Sender::Agent { id: id.into() }
    }

    /// The AI assistant / automation
    pub fn system() -> Self {
        Sender::System { id: None }
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, Sender::Customer { .. })
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Customer { id: Some(id) } => write!(f, "customer:{}", id),
            Sender::Customer { id: None } => write!(f, "customer"),
            Sender::Agent { id } => write!(f, "agent:{}", id),
            Sender::System { id: Some(id) } => write!(f, "system:{}", id),
            Sender::System { id: None } => write!(f, "system"),
        }
    }
}

impl TryFrom<Value> for Sender {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        fn opt_id(obj: &serde_json::Map<String, Value>) -> Option<String> {
            obj.get("id").and_then(Value::as_str).map(str::to_string)
        }

        match value {
            Value::String(s) => Ok(match s.as_str() {
                "customer" => Sender::customer(),
                "AI" | "ai" | "system" => Sender::system(),
                _ => Sender::Agent { id: s },
            }),
            Value::Object(obj) => {
                if let Some(kind) = obj.get("kind").and_then(Value::as_str) {
                    return match kind {
                        "customer" => Ok(Sender::Customer { id: opt_id(&obj) }),
                        "system" => Ok(Sender::System { id: opt_id(&obj) }),
                        "agent" => opt_id(&obj)
                            .map(|id| Sender::Agent { id })
                            .ok_or_else(|| "agent sender requires an id".to_string()),
                        other => Err(format!("unknown sender kind: {}", other)),
                    };
                }
                obj.get("userId")
                    .and_then(Value::as_str)
                    .map(|id| Sender::agent(id))
                    .ok_or_else(|| "sender object needs a kind or userId".to_string())
            }
            other => Err(format!("invalid sender: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Note,
    Reply,
    File,
    WhatsApp,
    Sms,
    Voice,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageType::Text => "text",
            MessageType::Note => "note",
            MessageType::Reply => "reply",
            MessageType::File => "file",
            MessageType::WhatsApp => "whatsapp",
            MessageType::Sms => "sms",
            MessageType::Voice => "voice",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(s.to_lowercase()))
            .map_err(|_| format!("unknown message type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Sent,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFields {
    pub conversation_id: String,
    pub sender: Sender,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "isAI", default, skip_serializing_if = "Option::is_none")]
    pub is_ai: Option<bool>,
}

pub type Message = Record<MessageFields>;

// ============================================
// Conversations
// ============================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Webchat,
    Sms,
    Facebook,
    WhatsApp,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Channel::Webchat => "webchat",
            Channel::Sms => "sms",
            Channel::Facebook => "facebook",
            Channel::WhatsApp => "whatsapp",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Open,
    Closed,
    Pending,
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationStatus::Open => "open",
            ConversationStatus::Closed => "closed",
            ConversationStatus::Pending => "pending",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationFields {
    pub org_id: String,
    pub customer_id: String,
    pub channel: Channel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub status: ConversationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub type Conversation = Record<ConversationFields>;

// ============================================
// Customers
// ============================================

/// Pipeline stage of a lead, as shown in the inbox sidebar and profile
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    #[default]
    NewLead,
    Qualifying,
    EstimatesSent,
    Services,
    PaymentsSent,
    Won,
    Unqualified,
    Lost,
}

impl LeadStatus {
    pub fn all() -> &'static [LeadStatus] {
        &[
            LeadStatus::NewLead,
            LeadStatus::Qualifying,
            LeadStatus::EstimatesSent,
            LeadStatus::Services,
            LeadStatus::PaymentsSent,
            LeadStatus::Won,
            LeadStatus::Unqualified,
            LeadStatus::Lost,
        ]
    }

    /// Identifier used by the sidebar filters
    pub fn id(&self) -> &'static str {
        match self {
            LeadStatus::NewLead => "new-lead",
            LeadStatus::Qualifying => "qualifying",
            LeadStatus::EstimatesSent => "estimates-sent",
            LeadStatus::Services => "services",
            LeadStatus::PaymentsSent => "payments-sent",
            LeadStatus::Won => "won",
            LeadStatus::Unqualified => "unqualified",
            LeadStatus::Lost => "lost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::NewLead => "New lead",
            LeadStatus::Qualifying => "Qualifying",
            LeadStatus::EstimatesSent => "Estimates sent",
            LeadStatus::Services => "Services",
            LeadStatus::PaymentsSent => "Payments sent",
            LeadStatus::Won => "Won",
            LeadStatus::Unqualified => "Unqualified",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::all()
            .iter()
            .copied()
            .find(|status| status.id() == s || status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown lead status: {}", s))
    }
}

/// Masked card details kept on a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOnFile {
    pub brand: String,
    pub last4: String,
    /// `MM/YY`
    pub expires: String,
}

impl CardOnFile {
    pub fn masked(&self) -> String {
        format!("{} **** {}", self.brand, self.last4)
    }
}

/// Typed customer metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_status: Option<LeadStatus>,
    /// Where the lead came from (widget, sms, import, …)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_on_file: Option<CardOnFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    pub org_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CustomerMetadata>,
}

pub type Customer = Record<CustomerFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CustomerMetadata>,
}

impl From<CustomerFields> for CustomerPatch {
    fn from(f: CustomerFields) -> Self {
        Self {
            org_id: Some(f.org_id),
            name: Some(f.name),
            email: f.email,
            phone: f.phone,
            tags: Some(f.tags),
            metadata: f.metadata,
        }
    }
}

// ============================================
// Calls
// ============================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    #[default]
    Initiated,
    InProgress,
    Completed,
    Failed,
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallStatus::Initiated => "initiated",
            CallStatus::InProgress => "in_progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFields {
    pub conversation_id: String,
    pub from: String,
    pub to: String,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

pub type Call = Record<CallFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl From<CallFields> for CallPatch {
    fn from(f: CallFields) -> Self {
        Self {
            conversation_id: Some(f.conversation_id),
            from: Some(f.from),
            to: Some(f.to),
            duration: f.duration,
            status: Some(f.status),
            recording_url: f.recording_url,
            transcript: f.transcript,
        }
    }
}

// ============================================
// Chat and channel requests
// ============================================

/// Body of `POST /chat/messages`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub content: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRequest {
    pub to: String,
    pub content: String,
}

/// Outbound WhatsApp message; the backend drafts the text from `prompt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppRequest {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppReceipt {
    pub message: String,
    /// Reply text generated and sent by the backend
    pub ai_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRequest {
    pub to: String,
    pub content: String,
}

// ============================================
// Widget
// ============================================

/// Public lead-capture form submitted from the embeddable widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSubmission {
    pub username: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetReceipt {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sender_tagged_form() {
        let sender: Sender = serde_json::from_value(json!({"kind": "agent", "id": "u1"})).unwrap();
        assert_eq!(sender, Sender::agent("u1"));

        assert_eq!(
            serde_json::to_value(Sender::agent("u1")).unwrap(),
            json!({"kind": "agent", "id": "u1"})
        );
        assert_eq!(
            serde_json::to_value(Sender::customer()).unwrap(),
            json!({"kind": "customer"})
        );
    }

    #[test]
    fn test_sender_legacy_forms() {
        let cases = [
            (json!("customer"), Sender::customer()),
            (json!("AI"), Sender::system()),
            (json!("64f0c2"), Sender::agent("64f0c2")),
            (json!({"userId": "u7"}), Sender::agent("u7")),
        ];

        for (wire, expected) in cases {
            let sender: Sender = serde_json::from_value(wire.clone()).unwrap();
            assert_eq!(sender, expected, "decoding {}", wire);
        }
    }

    #[test]
    fn test_sender_rejects_garbage() {
        assert!(serde_json::from_value::<Sender>(json!(42)).is_err());
        assert!(serde_json::from_value::<Sender>(json!({"kind": "robot"})).is_err());
        assert!(serde_json::from_value::<Sender>(json!({"kind": "agent"})).is_err());
        assert!(serde_json::from_value::<Sender>(json!({})).is_err());
    }

    #[test]
    fn test_message_decode() {
        let json = json!({
            "_id": "m1",
            "conversationId": "c1",
            "sender": "customer",
            "content": "Do you carry 7-seaters?",
            "type": "sms",
            "status": "delivered",
            "isAI": false
        });

        let message: Message = serde_json::from_value(json).unwrap();
        assert_eq!(message.conversation_id, "c1");
        assert!(message.sender.is_customer());
        assert_eq!(message.kind, MessageType::Sms);
        assert_eq!(message.status, MessageStatus::Delivered);
        assert_eq!(message.is_ai, Some(false));
    }

    #[test]
    fn test_call_status_wire_name() {
        assert_eq!(
            serde_json::to_value(CallStatus::InProgress).unwrap(),
            json!("in_progress")
        );
    }

    #[test]
    fn test_lead_status_parse() {
        assert_eq!("won".parse::<LeadStatus>().unwrap(), LeadStatus::Won);
        assert_eq!(
            "Estimates sent".parse::<LeadStatus>().unwrap(),
            LeadStatus::EstimatesSent
        );
        assert!("maybe".parse::<LeadStatus>().is_err());
        assert_eq!(
            serde_json::to_value(LeadStatus::PaymentsSent).unwrap(),
            json!("payments-sent")
        );
    }

    #[test]
    fn test_chat_request_omits_optional_fields() {
        let req = ChatMessageRequest {
            content: "hello".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"content": "hello"}));
    }

    #[test]
    fn test_customer_metadata_typed() {
        let json = json!({
            "orgId": "o1",
            "name": "Will Pantente",
            "metadata": {
                "leadStatus": "qualifying",
                "cardOnFile": {"brand": "Visa", "last4": "1234", "expires": "12/26"}
            }
        });

        let customer: CustomerFields = serde_json::from_value(json).unwrap();
        let meta = customer.metadata.unwrap();
        assert_eq!(meta.lead_status, Some(LeadStatus::Qualifying));
        assert_eq!(meta.card_on_file.unwrap().masked(), "Visa **** 1234");
        assert!(customer.tags.is_empty());
    }
}
