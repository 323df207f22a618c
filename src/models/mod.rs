//! Data Transfer Objects
//!
//! Record shapes exchanged with the Podium backend. Every persisted entity is
//! a payload type (the "create" shape) wrapped in [`Record`], which adds the
//! server-assigned identifier and audit timestamps. Partial updates use the
//! matching `…Patch` type, whose unset fields are left out of the JSON body.

mod account;
mod integration;
mod messaging;
mod settings;

pub use account::{
    AuthResponse, AuthUser, ClaimsError, LoginRequest, Organization, OrganizationFields,
    OrganizationPatch, RegisterRequest, Role, TokenClaims, User, UserFields, UserPatch,
};
pub use integration::{
    Integration, IntegrationFields, IntegrationPatch, IntegrationSettings, IntegrationStatus,
    OpenAiSettings, SmtpSettings, TwilioSettings, ValidationError, WebhookSettings,
    WhatsAppSettings,
};
pub use messaging::{
    Call, CallFields, CallPatch, CallStatus, CardOnFile, Channel, ChatMessageRequest,
    Conversation, ConversationFields, ConversationStatus, Customer, CustomerFields,
    CustomerMetadata, CustomerPatch, LeadStatus, Message, MessageFields, MessageStatus,
    MessageType, Sender, SmsRequest, VoiceRequest, WhatsAppReceipt, WhatsAppRequest,
    WidgetReceipt, WidgetSubmission,
};
pub use settings::{
    ActiveStatus, BusinessInfo, BusinessInfoFields, BusinessInfoPatch, Campaign, CampaignFields,
    CampaignPatch, CampaignStatus, CampaignType, Rule, RuleFields, RulePatch, Template,
    TemplateFields, TemplatePatch, TemplateType,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// A server-side record: payload plus identifier and audit fields.
///
/// The backend names the identifier `_id`; `id` is accepted as well, and
/// records carrying both keys resolve to `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "RawRecord<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user, present on per-user resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire shape of a record, with both identifier spellings kept apart
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord<T> {
    #[serde(rename = "_id", default)]
    underscore_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(flatten)]
    data: T,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl<T> TryFrom<RawRecord<T>> for Record<T> {
    type Error = &'static str;

    fn try_from(raw: RawRecord<T>) -> Result<Self, Self::Error> {
        let id = raw
            .underscore_id
            .or(raw.id)
            .ok_or("record has neither `_id` nor `id`")?;

        Ok(Self {
            id,
            user_id: raw.user_id,
            data: raw.data,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl<T> Record<T> {
    /// Wrap a payload with an identifier and no audit data
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            data,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder method: set the owning user
    pub fn owned_by(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Record<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

/// Plain `{ "message": … }` acknowledgement returned by deletes, logout and
/// the outbound channel endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_underscore_id() {
        let json = r#"{
            "_id": "t1",
            "userId": "u9",
            "name": "Welcome",
            "content": "Hi {{name}}!",
            "type": "sms",
            "status": "active",
            "category": "onboarding",
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;

        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.id, "t1");
        assert_eq!(template.user_id.as_deref(), Some("u9"));
        assert_eq!(template.name, "Welcome");
        assert_eq!(template.kind, TemplateType::Sms);
        assert!(template.created_at.is_some());
        assert!(template.updated_at.is_none());
    }

    #[test]
    fn test_record_accepts_plain_id() {
        let json = r#"{"id": "b1", "name": "Venture Auto", "website": "", "description": "",
            "phone": "", "email": "", "address": "", "industry": "automotive"}"#;

        let info: BusinessInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "b1");
        assert_eq!(info.industry, "automotive");
    }

    #[test]
    fn test_record_with_both_id_keys() {
        let json = r#"{"_id": "b1", "id": "b1", "name": "Venture Auto"}"#;
        let info: BusinessInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "b1");
        assert_eq!(info.name, "Venture Auto");

        // `_id` wins when the two disagree
        let json = r#"[{"_id": "t1", "id": "legacy-7", "name": "Welcome", "content": "Hi!",
            "type": "sms", "status": "active"}]"#;
        let templates: Vec<Template> = serde_json::from_str(json).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "t1");
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let json = r#"{"name": "Venture Auto"}"#;
        let err = serde_json::from_str::<BusinessInfo>(json).unwrap_err();
        assert!(err.to_string().contains("neither `_id` nor `id`"), "{}", err);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = Record::new(
            "r1",
            RuleFields {
                name: "After hours".to_string(),
                trigger: "message_received".to_string(),
                condition: "outside_business_hours".to_string(),
                action: "auto_reply".to_string(),
                status: ActiveStatus::Active,
                priority: 2,
                description: String::new(),
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["_id"], "r1");
        assert_eq!(value["priority"], 2);
        assert!(value.get("data").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_ack() {
        let ack: Ack = serde_json::from_str(r#"{"message": "Template deleted"}"#).unwrap();
        assert_eq!(ack.message, "Template deleted");
    }
}
