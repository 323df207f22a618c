//! Third-party integrations with typed, validated settings.
//!
//! On the wire an integration carries a `type` string and a free-form
//! `configuration` object. Here the pair is decoded into a closed
//! [`IntegrationSettings`] enum and validated as soon as it crosses the
//! boundary, so a record that exists in memory always has usable settings.
//!
//! The set of types is closed. A record whose `type` is unknown, or whose
//! configuration fails validation, is a decode error, and since a list is
//! decoded as a whole one such record fails the entire
//! `integrations().list()` call (and the dashboard panel shows the error).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::Record;

/// Errors raised when integration settings fail validation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown integration type: {0}")]
    UnknownType(String),

    #[error("Invalid {kind} configuration: {reason}")]
    Malformed { kind: String, reason: String },

    #[error("Missing required field {field} for {kind} integration")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    #[default]
    Disconnected,
    Error,
}

impl fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationStatus::Connected => write!(f, "connected"),
            IntegrationStatus::Disconnected => write!(f, "disconnected"),
            IntegrationStatus::Error => write!(f, "error"),
        }
    }
}

/// Twilio account used for SMS and voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
}

/// WhatsApp Business Cloud API credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppSettings {
    pub phone_number_id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// Outbound webhook notified on new conversations and messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSettings {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Model used to draft AI replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAiSettings {
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Settings schema, one variant per integration type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationSettings {
    Twilio(TwilioSettings),
    WhatsApp(WhatsAppSettings),
    Smtp(SmtpSettings),
    Webhook(WebhookSettings),
    OpenAi(OpenAiSettings),
}

impl IntegrationSettings {
    /// Wire value of the integration `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            IntegrationSettings::Twilio(_) => "twilio",
            IntegrationSettings::WhatsApp(_) => "whatsapp",
            IntegrationSettings::Smtp(_) => "smtp",
            IntegrationSettings::Webhook(_) => "webhook",
            IntegrationSettings::OpenAi(_) => "openai",
        }
    }

    /// Decode and validate a `type`/`configuration` pair
    pub fn from_parts(kind: &str, configuration: Value) -> Result<Self, ValidationError> {
        fn parse<T: serde::de::DeserializeOwned>(
            kind: &str,
            configuration: Value,
        ) -> Result<T, ValidationError> {
            serde_json::from_value(configuration).map_err(|e| ValidationError::Malformed {
                kind: kind.to_string(),
                reason: e.to_string(),
            })
        }

        let settings = match kind {
            "twilio" => IntegrationSettings::Twilio(parse(kind, configuration)?),
            "whatsapp" => IntegrationSettings::WhatsApp(parse(kind, configuration)?),
            "smtp" => IntegrationSettings::Smtp(parse(kind, configuration)?),
            "webhook" => IntegrationSettings::Webhook(parse(kind, configuration)?),
            "openai" => IntegrationSettings::OpenAi(parse(kind, configuration)?),
            other => return Err(ValidationError::UnknownType(other.to_string())),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// The `configuration` object sent to the backend
    pub fn configuration(&self) -> Value {
        let value = match self {
            IntegrationSettings::Twilio(s) => serde_json::to_value(s),
            IntegrationSettings::WhatsApp(s) => serde_json::to_value(s),
            IntegrationSettings::Smtp(s) => serde_json::to_value(s),
            IntegrationSettings::Webhook(s) => serde_json::to_value(s),
            IntegrationSettings::OpenAi(s) => serde_json::to_value(s),
        };
        // Plain string/number structs always serialize
        value.unwrap_or(Value::Null)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        let kind = self.kind();
        let require = |field: &'static str, value: &str| {
            if value.trim().is_empty() {
                Err(ValidationError::MissingField { kind, field })
            } else {
                Ok(())
            }
        };

        match self {
            IntegrationSettings::Twilio(s) => {
                require("accountSid", &s.account_sid)?;
                require("authToken", &s.auth_token)?;
                require("phoneNumber", &s.phone_number)
            }
            IntegrationSettings::WhatsApp(s) => {
                require("phoneNumberId", &s.phone_number_id)?;
                require("accessToken", &s.access_token)
            }
            IntegrationSettings::Smtp(s) => {
                require("host", &s.host)?;
                require("username", &s.username)?;
                require("fromAddress", &s.from_address)?;
                if s.port == 0 {
                    return Err(ValidationError::InvalidValue {
                        field: "port",
                        reason: "must be non-zero".to_string(),
                    });
                }
                if !s.from_address.contains('@') {
                    return Err(ValidationError::InvalidValue {
                        field: "fromAddress",
                        reason: format!("{:?} is not an email address", s.from_address),
                    });
                }
                Ok(())
            }
            IntegrationSettings::Webhook(s) => {
                require("url", &s.url)?;
                if !(s.url.starts_with("https://") || s.url.starts_with("http://")) {
                    return Err(ValidationError::InvalidValue {
                        field: "url",
                        reason: format!("{:?} must be an http(s) URL", s.url),
                    });
                }
                Ok(())
            }
            IntegrationSettings::OpenAi(s) => {
                require("apiKey", &s.api_key)?;
                require("model", &s.model)
            }
        }
    }
}

/// Integration payload (the create shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIntegration", into = "RawIntegration")]
pub struct IntegrationFields {
    pub name: String,
    pub settings: IntegrationSettings,
    pub status: IntegrationStatus,
    pub description: String,
}

pub type Integration = Record<IntegrationFields>;

/// Wire shape of an integration, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIntegration {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    configuration: Value,
    #[serde(default)]
    status: IntegrationStatus,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawIntegration> for IntegrationFields {
    type Error = ValidationError;

    fn try_from(raw: RawIntegration) -> Result<Self, Self::Error> {
        let configuration = match raw.configuration {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        Ok(Self {
            settings: IntegrationSettings::from_parts(&raw.kind, configuration)?,
            name: raw.name,
            status: raw.status,
            description: raw.description,
        })
    }
}

impl From<IntegrationFields> for RawIntegration {
    fn from(fields: IntegrationFields) -> Self {
        Self {
            kind: fields.settings.kind().to_string(),
            configuration: fields.settings.configuration(),
            name: fields.name,
            status: fields.status,
            description: fields.description,
        }
    }
}

/// Partial update for an integration.
///
/// Settings are replaced as a whole so `type` and `configuration` never
/// disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationPatch {
    pub name: Option<String>,
    pub settings: Option<IntegrationSettings>,
    pub status: Option<IntegrationStatus>,
    pub description: Option<String>,
}

impl Serialize for IntegrationPatch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        if let Some(settings) = &self.settings {
            map.serialize_entry("type", settings.kind())?;
            map.serialize_entry("configuration", &settings.configuration())?;
        }
        if let Some(status) = &self.status {
            map.serialize_entry("status", status)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

impl From<IntegrationFields> for IntegrationPatch {
    fn from(f: IntegrationFields) -> Self {
        Self {
            name: Some(f.name),
            settings: Some(f.settings),
            status: Some(f.status),
            description: Some(f.description),
        }
    }
}
