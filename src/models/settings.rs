//! Dashboard configuration resources: business profile, templates,
//! campaigns and automation rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Record;

// ============================================
// Shared enums
// ============================================

/// On/off status shared by templates and rules
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveStatus::Active => write!(f, "active"),
            ActiveStatus::Inactive => write!(f, "inactive"),
        }
    }
}

// ============================================
// Business info
// ============================================

/// Public business profile, one or more per user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfoFields {
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub industry: String,
}

pub type BusinessInfo = Record<BusinessInfoFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl From<BusinessInfoFields> for BusinessInfoPatch {
    fn from(f: BusinessInfoFields) -> Self {
        Self {
            name: Some(f.name),
            website: Some(f.website),
            description: Some(f.description),
            phone: Some(f.phone),
            email: Some(f.email),
            address: Some(f.address),
            industry: Some(f.industry),
        }
    }
}

// ============================================
// Templates
// ============================================

/// Channel a message template is written for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    WhatsApp,
    #[default]
    Sms,
    Email,
    Call,
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateType::WhatsApp => write!(f, "whatsapp"),
            TemplateType::Sms => write!(f, "sms"),
            TemplateType::Email => write!(f, "email"),
            TemplateType::Call => write!(f, "call"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFields {
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: TemplateType,
    pub status: ActiveStatus,
    #[serde(default)]
    pub category: String,
}

pub type Template = Record<TemplateFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TemplateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActiveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<TemplateFields> for TemplatePatch {
    fn from(f: TemplateFields) -> Self {
        Self {
            name: Some(f.name),
            content: Some(f.content),
            kind: Some(f.kind),
            status: Some(f.status),
            category: Some(f.category),
        }
    }
}

// ============================================
// Campaigns
// ============================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Completed,
    Paused,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Active => "active",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Paused => "paused",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    #[default]
    Sms,
    Email,
    WhatsApp,
    Push,
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignType::Sms => "sms",
            CampaignType::Email => "email",
            CampaignType::WhatsApp => "whatsapp",
            CampaignType::Push => "push",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFields {
    pub name: String,
    /// Free-form date as entered in the campaign form
    pub schedule_date: String,
    pub status: CampaignStatus,
    #[serde(default)]
    pub segment_criteria: String,
    #[serde(rename = "type")]
    pub kind: CampaignType,
    pub message: String,
    #[serde(default)]
    pub target_audience: String,
}

pub type Campaign = Record<CampaignFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_criteria: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CampaignType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
}

impl From<CampaignFields> for CampaignPatch {
    fn from(f: CampaignFields) -> Self {
        Self {
            name: Some(f.name),
            schedule_date: Some(f.schedule_date),
            status: Some(f.status),
            segment_criteria: Some(f.segment_criteria),
            kind: Some(f.kind),
            message: Some(f.message),
            target_audience: Some(f.target_audience),
        }
    }
}

// ============================================
// Rules
// ============================================

/// Automation rule: when `trigger` fires and `condition` holds, run `action`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFields {
    pub name: String,
    pub trigger: String,
    pub condition: String,
    pub action: String,
    pub status: ActiveStatus,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub description: String,
}

pub type Rule = Record<RuleFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActiveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<RuleFields> for RulePatch {
    fn from(f: RuleFields) -> Self {
        Self {
            name: Some(f.name),
            trigger: Some(f.trigger),
            condition: Some(f.condition),
            action: Some(f.action),
            status: Some(f.status),
            priority: Some(f.priority),
            description: Some(f.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = TemplatePatch {
            status: Some(ActiveStatus::Inactive),
            ..Default::default()
        };

        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"status":"inactive"}"#);
    }

    #[test]
    fn test_patch_from_fields_is_complete() {
        let fields = CampaignFields {
            name: "Spring sale".to_string(),
            schedule_date: "2024-04-01".to_string(),
            status: CampaignStatus::Scheduled,
            segment_criteria: "last_visit > 90d".to_string(),
            kind: CampaignType::WhatsApp,
            message: "20% off this week".to_string(),
            target_audience: "lapsed".to_string(),
        };

        let value = serde_json::to_value(CampaignPatch::from(fields)).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert_eq!(obj["type"], "whatsapp");
        assert_eq!(obj["scheduleDate"], "2024-04-01");
        assert_eq!(obj["segmentCriteria"], "last_visit > 90d");
    }

    #[test]
    fn test_template_type_wire_names() {
        let json = serde_json::to_string(&TemplateType::WhatsApp).unwrap();
        assert_eq!(json, r#""whatsapp""#);

        let parsed: TemplateType = serde_json::from_str(r#""call""#).unwrap();
        assert_eq!(parsed, TemplateType::Call);
        assert!(serde_json::from_str::<TemplateType>(r#""fax""#).is_err());
    }

    #[test]
    fn test_rule_priority_defaults() {
        let json = r#"{"name": "r", "trigger": "t", "condition": "c", "action": "a", "status": "inactive"}"#;
        let rule: RuleFields = serde_json::from_str(json).unwrap();
        assert_eq!(rule.priority, 0);
        assert_eq!(rule.status, ActiveStatus::Inactive);
    }
}
