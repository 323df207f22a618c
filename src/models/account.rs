//! Organizations, users and authentication payloads.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::Record;

// ============================================
// Organizations
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// CSS color used by the chat widget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

pub type Organization = Record<OrganizationFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl From<OrganizationFields> for OrganizationPatch {
    fn from(f: OrganizationFields) -> Self {
        Self {
            name: Some(f.name),
            logo_url: f.logo_url,
            primary_color: f.primary_color,
            settings: f.settings,
        }
    }
}

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Agent,
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Agent => write!(f, "agent"),
            Role::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "agent" => Ok(Role::Agent),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub org_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub type User = Record<UserFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<UserFields> for UserPatch {
    fn from(f: UserFields) -> Self {
        Self {
            name: Some(f.name),
            email: Some(f.email),
            role: Some(f.role),
            org_id: Some(f.org_id),
            is_active: f.is_active,
        }
    }
}

// ============================================
// Authentication
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Profile returned alongside a fresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Errors from [`TokenClaims::peek`]
#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("Token is not a JWT (expected three dot-separated segments)")]
    NotAJwt,

    #[error("Token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Claims the backend puts in its bearer tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: String,
    pub org_id: String,
    pub role: Role,
    /// Expiry, seconds since epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// The signature is NOT verified; the result is only fit for display.
    pub fn peek(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(ClaimsError::NotAJwt),
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Expiry as a UTC timestamp, if the token carries one
    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.exp
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    }

    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at().map(|at| at <= now).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_peek_claims() {
        let token = make_token(r#"{"userId":"u1","orgId":"o1","role":"agent","exp":1700000000}"#);
        let claims = TokenClaims::peek(&token).unwrap();

        assert_eq!(claims.user_id, "u1");
        assert_eq!(claims.org_id, "o1");
        assert_eq!(claims.role, Role::Agent);
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);
        assert!(claims.is_expired(chrono::Utc::now()));
    }

    #[test]
    fn test_peek_without_expiry_never_expires() {
        let token = make_token(r#"{"userId":"u1","orgId":"o1","role":"admin"}"#);
        let claims = TokenClaims::peek(&token).unwrap();
        assert!(claims.expires_at().is_none());
        assert!(!claims.is_expired(chrono::Utc::now()));
    }

    #[test]
    fn test_peek_rejects_opaque_token() {
        assert!(matches!(
            TokenClaims::peek("opaque-token"),
            Err(ClaimsError::NotAJwt)
        ));
        assert!(matches!(
            TokenClaims::peek("a.!!!.c"),
            Err(ClaimsError::Encoding(_))
        ));
    }

    #[test]
    fn test_register_request_optional_fields() {
        let req = RegisterRequest {
            name: "Frankie".to_string(),
            email: "frankie@example.com".to_string(),
            password: "hunter2".to_string(),
            org_id: None,
            role: Some(Role::Agent),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["role"], "agent");
        assert!(value.get("orgId").is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }
}
