//! Endpoints that do not follow the CRUD pattern

use serde_json::json;

use super::error::ClientResult;
use super::http::{ApiClient, API_PREFIX};
use crate::models::{
    Ack, AuthResponse, ChatMessageRequest, Conversation, ConversationFields, LoginRequest,
    Message, MessageFields, RegisterRequest, SmsRequest, VoiceRequest, WhatsAppReceipt,
    WhatsAppRequest, WidgetReceipt, WidgetSubmission,
};

fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

/// `/api/v1/conversations`
pub struct ConversationsApi<'a> {
    client: &'a ApiClient,
}

impl ConversationsApi<'_> {
    pub async fn list(&self) -> ClientResult<Vec<Conversation>> {
        self.client
            .get(&format!("{}/conversations", API_PREFIX))
            .await
    }

    pub async fn create(&self, fields: &ConversationFields) -> ClientResult<Conversation> {
        self.client
            .post(&format!("{}/conversations", API_PREFIX), fields)
            .await
    }

    /// Hand the conversation to an agent
    pub async fn assign(&self, id: &str, assigned_to: &str) -> ClientResult<Conversation> {
        self.client
            .patch(
                &format!("{}/conversations/{}/assign", API_PREFIX, segment(id)),
                &json!({ "assignedTo": assigned_to }),
            )
            .await
    }

    pub async fn mark_as_read(&self, id: &str) -> ClientResult<Conversation> {
        self.client
            .patch(
                &format!("{}/conversations/{}/read", API_PREFIX, segment(id)),
                &json!({}),
            )
            .await
    }
}

/// `/api/v1/messages`
pub struct MessagesApi<'a> {
    client: &'a ApiClient,
}

impl MessagesApi<'_> {
    /// Every message of one conversation, oldest first
    pub async fn by_conversation(&self, conversation_id: &str) -> ClientResult<Vec<Message>> {
        self.client
            .get(&format!(
                "{}/messages/conversation/{}",
                API_PREFIX,
                segment(conversation_id)
            ))
            .await
    }

    pub async fn create(&self, fields: &MessageFields) -> ClientResult<Message> {
        self.client
            .post(&format!("{}/messages", API_PREFIX), fields)
            .await
    }
}

/// `/api/v1/chat`: live chat plus outbound SMS, WhatsApp and voice
pub struct ChatApi<'a> {
    client: &'a ApiClient,
}

impl ChatApi<'_> {
    pub async fn send_message(&self, request: &ChatMessageRequest) -> ClientResult<Message> {
        self.client
            .post(&format!("{}/chat/messages", API_PREFIX), request)
            .await
    }

    /// Chat history, optionally narrowed to one conversation
    pub async fn messages(&self, conversation_id: Option<&str>) -> ClientResult<Vec<Message>> {
        let path = match conversation_id {
            Some(id) => format!(
                "{}/chat/messages?conversationId={}",
                API_PREFIX,
                urlencoding::encode(id)
            ),
            None => format!("{}/chat/messages", API_PREFIX),
        };
        self.client.get(&path).await
    }

    pub async fn send_sms(&self, request: &SmsRequest) -> ClientResult<Ack> {
        self.client
            .post(&format!("{}/chat/sms/send", API_PREFIX), request)
            .await
    }

    pub async fn send_whatsapp(&self, request: &WhatsAppRequest) -> ClientResult<WhatsAppReceipt> {
        self.client
            .post(&format!("{}/chat/whatsapp/send", API_PREFIX), request)
            .await
    }

    pub async fn send_voice(&self, request: &VoiceRequest) -> ClientResult<Ack> {
        self.client
            .post(&format!("{}/chat/voice/send", API_PREFIX), request)
            .await
    }
}

/// `/api/v1/widget`
pub struct WidgetApi<'a> {
    client: &'a ApiClient,
}

impl WidgetApi<'_> {
    /// Submit the public lead-capture form
    pub async fn submit(&self, submission: &WidgetSubmission) -> ClientResult<WidgetReceipt> {
        self.client
            .post(&format!("{}/widget", API_PREFIX), submission)
            .await
    }
}

/// `/api/v1/auth`
///
/// These calls only talk to the server; storing or dropping the returned
/// token is up to the caller's [`AuthContext`](super::AuthContext).
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl AuthApi<'_> {
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.client
            .post(&format!("{}/auth/login", API_PREFIX), request)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.client
            .post(&format!("{}/auth/register", API_PREFIX), request)
            .await
    }

    pub async fn logout(&self) -> ClientResult<Ack> {
        self.client
            .post(&format!("{}/auth/logout", API_PREFIX), &json!({}))
            .await
    }
}

impl ApiClient {
    pub fn conversations(&self) -> ConversationsApi<'_> {
        ConversationsApi { client: self }
    }

    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi { client: self }
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi { client: self }
    }

    pub fn widget(&self) -> WidgetApi<'_> {
        WidgetApi { client: self }
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}
