// Client integration tests against a fake backend.

mod common;

use common::FakeBackend;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};

use podium::client::{ClientError, RequestOptions, TemplatesResource};
use podium::models::{
    ActiveStatus, Channel, ConversationFields, ConversationStatus, LoginRequest, MessageFields,
    MessageStatus, MessageType, RegisterRequest, Role, Sender, SmsRequest, TemplateFields,
    TemplatePatch, TemplateType, VoiceRequest, WhatsAppRequest, WidgetSubmission,
};
use podium::ui::{DashboardTab, PanelView, ResourceForm, SettingsDashboard};

fn template_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": "Welcome",
        "content": "Hi {{name}}, thanks for reaching out!",
        "type": "sms",
        "status": status,
        "category": "greeting"
    })
}

#[tokio::test]
async fn test_update_sends_partial_patch() {
    let backend = FakeBackend::start().await;
    backend.respond("PATCH", "/api/v1/templates/42", 200, template_json("42", "inactive"));

    let patch = TemplatePatch {
        status: Some(ActiveStatus::Inactive),
        ..Default::default()
    };
    let updated = backend.client().templates().update("42", &patch).await.unwrap();

    assert_eq!(updated.id, "42");
    assert_eq!(updated.status, ActiveStatus::Inactive);

    let request = backend.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/api/v1/templates/42");
    assert_eq!(request.body, Some(json!({"status": "inactive"})));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_bearer_header_only_with_token() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/api/v1/templates", 200, json!([]));

    backend.client_with_token("abc").templates().list().await.unwrap();
    assert_eq!(backend.last_request().header("authorization"), Some("Bearer abc"));

    backend.client().templates().list().await.unwrap();
    assert_eq!(backend.last_request().header("authorization"), None);
}

#[tokio::test]
async fn test_caller_headers_override_defaults() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/api/v1/conversations", 200, json!([]));

    let client = backend.client_with_token("abc");
    let options = RequestOptions::new(Method::GET)
        .header(AUTHORIZATION, HeaderValue::from_static("Bearer override"));
    let _: Value = client.request("/api/v1/conversations", options).await.unwrap();

    assert_eq!(
        backend.last_request().header("authorization"),
        Some("Bearer override")
    );
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let backend = FakeBackend::start().await;

    let err = backend.client().campaigns().list().await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"), "unexpected message: {}", err);
}

#[tokio::test]
async fn test_unauthorized_is_flagged() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/api/v1/rules", 401, json!({"message": "Unauthorized"}));

    let err = backend.client_with_token("stale").rules().list().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_widget_submit() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "POST",
        "/api/v1/widget",
        200,
        json!({"message": "Thanks! We'll be in touch shortly.", "conversationId": "c9"}),
    );

    let receipt = backend
        .client()
        .widget()
        .submit(&WidgetSubmission {
            username: "Jane".to_string(),
            phone: "555-1000".to_string(),
            message: "Hello".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(receipt.message, "Thanks! We'll be in touch shortly.");
    assert_eq!(receipt.conversation_id.as_deref(), Some("c9"));

    let request = backend.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.body,
        Some(json!({"username": "Jane", "phone": "555-1000", "message": "Hello"}))
    );
}

#[tokio::test]
async fn test_chat_messages_query() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "GET",
        "/api/v1/chat/messages",
        200,
        json!([{
            "_id": "m1",
            "conversationId": "conv 1",
            "sender": "customer",
            "content": "Is the SUV still available?"
        }]),
    );

    let client = backend.client();
    let messages = client.chat().messages(Some("conv 1")).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].sender.is_customer());
    assert_eq!(
        backend.last_request().query.as_deref(),
        Some("conversationId=conv%201")
    );

    client.chat().messages(None).await.unwrap();
    assert_eq!(backend.last_request().query, None);
}

#[tokio::test]
async fn test_conversation_assign_and_read() {
    let backend = FakeBackend::start().await;
    let conversation = json!({
        "_id": "c1",
        "orgId": "o1",
        "customerId": "cust1",
        "channel": "sms",
        "assignedTo": "agent7",
        "status": "open"
    });
    backend.respond("PATCH", "/api/v1/conversations/c1/assign", 200, conversation.clone());
    backend.respond("PATCH", "/api/v1/conversations/c1/read", 200, conversation);

    let client = backend.client();
    let assigned = client.conversations().assign("c1", "agent7").await.unwrap();
    assert_eq!(assigned.assigned_to.as_deref(), Some("agent7"));
    assert_eq!(backend.last_request().body, Some(json!({"assignedTo": "agent7"})));

    client.conversations().mark_as_read("c1").await.unwrap();
    let request = backend.last_request();
    assert_eq!(request.path, "/api/v1/conversations/c1/read");
    assert_eq!(request.body, Some(json!({})));
}

#[tokio::test]
async fn test_login_then_logout() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "POST",
        "/api/v1/auth/login",
        200,
        json!({"token": "t0k3n", "user": {"name": "Ana", "email": "ana@example.com", "role": "agent"}}),
    );
    backend.respond("POST", "/api/v1/auth/logout", 200, json!({"message": "Logged out"}));

    let client = backend.client();
    let response = client
        .auth()
        .login(&LoginRequest {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.user.name, "Ana");
    assert_eq!(backend.last_request().header("authorization"), None);

    client.auth_context().set_token(response.token).unwrap();
    let ack = client.auth().logout().await.unwrap();
    assert_eq!(ack.message, "Logged out");

    let request = backend.last_request();
    assert_eq!(request.path, "/api/v1/auth/logout");
    assert_eq!(request.body, Some(json!({})));
    assert_eq!(request.header("authorization"), Some("Bearer t0k3n"));
}

#[tokio::test]
async fn test_mismatched_body_is_decode_error() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/api/v1/templates", 200, json!({"unexpected": true}));

    let err = backend.client().templates().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_empty_body_decodes_as_null() {
    let backend = FakeBackend::start().await;
    backend.respond_raw("DELETE", "/api/v1/rules/r1", 200, "");

    let value: Value = backend.client().delete("/api/v1/rules/r1").await.unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_dashboard_business_panel() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "GET",
        "/api/v1/business-info",
        200,
        json!([{"_id": "b1", "name": "Venture Auto", "industry": "Automotive"}]),
    );

    let client = backend.client();
    let mut dashboard = SettingsDashboard::new(client.base_url());
    dashboard.select_tab(DashboardTab::Business);
    dashboard.refresh(&client).await.unwrap();

    match dashboard.render().panel {
        PanelView::Business(form) => {
            assert_eq!(form.rows.len(), 1);
            assert_eq!(form.rows[0].id, "b1");
            assert_eq!(form.rows[0].summary, "Venture Auto (Automotive)");
            assert_eq!(form.error, None);
        }
        other => panic!("expected business panel, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dashboard_load_failure_shows_error() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/api/v1/campaigns", 500, json!({"message": "boom"}));

    let client = backend.client();
    let mut dashboard = SettingsDashboard::new(client.base_url());
    dashboard.select_tab(DashboardTab::Campaigns);
    assert!(dashboard.refresh(&client).await.is_err());

    match dashboard.render().panel {
        PanelView::Campaigns(form) => {
            let error = form.error.expect("error shown in the panel");
            assert!(error.starts_with("Failed to load campaign"), "{}", error);
            assert!(form.rows.is_empty());
        }
        other => panic!("expected campaigns panel, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dashboard_chat_send() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "POST",
        "/api/v1/chat/messages",
        201,
        json!({
            "_id": "m2",
            "conversationId": "c1",
            "sender": {"kind": "agent", "id": "u1"},
            "content": "On my way",
            "type": "text"
        }),
    );

    let client = backend.client();
    let mut dashboard = SettingsDashboard::new(client.base_url());
    dashboard.chat.set_conversation(Some("c1".to_string()));
    dashboard.chat.set_draft("  On my way ");

    let sent = dashboard.chat.send(&client).await.unwrap();
    assert_eq!(sent.map(|m| m.id), Some("m2".to_string()));
    assert_eq!(dashboard.chat.draft(), "");
    assert_eq!(
        backend.last_request().body,
        Some(json!({"conversationId": "c1", "content": "On my way", "type": "text"}))
    );

    // Blank drafts never reach the backend
    let before = backend.requests().len();
    dashboard.chat.set_draft("   ");
    assert_eq!(dashboard.chat.send(&client).await.unwrap(), None);
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn test_resource_form_edit_sends_full_patch() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/api/v1/templates", 200, json!([template_json("t1", "active")]));
    backend.respond("PATCH", "/api/v1/templates/t1", 200, template_json("t1", "inactive"));

    let client = backend.client();
    let mut form = ResourceForm::<TemplatesResource>::new();
    form.load(&client).await.unwrap();

    let mut fields = form.begin_edit("t1").cloned().unwrap();
    fields.status = ActiveStatus::Inactive;
    let saved = form.save(&client, fields).await.unwrap();

    assert_eq!(saved.status, ActiveStatus::Inactive);
    assert_eq!(form.editing(), None);
    assert_eq!(form.items()[0].status, ActiveStatus::Inactive);

    let body = backend.last_request().body.unwrap();
    let body = body.as_object().unwrap();
    assert_eq!(body.len(), 5);
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["type"], "sms");
}

#[tokio::test]
async fn test_resource_form_create_and_delete() {
    let backend = FakeBackend::start().await;
    backend.respond("POST", "/api/v1/templates", 201, template_json("t2", "active"));
    backend.respond("DELETE", "/api/v1/templates/t2", 200, json!({"message": "Template deleted"}));

    let client = backend.client();
    let mut form = ResourceForm::<TemplatesResource>::new();
    let fields = TemplateFields {
        name: "Welcome".to_string(),
        content: "Hi {{name}}, thanks for reaching out!".to_string(),
        kind: TemplateType::Sms,
        status: ActiveStatus::Active,
        category: "greeting".to_string(),
    };

    form.save(&client, fields).await.unwrap();
    assert_eq!(form.items().len(), 1);
    assert_eq!(backend.last_request().method, "POST");

    let ack = form.remove(&client, "t2").await.unwrap();
    assert_eq!(ack.message, "Template deleted");
    assert!(form.items().is_empty());
}

#[tokio::test]
async fn test_endpoint_paths_verbs_and_bodies() {
    let backend = FakeBackend::start().await;
    let message = json!({
        "_id": "m5",
        "conversationId": "c1",
        "sender": {"kind": "agent", "id": "u1"},
        "content": "Thanks!",
        "type": "text"
    });
    let conversation = json!({
        "_id": "c2",
        "orgId": "o1",
        "customerId": "cust1",
        "channel": "sms",
        "status": "open"
    });
    backend.respond("GET", "/api/v1/messages/conversation/c1", 200, json!([message.clone()]));
    backend.respond("POST", "/api/v1/messages", 201, message);
    backend.respond("POST", "/api/v1/chat/sms/send", 200, json!({"message": "SMS sent"}));
    backend.respond(
        "POST",
        "/api/v1/chat/whatsapp/send",
        200,
        json!({"message": "WhatsApp message sent", "aiContent": "Hi Will, your SUV is ready."}),
    );
    backend.respond("POST", "/api/v1/chat/voice/send", 200, json!({"message": "Call placed"}));
    backend.respond(
        "POST",
        "/api/v1/auth/register",
        201,
        json!({"token": "new-token", "user": {"name": "Ana", "email": "ana@example.com", "role": "admin"}}),
    );
    backend.respond("GET", "/api/v1/conversations", 200, json!([conversation.clone()]));
    backend.respond("POST", "/api/v1/conversations", 201, conversation);
    for path in [
        "/api/v1/customers",
        "/api/v1/organizations",
        "/api/v1/users",
        "/api/v1/calls",
    ] {
        backend.respond("GET", path, 200, json!([]));
    }

    let client = backend.client();

    let thread = client.messages().by_conversation("c1").await.unwrap();
    assert_eq!(thread[0].content, "Thanks!");
    client
        .messages()
        .create(&MessageFields {
            conversation_id: "c1".to_string(),
            sender: Sender::agent("u1"),
            content: "Thanks!".to_string(),
            kind: MessageType::Text,
            status: MessageStatus::Sent,
            timestamp: None,
            is_ai: None,
        })
        .await
        .unwrap();

    let sms = client
        .chat()
        .send_sms(&SmsRequest {
            to: "+15550001".to_string(),
            content: "Your car is ready".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(sms.message, "SMS sent");
    let whatsapp = client
        .chat()
        .send_whatsapp(&WhatsAppRequest {
            to: "+15550001".to_string(),
            prompt: Some("Tell Will his SUV is ready".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(whatsapp.ai_content, "Hi Will, your SUV is ready.");
    client
        .chat()
        .send_voice(&VoiceRequest {
            to: "+15550001".to_string(),
            content: "Your car is ready".to_string(),
        })
        .await
        .unwrap();

    let registered = client
        .auth()
        .register(&RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            org_id: Some("o1".to_string()),
            role: Some(Role::Admin),
        })
        .await
        .unwrap();
    assert_eq!(registered.token, "new-token");

    let conversations = client.conversations().list().await.unwrap();
    assert_eq!(conversations[0].channel, Channel::Sms);
    client
        .conversations()
        .create(&ConversationFields {
            org_id: "o1".to_string(),
            customer_id: "cust1".to_string(),
            channel: Channel::Sms,
            assigned_to: None,
            status: ConversationStatus::Open,
            last_message_at: None,
        })
        .await
        .unwrap();

    client.customers().list().await.unwrap();
    client.organizations().list().await.unwrap();
    client.users().list().await.unwrap();
    client.calls().list().await.unwrap();

    let expected: Vec<(&str, &str, Option<Value>)> = vec![
        ("GET", "/api/v1/messages/conversation/c1", None),
        (
            "POST",
            "/api/v1/messages",
            Some(json!({
                "conversationId": "c1",
                "sender": {"kind": "agent", "id": "u1"},
                "content": "Thanks!",
                "type": "text",
                "status": "sent"
            })),
        ),
        (
            "POST",
            "/api/v1/chat/sms/send",
            Some(json!({"to": "+15550001", "content": "Your car is ready"})),
        ),
        (
            "POST",
            "/api/v1/chat/whatsapp/send",
            Some(json!({"to": "+15550001", "prompt": "Tell Will his SUV is ready"})),
        ),
        (
            "POST",
            "/api/v1/chat/voice/send",
            Some(json!({"to": "+15550001", "content": "Your car is ready"})),
        ),
        (
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "secret",
                "orgId": "o1",
                "role": "admin"
            })),
        ),
        ("GET", "/api/v1/conversations", None),
        (
            "POST",
            "/api/v1/conversations",
            Some(json!({"orgId": "o1", "customerId": "cust1", "channel": "sms", "status": "open"})),
        ),
        ("GET", "/api/v1/customers", None),
        ("GET", "/api/v1/organizations", None),
        ("GET", "/api/v1/users", None),
        ("GET", "/api/v1/calls", None),
    ];

    let requests = backend.requests();
    assert_eq!(requests.len(), expected.len());
    for (request, (method, path, body)) in requests.iter().zip(expected) {
        assert_eq!(request.method, method, "method of {}", path);
        assert_eq!(request.path, path);
        assert_eq!(request.query, None, "query of {}", path);
        assert_eq!(request.body, body, "body of {} {}", method, path);
    }
}

#[tokio::test]
async fn test_unknown_integration_type_fails_the_list() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "GET",
        "/api/v1/integrations",
        200,
        json!([
            {"_id": "i1", "name": "Texts", "type": "twilio", "status": "connected",
             "configuration": {"accountSid": "AC1", "authToken": "tok", "phoneNumber": "+15550000"}},
            {"_id": "i2", "name": "Pager", "type": "pager", "configuration": {}}
        ]),
    );

    let client = backend.client();
    let mut dashboard = SettingsDashboard::new(client.base_url());
    dashboard.select_tab(DashboardTab::Integrations);
    let err = dashboard.refresh(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);

    match dashboard.render().panel {
        PanelView::Integrations(form) => {
            assert!(form.rows.is_empty());
            assert!(form.error.is_some());
        }
        other => panic!("expected integrations panel, got {:?}", other),
    }
}
