//! Podium CLI
//!
//! Command-line interface for the Podium messaging platform:
//! - Sign in and out
//! - Manage settings and account resources
//! - Work conversations, chat and outbound channels
//! - Preview the inbox and dashboard screens

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use podium::client::{
    ApiClient, BusinessInfoResource, CallsResource, CampaignsResource, ClientError,
    CustomersResource, IntegrationsResource, OrganizationsResource, ResourceApi, RulesResource,
    TemplatesResource, UsersResource,
};
use podium::config::{generate_default_config, Config};
use podium::models::{
    ChatMessageRequest, LeadStatus, LoginRequest, Message, MessageType, Record, RegisterRequest,
    Role, SmsRequest, TokenClaims, VoiceRequest, WhatsAppRequest, WidgetSubmission,
};
use podium::ui::{
    ConversationTab, DashboardTab, DashboardView, FormResource, FormView, Header, HeaderView,
    Inbox, InboxView, PanelView, ResourceForm, SettingsDashboard,
};

#[derive(Parser)]
#[command(name = "podium")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the Podium small-business messaging platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: ~/.config/podium/config.toml or ./podium.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and store the token
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        org_id: Option<String>,
        /// admin, agent or user
        #[arg(long)]
        role: Option<Role>,
    },

    /// Sign out and forget the token
    Logout,

    /// Show who the stored token belongs to
    Whoami,

    /// Business profile
    BusinessInfo {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Message templates
    Templates {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Marketing campaigns
    Campaigns {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Automation rules
    Rules {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Third-party integrations
    Integrations {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Customers
    Customers {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Organizations
    Organizations {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Users
    Users {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Call log
    Calls {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Conversations
    Conversations {
        #[command(subcommand)]
        action: ConversationAction,
    },

    /// Messages of one conversation
    Messages {
        conversation_id: String,
    },

    /// Live chat
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },

    /// Send an SMS
    Sms { to: String, content: String },

    /// Send a WhatsApp message drafted by the assistant
    Whatsapp {
        to: String,
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Place a voice message
    Voice { to: String, content: String },

    /// Submit the public lead-capture form
    Widget {
        #[arg(long)]
        username: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },

    /// Preview the messaging inbox
    Inbox {
        /// Conversation to open
        #[arg(long)]
        select: Option<String>,
        /// Filter conversations by customer name
        #[arg(long)]
        search: Option<String>,
        /// Show closed conversations
        #[arg(long)]
        closed: bool,
        /// Show the customer profile panel
        #[arg(long)]
        profile: bool,
        /// Collapse the sidebar
        #[arg(long)]
        collapsed: bool,
        /// Set the lead status of the open conversation
        #[arg(long)]
        status: Option<LeadStatus>,
    },

    /// Preview the marketing header
    Home {
        /// Hide the Sign In and Dashboard buttons
        #[arg(long)]
        no_auth: bool,
        /// Show the mobile menu opened
        #[arg(long)]
        menu: bool,
    },

    /// Preview the settings dashboard
    Dashboard {
        /// chat, business, campaigns, templates, rules, integrations or widget
        #[arg(long, default_value = "chat")]
        tab: DashboardTab,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CrudAction {
    /// List all records
    List,
    /// Create a record from a JSON payload
    Create {
        #[arg(long)]
        json: String,
    },
    /// Apply a partial JSON update
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// Delete a record
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ConversationAction {
    List,
    /// Assign to an agent
    Assign { id: String, agent: String },
    /// Mark as read
    Read { id: String },
}

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a chat message
    Send {
        content: String,
        #[arg(long)]
        conversation: Option<String>,
        /// text, note, reply, file, whatsapp, sms or voice
        #[arg(long = "type")]
        kind: Option<MessageType>,
    },
    /// List chat messages
    List {
        #[arg(long)]
        conversation: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        if let Some(client_error) = e.downcast_ref::<ClientError>() {
            if client_error.is_unauthorized() {
                eprintln!();
                eprintln!("Sign in first with:");
                eprintln!("  podium login --email <email> --password <password>");
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    podium::logging::init(&config.logging);

    // Offline commands first
    match &cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, &content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
        Commands::Inbox {
            select,
            search,
            closed,
            profile,
            collapsed,
            status,
        } => {
            let mut inbox = Inbox::default();
            if let Some(id) = select {
                if !inbox.select_conversation(id) {
                    bail!("No conversation with id {:?}", id);
                }
            }
            if let Some(query) = search {
                inbox.conversation_list.set_search(query.clone());
            }
            if *closed {
                inbox.conversation_list.set_tab(ConversationTab::Closed);
            }
            if *profile {
                inbox.toggle_profile();
            }
            if *collapsed {
                inbox.toggle_sidebar();
            }
            if let Some(status) = status {
                inbox.choose_status(*status);
            }

            let view = inbox.render();
            return match cli.format {
                OutputFormat::Json => print_json(&view),
                OutputFormat::Table => {
                    print_inbox(&view);
                    Ok(())
                }
            };
        }
        Commands::Home { no_auth, menu } => {
            let mut header = Header::new(!*no_auth);
            if *menu {
                header.toggle_mobile_menu();
            }

            let view = header.render();
            return match cli.format {
                OutputFormat::Json => print_json(&view),
                OutputFormat::Table => {
                    print_header(&view);
                    Ok(())
                }
            };
        }
        _ => {}
    }

    let auth = config
        .auth
        .context()
        .context("Failed to open the token store")?;
    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url().to_string());
    let client = ApiClient::new(base_url, auth);
    let format = cli.format;

    match cli.command {
        Commands::Login { email, password } => {
            let response = client
                .auth()
                .login(&LoginRequest { email, password })
                .await?;
            client.auth_context().set_token(response.token.as_str())?;
            println!(
                "Signed in as {} <{}> ({})",
                response.user.name, response.user.email, response.user.role
            );
        }

        Commands::Register {
            name,
            email,
            password,
            org_id,
            role,
        } => {
            let response = client
                .auth()
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                    org_id,
                    role,
                })
                .await?;
            client.auth_context().set_token(response.token.as_str())?;
            println!(
                "Registered and signed in as {} <{}>",
                response.user.name, response.user.email
            );
        }

        Commands::Logout => {
            if client.auth_context().is_authenticated() {
                // The local token goes away even if the server call fails
                if let Err(e) = client.auth().logout().await {
                    tracing::warn!("Server logout failed: {}", e);
                }
            }
            let route = SettingsDashboard::new(client.base_url()).logout(client.auth_context())?;
            println!("Signed out (next: {})", route.path());
        }

        Commands::Whoami => match client.auth_context().token() {
            None => bail!("Not signed in"),
            Some(token) => match TokenClaims::peek(&token) {
                Ok(claims) => {
                    if format == OutputFormat::Json {
                        return print_json(&claims);
                    }
                    println!("User:         {}", claims.user_id);
                    println!("Organization: {}", claims.org_id);
                    println!("Role:         {}", claims.role);
                    if let Some(at) = claims.expires_at() {
                        let state = if claims.is_expired(chrono::Utc::now()) {
                            " (expired)"
                        } else {
                            ""
                        };
                        println!("Expires:      {}{}", at.format("%Y-%m-%d %H:%M UTC"), state);
                    }
                }
                Err(e) => {
                    tracing::debug!("Token claims unavailable: {}", e);
                    println!("Signed in (token claims unavailable)");
                }
            },
        },

        Commands::BusinessInfo { action } => {
            run_crud::<BusinessInfoResource>(&client, action, format).await?
        }
        Commands::Templates { action } => {
            run_crud::<TemplatesResource>(&client, action, format).await?
        }
        Commands::Campaigns { action } => {
            run_crud::<CampaignsResource>(&client, action, format).await?
        }
        Commands::Rules { action } => run_crud::<RulesResource>(&client, action, format).await?,
        Commands::Integrations { action } => {
            run_crud::<IntegrationsResource>(&client, action, format).await?
        }
        Commands::Customers { action } => {
            run_crud::<CustomersResource>(&client, action, format).await?
        }
        Commands::Organizations { action } => {
            run_crud::<OrganizationsResource>(&client, action, format).await?
        }
        Commands::Users { action } => run_crud::<UsersResource>(&client, action, format).await?,
        Commands::Calls { action } => run_crud::<CallsResource>(&client, action, format).await?,

        Commands::Conversations { action } => {
            let conversations = client.conversations();
            match action {
                ConversationAction::List => {
                    let list = conversations.list().await?;
                    if format == OutputFormat::Json {
                        return print_json(&list);
                    }
                    if list.is_empty() {
                        println!("No conversations yet.");
                    } else {
                        println!(
                            "{:<26} {:<26} {:<10} {:<8} {}",
                            "ID", "Customer", "Channel", "Status", "Assigned"
                        );
                        println!("{}", "-".repeat(90));
                        for c in list {
                            println!(
                                "{:<26} {:<26} {:<10} {:<8} {}",
                                c.id,
                                c.customer_id,
                                c.channel,
                                c.status,
                                c.assigned_to.as_deref().unwrap_or("-")
                            );
                        }
                    }
                }
                ConversationAction::Assign { id, agent } => {
                    let conversation = conversations.assign(&id, &agent).await?;
                    if format == OutputFormat::Json {
                        return print_json(&conversation);
                    }
                    println!("Conversation {} assigned to {}", conversation.id, agent);
                }
                ConversationAction::Read { id } => {
                    let conversation = conversations.mark_as_read(&id).await?;
                    if format == OutputFormat::Json {
                        return print_json(&conversation);
                    }
                    println!("Conversation {} marked as read", conversation.id);
                }
            }
        }

        Commands::Messages { conversation_id } => {
            let messages = client.messages().by_conversation(&conversation_id).await?;
            print_messages(&messages, format)?;
        }

        Commands::Chat { action } => match action {
            ChatAction::Send {
                content,
                conversation,
                kind,
            } => {
                if content.trim().is_empty() {
                    bail!("Message is empty");
                }
                let message = client
                    .chat()
                    .send_message(&ChatMessageRequest {
                        conversation_id: conversation,
                        content,
                        kind,
                    })
                    .await?;
                if format == OutputFormat::Json {
                    return print_json(&message);
                }
                println!("Sent message {}", message.id);
            }
            ChatAction::List { conversation } => {
                let messages = client.chat().messages(conversation.as_deref()).await?;
                print_messages(&messages, format)?;
            }
        },

        Commands::Sms { to, content } => {
            let ack = client.chat().send_sms(&SmsRequest { to, content }).await?;
            print_message_or_json(&ack, &ack.message, format)?;
        }

        Commands::Whatsapp { to, prompt } => {
            let receipt = client
                .chat()
                .send_whatsapp(&WhatsAppRequest { to, prompt })
                .await?;
            if format == OutputFormat::Json {
                return print_json(&receipt);
            }
            println!("{}", receipt.message);
            println!();
            println!("{}", receipt.ai_content);
        }

        Commands::Voice { to, content } => {
            let ack = client
                .chat()
                .send_voice(&VoiceRequest { to, content })
                .await?;
            print_message_or_json(&ack, &ack.message, format)?;
        }

        Commands::Widget {
            username,
            phone,
            message,
        } => {
            let receipt = client
                .widget()
                .submit(&WidgetSubmission {
                    username,
                    phone,
                    message,
                })
                .await?;
            if format == OutputFormat::Json {
                return print_json(&receipt);
            }
            match receipt.conversation_id {
                Some(id) => println!("{} (conversation {})", receipt.message, id),
                None => println!("{}", receipt.message),
            }
        }

        Commands::Dashboard { tab } => {
            let mut dashboard = SettingsDashboard::new(client.base_url());
            dashboard.select_tab(tab);
            // Failures are shown inside the panel
            if let Err(e) = dashboard.refresh(&client).await {
                tracing::debug!("Dashboard refresh failed: {}", e);
            }

            let view = dashboard.render();
            match format {
                OutputFormat::Json => print_json(&view)?,
                OutputFormat::Table => print_dashboard(&view),
            }
        }

        Commands::Inbox { .. } | Commands::Home { .. } | Commands::Config { .. } => {
            unreachable!("handled above")
        }
    }

    Ok(())
}

/// list/create/update/delete for one resource family
async fn run_crud<R: FormResource>(
    client: &ApiClient,
    action: CrudAction,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        CrudAction::List => {
            let mut form = ResourceForm::<R>::new();
            form.load(client).await?;
            match format {
                OutputFormat::Json => print_json(&form.items())?,
                OutputFormat::Table => print_form(&form.render()),
            }
        }
        CrudAction::Create { json } => {
            let fields: R::Fields = serde_json::from_str(&json)
                .with_context(|| format!("Invalid {} payload", R::LABEL))?;
            let record = client.resource::<R>().create(&fields).await?;
            print_record::<R>("Created", &record, format)?;
        }
        CrudAction::Update { id, json } => {
            let patch: Value = serde_json::from_str(&json)
                .with_context(|| format!("Invalid {} patch", R::LABEL))?;
            if !patch.is_object() {
                bail!("A {} patch must be a JSON object", R::LABEL);
            }
            let record: Record<R::Fields> = client
                .patch(&ResourceApi::<R>::member_path(&id), &patch)
                .await?;
            print_record::<R>("Updated", &record, format)?;
        }
        CrudAction::Delete { id } => {
            let ack = client.resource::<R>().delete(&id).await?;
            print_message_or_json(&ack, &ack.message, format)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_message_or_json<T: Serialize>(
    value: &T,
    message: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => {
            println!("{}", message);
            Ok(())
        }
    }
}

fn print_record<R: FormResource>(
    verb: &str,
    record: &Record<R::Fields>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Table => {
            println!("{} {} {}: {}", verb, R::LABEL, record.id, R::summary(&record.data));
            Ok(())
        }
    }
}

fn print_form(view: &FormView) {
    println!("{}", view.title);
    if let Some(error) = &view.error {
        println!("! {}", error);
    }
    if view.rows.is_empty() {
        println!("  (none)");
        return;
    }
    println!("{:<26} {}", "ID", "Summary");
    println!("{}", "-".repeat(70));
    for row in &view.rows {
        let marker = if row.editing { " *" } else { "" };
        println!("{:<26} {}{}", row.id, row.summary, marker);
    }
}

fn print_messages(messages: &[Message], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(messages);
    }
    if messages.is_empty() {
        println!("No messages.");
        return Ok(());
    }
    println!("{:<20} {:<8} {}", "Sender", "Type", "Content");
    println!("{}", "-".repeat(70));
    for m in messages {
        println!("{:<20} {:<8} {}", m.sender.to_string(), m.kind.to_string(), m.content);
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    let navbar: Vec<String> = view
        .navbar
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label)
            } else {
                t.label.to_string()
            }
        })
        .collect();
    println!("{}", navbar.join("  "));
    println!("{}", "=".repeat(70));

    match &view.panel {
        PanelView::Chat(chat) => {
            if let Some(error) = &chat.error {
                println!("! {}", error);
            }
            if chat.lines.is_empty() {
                println!("  (no messages)");
            }
            for line in &chat.lines {
                let arrow = if line.from_customer { "<" } else { ">" };
                println!("{} {:<18} {}", arrow, line.sender, line.content);
            }
        }
        PanelView::Business(form)
        | PanelView::Campaigns(form)
        | PanelView::Templates(form)
        | PanelView::Rules(form)
        | PanelView::Integrations(form) => print_form(form),
        PanelView::Widget { endpoint, snippet } => {
            println!("Paste this snippet into your website. Submissions go to {}", endpoint);
            println!();
            println!("{}", snippet);
        }
    }
}

fn print_header(view: &HeaderView) {
    println!("Podium{}", if view.mobile_menu_open { "  (menu open)" } else { "" });
    println!("{}", "=".repeat(40));
    for link in view.links.iter().chain(&view.auth_links) {
        println!("{:<20} {}", link.label(), link.route().path());
    }
}

fn print_inbox(view: &InboxView) {
    let nav: Vec<String> = view
        .navigation
        .entries
        .iter()
        .map(|e| {
            if e.active {
                format!("[{}]", e.label)
            } else {
                e.label.to_string()
            }
        })
        .collect();
    println!("{}", nav.join("  "));
    println!("{}", "=".repeat(80));

    if let Some(workspace) = view.sidebar.workspace {
        println!("{}", workspace);
        for section in &view.sidebar.sections {
            let fold = if section.expanded { "v" } else { ">" };
            println!("  {} {}", fold, section.title);
            for item in &section.items {
                let marker = if item.active { "*" } else { " " };
                println!("    {} {}", marker, item.label);
            }
        }
        println!("{}", "-".repeat(80));
    }

    let list = &view.conversations;
    let tab = match list.tab {
        ConversationTab::Open => "Open",
        ConversationTab::Closed => "Closed",
    };
    println!("{} ({})", list.title, tab);
    if !list.search.is_empty() {
        println!("Search: {}", list.search);
    }
    if list.rows.is_empty() {
        println!("  (no conversations)");
    }
    for row in &list.rows {
        let marker = if row.selected { ">" } else { " " };
        let unread = if row.unread { "*" } else { " " };
        println!(
            "{}{} {:<3} {:<16} {:<11} {:<10} {}",
            marker, unread, row.avatar, row.customer_name, row.timestamp, row.lead_status, row.last_message
        );
    }
    println!("{}", "-".repeat(80));

    if let Some(chat) = &view.chat {
        println!("{} [{}]  {}", chat.customer_name, chat.avatar, chat.location);
        println!("  {}", chat.intro);
        for line in &chat.lines {
            if line.from_customer {
                println!("  {:<3} {} ({})", line.avatar, line.content, line.timestamp);
            } else {
                println!("  {:>60} ({}) {}", line.content, line.timestamp, line.avatar);
            }
        }
    }

    if let Some(profile) = &view.profile {
        println!("{}", "-".repeat(80));
        println!("{} [{}]", profile.name, profile.avatar);
        if let Some(phone) = &profile.phone {
            println!("  Phone:  {}", phone);
        }
        if let Some(email) = &profile.email {
            println!("  Email:  {}", email);
        }
        println!("  Status: {}", profile.lead_status);
        if let (Some(card), Some(expires)) = (&profile.card_on_file, &profile.card_expires) {
            println!("  Card:   {} (exp {})", card, expires);
        }
        if !profile.recent_activity.is_empty() {
            println!("  RECENT ACTIVITY");
            for item in &profile.recent_activity {
                println!("    {:<32} {}", item.title, item.timestamp);
            }
        }
    }
}
