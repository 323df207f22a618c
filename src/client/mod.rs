//! Podium REST Client
//!
//! Typed access to the `/api/v1` backend.
//!
//! ## Layout
//!
//! - **http**: the single request primitive ([`ApiClient::request`]) and
//!   its `get`/`post`/`patch`/`delete` shorthands
//! - **resources**: generic CRUD over the nine settings and account
//!   collections
//! - **endpoints**: conversations, messages, chat, widget and auth
//! - **auth**: the bearer token context and its persistence
//!
//! ```no_run
//! # async fn demo() -> Result<(), podium::client::ClientError> {
//! use podium::client::{ApiClient, AuthContext};
//!
//! let client = ApiClient::new("http://localhost:3001", AuthContext::with_token("jwt"));
//! let templates = client.templates().list().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod endpoints;
mod error;
mod http;
mod resources;

pub use auth::{AuthContext, FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
pub use endpoints::{AuthApi, ChatApi, ConversationsApi, MessagesApi, WidgetApi};
pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, RequestOptions, API_PREFIX};
pub use resources::{
    BusinessInfoResource, CallsResource, CampaignsResource, CrudResource, CustomersResource,
    IntegrationsResource, OrganizationsResource, ResourceApi, RulesResource, TemplatesResource,
    UsersResource,
};
