//! # Podium
//!
//! Client side of a small-business messaging platform: a typed REST client
//! for the `/api/v1` backend plus headless view-models for the settings
//! dashboard and the messaging inbox.
//!
//! ## Modules
//!
//! - [`models`]: DTOs exchanged with the backend
//! - [`client`]: request primitive, per-resource functions, auth context
//! - [`ui`]: dashboard and inbox view-models
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use podium::client::{ApiClient, AuthContext};
//! use podium::models::WidgetSubmission;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:3001", AuthContext::new());
//!
//!     let receipt = client
//!         .widget()
//!         .submit(&WidgetSubmission {
//!             username: "Jane".to_string(),
//!             phone: "555-1000".to_string(),
//!             message: "Do you have 7-seaters in stock?".to_string(),
//!         })
//!         .await?;
//!
//!     println!("{}", receipt.message);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;

pub use client::{ApiClient, AuthContext, ClientError, ClientResult};
pub use config::Config;
