//! Asynchronous client for the Evernote cloud API.
//!
//! Every operation is one HTTP exchange: preconditions are checked before a
//! request is built, the typed request is dispatched, and the service's
//! answer (or failure) is surfaced unchanged. The client holds no mutable
//! state, never retries, and never caches; callers own any retry or timeout
//! policy they need.
//!
//! # Example
//!
//! ```no_run
//! use evernote_client::{Client, ClientConfig};
//!
//! # async fn run() -> Result<(), evernote_client::ClientError> {
//! let client = Client::new(ClientConfig {
//!     consumer_key: "my-app".to_string(),
//!     consumer_secret: "shhh".to_string(),
//!     callback_url: "https://my-app.example.com/callback".to_string(),
//!     ..ClientConfig::default()
//! });
//!
//! let credentials = client.request_temporary_credentials().await?;
//! println!("authorize at {}", credentials.authorize_url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod oauth;

mod http;

pub use client::{Client, NoteSearchOptions};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use oauth::{AccessCredentials, TemporaryCredentials};
