//! Client for the email verification service.
//!
//! Submits a batch of addresses as a JSON array to
//! `POST {base_url}/api/email_check` and decodes the verdicts into a
//! [`ResultSet`](verimail_model::ResultSet).
//!
//! # Example
//!
//! ```ignore
//! use verimail_client::{ApiClient, ClientConfig, VerificationApi};
//!
//! let config = ClientConfig::resolve(None, std::env::var("APP_URL").ok().as_deref(), None);
//! let client = ApiClient::new(&config)?;
//! let results = client.check(&["a@example.com".to_string()]).await?;
//! ```

mod client;
mod config;
mod error;

pub use client::{ApiClient, EMAIL_CHECK_PATH, VerificationApi};
pub use config::{APP_URL_ENV, ClientConfig, DEFAULT_API_URL};
pub use error::{ClientError, Result};
