//! authgate-client
//!
//! Client-side authentication gateway: translates application intents
//! (register, login, logout, password management, account update) into
//! authenticated HTTP calls against an identity backend, and normalizes
//! every failure into one envelope the UI can branch on.
//!
//! The center of the crate is [`AuthGateway`], which composes:
//!
//! - **Input validation** (presence check only — empty fields reject the
//!   dispatch before any network I/O)
//! - **URL construction** against a base resolved once at construction
//! - **Credential resolution** (session token → verified bearer) for the
//!   intents that require it
//! - **A retrying transport** ([`RetryingTransport`] with the
//!   `transport-reqwest` feature, or anything implementing [`Transport`])
//!
//! ## Quick start
//! ```no_run
//! use authgate_api::LoginInput;
//! use authgate_client::{AuthGateway, GatewayConfig, Hs256Verifier, RetryingTransport};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig {
//!     prod_url: "https://id.example.com".to_string(),
//!     dev_url: "http://127.0.0.1:8080".to_string(),
//!     dev: true,
//! };
//! let gateway = AuthGateway::new(
//!     config,
//!     RetryingTransport::new(Default::default())?,
//!     Hs256Verifier::new(b"session-secret"),
//! );
//!
//! let outcome = gateway
//!     .login(&LoginInput {
//!         email: "a@b.com".to_string(),
//!         password: "hunter2".to_string(),
//!     })
//!     .await;
//! println!("{outcome:?}");
//! # Ok(()) }
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod gateway;
mod session;
mod token;
mod transport;
mod validate;

pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use gateway::AuthGateway;
pub use session::{SessionContext, token_from_cookie_header};
pub use token::{Credential, Hs256Verifier, TokenVerifier};
pub use transport::{RetryPolicy, Transport, TransportRequest};
pub use validate::record_is_complete;

#[cfg(feature = "transport-reqwest")]
pub use transport::RetryingTransport;
