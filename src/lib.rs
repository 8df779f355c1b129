//! PlugNotas SDK for Rust
//!
//! An async client for the PlugNotas fiscal document API (Brazilian NF-e and
//! NFC-e electronic invoices). Every operation maps 1:1 to a PlugNotas REST
//! endpoint and returns a normalized [`ApiResponse`](types::ApiResponse).
//!
//! ## API Coverage
//!
//! | Category | Endpoints |
//! |----------|-----------|
//! | NF-e | 15 |
//! | NFC-e | 8 |
//! | Company | 4 |
//! | Certificate | 4 |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plugnotas_sdk::{PlugNotas, types::{ApiKey, DocumentId}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let plugnotas = PlugNotas::builder()
//!         .api_key(ApiKey::new("2da392a6-79d2-4304-a8b7-959572c7e44d")?)
//!         .production(false)
//!         .build()?;
//!
//!     let sent = plugnotas.send_nfe(&[serde_json::json!({"idIntegracao": "PEDIDO-1"})]).await?;
//!     println!("{} {:?}", sent.http_code, sent.body);
//!
//!     let id = DocumentId::new("5f7b8d8c0f9b4a0012345678")?;
//!     let xml = plugnotas.nfe_xml(&id).await?.error_for_status()?;
//!     println!("{}", xml.text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - PlugNotas API modules (nfe, nfce, company, certificate)
//! - [`client`] - Request dispatcher and the `PlugNotas` facade
//! - [`error`] - Error types
//! - [`middleware`] - Tower middleware (logging)
//! - [`types`] - Identifiers, environment and the response envelope
//!
//! ## Error Handling
//!
//! Validation failures are raised before any request is sent. Transport
//! failures and HTTP error statuses are reported on the response envelope;
//! [`ApiResponse::error_for_status`](types::ApiResponse::error_for_status)
//! turns them into [`PlugNotasError`]:
//!
//! ```rust,ignore
//! use plugnotas_sdk::PlugNotasError;
//!
//! match plugnotas.nfe_pdf(&id).await.and_then(|r| r.error_for_status()) {
//!     Ok(response) => { /* handle success */ }
//!     Err(PlugNotasError::Api { status, body }) => {
//!         eprintln!("API error: {} - {}", status, body);
//!     }
//!     Err(PlugNotasError::Transport(e)) => {
//!         eprintln!("Transport error: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod types;

pub use client::{PlugNotas, PlugNotasBuilder, PlugNotasClient, PlugNotasClientBuilder};
pub use error::PlugNotasError;
pub use types::{ApiResponse, Environment, ResponseBody};
