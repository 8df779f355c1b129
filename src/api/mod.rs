//! PlugNotas API modules
//!
//! - [`common`] - Batch limits and shared request helpers
//! - [`nfe`] - NF-e issuance, consultation, CC-e, cancellation and manifestation
//! - [`nfce`] - NFC-e issuance, consultation and cancellation
//! - [`company`] - Issuing company registration
//! - [`certificate`] - Digital certificate upload and management
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plugnotas_sdk::{PlugNotas, types::ApiKey};
//! ```

pub mod certificate;
pub mod common;
pub mod company;
mod document;
pub mod nfce;
pub mod nfe;
pub mod r#trait;

pub use certificate::{CertificateApi, CertificateUpload};
pub use common::{validate_batch, DocumentKind, MAX_BATCH_SIZE};
pub use company::CompanyApi;
pub use nfce::NfceApi;
pub use nfe::{ManifestOperation, NfeApi};
pub use r#trait::{PlugNotasApi, PlugNotasContext};
