//! Shared request checks for the document APIs

use crate::error::PlugNotasError;
use crate::types::QueryParams;

/// Maximum number of documents accepted by a single batch submission
pub const MAX_BATCH_SIZE: usize = 5000;

/// Kind of fiscal document handled by an API family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Nfe,
    Nfce,
}

impl DocumentKind {
    /// Path prefix of the resource, without slashes
    pub fn resource(&self) -> &'static str {
        match self {
            DocumentKind::Nfe => "nfe",
            DocumentKind::Nfce => "nfce",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Nfe => "NF-e",
            DocumentKind::Nfce => "NFC-e",
        }
    }
}

/// Rejects empty batches and batches above [`MAX_BATCH_SIZE`].
pub fn validate_batch<T>(kind: DocumentKind, documents: &[T]) -> Result<(), PlugNotasError> {
    if documents.is_empty() {
        return Err(PlugNotasError::Validation(format!(
            "no {} documents given",
            kind.label()
        )));
    }

    if documents.len() > MAX_BATCH_SIZE {
        return Err(PlugNotasError::Validation(format!(
            "at most {} {} documents per call, got {}",
            MAX_BATCH_SIZE,
            kind.label(),
            documents.len()
        )));
    }

    Ok(())
}

/// `tipo=autorizacao`, selects the authorization XML of a document
pub(crate) fn authorization_xml_query() -> QueryParams {
    QueryParams::new().with("tipo", "autorizacao")
}
