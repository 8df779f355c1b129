//! NF-e API
//!
//! Issuance, consultation, correction letters (CC-e), cancellation and
//! recipient manifestation of NF-e documents.
//!
//! ## Example
//!
//! ```ignore
//! use plugnotas_sdk::api::nfe::{ManifestOperation, NfeApi};
//! use plugnotas_sdk::types::DocumentId;
//!
//! let nfe_api = NfeApi::new(context);
//! let sent = nfe_api.send(&[serde_json::json!({"idIntegracao": "PEDIDO-1"})]).await?;
//!
//! let id = DocumentId::new("5f7b8d8c0f9b4a0012345678")?;
//! let pdf = nfe_api.pdf(&id).await?;
//! nfe_api.manifest(&id, ManifestOperation::Confirmation, None).await?;
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::common::DocumentKind;
use super::document::DocumentEndpoints;
use super::{PlugNotasApi, PlugNotasContext};
use crate::error::PlugNotasError;
use crate::types::{ApiResponse, CorrectionRequest, DocumentId, IntegrationId, TaxId};

/// Recipient manifestation event of an NF-e
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManifestOperation {
    #[serde(rename = "CONFIRMACAODAOPERACAO")]
    Confirmation,
    #[serde(rename = "DESCONHECIMENTODAOPERACAO")]
    Unknown,
    #[serde(rename = "OPERACAONAOREALIZADA")]
    NotPerformed,
}

impl ManifestOperation {
    pub const ALL: [ManifestOperation; 3] = [
        ManifestOperation::Confirmation,
        ManifestOperation::Unknown,
        ManifestOperation::NotPerformed,
    ];

    /// Wire value expected by PlugNotas
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestOperation::Confirmation => "CONFIRMACAODAOPERACAO",
            ManifestOperation::Unknown => "DESCONHECIMENTODAOPERACAO",
            ManifestOperation::NotPerformed => "OPERACAONAOREALIZADA",
        }
    }

    /// Whether `justificativa` is part of the request body for this operation
    pub fn takes_justification(&self) -> bool {
        matches!(self, ManifestOperation::Unknown)
    }
}

impl fmt::Display for ManifestOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestOperation {
    type Err = PlugNotasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ManifestOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                PlugNotasError::Validation(format!(
                    "invalid manifestation operation '{}', use CONFIRMACAODAOPERACAO, \
                     DESCONHECIMENTODAOPERACAO or OPERACAONAOREALIZADA",
                    s
                ))
            })
    }
}

/// Body of `POST /nfe/{id}/manifestacao`
#[derive(Debug, Clone, Serialize)]
struct ManifestRequest<'a> {
    #[serde(rename = "operacao")]
    operation: ManifestOperation,
    #[serde(rename = "justificativa", skip_serializing_if = "Option::is_none")]
    justification: Option<&'a str>,
}

impl<'a> ManifestRequest<'a> {
    /// `justificativa` is always present for [`ManifestOperation::Unknown`],
    /// empty when none is given, and never sent otherwise.
    fn new(operation: ManifestOperation, justification: Option<&'a str>) -> Self {
        Self {
            operation,
            justification: operation
                .takes_justification()
                .then_some(justification.unwrap_or_default()),
        }
    }
}

/// NF-e API
pub struct NfeApi {
    endpoints: DocumentEndpoints,
}

impl NfeApi {
    pub fn new(context: Arc<PlugNotasContext>) -> Self {
        Self {
            endpoints: DocumentEndpoints::new(context, DocumentKind::Nfe),
        }
    }

    /// Submit 1 to 5000 NF-e documents already in the PlugNotas layout
    ///
    /// POST /nfe
    ///
    /// # Errors
    /// `PlugNotasError::Validation` for an empty or oversized batch, raised
    /// before any request is sent.
    pub async fn send<T: Serialize>(&self, documents: &[T]) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.send(documents).await
    }

    /// GET /nfe/{issuer}/{integration_id}/resumo
    pub async fn summary_by_integration(
        &self,
        issuer: &TaxId,
        integration_id: &IntegrationId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints
            .summary_by_integration(issuer, integration_id)
            .await
    }

    /// GET /nfe/{id}/resumo
    pub async fn summary(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "resumo").await
    }

    /// Authorization XML
    ///
    /// GET /nfe/{id}/xml?tipo=autorizacao
    pub async fn xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.xml(id).await
    }

    /// DANFE PDF
    ///
    /// GET /nfe/{id}/pdf
    pub async fn pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "pdf").await
    }

    /// Request a correction letter (CC-e)
    ///
    /// POST /nfe/{id}/cce
    pub async fn correction(
        &self,
        id: &DocumentId,
        correction: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        let body = CorrectionRequest { correction };
        self.endpoints
            .context
            .client
            .post(&self.endpoints.path(id, "cce"), &body)
            .await
    }

    /// GET /nfe/{id}/cce/status
    pub async fn correction_status(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cce/status").await
    }

    /// GET /nfe/{id}/cce/xml
    pub async fn correction_xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cce/xml").await
    }

    /// GET /nfe/{id}/cce/pdf
    pub async fn correction_pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cce/pdf").await
    }

    /// POST /nfe/{id}/cancelamento
    pub async fn cancel(
        &self,
        id: &DocumentId,
        justification: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.cancel(id, justification).await
    }

    /// GET /nfe/{id}/cancelamento/status
    pub async fn cancellation_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cancelamento/status").await
    }

    /// GET /nfe/{id}/cancelamento/xml
    pub async fn cancellation_xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cancelamento/xml").await
    }

    /// GET /nfe/{id}/cancelamento/pdf
    pub async fn cancellation_pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cancelamento/pdf").await
    }

    /// Register a recipient manifestation event
    ///
    /// POST /nfe/{id}/manifestacao
    ///
    /// `justification` is only sent for [`ManifestOperation::Unknown`], as an
    /// empty string when `None`. It is ignored for the other operations.
    pub async fn manifest(
        &self,
        id: &DocumentId,
        operation: ManifestOperation,
        justification: Option<&str>,
    ) -> Result<ApiResponse, PlugNotasError> {
        let body = ManifestRequest::new(operation, justification);
        self.endpoints
            .context
            .client
            .post(&self.endpoints.path(id, "manifestacao"), &body)
            .await
    }

    /// GET /nfe/{id}/manifestacao/status
    pub async fn manifestation_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "manifestacao/status").await
    }
}

impl PlugNotasApi for NfeApi {
    fn context(&self) -> &PlugNotasContext {
        &self.endpoints.context
    }

    fn api_name(&self) -> &'static str {
        "nfe"
    }
}
