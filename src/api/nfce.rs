//! NFC-e API
//!
//! Issuance, consultation and cancellation of NFC-e (consumer) documents.

use std::sync::Arc;

use serde::Serialize;

use super::common::DocumentKind;
use super::document::DocumentEndpoints;
use super::{PlugNotasApi, PlugNotasContext};
use crate::error::PlugNotasError;
use crate::types::{ApiResponse, DocumentId, IntegrationId, TaxId};

/// NFC-e API
pub struct NfceApi {
    endpoints: DocumentEndpoints,
}

impl NfceApi {
    pub fn new(context: Arc<PlugNotasContext>) -> Self {
        Self {
            endpoints: DocumentEndpoints::new(context, DocumentKind::Nfce),
        }
    }

    /// Submit 1 to 5000 NFC-e documents already in the PlugNotas layout
    ///
    /// POST /nfce
    pub async fn send<T: Serialize>(&self, documents: &[T]) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.send(documents).await
    }

    /// GET /nfce/{issuer}/{integration_id}/resumo
    pub async fn summary_by_integration(
        &self,
        issuer: &TaxId,
        integration_id: &IntegrationId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints
            .summary_by_integration(issuer, integration_id)
            .await
    }

    /// GET /nfce/{id}/resumo
    pub async fn summary(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "resumo").await
    }

    /// GET /nfce/{id}/xml?tipo=autorizacao
    pub async fn xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.xml(id).await
    }

    /// GET /nfce/{id}/pdf
    pub async fn pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "pdf").await
    }

    /// POST /nfce/{id}/cancelamento
    pub async fn cancel(
        &self,
        id: &DocumentId,
        justification: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.cancel(id, justification).await
    }

    /// GET /nfce/{id}/cancelamento/status
    pub async fn cancellation_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cancelamento/status").await
    }

    /// GET /nfce/{id}/cancelamento/xml
    pub async fn cancellation_xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.endpoints.get(id, "cancelamento/xml").await
    }
}

impl PlugNotasApi for NfceApi {
    fn context(&self) -> &PlugNotasContext {
        &self.endpoints.context
    }

    fn api_name(&self) -> &'static str {
        "nfce"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PlugNotasClient;
    use crate::types::ApiKey;

    fn create_test_context(base_url: &str) -> Arc<PlugNotasContext> {
        let client = PlugNotasClient::builder()
            .api_key(ApiKey::new("2da392a6-79d2-4304-a8b7-959572c7e44d").unwrap())
            .production_url(base_url)
            .build()
            .unwrap();
        Arc::new(PlugNotasContext::new(Arc::new(client)))
    }

    #[test]
    fn test_api_name() {
        let context = create_test_context("http://localhost:0");
        let api = NfceApi::new(context);
        assert_eq!(api.api_name(), "nfce");
        assert_eq!(api.context().client().base_url(), "http://localhost:0");
    }
}
