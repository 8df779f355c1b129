//! Endpoints shared by the NF-e and NFC-e resources

use std::sync::Arc;

use serde::Serialize;

use super::common::{authorization_xml_query, validate_batch, DocumentKind};
use super::PlugNotasContext;
use crate::error::PlugNotasError;
use crate::types::{
    ApiResponse, CancellationRequest, DocumentId, IntegrationId, QueryParams, TaxId,
};

pub(crate) struct DocumentEndpoints {
    pub(crate) context: Arc<PlugNotasContext>,
    pub(crate) kind: DocumentKind,
}

impl DocumentEndpoints {
    pub(crate) fn new(context: Arc<PlugNotasContext>, kind: DocumentKind) -> Self {
        Self { context, kind }
    }

    pub(crate) fn path(&self, id: &DocumentId, suffix: &str) -> String {
        format!("/{}/{}/{}", self.kind.resource(), id.segment(), suffix)
    }

    pub(crate) async fn send<T: Serialize>(
        &self,
        documents: &[T],
    ) -> Result<ApiResponse, PlugNotasError> {
        validate_batch(self.kind, documents)?;
        log::debug!(
            "[PlugNotas] sending {} {} document(s)",
            documents.len(),
            self.kind.label()
        );
        self.context
            .client
            .post(&format!("/{}", self.kind.resource()), documents)
            .await
    }

    pub(crate) async fn summary_by_integration(
        &self,
        issuer: &TaxId,
        integration_id: &IntegrationId,
    ) -> Result<ApiResponse, PlugNotasError> {
        let path = format!(
            "/{}/{}/{}/resumo",
            self.kind.resource(),
            issuer.as_str(),
            integration_id.segment()
        );
        self.context.client.get(&path, &QueryParams::new()).await
    }

    pub(crate) async fn get(
        &self,
        id: &DocumentId,
        suffix: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .get(&self.path(id, suffix), &QueryParams::new())
            .await
    }

    pub(crate) async fn xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .get(&self.path(id, "xml"), &authorization_xml_query())
            .await
    }

    pub(crate) async fn cancel(
        &self,
        id: &DocumentId,
        justification: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        let body = CancellationRequest { justification };
        self.context
            .client
            .post(&self.path(id, "cancelamento"), &body)
            .await
    }
}
