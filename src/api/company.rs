//! Company (empresa) API
//!
//! Registers and maintains the issuing companies linked to the API key.
//! Company payloads follow the PlugNotas layout and are passed through as-is.

use std::sync::Arc;

use serde::Serialize;

use super::{PlugNotasApi, PlugNotasContext};
use crate::error::PlugNotasError;
use crate::types::{ApiResponse, QueryParams, TaxId};

pub struct CompanyApi {
    context: Arc<PlugNotasContext>,
}

impl CompanyApi {
    pub fn new(context: Arc<PlugNotasContext>) -> Self {
        Self { context }
    }

    fn path(tax_id: &TaxId) -> String {
        format!("/empresa/{}", tax_id.as_str())
    }

    /// POST /empresa
    pub async fn register<T: Serialize + ?Sized>(
        &self,
        company: &T,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.context.client.post("/empresa", company).await
    }

    /// GET /empresa/{tax_id}
    pub async fn get(&self, tax_id: &TaxId) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .get(&Self::path(tax_id), &QueryParams::new())
            .await
    }

    /// Partial update, only the given fields change
    ///
    /// PATCH /empresa/{tax_id}
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        tax_id: &TaxId,
        company: &T,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.context.client.patch(&Self::path(tax_id), company).await
    }

    /// DELETE /empresa/{tax_id}
    pub async fn remove(&self, tax_id: &TaxId) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .delete(&Self::path(tax_id), &QueryParams::new())
            .await
    }
}

impl PlugNotasApi for CompanyApi {
    fn context(&self) -> &PlugNotasContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "company"
    }
}
