//! Unified PlugNotas SDK client

use std::sync::Arc;

use serde::Serialize;

use crate::api::certificate::{CertificateApi, CertificateUpload};
use crate::api::company::CompanyApi;
use crate::api::nfce::NfceApi;
use crate::api::nfe::{ManifestOperation, NfeApi};
use crate::api::PlugNotasContext;
use crate::error::PlugNotasError;
use crate::types::{ApiResponse, CertificateId, DocumentId, Environment, IntegrationId, TaxId};

use super::PlugNotasClient;

/// Unified PlugNotas client
///
/// This is the main entry point for the SDK. Every PlugNotas operation is
/// available as a method returning the normalized [`ApiResponse`].
///
/// # Example
///
/// ```rust,ignore
/// use plugnotas_sdk::PlugNotas;
/// use plugnotas_sdk::types::{ApiKey, DocumentId};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let plugnotas = PlugNotas::builder()
///         .api_key(ApiKey::new("2da392a6-79d2-4304-a8b7-959572c7e44d")?)
///         .production(false)
///         .build()?;
///
///     let id = DocumentId::new("5f7b8d8c0f9b4a0012345678")?;
///     let pdf = plugnotas.nfe_pdf(&id).await?;
///     println!("status {}", pdf.http_code);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PlugNotas {
    context: Arc<PlugNotasContext>,
}

impl std::fmt::Debug for PlugNotas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlugNotas")
            .field("environment", &self.environment())
            .finish_non_exhaustive()
    }
}

impl From<Arc<PlugNotasContext>> for PlugNotas {
    fn from(context: Arc<PlugNotasContext>) -> Self {
        Self { context }
    }
}

impl PlugNotas {
    pub fn builder() -> super::builder::PlugNotasBuilder {
        super::builder::PlugNotasBuilder::default()
    }

    /// Build a client from `PLUGNOTAS_API_KEY` / `PLUGNOTAS_SANDBOX`
    pub fn from_env() -> Result<Self, PlugNotasError> {
        Self::builder().load_env()?.build()
    }

    pub fn client(&self) -> &PlugNotasClient {
        &self.context.client
    }

    pub fn environment(&self) -> Environment {
        self.context.client.environment()
    }

    pub fn is_production(&self) -> bool {
        self.context.client.is_production()
    }

    /// Switch between production and sandbox for this client and its clones
    pub fn set_production(&self, production: bool) {
        self.context.client.set_production(production);
    }

    pub fn set_environment(&self, environment: Environment) {
        self.context.client.set_environment(environment);
    }

    pub fn base_url(&self) -> &str {
        self.context.client.base_url()
    }

    pub fn nfe(&self) -> NfeApi {
        NfeApi::new(self.context.clone())
    }

    pub fn nfce(&self) -> NfceApi {
        NfceApi::new(self.context.clone())
    }

    pub fn company(&self) -> CompanyApi {
        CompanyApi::new(self.context.clone())
    }

    pub fn certificate(&self) -> CertificateApi {
        CertificateApi::new(self.context.clone())
    }

    // NF-e API

    pub async fn send_nfe<T: Serialize>(
        &self,
        documents: &[T],
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().send(documents).await
    }

    pub async fn nfe_summary_by_integration(
        &self,
        issuer: &TaxId,
        integration_id: &IntegrationId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().summary_by_integration(issuer, integration_id).await
    }

    pub async fn nfe_summary(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().summary(id).await
    }

    pub async fn nfe_xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().xml(id).await
    }

    pub async fn nfe_pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().pdf(id).await
    }

    pub async fn nfe_correction(
        &self,
        id: &DocumentId,
        correction: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().correction(id, correction).await
    }

    pub async fn nfe_correction_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().correction_status(id).await
    }

    pub async fn nfe_correction_xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().correction_xml(id).await
    }

    pub async fn nfe_correction_pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().correction_pdf(id).await
    }

    pub async fn cancel_nfe(
        &self,
        id: &DocumentId,
        justification: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().cancel(id, justification).await
    }

    pub async fn nfe_cancellation_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().cancellation_status(id).await
    }

    pub async fn nfe_cancellation_xml(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().cancellation_xml(id).await
    }

    pub async fn nfe_cancellation_pdf(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().cancellation_pdf(id).await
    }

    pub async fn manifest_nfe(
        &self,
        id: &DocumentId,
        operation: ManifestOperation,
        justification: Option<&str>,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().manifest(id, operation, justification).await
    }

    pub async fn nfe_manifestation_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfe().manifestation_status(id).await
    }

    // NFC-e API

    pub async fn send_nfce<T: Serialize>(
        &self,
        documents: &[T],
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().send(documents).await
    }

    pub async fn nfce_summary_by_integration(
        &self,
        issuer: &TaxId,
        integration_id: &IntegrationId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().summary_by_integration(issuer, integration_id).await
    }

    pub async fn nfce_summary(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().summary(id).await
    }

    pub async fn nfce_xml(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().xml(id).await
    }

    pub async fn nfce_pdf(&self, id: &DocumentId) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().pdf(id).await
    }

    pub async fn cancel_nfce(
        &self,
        id: &DocumentId,
        justification: &str,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().cancel(id, justification).await
    }

    pub async fn nfce_cancellation_status(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().cancellation_status(id).await
    }

    pub async fn nfce_cancellation_xml(
        &self,
        id: &DocumentId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.nfce().cancellation_xml(id).await
    }

    // Company API

    pub async fn register_company<T: Serialize + ?Sized>(
        &self,
        company: &T,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.company().register(company).await
    }

    pub async fn get_company(&self, tax_id: &TaxId) -> Result<ApiResponse, PlugNotasError> {
        self.company().get(tax_id).await
    }

    pub async fn update_company<T: Serialize + ?Sized>(
        &self,
        tax_id: &TaxId,
        company: &T,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.company().update(tax_id, company).await
    }

    pub async fn remove_company(&self, tax_id: &TaxId) -> Result<ApiResponse, PlugNotasError> {
        self.company().remove(tax_id).await
    }

    // Certificate API

    pub async fn upload_certificate(
        &self,
        certificate: CertificateUpload,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.certificate().upload(certificate).await
    }

    pub async fn list_certificates(&self) -> Result<ApiResponse, PlugNotasError> {
        self.certificate().list().await
    }

    pub async fn get_certificate(&self, id: &CertificateId) -> Result<ApiResponse, PlugNotasError> {
        self.certificate().get(id).await
    }

    pub async fn remove_certificate(
        &self,
        id: &CertificateId,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.certificate().remove(id).await
    }
}
