//! Digital certificate API
//!
//! Uploads the A1 certificate (PFX) used to sign documents, and lists or
//! removes the certificates stored for the account.
//!
//! ## Example
//!
//! ```ignore
//! use plugnotas_sdk::api::certificate::{CertificateApi, CertificateUpload};
//!
//! let certificate = CertificateUpload::from_path("empresa.pfx", "senha-do-certificado").await?;
//! let response = CertificateApi::new(context).upload(certificate).await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};

use super::{PlugNotasApi, PlugNotasContext};
use crate::error::PlugNotasError;
use crate::types::{ApiResponse, CertificateId, QueryParams};

const CERTIFICATE_MIME: &str = "application/octet-stream";

/// Certificate file and password sent to `POST /certificado`
#[derive(Clone)]
pub struct CertificateUpload {
    file_name: String,
    data: Vec<u8>,
    password: String,
}

impl std::fmt::Debug for CertificateUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateUpload")
            .field("file_name", &self.file_name)
            .field("size", &self.data.len())
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CertificateUpload {
    pub fn new(
        file_name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            password: password.into(),
        }
    }

    /// Reads the certificate from disk; the file name is taken from `path`.
    pub async fn from_path(
        path: impl AsRef<Path>,
        password: impl Into<String>,
    ) -> Result<Self, PlugNotasError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PlugNotasError::Validation(format!(
                    "certificate path has no file name: {}",
                    path.display()
                ))
            })?;
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, data, password))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Multipart form with `arquivo` (the file) and `senha` (the password)
    pub(crate) fn into_form(self) -> Result<Form, PlugNotasError> {
        let part = Part::bytes(self.data)
            .file_name(self.file_name)
            .mime_str(CERTIFICATE_MIME)?;
        Ok(Form::new().part("arquivo", part).text("senha", self.password))
    }
}

pub struct CertificateApi {
    context: Arc<PlugNotasContext>,
}

impl CertificateApi {
    pub fn new(context: Arc<PlugNotasContext>) -> Self {
        Self { context }
    }

    /// Upload a certificate
    ///
    /// POST /certificado (multipart/form-data)
    ///
    /// # Errors
    /// `PlugNotasError::Validation` when the certificate file is empty.
    pub async fn upload(
        &self,
        certificate: CertificateUpload,
    ) -> Result<ApiResponse, PlugNotasError> {
        if certificate.is_empty() {
            return Err(PlugNotasError::Validation(format!(
                "certificate file {} is empty",
                certificate.file_name()
            )));
        }
        let form = certificate.into_form()?;
        self.context.client.upload("/certificado", form).await
    }

    /// GET /certificado
    pub async fn list(&self) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .get("/certificado", &QueryParams::new())
            .await
    }

    /// GET /certificado/{id}
    pub async fn get(&self, id: &CertificateId) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .get(&format!("/certificado/{}", id.segment()), &QueryParams::new())
            .await
    }

    /// DELETE /certificado/{id}
    pub async fn remove(&self, id: &CertificateId) -> Result<ApiResponse, PlugNotasError> {
        self.context
            .client
            .delete(&format!("/certificado/{}", id.segment()), &QueryParams::new())
            .await
    }
}

impl PlugNotasApi for CertificateApi {
    fn context(&self) -> &PlugNotasContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "certificate"
    }
}
