use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Characters escaped when an identifier is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Rejects values that cannot stand alone as a path segment. `.` and `..`
/// are resolved as dot segments by URL parsers, even when percent-encoded.
fn check_segment(kind: &str, id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} must not be empty", kind));
    }
    if id == "." || id == ".." {
        return Err(format!("{} must not be a dot segment, got {}", kind, id));
    }
    Ok(())
}

/// PlugNotas API key, sent as the `x-api-key` header
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("ApiKey must not be empty".to_string());
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Document id assigned by PlugNotas when an NF-e / NFC-e is accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_segment("DocumentId", &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn segment(&self) -> String {
        encode_segment(&self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-chosen integration id (`idIntegracao`) attached to a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegrationId(String);

impl IntegrationId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_segment("IntegrationId", &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn segment(&self) -> String {
        encode_segment(&self.0)
    }
}

/// Id of a digital certificate stored by PlugNotas
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId(String);

impl CertificateId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_segment("CertificateId", &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn segment(&self) -> String {
        encode_segment(&self.0)
    }
}

/// Unformatted CNPJ (14 digits) or CPF (11 digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxId(String);

impl TaxId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("TaxId must contain only digits, got {}", id));
        }
        if id.len() != 11 && id.len() != 14 {
            return Err(format!("TaxId must be 11 or 14 digits, got {}", id.len()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_cnpj(&self) -> bool {
        self.0.len() == 14
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
