use std::time::Duration;

use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{HttpError, PlugNotasError};

/// Payload of a PlugNotas response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed body of an `application/json` response
    Json(Value),
    /// Body of any other content type, unchanged (XML, PDF, plain text)
    Raw(Vec<u8>),
    /// No response was received
    Empty,
}

impl ResponseBody {
    /// Selects the representation by the media type of `content_type`.
    ///
    /// Parameters after `;` are ignored. A JSON body that fails to parse is
    /// kept as raw bytes.
    pub fn from_content_type(content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let media_type = content_type
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .unwrap_or_default();

        if media_type.eq_ignore_ascii_case("application/json") {
            match serde_json::from_slice(&bytes) {
                Ok(value) => return ResponseBody::Json(value),
                Err(e) => log::warn!("[PlugNotas] malformed JSON body kept as raw: {}", e),
            }
        }

        ResponseBody::Raw(bytes)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseBody::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ResponseBody::Empty => true,
            ResponseBody::Raw(bytes) => bytes.is_empty(),
            ResponseBody::Json(_) => false,
        }
    }
}

/// Transport metadata of a call
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    pub method: Method,
    /// Final URL including the query string
    pub url: String,
    pub content_type: Option<String>,
    pub headers: HeaderMap,
    pub elapsed: Duration,
}

/// Uniform result of every PlugNotas call: `{body, http_code, info, error?}`
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub body: ResponseBody,
    /// HTTP status, `0` when the transport failed before a response arrived
    pub http_code: u16,
    pub info: ResponseInfo,
    /// Transport failure message
    pub error: Option<String>,
}

impl ApiResponse {
    pub(crate) fn transport_failure(info: ResponseInfo, error: impl Into<String>) -> Self {
        Self {
            body: ResponseBody::Empty,
            http_code: 0,
            info,
            error: Some(error.into()),
        }
    }

    /// `true` for a 2xx status without a transport error
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.http_code)
    }

    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, PlugNotasError> {
        let decoded = match &self.body {
            ResponseBody::Json(value) => T::deserialize(value),
            ResponseBody::Raw(bytes) => serde_json::from_slice(bytes),
            ResponseBody::Empty => {
                return Err(HttpError::Decode("response has no body".to_string()).into())
            }
        };
        decoded.map_err(|e| HttpError::Decode(e.to_string()).into())
    }

    /// Lossy UTF-8 view of the body, JSON bodies are re-serialized
    pub fn text(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            ResponseBody::Empty => String::new(),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.body.as_bytes()
    }

    /// Converts transport failures and non-2xx statuses into errors.
    pub fn error_for_status(mut self) -> Result<Self, PlugNotasError> {
        if let Some(error) = self.error.take() {
            return Err(PlugNotasError::Transport(error));
        }
        if !(200..300).contains(&self.http_code) {
            return Err(PlugNotasError::Api {
                status: self.http_code,
                body: self.error_message().unwrap_or_else(|| self.text()),
            });
        }
        Ok(self)
    }

    /// Message reported by PlugNotas in an `{"error": {"message": ..}}` body
    pub fn error_message(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct ErrorDetail {
            message: String,
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            error: ErrorDetail,
        }

        self.json::<ErrorBody>().ok().map(|b| b.error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info() -> ResponseInfo {
        ResponseInfo {
            method: Method::GET,
            url: "https://api.sandbox.plugnotas.com.br/nfe/1/pdf".to_string(),
            content_type: None,
            headers: HeaderMap::new(),
            elapsed: Duration::from_millis(12),
        }
    }

    fn response(body: ResponseBody, http_code: u16) -> ApiResponse {
        ApiResponse {
            body,
            http_code,
            info: info(),
            error: None,
        }
    }

    #[test]
    fn test_json_content_type_is_parsed() {
        let body = ResponseBody::from_content_type(
            Some("application/json; charset=utf-8"),
            br#"{"protocol":"123"}"#.to_vec(),
        );
        assert_eq!(body, ResponseBody::Json(json!({"protocol": "123"})));
    }

    #[test]
    fn test_other_content_type_is_raw() {
        let xml = b"<nfeProc versao=\"4.00\"></nfeProc>".to_vec();
        let body = ResponseBody::from_content_type(Some("application/xml"), xml.clone());
        assert_eq!(body, ResponseBody::Raw(xml));

        let json_looking = br#"{"a":1}"#.to_vec();
        let body = ResponseBody::from_content_type(Some("text/plain"), json_looking.clone());
        assert_eq!(body, ResponseBody::Raw(json_looking));
    }

    #[test]
    fn test_missing_content_type_is_raw() {
        let body = ResponseBody::from_content_type(None, b"%PDF-1.4".to_vec());
        assert_eq!(body, ResponseBody::Raw(b"%PDF-1.4".to_vec()));
    }

    #[test]
    fn test_malformed_json_falls_back_to_raw() {
        let body = ResponseBody::from_content_type(Some("application/json"), b"{oops".to_vec());
        assert_eq!(body, ResponseBody::Raw(b"{oops".to_vec()));
    }

    #[test]
    fn test_is_success() {
        assert!(response(ResponseBody::Empty, 200).is_success());
        assert!(!response(ResponseBody::Empty, 400).is_success());

        let failed = ApiResponse::transport_failure(info(), "connection refused");
        assert!(!failed.is_success());
        assert_eq!(failed.http_code, 0);
        assert_eq!(failed.body, ResponseBody::Empty);
    }

    #[test]
    fn test_json_decodes_typed_body() {
        #[derive(Deserialize)]
        struct Summary {
            status: String,
        }

        let resp = response(ResponseBody::Json(json!({"status": "CONCLUIDO"})), 200);
        let summary: Summary = resp.json().unwrap();
        assert_eq!(summary.status, "CONCLUIDO");

        let empty = response(ResponseBody::Empty, 200);
        assert!(empty.json::<Summary>().is_err());
    }

    #[test]
    fn test_error_for_status() {
        let ok = response(ResponseBody::Json(json!({})), 201);
        assert!(ok.error_for_status().is_ok());

        let bad = response(
            ResponseBody::Json(json!({"error": {"message": "Nota não encontrada"}})),
            404,
        );
        match bad.error_for_status() {
            Err(PlugNotasError::Api { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "Nota não encontrada");
            }
            other => panic!("expected api error, got: {:?}", other),
        }

        let failed = ApiResponse::transport_failure(info(), "timed out");
        assert!(matches!(
            failed.error_for_status(),
            Err(PlugNotasError::Transport(msg)) if msg == "timed out"
        ));
    }

    #[test]
    fn test_text_views() {
        let raw = response(ResponseBody::Raw(b"<xml/>".to_vec()), 200);
        assert_eq!(raw.text(), "<xml/>");
        assert_eq!(raw.bytes(), Some(&b"<xml/>"[..]));

        let json_body = response(ResponseBody::Json(json!({"a": 1})), 200);
        assert_eq!(json_body.text(), r#"{"a":1}"#);
        assert!(json_body.bytes().is_none());
    }
}
