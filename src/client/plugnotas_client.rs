//! PlugNotas HTTP Client
//!
//! Request dispatcher shared by every endpoint: resolves the base URL from the
//! environment flag, attaches `x-api-key`, serializes the payload, sends the
//! request through the optional middleware stack and normalizes the response
//! into an [`ApiResponse`].

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method};
use log::{debug, warn};
use reqwest::multipart::Form;
use reqwest::Client;
use serde::Serialize;
use tower::Service;

use crate::error::PlugNotasError;
use crate::types::{
    ApiKey, ApiResponse, Environment, QueryParams, ResponseBody, ResponseInfo,
    PRODUCTION_BASE_URL, SANDBOX_BASE_URL,
};

pub(crate) const API_KEY_HEADER: &str = "x-api-key";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Request payload of a single call
pub(crate) enum Payload {
    None,
    Json(Vec<u8>),
    Multipart(Form),
}

impl Payload {
    pub(crate) fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, PlugNotasError> {
        Ok(Payload::Json(serde_json::to_vec(body)?))
    }
}

/// PlugNotas API Client
///
/// Reusable HTTP client for calling the PlugNotas API.
/// Clones share the underlying connection pool and the environment flag.
#[derive(Clone)]
pub struct PlugNotasClient {
    http: Client,
    api_key: ApiKey,
    production: Arc<AtomicBool>,
    production_url: String,
    sandbox_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for PlugNotasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlugNotasClient")
            .field("environment", &self.environment())
            .field("production_url", &self.production_url)
            .field("sandbox_url", &self.sandbox_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl PlugNotasClient {
    /// Create a new client builder
    pub fn builder() -> PlugNotasClientBuilder {
        PlugNotasClientBuilder::default()
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    /// Current target environment
    pub fn environment(&self) -> Environment {
        Environment::from_production_flag(self.production.load(Ordering::SeqCst))
    }

    pub fn is_production(&self) -> bool {
        self.environment().is_production()
    }

    /// Switch between production and sandbox.
    ///
    /// Applies to every clone of this client.
    pub fn set_production(&self, production: bool) {
        self.production.store(production, Ordering::SeqCst);
    }

    pub fn set_environment(&self, environment: Environment) {
        self.set_production(environment.is_production());
    }

    /// Base URL selected by the environment flag
    pub fn base_url(&self) -> &str {
        match self.environment() {
            Environment::Production => &self.production_url,
            Environment::Sandbox => &self.sandbox_url,
        }
    }

    /// Returns the underlying [`reqwest::Client`] for raw HTTP requests.
    ///
    /// Requests made through this client bypass the middleware pipeline and
    /// carry no `x-api-key` header.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        }
    }

    pub(crate) async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        payload: Payload,
    ) -> Result<ApiResponse, PlugNotasError> {
        let url = self.url_for(path);
        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(API_KEY_HEADER, self.api_key());

        let pairs = query.pairs();
        if !pairs.is_empty() {
            builder = builder.query(&pairs);
        }

        builder = match payload {
            Payload::None => builder.header(CONTENT_TYPE, "application/json"),
            Payload::Json(bytes) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let request = builder.build()?;
        let mut info = ResponseInfo {
            method,
            url: request.url().to_string(),
            content_type: None,
            headers: HeaderMap::new(),
            elapsed: Duration::ZERO,
        };

        debug!(
            "[PlugNotas] {} {} ({})",
            info.method,
            request.url().path(),
            self.environment()
        );

        let start = Instant::now();
        let response = match self.send_request(request).await {
            Ok(response) => response,
            Err(e) => {
                info.elapsed = start.elapsed();
                warn!("[PlugNotas] {} {} failed: {}", info.method, info.url, e);
                return Ok(ApiResponse::transport_failure(info, e.to_string()));
            }
        };

        let http_code = response.status().as_u16();
        info.url = response.url().to_string();
        info.headers = response.headers().clone();
        info.content_type = info
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await;
        info.elapsed = start.elapsed();

        match bytes {
            Ok(bytes) => {
                debug!("[PlugNotas] {} ({:?})", http_code, info.elapsed);
                let body =
                    ResponseBody::from_content_type(info.content_type.as_deref(), bytes.to_vec());
                Ok(ApiResponse {
                    body,
                    http_code,
                    info,
                    error: None,
                })
            }
            Err(e) => {
                warn!("[PlugNotas] reading body of {} failed: {}", info.url, e);
                let mut failed = ApiResponse::transport_failure(info, e.to_string());
                failed.http_code = http_code;
                Ok(failed)
            }
        }
    }

    /// Make a GET request to the PlugNotas API
    ///
    /// # Arguments
    /// * `path` - API endpoint path (e.g., "/nfe/{id}/pdf"), a missing leading `/` is added
    /// * `query` - Query parameters, empty names or values are skipped
    pub async fn get(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::GET, path, query, Payload::None).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::POST, path, &QueryParams::new(), Payload::json(body)?).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::PUT, path, &QueryParams::new(), Payload::json(body)?).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::PATCH, path, &QueryParams::new(), Payload::json(body)?).await
    }

    pub async fn delete(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::DELETE, path, query, Payload::None).await
    }

    pub async fn options(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::OPTIONS, path, query, Payload::None).await
    }

    /// Make a `multipart/form-data` POST request
    pub async fn upload(&self, path: &str, form: Form) -> Result<ApiResponse, PlugNotasError> {
        self.dispatch(Method::POST, path, &QueryParams::new(), Payload::Multipart(form)).await
    }
}

impl Service<reqwest::Request> for PlugNotasClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

pub(crate) fn normalize_base_url(url: String) -> Result<String, PlugNotasError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(PlugNotasError::Config(format!(
            "base url must start with http:// or https://, got: {}",
            url
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Builder for PlugNotasClient
///
/// # Example
///
/// ```rust
/// use plugnotas_sdk::client::PlugNotasClient;
/// use plugnotas_sdk::types::ApiKey;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PlugNotasClient::builder()
///         .api_key(ApiKey::new("2da392a6-79d2-4304-a8b7-959572c7e44d")?)
///         .production(false)
///         .build()?;
///
///     assert_eq!(client.base_url(), "https://api.sandbox.plugnotas.com.br");
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct PlugNotasClientBuilder {
    api_key: Option<ApiKey>,
    environment: Environment,
    production_url: Option<String>,
    sandbox_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl PlugNotasClientBuilder {
    /// Set the API key sent as `x-api-key`
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the target environment
    ///
    /// Default: production
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn production(self, production: bool) -> Self {
        self.environment(Environment::from_production_flag(production))
    }

    /// Override the production base URL
    ///
    /// Default: `<https://api.plugnotas.com.br>`
    pub fn production_url(mut self, url: impl Into<String>) -> Self {
        self.production_url = Some(url.into());
        self
    }

    /// Override the sandbox base URL
    ///
    /// Default: `<https://api.sandbox.plugnotas.com.br>`
    pub fn sandbox_url(mut self, url: impl Into<String>) -> Self {
        self.sandbox_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the PlugNotasClient
    ///
    /// # Errors
    /// Returns an error if the API key is not set or a base URL is not http(s)
    pub fn build(self) -> Result<PlugNotasClient, PlugNotasError> {
        let api_key = self
            .api_key
            .ok_or_else(|| PlugNotasError::Config("api_key is required".to_string()))?;

        let production_url = normalize_base_url(
            self.production_url
                .unwrap_or_else(|| PRODUCTION_BASE_URL.to_string()),
        )?;
        let sandbox_url = normalize_base_url(
            self.sandbox_url
                .unwrap_or_else(|| SANDBOX_BASE_URL.to_string()),
        )?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(PlugNotasClient {
            http: client,
            api_key,
            production: Arc::new(AtomicBool::new(self.environment.is_production())),
            production_url,
            sandbox_url,
            middleware_executor: None,
        })
    }
}
