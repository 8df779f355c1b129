use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::api::PlugNotasContext;
use crate::error::PlugNotasError;
use crate::types::{ApiKey, Environment};

use super::plugnotas_client::{MiddlewareExecutor, PlugNotasClient};
use super::PlugNotas;

pub(crate) const API_KEY_ENV: &str = "PLUGNOTAS_API_KEY";
pub(crate) const SANDBOX_ENV: &str = "PLUGNOTAS_SANDBOX";

#[must_use]
#[derive(Default)]
pub struct PlugNotasBuilder<M = ()> {
    api_key: Option<ApiKey>,
    environment: Environment,
    production_url: Option<String>,
    sandbox_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for PlugNotasBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlugNotasBuilder")
            .field("api_key", &self.api_key)
            .field("environment", &self.environment)
            .field("production_url", &self.production_url)
            .field("sandbox_url", &self.sandbox_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl<M> PlugNotasBuilder<M> {
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn production(self, production: bool) -> Self {
        self.environment(Environment::from_production_flag(production))
    }

    pub fn production_url(mut self, url: impl Into<String>) -> Self {
        self.production_url = Some(url.into());
        self
    }

    pub fn sandbox_url(mut self, url: impl Into<String>) -> Self {
        self.sandbox_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Reads `PLUGNOTAS_API_KEY` and `PLUGNOTAS_SANDBOX` from the process
    /// environment. Values already set on the builder are overwritten.
    pub fn load_env(self) -> Result<Self, PlugNotasError> {
        self.load_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn load_lookup<F>(self, lookup: F) -> Result<Self, PlugNotasError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(API_KEY_ENV)
            .ok_or_else(|| PlugNotasError::Config(format!("{} is not set", API_KEY_ENV)))?;
        let api_key = ApiKey::new(key).map_err(PlugNotasError::Config)?;

        let sandbox = lookup(SANDBOX_ENV)
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(self.api_key(api_key).production(!sandbox))
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> PlugNotasBuilder<M2>
    where
        M2: Layer<PlugNotasClient> + Clone + Send + Sync + 'static,
    {
        PlugNotasBuilder {
            api_key: self.api_key,
            environment: self.environment,
            production_url: self.production_url,
            sandbox_url: self.sandbox_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<PlugNotas, PlugNotasError>
    where
        M: Layer<PlugNotasClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let api_key = self
            .api_key
            .ok_or_else(|| PlugNotasError::Config("api_key is required".to_string()))?;

        let mut builder = PlugNotasClient::builder()
            .api_key(api_key)
            .environment(self.environment);
        if let Some(url) = self.production_url {
            builder = builder.production_url(url);
        }
        if let Some(url) = self.sandbox_url {
            builder = builder.sandbox_url(url);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let mut client = builder.build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let context = Arc::new(PlugNotasContext::new(Arc::new(client)));

        Ok(PlugNotas::from(context))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
