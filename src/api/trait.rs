//! PlugNotas API trait and context
//!
//! Provides the base trait and context for all PlugNotas API implementations.

use std::sync::Arc;

use crate::client::PlugNotasClient;

/// Context holding shared resources for PlugNotas API implementations.
#[derive(Clone)]
pub struct PlugNotasContext {
    /// The PlugNotas HTTP client for making API requests
    pub(crate) client: Arc<PlugNotasClient>,
}

impl std::fmt::Debug for PlugNotasContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlugNotasContext")
            .field("client", &"PlugNotasClient { .. }")
            .finish()
    }
}

impl PlugNotasContext {
    /// Create a new PlugNotasContext
    pub fn new(client: Arc<PlugNotasClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the PlugNotas HTTP client.
    pub fn client(&self) -> &PlugNotasClient {
        &self.client
    }
}

/// Trait for PlugNotas API implementations.
///
/// All API modules implement this trait to provide access to the shared
/// context.
pub trait PlugNotasApi: Send + Sync {
    /// Get a reference to the PlugNotas context
    fn context(&self) -> &PlugNotasContext;

    /// Get the name of this API for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
