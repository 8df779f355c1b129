//! Middleware components for the PlugNotas SDK.
//!
//! Middleware are Tower layers wrapped around [`PlugNotasClient`](crate::client::PlugNotasClient)
//! and installed with [`PlugNotasBuilder::with_middleware`](crate::client::PlugNotasBuilder::with_middleware).
//!
//! - [`LoggingMiddleware`] - Logs request/response information with the API key redacted
//!
//! ## Usage
//!
//! ```ignore
//! use plugnotas_sdk::middleware::LoggingMiddleware;
//! use plugnotas_sdk::PlugNotas;
//!
//! let plugnotas = PlugNotas::builder()
//!     .api_key(api_key)
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
