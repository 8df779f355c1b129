//! PlugNotas HTTP Client module
//!
//! This module contains the PlugNotasClient dispatcher and the PlugNotas facade.

mod plugnotas_client;
pub use plugnotas_client::{PlugNotasClient, PlugNotasClientBuilder};

mod plugnotas;
pub use plugnotas::PlugNotas;

mod builder;
pub use builder::PlugNotasBuilder;
