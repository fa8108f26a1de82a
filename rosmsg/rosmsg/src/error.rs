//! Error types for the dependency loader.

use rosmsg_core::ParseError;

/// Errors produced by [`bundle_definitions`](crate::bundle_definitions).
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The root text or a loaded dependency failed to parse.
    #[error("failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// The provider has no definition for a referenced type.
    #[error("failed to load definition for type {type_name}")]
    NotFound { type_name: String },

    /// An error returned by the [`DefinitionProvider`](crate::DefinitionProvider).
    #[error(transparent)]
    Provider(Box<dyn std::error::Error + Send + Sync>),
}
