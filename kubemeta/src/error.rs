//! Error handling in [`kubemeta`][crate]
use thiserror::Error;

pub use kubemeta_core::gvk::ParseGroupVersionError;

/// Possible errors when resolving metadata for an object
///
/// None of these are retried or remembered by the cache;
/// the next resolution of the same key starts from scratch.
#[derive(Error, Debug)]
pub enum Error {
    /// The kind of the object could not be determined
    #[error("failed to determine kind: {0}")]
    TypeResolution(#[from] TypeResolutionError),

    /// The kind has no REST mapping
    #[error("failed to map kind to a resource: {0}")]
    Mapping(#[from] MappingError),

    /// A client for the kind could not be built
    #[error("failed to build client: {0}")]
    Transport(#[from] TransportError),

    /// The object does not expose instance metadata
    #[error("failed to access object metadata: {0}")]
    Accessor(#[from] AccessorError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when deriving the kind of an object
pub enum TypeResolutionError {
    #[error("no kind is registered for type {type_name}")]
    Unregistered { type_name: &'static str },

    #[error("schema-less object does not declare apiVersion and kind")]
    MissingTypeMeta,

    #[error("invalid apiVersion: {0}")]
    InvalidGroupVersion(#[source] ParseGroupVersionError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when mapping a kind to a resource
pub enum MappingError {
    #[error("no matches for kind {kind:?} in version \"{group}/{version}\"")]
    NoKindMatch {
        group: String,
        kind: String,
        version: String,
    },

    #[error("invalid group version in discovery document: {0}")]
    InvalidGroupVersion(#[source] ParseGroupVersionError),
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when building a client for a kind
pub enum TransportError {
    #[error("cluster url {0:?} needs a scheme and an authority")]
    InvalidClusterUrl(String),

    #[error("failed to build uri: {0}")]
    InvalidUri(#[source] http::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[source] http::header::InvalidHeaderValue),

    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),

    #[error("body must be a json object")]
    NotAnObject,

    #[error("schema-less body does not declare apiVersion and kind")]
    MissingTypeMeta,
}

/// The object has no instance metadata to access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("object of type {type_name} does not expose object metadata")]
pub struct AccessorError {
    /// Name of the offending Rust type
    pub type_name: &'static str,
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when loading config
pub enum ConfigError {
    #[error("Failed to infer config.. cluster env: ({cluster_env}), env url: ({env_url})")]
    ConfigInferenceExhausted {
        cluster_env: Box<ConfigError>,
        #[source]
        env_url: Box<ConfigError>,
    },

    #[error("Unable to load in cluster config, {hostenv} and {portenv} must be defined")]
    /// One or more required in-cluster config options are missing
    MissingInClusterVariables {
        hostenv: &'static str,
        portenv: &'static str,
    },

    #[error("Unable to load cluster url, {0} must be defined")]
    MissingClusterUrl(&'static str),

    #[error("Invalid cluster url: {0}")]
    InvalidUri(#[source] http::uri::InvalidUri),

    #[error("Unable to load incluster default namespace: {0}")]
    InvalidInClusterNamespace(#[source] std::io::Error),

    #[error("Unable to load in cluster token: {0}")]
    InvalidInClusterToken(#[source] std::io::Error),
}
