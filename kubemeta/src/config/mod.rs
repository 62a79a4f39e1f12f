//! Connection configuration handed to every client a cache builds.
//!
//! # Usage
//! The [`Config`] has several constructors plus logic to infer environment.
//!
//! Unless you have issues, prefer using [`Config::infer`], and pass it to a
//! [`ResourceMetadataCache`][crate::ResourceMetadataCache].
mod incluster_config;

use crate::error::ConfigError;
use http::{HeaderName, HeaderValue};
use secrecy::SecretString;
use std::{fmt, time::Duration};

/// Environment variable consulted by [`Config::infer`] outside a cluster
pub const CLUSTER_URL_ENV: &str = "KUBEMETA_CLUSTER_URL";
/// Environment variable overriding the default namespace outside a cluster
pub const NAMESPACE_ENV: &str = "KUBEMETA_NAMESPACE";

/// Default timeout for calls to the Kubernetes API
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(295);

/// Configuration object detailing things like cluster URL, default namespace, credentials, and timeouts.
///
/// Construct a [`Config`] instance by using one of the constructors.
/// It exists to be consumed by a [`TransportFactory`][crate::TransportFactory].
#[derive(Clone)]
pub struct Config {
    /// The configured cluster url
    pub cluster_url: http::Uri,
    /// The configured default namespace
    pub default_namespace: String,
    /// Timeout for calls to the Kubernetes API.
    ///
    /// A value of `None` means no timeout
    pub timeout: Option<Duration>,
    /// Whether to accept invalid certificates
    pub accept_invalid_certs: bool,
    /// Bearer token sent with every request
    pub auth_token: Option<SecretString>,
    /// Extra headers sent with every request
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl Config {
    /// Construct a new config where only the `cluster_url` is set by the user.
    /// and everything else receives a default value.
    ///
    /// Most likely you want to use [`Config::infer`] to infer the config from
    /// the environment.
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            default_namespace: String::from("default"),
            timeout: Some(DEFAULT_TIMEOUT),
            accept_invalid_certs: false,
            auth_token: None,
            headers: Vec::new(),
        }
    }

    /// Infer the configuration from the environment
    ///
    /// Done by attempting to load in-cluster environment variables first, and
    /// then if that fails, trying [`CLUSTER_URL_ENV`].
    ///
    /// Fails if inference from both sources fails
    pub fn infer() -> Result<Self, ConfigError> {
        match Self::from_cluster_env() {
            Err(cluster_env_err) => {
                tracing::trace!("No in-cluster config found: {}", cluster_env_err);
                tracing::trace!("Falling back to {}", CLUSTER_URL_ENV);
                Self::from_env_url().map_err(|env_url_err| ConfigError::ConfigInferenceExhausted {
                    cluster_env: Box::new(cluster_env_err),
                    env_url: Box::new(env_url_err),
                })
            }
            success => success,
        }
    }

    /// Create configuration from the cluster's environment variables
    ///
    /// This follows the standard [API Access from a Pod](https://kubernetes.io/docs/tasks/access-application-cluster/access-cluster/#accessing-the-api-from-a-pod)
    /// and relies on you having the service account's token mounted.
    pub fn from_cluster_env() -> Result<Self, ConfigError> {
        let cluster_url = incluster_config::kube_server()
            .ok_or(ConfigError::MissingInClusterVariables {
                hostenv: incluster_config::SERVICE_HOSTENV,
                portenv: incluster_config::SERVICE_PORTENV,
            })?
            .parse::<http::Uri>()
            .map_err(ConfigError::InvalidUri)?;

        let default_namespace = incluster_config::load_default_ns(incluster_config::SERVICE_DEFAULT_NS)
            .map_err(ConfigError::InvalidInClusterNamespace)?;

        let token = incluster_config::load_token(incluster_config::SERVICE_TOKENFILE)
            .map_err(ConfigError::InvalidInClusterToken)?;

        Ok(Self {
            default_namespace,
            auth_token: Some(SecretString::from(token)),
            ..Self::new(cluster_url)
        })
    }

    /// Create configuration from [`CLUSTER_URL_ENV`] and optionally [`NAMESPACE_ENV`]
    pub fn from_env_url() -> Result<Self, ConfigError> {
        let cluster_url = std::env::var(CLUSTER_URL_ENV)
            .map_err(|_| ConfigError::MissingClusterUrl(CLUSTER_URL_ENV))?
            .parse::<http::Uri>()
            .map_err(ConfigError::InvalidUri)?;
        let mut config = Self::new(cluster_url);
        if let Ok(ns) = std::env::var(NAMESPACE_ENV) {
            config.default_namespace = ns;
        }
        Ok(config)
    }

    /// Set the bearer token sent with every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(SecretString::from(token.into()));
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cluster_url", &self.cluster_url)
            .field("default_namespace", &self.default_namespace)
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("headers", &self.headers)
            .finish()
    }
}
