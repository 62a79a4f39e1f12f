//! Building protocol clients for a kind.
use crate::{config::Config, error::TransportError};
use http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    HeaderMap, HeaderValue,
};
use kubemeta_core::gvk::{GroupVersion, GroupVersionKind};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::{sync::Arc, time::Duration};

const JSON_MIME: &str = "application/json";
const DEFAULT_USER_AGENT: &str = concat!("kubemeta/", env!("CARGO_PKG_VERSION"));

/// Builds the client handle stored with each resolved kind
///
/// Construction may be expensive, so the cache calls it once per kind.
pub trait TransportFactory: Send + Sync {
    /// The client handle produced
    type Client: Send + Sync + 'static;

    /// A client for a statically typed kind
    fn build_typed(&self, gvk: &GroupVersionKind, config: &Config) -> Result<Self::Client, TransportError>;

    /// A client for schema-less objects of a kind
    fn build_schemaless(&self, gvk: &GroupVersionKind, config: &Config)
        -> Result<Self::Client, TransportError>;
}

impl<T: TransportFactory + ?Sized> TransportFactory for Arc<T> {
    type Client = T::Client;

    fn build_typed(&self, gvk: &GroupVersionKind, config: &Config) -> Result<Self::Client, TransportError> {
        (**self).build_typed(gvk, config)
    }

    fn build_schemaless(
        &self,
        gvk: &GroupVersionKind,
        config: &Config,
    ) -> Result<Self::Client, TransportError> {
        (**self).build_schemaless(gvk, config)
    }
}

/// How a [`RestClient`] treats bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Bodies come from typed objects; missing type fields are filled in from the kind
    Typed,
    /// Bodies are schema-less and must carry their own type fields
    Schemaless,
}

/// A client bound to one group version of the API
///
/// It turns path-only requests built by [`Request`](kubemeta_core::Request) into
/// absolute requests carrying the configured credentials and headers.
/// Sending them is left to whichever HTTP stack the caller runs.
#[derive(Debug, Clone)]
pub struct RestClient {
    scheme: String,
    authority: String,
    base_path: String,
    gvk: GroupVersionKind,
    codec: Codec,
    headers: HeaderMap,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl RestClient {
    /// The group version this client talks to
    pub fn group_version(&self) -> GroupVersion {
        self.gvk.group_version()
    }

    /// The root path of the group version, e.g. `/apis/apps/v1`
    pub fn api_path(&self) -> String {
        self.group_version().api_path()
    }

    /// How bodies are encoded
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Headers attached to every prepared request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Timeout requests should be sent with
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the connection should skip server certificate verification
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Make a path-only request absolute and attach default headers
    ///
    /// Headers already present on the request are kept.
    pub fn prepare(&self, req: http::Request<Vec<u8>>) -> Result<http::Request<Vec<u8>>, TransportError> {
        let (mut parts, body) = req.into_parts();
        let pq = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        parts.uri = http::Uri::builder()
            .scheme(self.scheme.as_str())
            .authority(self.authority.as_str())
            .path_and_query(format!("{}{}", self.base_path, pq))
            .build()
            .map_err(TransportError::InvalidUri)?;
        for (name, value) in &self.headers {
            if !parts.headers.contains_key(name) {
                parts.headers.insert(name.clone(), value.clone());
            }
        }
        Ok(http::Request::from_parts(parts, body))
    }

    /// Serialize an object into a request body
    pub fn encode<T: Serialize>(&self, obj: &T) -> Result<Vec<u8>, TransportError> {
        let mut value = serde_json::to_value(obj).map_err(TransportError::SerializeBody)?;
        let map = value.as_object_mut().ok_or(TransportError::NotAnObject)?;
        match self.codec {
            Codec::Typed => {
                map.entry("apiVersion")
                    .or_insert_with(|| self.gvk.api_version().into());
                map.entry("kind").or_insert_with(|| self.gvk.kind.clone().into());
            }
            Codec::Schemaless => {
                let declares = |key: &str| {
                    map.get(key)
                        .and_then(serde_json::Value::as_str)
                        .is_some_and(|s| !s.is_empty())
                };
                if !declares("apiVersion") || !declares("kind") {
                    return Err(TransportError::MissingTypeMeta);
                }
            }
        }
        serde_json::to_vec(&value).map_err(TransportError::SerializeBody)
    }
}

/// The default [`TransportFactory`], producing [`RestClient`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct RestClientFactory;

impl RestClientFactory {
    fn build(&self, gvk: &GroupVersionKind, config: &Config, codec: Codec) -> Result<RestClient, TransportError> {
        let url = &config.cluster_url;
        let (Some(scheme), Some(authority)) = (url.scheme_str(), url.authority()) else {
            return Err(TransportError::InvalidClusterUrl(url.to_string()));
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::try_from(format!("Bearer {}", token.expose_secret()))
                .map_err(TransportError::InvalidHeader)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &config.headers {
            headers.insert(name.clone(), value.clone());
        }

        tracing::debug!(%gvk, ?codec, cluster_url = %url, "building rest client");
        Ok(RestClient {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            base_path: url.path().trim_end_matches('/').to_string(),
            gvk: gvk.clone(),
            codec,
            headers,
            timeout: config.timeout,
            accept_invalid_certs: config.accept_invalid_certs,
        })
    }
}

impl TransportFactory for RestClientFactory {
    type Client = RestClient;

    fn build_typed(&self, gvk: &GroupVersionKind, config: &Config) -> Result<RestClient, TransportError> {
        self.build(gvk, config, Codec::Typed)
    }

    fn build_schemaless(&self, gvk: &GroupVersionKind, config: &Config) -> Result<RestClient, TransportError> {
        self.build(gvk, config, Codec::Schemaless)
    }
}
