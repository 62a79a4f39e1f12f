//! Cached resolution of kinds, REST mappings and clients for Kubernetes objects
//!
//! Before a request for an object can be sent, the caller needs to know the object's
//! group, version and kind, where that kind is served, and a client set up to talk to it.
//! Working that out means consulting a [`TypeResolver`] and building a client through a
//! [`TransportFactory`], neither of which should happen per request.
//! The [`ResourceMetadataCache`] does that work once per kind and hands out the shared
//! [`ResourceMeta`] afterwards.
//!
//! # Example
//!
//! ```rust
//! use k8s_openapi::api::core::v1::Pod;
//! use kubemeta::{Config, ResourceMetadataCache, RestMapper, Scheme};
//!
//! # fn doc() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scheme = Scheme::new();
//! scheme.register::<Pod>();
//! let mut mapper = RestMapper::new();
//! mapper.register::<Pod>();
//!
//! let config = Config::new("https://kubernetes.default.svc".parse()?);
//! let cache = ResourceMetadataCache::from_scheme(config, scheme, mapper);
//!
//! let mut pod = Pod::default();
//! pod.metadata.name = Some("blog".into());
//! pod.metadata.namespace = Some("prod".into());
//!
//! let meta = cache.resolve_object_meta(&pod)?;
//! assert_eq!(meta.resource_name(), "pods");
//! let req = meta.client().prepare(meta.request().get("blog")?)?;
//! assert_eq!(req.uri().path(), "/api/v1/namespaces/prod/pods/blog");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub use cache::ResourceMetadataCache;

pub mod config;
pub use config::Config;

pub mod error;
pub use error::Error;

pub mod meta;
pub use meta::{ObjectMeta, ResourceMeta};

pub mod resolver;
pub use resolver::{RestMapper, Scheme, SchemeResolver, TypeResolver};

pub mod transport;
pub use transport::{Codec, RestClient, RestClientFactory, TransportFactory};

/// Re-exports from [`kubemeta_core`]
pub use kubemeta_core as core;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
