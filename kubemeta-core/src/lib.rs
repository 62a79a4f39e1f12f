//! Types and traits for describing Kubernetes objects and where they are served
//!
//! This crate is client-less: it knows how objects identify their kind, how kinds map to
//! REST resources, and how to build requests against a resource path.
//! The same information is re-exported from `kubemeta` under `kubemeta::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod discovery;
pub use discovery::{RestMapping, Scope, StaticScope};

pub mod dynamic;
pub use dynamic::DynamicObject;

pub mod gvk;
pub use gvk::{GroupKind, GroupVersion, GroupVersionKind, GroupVersionResource};

pub mod metadata;
pub use metadata::TypeMeta;

pub mod object;
pub use object::{Object, ObjectList, Representation, TypeKey};

pub mod params;

pub mod request;
pub use request::Request;
