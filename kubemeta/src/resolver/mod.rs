//! Deriving kinds for objects and REST mappings for kinds.
use crate::error::{MappingError, TypeResolutionError};
use kubemeta_core::{
    discovery::{RestMapping, StaticScope},
    gvk::{GroupKind, GroupVersionKind},
    object::Object,
};
use std::sync::Arc;

mod mapper;
mod scheme;
pub use mapper::RestMapper;
pub use scheme::Scheme;
pub(crate) use scheme::declared_kind;

/// Derives kinds for objects and REST mappings for kinds
///
/// Implementations may consult remote discovery and are free to block.
pub trait TypeResolver: Send + Sync {
    /// The kind of an object
    fn object_kind(&self, obj: &dyn Object) -> Result<GroupVersionKind, TypeResolutionError>;

    /// Where a kind at a particular version is served
    fn rest_mapping(&self, gk: &GroupKind, version: &str) -> Result<RestMapping, MappingError>;
}

impl<T: TypeResolver + ?Sized> TypeResolver for Arc<T> {
    fn object_kind(&self, obj: &dyn Object) -> Result<GroupVersionKind, TypeResolutionError> {
        (**self).object_kind(obj)
    }

    fn rest_mapping(&self, gk: &GroupKind, version: &str) -> Result<RestMapping, MappingError> {
        (**self).rest_mapping(gk, version)
    }
}

/// A [`TypeResolver`] backed by an in-memory [`Scheme`] and [`RestMapper`]
#[derive(Debug, Clone, Default)]
pub struct SchemeResolver {
    /// Kinds of the statically known types
    pub scheme: Scheme,
    /// REST mappings of the known kinds
    pub mapper: RestMapper,
}

impl SchemeResolver {
    /// Combine a scheme and a mapper
    pub fn new(scheme: Scheme, mapper: RestMapper) -> Self {
        Self { scheme, mapper }
    }

    /// Register a `k8s-openapi` type with both the scheme and the mapper
    pub fn register<K>(&mut self) -> &mut Self
    where
        K: k8s_openapi::Resource + Object,
        K::Scope: StaticScope,
    {
        self.scheme.register::<K>();
        self.mapper.register::<K>();
        self
    }
}

impl TypeResolver for SchemeResolver {
    fn object_kind(&self, obj: &dyn Object) -> Result<GroupVersionKind, TypeResolutionError> {
        self.scheme.object_kind(obj)
    }

    fn rest_mapping(&self, gk: &GroupKind, version: &str) -> Result<RestMapping, MappingError> {
        self.mapper.rest_mapping(gk, version)
    }
}
