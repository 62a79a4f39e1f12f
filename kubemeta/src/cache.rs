//! The self-populating metadata cache.
use crate::{
    config::Config,
    error::AccessorError,
    meta::{ObjectMeta, ResourceMeta},
    resolver::{declared_kind, RestMapper, Scheme, SchemeResolver, TypeResolver},
    transport::{RestClientFactory, TransportFactory},
    Result,
};
use ahash::AHashMap;
use kubemeta_core::{
    gvk::GroupVersionKind,
    object::{Object, Representation, TypeKey},
};
use parking_lot::RwLock;
use std::{fmt::Debug, hash::Hash, sync::Arc};

type Table<K, C> = RwLock<AHashMap<K, Arc<ResourceMeta<C>>>>;

/// Resolves and remembers the [`ResourceMeta`] of every kind it is asked about
///
/// Typed objects are cached by their Rust type, schema-less objects by the kind they declare.
/// The two tables never see each other's keys.
///
/// A miss constructs the record while holding the write lock of its table,
/// so misses against one table run one at a time. The table is not checked again
/// before inserting: callers that missed together each construct a record and the last
/// insert wins. Failed constructions leave no entry behind and are attempted again in full
/// on the next call.
///
/// Entries are never evicted.
pub struct ResourceMetadataCache<R, F: TransportFactory> {
    config: Config,
    resolver: R,
    transport: F,
    by_type: Table<TypeKey, F::Client>,
    by_gvk: Table<GroupVersionKind, F::Client>,
}

impl ResourceMetadataCache<SchemeResolver, RestClientFactory> {
    /// A cache resolving through an in-memory scheme and mapper and building [`RestClient`](crate::RestClient)s
    pub fn from_scheme(config: Config, scheme: Scheme, mapper: RestMapper) -> Self {
        Self::new(config, SchemeResolver::new(scheme, mapper), RestClientFactory)
    }
}

impl<R, F> ResourceMetadataCache<R, F>
where
    R: TypeResolver,
    F: TransportFactory,
{
    /// An empty cache
    pub fn new(config: Config, resolver: R, transport: F) -> Self {
        Self {
            config,
            resolver,
            transport,
            by_type: RwLock::default(),
            by_gvk: RwLock::default(),
        }
    }

    /// The configuration clients are built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the metadata for an object's kind
    ///
    /// Schema-less objects go through [`resolve_by_gvk`](Self::resolve_by_gvk),
    /// everything else through [`resolve_by_type`](Self::resolve_by_type).
    pub fn resolve<K: Object>(&self, obj: &K) -> Result<Arc<ResourceMeta<F::Client>>> {
        match obj.representation() {
            Representation::Dynamic(_) => self.resolve_by_gvk(obj),
            Representation::Typed(_) => self.resolve_by_type(obj),
        }
    }

    /// Resolve the metadata for an object, keyed by its Rust type
    ///
    /// Schema-less objects share one Rust type whatever their kind,
    /// so they should go through [`resolve`](Self::resolve) instead.
    pub fn resolve_by_type<K: Object>(&self, obj: &K) -> Result<Arc<ResourceMeta<F::Client>>> {
        lookup(&self.by_type, TypeKey::of::<K>(), || self.new_resource(obj))
    }

    /// Resolve the metadata for an object, keyed by its kind
    ///
    /// Schema-less objects are keyed by the kind they declare and fail without
    /// touching the cache when they do not declare one.
    /// Typed objects are keyed by the kind the resolver reports for them.
    pub fn resolve_by_gvk(&self, obj: &dyn Object) -> Result<Arc<ResourceMeta<F::Client>>> {
        let key = match obj.representation() {
            Representation::Dynamic(types) => declared_kind(types)?,
            Representation::Typed(_) => self.resolver.object_kind(obj)?,
        };
        lookup(&self.by_gvk, key, || self.new_resource(obj))
    }

    /// Resolve the metadata for an object's kind together with the object's own metadata
    ///
    /// Fails with [`Error::Accessor`](crate::Error::Accessor) for objects without
    /// instance metadata, such as lists.
    pub fn resolve_object_meta<'a, K: Object>(&self, obj: &'a K) -> Result<ObjectMeta<'a, F::Client>> {
        let resource = self.resolve(obj)?;
        let meta = obj.meta().ok_or(AccessorError {
            type_name: std::any::type_name::<K>(),
        })?;
        Ok(ObjectMeta::new(resource, meta))
    }

    /// Number of Rust types resolved so far
    pub fn cached_types(&self) -> usize {
        self.by_type.read().len()
    }

    /// Number of declared kinds resolved so far
    pub fn cached_kinds(&self) -> usize {
        self.by_gvk.read().len()
    }

    /// Whether `K` has been resolved by type
    pub fn contains_type<K: Object>(&self) -> bool {
        self.by_type.read().contains_key(&TypeKey::of::<K>())
    }

    /// Whether `gvk` has been resolved by kind
    pub fn contains_kind(&self, gvk: &GroupVersionKind) -> bool {
        self.by_gvk.read().contains_key(gvk)
    }

    fn new_resource(&self, obj: &dyn Object) -> Result<ResourceMeta<F::Client>> {
        let mut gvk = self.resolver.object_kind(obj)?;
        if obj.is_list() {
            if let Some(item) = gvk.item_kind() {
                gvk = item;
            }
        }
        let client = if obj.representation().is_dynamic() {
            self.transport.build_schemaless(&gvk, &self.config)?
        } else {
            self.transport.build_typed(&gvk, &self.config)?
        };
        let mapping = self.resolver.rest_mapping(&gvk.group_kind(), &gvk.version)?;
        tracing::debug!(%gvk, resource = %mapping.resource.resource, scope = ?mapping.scope, "resolved resource");
        Ok(ResourceMeta::new(client, gvk, mapping))
    }
}

fn lookup<K, C>(
    table: &Table<K, C>,
    key: K,
    construct: impl FnOnce() -> Result<ResourceMeta<C>>,
) -> Result<Arc<ResourceMeta<C>>>
where
    K: Eq + Hash + Debug,
{
    let cached = table.read().get(&key).cloned();
    if let Some(meta) = cached {
        tracing::trace!(?key, "resource cache hit");
        return Ok(meta);
    }

    let mut table = table.write();
    let meta = match construct() {
        Ok(meta) => Arc::new(meta),
        Err(err) => {
            tracing::debug!(?key, error = %err, "failed to resolve resource");
            return Err(err);
        }
    };
    table.insert(key, meta.clone());
    Ok(meta)
}

impl<R, F: TransportFactory> Debug for ResourceMetadataCache<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceMetadataCache")
            .field("config", &self.config)
            .field("cached_types", &self.by_type.read().len())
            .field("cached_kinds", &self.by_gvk.read().len())
            .finish_non_exhaustive()
    }
}
