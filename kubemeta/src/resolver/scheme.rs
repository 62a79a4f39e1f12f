use crate::error::TypeResolutionError;
use ahash::AHashMap;
use kubemeta_core::{
    gvk::GroupVersionKind,
    metadata::TypeMeta,
    object::{Object, ObjectList, Representation, TypeKey},
};

/// A registry of the kinds behind statically known types
///
/// Registering a type also registers [`ObjectList`] of that type under the `List` kind,
/// mirroring how list kinds are named by the API.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: AHashMap<TypeKey, GroupVersionKind>,
}

impl Scheme {
    /// An empty scheme
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `K` as the Rust type for `gvk`
    pub fn add_known_type<K: Object>(&mut self, gvk: GroupVersionKind) -> &mut Self {
        self.kinds.insert(TypeKey::of::<ObjectList<K>>(), gvk.list_kind());
        self.kinds.insert(TypeKey::of::<K>(), gvk);
        self
    }

    /// Register a `k8s-openapi` type under the kind it declares
    pub fn register<K>(&mut self) -> &mut Self
    where
        K: k8s_openapi::Resource + Object,
    {
        self.add_known_type::<K>(GroupVersionKind::gvk(K::GROUP, K::VERSION, K::KIND))
    }

    /// The kind registered for a type, if any
    pub fn kind_for(&self, key: &TypeKey) -> Option<&GroupVersionKind> {
        self.kinds.get(key)
    }

    /// Whether `K` has been registered
    pub fn is_registered<K: Object>(&self) -> bool {
        self.kinds.contains_key(&TypeKey::of::<K>())
    }

    /// Derive the kind of an object
    ///
    /// Typed objects are looked up by their type, schema-less objects report their own kind.
    pub fn object_kind(&self, obj: &dyn Object) -> Result<GroupVersionKind, TypeResolutionError> {
        match obj.representation() {
            Representation::Typed(key) => {
                self.kind_for(&key)
                    .cloned()
                    .ok_or(TypeResolutionError::Unregistered {
                        type_name: key.type_name(),
                    })
            }
            Representation::Dynamic(types) => declared_kind(types),
        }
    }
}

/// The kind a schema-less object declares through its type fields
pub(crate) fn declared_kind(types: Option<&TypeMeta>) -> Result<GroupVersionKind, TypeResolutionError> {
    let types = types
        .filter(|t| !t.kind.is_empty())
        .ok_or(TypeResolutionError::MissingTypeMeta)?;
    GroupVersionKind::try_from(types).map_err(TypeResolutionError::InvalidGroupVersion)
}
