//! Object identity and the generic list wrapper.
use crate::metadata::{ListMeta, ObjectMeta, TypeMeta};
use serde::{Deserialize, Serialize};
use std::{
    any::TypeId,
    fmt,
    hash::{Hash, Hasher},
};

/// Identity of a concrete, statically known Rust type
///
/// Two keys are equal exactly when they were created from the same type.
/// The type name is kept for diagnostics only.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// The key for `K`
    pub fn of<K: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<K>(),
            name: std::any::type_name::<K>(),
        }
    }

    /// Fully qualified name of the type this key identifies
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

/// How an object identifies its kind at runtime
///
/// Strongly typed objects are identified by their Rust type.
/// Schema-less objects all share one Rust type, so they can only be told apart by the
/// `apiVersion` and `kind` they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation<'a> {
    /// A statically known type
    Typed(TypeKey),
    /// A schema-less object with whatever type information it declares
    Dynamic(Option<&'a TypeMeta>),
}

impl Representation<'_> {
    /// Whether this is the schema-less variant
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Representation::Dynamic(_))
    }
}

/// An object that can be exchanged with the API
///
/// Implemented for every `k8s-openapi` resource carrying [`ObjectMeta`],
/// for [`DynamicObject`](crate::DynamicObject), and for [`ObjectList`] of either.
pub trait Object: Send + Sync + 'static {
    /// Runtime identity of the object's kind
    fn representation(&self) -> Representation<'_>;

    /// Whether the object is a list container of other objects
    fn is_list(&self) -> bool {
        false
    }

    /// Instance metadata, when the object exposes it
    ///
    /// List containers only carry [`ListMeta`] and return `None`.
    fn meta(&self) -> Option<&ObjectMeta> {
        None
    }

    /// Whether every value of this type is schema-less
    fn is_schemaless() -> bool
    where
        Self: Sized,
    {
        false
    }
}

impl<K> Object for K
where
    K: k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta> + Send + Sync + 'static,
{
    fn representation(&self) -> Representation<'_> {
        Representation::Typed(TypeKey::of::<K>())
    }

    fn meta(&self) -> Option<&ObjectMeta> {
        Some(self.metadata())
    }
}

/// A generic Kubernetes object list
///
/// This is used instead of a full struct for `DeploymentList`, `PodList`, etc.
/// A list of [`DynamicObject`](crate::DynamicObject)s is itself schema-less,
/// a list of typed objects is typed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectList<T> {
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// ListMeta - only really used for its `resourceVersion`
    #[serde(default)]
    pub metadata: ListMeta,

    /// The items we are actually interested in
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T> ObjectList<T> {
    /// A list without type information holding `items`
    pub fn new(items: Vec<T>) -> Self {
        Self {
            types: None,
            metadata: ListMeta::default(),
            items,
        }
    }

    /// Attach type information to the list
    #[must_use]
    pub fn with_types(mut self, types: TypeMeta) -> Self {
        self.types = Some(types);
        self
    }

    /// `iter` returns an Iterator over the elements of this ObjectList
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Object> Object for ObjectList<T> {
    fn representation(&self) -> Representation<'_> {
        if T::is_schemaless() {
            Representation::Dynamic(self.types.as_ref())
        } else {
            Representation::Typed(TypeKey::of::<Self>())
        }
    }

    fn is_list(&self) -> bool {
        true
    }

    fn is_schemaless() -> bool {
        T::is_schemaless()
    }
}

impl<T> IntoIterator for ObjectList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type IntoIter = ::std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dynamic::DynamicObject, gvk::GroupVersionKind};
    use k8s_openapi::api::core::v1::{ConfigMap, Pod};

    #[test]
    fn type_keys_compare_by_type() {
        assert_eq!(TypeKey::of::<Pod>(), TypeKey::of::<Pod>());
        assert_ne!(TypeKey::of::<Pod>(), TypeKey::of::<ConfigMap>());
        assert_ne!(TypeKey::of::<Pod>(), TypeKey::of::<ObjectList<Pod>>());
        assert!(TypeKey::of::<Pod>().type_name().ends_with("Pod"));
    }

    #[test]
    fn typed_objects_expose_their_type_and_meta() {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("blog".into()),
                ..ObjectMeta::default()
            },
            ..Pod::default()
        };
        assert_eq!(pod.representation(), Representation::Typed(TypeKey::of::<Pod>()));
        assert!(!pod.is_list());
        assert_eq!(pod.meta().and_then(|m| m.name.as_deref()), Some("blog"));
    }

    #[test]
    fn typed_lists_are_typed() {
        let list = ObjectList::new(vec![Pod::default()]);
        assert_eq!(
            list.representation(),
            Representation::Typed(TypeKey::of::<ObjectList<Pod>>())
        );
        assert!(list.is_list());
        assert!(list.meta().is_none());
        assert_eq!(list.iter().count(), 1);
    }

    #[test]
    fn dynamic_lists_are_schemaless() {
        let gvk = GroupVersionKind::gvk("clux.dev", "v1", "Foo");
        let list = ObjectList::<DynamicObject>::new(vec![]).with_types(TypeMeta::list_of(&gvk));
        match list.representation() {
            Representation::Dynamic(Some(tm)) => {
                assert_eq!(tm.kind, "FooList");
                assert_eq!(tm.api_version, "clux.dev/v1");
            }
            other => panic!("unexpected representation {other:?}"),
        }
        assert!(list.is_list());
        assert!(<ObjectList<DynamicObject> as Object>::is_schemaless());
    }

    #[test]
    fn deserializes_lists_with_type_information() {
        let list: ObjectList<DynamicObject> = serde_json::from_value(serde_json::json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "metadata": { "resourceVersion": "12" },
            "items": [{
                "apiVersion": "v1",
                "kind": "ConfigMap",
                "metadata": { "name": "a" },
            }]
        }))
        .unwrap();
        assert_eq!(list.types.as_ref().map(|t| t.kind.as_str()), Some("ConfigMapList"));
        assert_eq!(list.metadata.resource_version.as_deref(), Some("12"));
        assert_eq!(list.into_iter().count(), 1);
    }
}
