//! Contains types for using resource kinds not known at compile-time.
use crate::{
    gvk::{GroupVersionKind, ParseGroupVersionError},
    metadata::{ObjectMeta, TypeMeta},
    object::{Object, Representation},
};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to parse this DynamicObject into a typed object: {source}")]
/// Failed to parse `DynamicObject` into a typed object
pub struct ParseDynamicObjectError {
    #[from]
    source: serde_json::Error,
}

/// A dynamic representation of a kubernetes object
///
/// This will work with any non-list type object.
/// Every `DynamicObject` is the same Rust type regardless of the kind it holds,
/// so its kind is only known through [`DynamicObject::types`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct DynamicObject {
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// All other keys
    #[serde(flatten)]
    pub data: serde_json::Value,
}

impl DynamicObject {
    /// Create a DynamicObject of the given kind with only a name set
    #[must_use]
    pub fn new(name: &str, gvk: &GroupVersionKind) -> Self {
        Self {
            types: Some(TypeMeta::from_gvk(gvk)),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            data: Default::default(),
        }
    }

    /// Attach dynamic data to a DynamicObject
    #[must_use]
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Attach a namespace to a DynamicObject
    #[must_use]
    pub fn within(mut self, ns: &str) -> Self {
        self.metadata.namespace = Some(ns.into());
        self
    }

    /// The kind this object declares, if it declares a well-formed one
    pub fn gvk(&self) -> Option<Result<GroupVersionKind, ParseGroupVersionError>> {
        self.types.as_ref().map(GroupVersionKind::try_from)
    }

    /// Attempt to convert this `DynamicObject` to a typed object
    pub fn try_parse<K: for<'a> serde::Deserialize<'a>>(self) -> Result<K, ParseDynamicObjectError> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }
}

impl Object for DynamicObject {
    fn representation(&self) -> Representation<'_> {
        Representation::Dynamic(self.types.as_ref())
    }

    fn meta(&self) -> Option<&ObjectMeta> {
        Some(&self.metadata)
    }

    fn is_schemaless() -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use k8s_openapi::api::core::v1::Pod;

    #[test]
    fn serializes_flattened_type_information() {
        let gvk = GroupVersionKind::gvk("clux.dev", "v1", "Foo");
        let obj = DynamicObject::new("baz", &gvk)
            .within("myns")
            .data(serde_json::json!({ "spec": { "replicas": 2 } }));

        assert_json_eq!(
            serde_json::to_value(&obj).unwrap(),
            serde_json::json!({
                "apiVersion": "clux.dev/v1",
                "kind": "Foo",
                "metadata": { "name": "baz", "namespace": "myns" },
                "spec": { "replicas": 2 }
            })
        );
        assert_eq!(obj.gvk().unwrap().unwrap(), gvk);
    }

    #[test]
    fn dynamic_objects_are_schemaless() {
        let obj = DynamicObject::new("baz", &GroupVersionKind::gvk("", "v1", "Service"));
        assert!(obj.representation().is_dynamic());
        assert!(<DynamicObject as Object>::is_schemaless());
        assert_eq!(obj.meta().and_then(|m| m.name.as_deref()), Some("baz"));
    }

    #[test]
    fn missing_type_information_is_none() {
        let obj: DynamicObject = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "untyped" }
        }))
        .unwrap();
        assert_eq!(obj.representation(), Representation::Dynamic(None));
        assert!(obj.gvk().is_none());
    }

    #[test]
    fn can_parse_dynamic_object_into_pod() -> Result<(), serde_json::Error> {
        let original_pod: Pod = serde_json::from_value(serde_json::json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": { "name": "example" },
            "spec": {
                "containers": [{
                    "name": "example",
                    "image": "alpine",
                    // Do nothing
                    "command": ["tail", "-f", "/dev/null"],
                }],
            }
        }))?;
        let dynamic_pod: DynamicObject = serde_json::from_str(&serde_json::to_string(&original_pod)?)?;
        let parsed_pod: Pod = dynamic_pod.try_parse().unwrap();

        assert_eq!(parsed_pod, original_pod);

        Ok(())
    }
}
