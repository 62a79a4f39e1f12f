//! Resolved metadata records handed out by the cache.
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use kubemeta_core::{
    discovery::{RestMapping, Scope},
    gvk::GroupVersionKind,
    metadata::OwnerReference,
    params::{DeleteParams, ListParams, Preconditions},
    Request,
};
use std::{collections::BTreeMap, sync::Arc};

static EMPTY_MAP: BTreeMap<String, String> = BTreeMap::new();

/// Addressing and transport facts for one kind
///
/// Built once per kind by a [`ResourceMetadataCache`](crate::ResourceMetadataCache)
/// and shared behind an `Arc` afterwards. Never mutated.
#[derive(Debug)]
pub struct ResourceMeta<C> {
    client: C,
    gvk: GroupVersionKind,
    mapping: RestMapping,
    namespaced: bool,
}

impl<C> ResourceMeta<C> {
    /// Bundle a client with the kind and mapping it was built for
    pub fn new(client: C, gvk: GroupVersionKind, mapping: RestMapping) -> Self {
        let namespaced = mapping.scope != Scope::Cluster;
        Self {
            client,
            gvk,
            mapping,
            namespaced,
        }
    }

    /// The client built for this kind
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The kind, with any `List` suffix already stripped
    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    /// Where the kind is served
    pub fn mapping(&self) -> &RestMapping {
        &self.mapping
    }

    /// Whether objects of this kind live in namespaces
    pub fn is_namespaced(&self) -> bool {
        self.namespaced
    }

    /// The plural, lower-cased path segment of the resource, e.g. `deployments`
    pub fn resource_name(&self) -> &str {
        &self.mapping.resource.resource
    }

    /// The collection path of the resource
    ///
    /// The namespace is only used for namespaced kinds;
    /// `None` addresses the resource across all namespaces.
    pub fn url_path(&self, namespace: Option<&str>) -> String {
        let n = match namespace {
            Some(ns) if self.namespaced => format!("namespaces/{ns}/"),
            _ => String::new(),
        };
        format!(
            "{api}/{n}{plural}",
            api = self.gvk.group_version().api_path(),
            plural = self.resource_name()
        )
    }

    /// A request builder for the collection path of the resource
    pub fn request(&self, namespace: Option<&str>) -> Request {
        Request::new(self.url_path(namespace))
    }
}

/// A resolved [`ResourceMeta`] together with the instance metadata of one object
///
/// Produced by [`ResourceMetadataCache::resolve_object_meta`](crate::ResourceMetadataCache::resolve_object_meta)
/// on every call; it is never cached.
#[derive(Debug)]
pub struct ObjectMeta<'a, C> {
    resource: Arc<ResourceMeta<C>>,
    object: &'a metav1::ObjectMeta,
}

impl<C> Clone for ObjectMeta<'_, C> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            object: self.object,
        }
    }
}

impl<'a, C> ObjectMeta<'a, C> {
    /// Compose a resolved kind with the metadata of one of its objects
    pub fn new(resource: Arc<ResourceMeta<C>>, object: &'a metav1::ObjectMeta) -> Self {
        Self { resource, object }
    }

    /// The shared record for the object's kind
    pub fn resource(&self) -> &Arc<ResourceMeta<C>> {
        &self.resource
    }

    /// The object's own metadata
    pub fn meta(&self) -> &'a metav1::ObjectMeta {
        self.object
    }

    /// The name of the object
    pub fn name(&self) -> Option<&'a str> {
        self.object.name.as_deref()
    }

    /// The namespace the object is in
    pub fn namespace(&self) -> Option<&'a str> {
        self.object.namespace.as_deref()
    }

    /// The labels of the object
    pub fn labels(&self) -> &'a BTreeMap<String, String> {
        self.object.labels.as_ref().unwrap_or(&EMPTY_MAP)
    }

    /// The resource version of the object
    pub fn resource_version(&self) -> Option<&'a str> {
        self.object.resource_version.as_deref()
    }

    /// The owners of the object
    pub fn owner_references(&self) -> &'a [OwnerReference] {
        self.object.owner_references.as_deref().unwrap_or_default()
    }

    /// The unique id of the object
    pub fn uid(&self) -> Option<&'a str> {
        self.object.uid.as_deref()
    }

    /// Whether objects of this kind live in namespaces
    pub fn is_namespaced(&self) -> bool {
        self.resource.is_namespaced()
    }

    /// The plural path segment of the resource
    pub fn resource_name(&self) -> &str {
        self.resource.resource_name()
    }

    /// The kind of the object
    pub fn gvk(&self) -> &GroupVersionKind {
        self.resource.gvk()
    }

    /// The client built for the object's kind
    pub fn client(&self) -> &C {
        self.resource.client()
    }

    /// The collection path the object lives under
    pub fn url_path(&self) -> String {
        self.resource.url_path(self.namespace())
    }

    /// A request builder for the collection the object lives under
    pub fn request(&self) -> Request {
        Request::new(self.url_path())
    }

    /// Delete parameters that only go through while the object is the one described here
    ///
    /// Pins the uid and resource version the object was read with, when it has them.
    pub fn delete_params(&self) -> DeleteParams {
        let preconditions = Preconditions {
            uid: self.uid().map(String::from),
            resource_version: self.resource_version().map(String::from),
        };
        if preconditions == Preconditions::default() {
            DeleteParams::default()
        } else {
            DeleteParams::default().preconditions(preconditions)
        }
    }

    /// List parameters selecting the objects that carry all of this object's labels
    pub fn matching_labels(&self) -> ListParams {
        ListParams::matching_labels(self.labels())
    }
}
