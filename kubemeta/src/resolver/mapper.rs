use crate::error::MappingError;
use ahash::AHashMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kubemeta_core::{
    discovery::{RestMapping, Scope, StaticScope},
    gvk::{GroupKind, GroupVersion, GroupVersionKind},
};

/// Maps kinds to the REST resources serving them
///
/// Fill it by hand, from `k8s-openapi` types, or from the `APIResourceList`
/// documents an apiserver serves for each group version.
#[derive(Debug, Clone, Default)]
pub struct RestMapper {
    mappings: AHashMap<GroupVersionKind, RestMapping>,
}

impl RestMapper {
    /// An empty mapper
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a kind, guessing its plural resource name
    pub fn add(&mut self, gvk: GroupVersionKind, scope: Scope) -> &mut Self {
        let mapping = RestMapping::guess(&gvk, scope);
        self.mappings.insert(gvk, mapping);
        self
    }

    /// Map a kind to an explicitly named resource
    pub fn add_with_plural(&mut self, gvk: GroupVersionKind, plural: &str, scope: Scope) -> &mut Self {
        let mapping = RestMapping::new(&gvk, plural, scope);
        self.mappings.insert(gvk, mapping);
        self
    }

    /// Map a `k8s-openapi` type's kind to the resource it declares
    pub fn register<K>(&mut self) -> &mut Self
    where
        K: k8s_openapi::Resource,
        K::Scope: StaticScope,
    {
        let gvk = GroupVersionKind::gvk(K::GROUP, K::VERSION, K::KIND);
        self.add_with_plural(gvk, K::URL_PATH_SEGMENT, <K::Scope as StaticScope>::SCOPE)
    }

    /// Map every resource listed in a discovery document
    ///
    /// Subresources (`pods/status` and the like) are not kinds of their own and are skipped.
    pub fn add_api_resource_list(&mut self, list: &APIResourceList) -> Result<&mut Self, MappingError> {
        let gv: GroupVersion = list
            .group_version
            .parse()
            .map_err(MappingError::InvalidGroupVersion)?;
        for res in &list.resources {
            if res.name.contains('/') {
                continue;
            }
            let gvk = GroupVersionKind {
                group: res.group.clone().unwrap_or_else(|| gv.group.clone()),
                version: res.version.clone().unwrap_or_else(|| gv.version.clone()),
                kind: res.kind.clone(),
            };
            tracing::trace!(%gvk, resource = %res.name, "mapping discovered resource");
            self.add_with_plural(gvk, &res.name, Scope::from_namespaced(res.namespaced));
        }
        Ok(self)
    }

    /// Look up where a kind at a particular version is served
    pub fn rest_mapping(&self, gk: &GroupKind, version: &str) -> Result<RestMapping, MappingError> {
        self.mappings
            .get(&gk.with_version(version))
            .cloned()
            .ok_or_else(|| MappingError::NoKindMatch {
                group: gk.group.clone(),
                kind: gk.kind.clone(),
                version: version.to_string(),
            })
    }

    /// Number of mapped kinds
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether no kinds are mapped
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Namespace, Pod};

    fn apps_v1() -> APIResourceList {
        serde_json::from_value(serde_json::json!({
            "kind": "APIResourceList",
            "apiVersion": "v1",
            "groupVersion": "apps/v1",
            "resources": [
                {
                    "name": "deployments",
                    "singularName": "deployment",
                    "namespaced": true,
                    "kind": "Deployment",
                    "verbs": ["create", "delete", "get", "list", "patch", "update", "watch"],
                    "shortNames": ["deploy"]
                },
                {
                    "name": "deployments/scale",
                    "singularName": "",
                    "namespaced": true,
                    "group": "autoscaling",
                    "version": "v1",
                    "kind": "Scale",
                    "verbs": ["get", "patch", "update"]
                },
                {
                    "name": "widgets",
                    "singularName": "widget",
                    "namespaced": false,
                    "kind": "Widget",
                    "verbs": ["get", "list"]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn maps_discovered_resources() {
        let mut mapper = RestMapper::new();
        mapper.add_api_resource_list(&apps_v1()).unwrap();
        assert_eq!(mapper.len(), 2);

        let deploy = mapper.rest_mapping(&GroupKind::gk("apps", "Deployment"), "v1").unwrap();
        assert_eq!(deploy.resource.resource, "deployments");
        assert_eq!(deploy.scope, Scope::Namespaced);

        let widget = mapper.rest_mapping(&GroupKind::gk("apps", "Widget"), "v1").unwrap();
        assert_eq!(widget.scope, Scope::Cluster);

        assert!(mapper.rest_mapping(&GroupKind::gk("autoscaling", "Scale"), "v1").is_err());
    }

    #[test]
    fn rejects_malformed_discovery_documents() {
        let mut list = apps_v1();
        list.group_version = "".into();
        assert!(matches!(
            RestMapper::new().add_api_resource_list(&list),
            Err(MappingError::InvalidGroupVersion(_))
        ));
    }

    #[test]
    fn maps_k8s_openapi_types() {
        let mut mapper = RestMapper::new();
        mapper.register::<Pod>().register::<Namespace>();

        let pods = mapper.rest_mapping(&GroupKind::gk("", "Pod"), "v1").unwrap();
        assert_eq!(pods.resource.resource, "pods");
        assert_eq!(pods.scope, Scope::Namespaced);
        let ns = mapper.rest_mapping(&GroupKind::gk("", "Namespace"), "v1").unwrap();
        assert_eq!(ns.scope, Scope::Cluster);
    }

    #[test]
    fn unknown_versions_do_not_match() {
        let mut mapper = RestMapper::new();
        mapper.add(GroupVersionKind::gvk("apps", "v1", "Widget"), Scope::Namespaced);
        assert_eq!(
            mapper.rest_mapping(&GroupKind::gk("apps", "Widget"), "v2").unwrap_err(),
            MappingError::NoKindMatch {
                group: "apps".into(),
                kind: "Widget".into(),
                version: "v2".into(),
            }
        );
    }
}
