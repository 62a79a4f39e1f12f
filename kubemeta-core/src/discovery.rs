//! Type information structs for API discovery and REST mappings
use crate::gvk::{GroupVersionKind, GroupVersionResource};
use serde::{Deserialize, Serialize};

/// Resource scope
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Scope {
    /// Objects are global
    Cluster,
    /// Each object lives in namespace.
    Namespaced,
}

impl Scope {
    /// The scope advertised by a discovery document's `namespaced` flag
    pub fn from_namespaced(namespaced: bool) -> Self {
        if namespaced {
            Scope::Namespaced
        } else {
            Scope::Cluster
        }
    }
}

/// Scope of `k8s-openapi`'s compile-time scope markers
pub trait StaticScope {
    /// The scope the marker stands for
    const SCOPE: Scope;
}

impl StaticScope for k8s_openapi::NamespaceResourceScope {
    const SCOPE: Scope = Scope::Namespaced;
}

impl StaticScope for k8s_openapi::ClusterResourceScope {
    const SCOPE: Scope = Scope::Cluster;
}

/// Where a kind is served: its resource path segment and its scope
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RestMapping {
    /// The group, version and plural resource name the kind is served as
    pub resource: GroupVersionResource,
    /// The kind this mapping was made for
    pub gvk: GroupVersionKind,
    /// Whether objects of the kind live in namespaces
    pub scope: Scope,
}

impl RestMapping {
    /// Map a kind to an explicitly named resource
    pub fn new(gvk: &GroupVersionKind, plural: &str, scope: Scope) -> Self {
        Self {
            resource: GroupVersionResource::gvr(&gvk.group, &gvk.version, plural),
            gvk: gvk.clone(),
            scope,
        }
    }

    /// Map a kind to a resource, guessing the plural name
    ///
    /// # Warning
    /// The guess follows the english rules apimachinery uses for built-in kinds.
    /// Custom resources with irregular plurals should use [`RestMapping::new`] or discovery.
    pub fn guess(gvk: &GroupVersionKind, scope: Scope) -> Self {
        Self::new(gvk, &to_plural(&gvk.kind.to_ascii_lowercase()), scope)
    }
}

// Simple pluralizer. Handles the special cases.
pub(crate) fn to_plural(word: &str) -> String {
    if word == "endpoints" || word == "endpointslices" {
        return word.to_owned();
    } else if word == "nodemetrics" {
        return "nodes".to_owned();
    } else if word == "podmetrics" {
        return "pods".to_owned();
    }

    // Words ending in s, x, z, ch, sh will be pluralized with -es (eg. foxes).
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{}es", word);
    }

    // Words ending in y that are preceded by a consonant will be pluralized by
    // replacing y with -ies (eg. puppies).
    if word.ends_with('y') {
        if let Some(c) = word.chars().rev().nth(1) {
            if !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u') {
                // Remove 'y' and add `ies`
                let mut chars = word.chars();
                chars.next_back();
                return format!("{}ies", chars.as_str());
            }
        }
    }

    // All other words will have "s" added to the end (eg. days).
    format!("{}s", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_native_plurals() {
        #[rustfmt::skip]
        let native_kinds = vec![
            ("APIService", "apiservices"),
            ("ClusterRole", "clusterroles"),
            ("ComponentStatus", "componentstatuses"),
            ("ConfigMap", "configmaps"),
            ("Deployment", "deployments"),
            ("Endpoints", "endpoints"), ("EndpointSlice", "endpointslices"),
            ("Ingress", "ingresses"), ("IngressClass", "ingressclasses"),
            ("NetworkPolicy", "networkpolicies"),
            ("Namespace", "namespaces"),
            ("Pod", "pods"),
            ("PodSecurityPolicy", "podsecuritypolicies"),
            ("RuntimeClass", "runtimeclasses"),
            ("StorageClass", "storageclasses"),
        ];
        for (kind, plural) in native_kinds {
            assert_eq!(to_plural(&kind.to_ascii_lowercase()), plural);
        }
    }

    #[test]
    fn guesses_single_letter_plurals() {
        assert_eq!(to_plural("y"), "ys");
        assert_eq!(to_plural("s"), "ses");
        let mapping = RestMapping::guess(&GroupVersionKind::gvk("apps", "v1", "Y"), Scope::Namespaced);
        assert_eq!(mapping.resource.resource, "ys");
    }

    #[test]
    fn guessed_mapping_keeps_group_version() {
        let gvk = GroupVersionKind::gvk("apps", "v1", "Widget");
        let mapping = RestMapping::guess(&gvk, Scope::Namespaced);
        assert_eq!(mapping.resource, GroupVersionResource::gvr("apps", "v1", "widgets"));
        assert_eq!(mapping.gvk, gvk);
        assert_eq!(mapping.scope, Scope::Namespaced);
        assert_eq!(Scope::from_namespaced(false), Scope::Cluster);
    }

    #[test]
    fn static_scopes_follow_k8s_openapi() {
        use k8s_openapi::api::core::v1::{Namespace, Pod};
        assert_eq!(<<Pod as k8s_openapi::Resource>::Scope as StaticScope>::SCOPE, Scope::Namespaced);
        assert_eq!(<<Namespace as k8s_openapi::Resource>::Scope as StaticScope>::SCOPE, Scope::Cluster);
    }
}
