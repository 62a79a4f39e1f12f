//! Parameters for the calls a resolved resource is addressed with.
use crate::request::Error;
use serde::Serialize;
use std::collections::BTreeMap;

// apiservers reject longer managers
const MAX_FIELD_MANAGER_LEN: usize = 128;

/// Narrows a list call on a collection
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    /// Label selector, e.g. `app=blog,tier!=cache`
    pub label_selector: Option<String>,
    /// Field selector, e.g. `metadata.name=blog`
    pub field_selector: Option<String>,
    /// Page size; the apiserver hands back a continue token when more remain
    pub limit: Option<u32>,
    /// Token from the previous page
    pub continue_token: Option<String>,
}

impl ListParams {
    /// Objects carrying every one of `labels`
    ///
    /// An empty map selects everything.
    pub fn matching_labels(labels: &BTreeMap<String, String>) -> Self {
        let selector = labels
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        Self {
            label_selector: (!selector.is_empty()).then_some(selector),
            ..Self::default()
        }
    }

    /// The one object called `name`
    pub fn named(name: &str) -> Self {
        Self {
            field_selector: Some(format!("metadata.name={name}")),
            ..Self::default()
        }
    }

    /// Replace the label selector
    #[must_use]
    pub fn labels(mut self, selector: &str) -> Self {
        self.label_selector = Some(selector.to_string());
        self
    }

    /// Replace the field selector
    #[must_use]
    pub fn fields(mut self, selector: &str) -> Self {
        self.field_selector = Some(selector.to_string());
        self
    }

    /// Page through results `limit` at a time
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue after the page that returned `token`
    #[must_use]
    pub fn page_after(mut self, token: &str) -> Self {
        self.continue_token = Some(token.to_string());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.continue_token.is_some() && self.limit.is_none() {
            return Err(Error::Validation("a continue token needs a page limit".into()));
        }
        Ok(())
    }

    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        if let Some(fields) = &self.field_selector {
            qp.append_pair("fieldSelector", fields);
        }
        if let Some(labels) = &self.label_selector {
            qp.append_pair("labelSelector", labels);
        }
        if let Some(limit) = self.limit {
            qp.append_pair("limit", &limit.to_string());
        }
        if let Some(token) = &self.continue_token {
            qp.append_pair("continue", token);
        }
    }
}

/// Options for create and replace calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteParams {
    /// Have the apiserver validate the write without persisting it
    pub dry_run: bool,
    /// Name recorded in `managedFields` for this writer
    pub field_manager: Option<String>,
}

impl WriteParams {
    /// Writes recorded under `manager`
    pub fn managed_by(manager: &str) -> Self {
        Self {
            field_manager: Some(manager.to_string()),
            ..Self::default()
        }
    }

    /// Only validate the write
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        match &self.field_manager {
            Some(fm) if fm.len() > MAX_FIELD_MANAGER_LEN => Err(Error::Validation(format!(
                "field manager is {} characters, at most {MAX_FIELD_MANAGER_LEN} are allowed",
                fm.len()
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        if self.dry_run {
            qp.append_pair("dryRun", "All");
        }
        if let Some(fm) = &self.field_manager {
            qp.append_pair("fieldManager", fm);
        }
    }
}

/// What happens to the dependents of a deleted object
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum PropagationPolicy {
    /// Dependents are left behind without an owner
    Orphan,
    /// The object goes first, dependents are collected afterwards
    Background,
    /// Dependents go first, the object waits for them
    Foreground,
}

/// Identity an object must still have for a delete to go through
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preconditions {
    /// Expected `metadata.uid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Expected `metadata.resourceVersion`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

/// Options for delete calls, sent as the request body
///
/// Dry runs travel in the query string, everything else in the body.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    /// Have the apiserver validate the delete without carrying it out
    #[serde(skip)]
    pub dry_run: bool,
    /// Seconds the object gets to shut down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_seconds: Option<u32>,
    /// How dependents are treated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagation_policy: Option<PropagationPolicy>,
    /// Refuse the delete unless the object still matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Preconditions>,
}

impl DeleteParams {
    /// Delete with the given dependent policy
    pub fn propagate(policy: PropagationPolicy) -> Self {
        Self {
            propagation_policy: Some(policy),
            ..Self::default()
        }
    }

    /// Only validate the delete
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Give the object `secs` seconds to shut down
    #[must_use]
    pub fn grace_period(mut self, secs: u32) -> Self {
        self.grace_period_seconds = Some(secs);
        self
    }

    /// Refuse the delete unless the object still matches
    #[must_use]
    pub fn preconditions(mut self, preconditions: Preconditions) -> Self {
        self.preconditions = Some(preconditions);
        self
    }

    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        if self.dry_run {
            qp.append_pair("dryRun", "All");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;

    #[test]
    fn label_maps_become_selectors() {
        let labels = BTreeMap::from([
            ("tier".to_string(), "web".to_string()),
            ("app".to_string(), "blog".to_string()),
        ]);
        let lp = ListParams::matching_labels(&labels);
        assert_eq!(lp.label_selector.as_deref(), Some("app=blog,tier=web"));
        assert_eq!(ListParams::matching_labels(&BTreeMap::new()), ListParams::default());
    }

    #[test]
    fn paging_needs_a_limit() {
        assert!(ListParams::default().page_after("abc").validate().is_err());
        assert!(ListParams::named("blog").limit(10).page_after("abc").validate().is_ok());
    }

    #[test]
    fn long_field_managers_are_rejected() {
        assert!(WriteParams::managed_by(&"x".repeat(128)).validate().is_ok());
        assert!(WriteParams::managed_by(&"x".repeat(129)).validate().is_err());
    }

    #[test]
    fn delete_bodies_leave_dry_run_to_the_query() {
        let dp = DeleteParams::propagate(PropagationPolicy::Foreground)
            .grace_period(5)
            .dry_run()
            .preconditions(Preconditions {
                uid: Some("1234".into()),
                resource_version: None,
            });
        assert_json_eq!(
            serde_json::to_value(&dp).unwrap(),
            serde_json::json!({
                "gracePeriodSeconds": 5,
                "propagationPolicy": "Foreground",
                "preconditions": { "uid": "1234" }
            })
        );
        assert_eq!(serde_json::to_string(&DeleteParams::default()).unwrap(), "{}");
    }
}
