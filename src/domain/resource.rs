//! Resource addressing: group/version/resource, namespace scope, context objects.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

/// Namespace value meaning "every namespace".
pub const NAMESPACE_ALL: &str = "all";

/// Namespace value meaning "cluster scoped".
pub const CLUSTER_SCOPE: &str = "-";

/// Sentinel for a missing or failed value in keyed results.
pub const NA: &str = "N/A";

/// API group, version and plural resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupVersionResource {
    /// Empty for the core group.
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl GroupVersionResource {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// Core-group resource at `v1`.
    pub fn core(resource: impl Into<String>) -> Self {
        Self::new("", "v1", resource)
    }

    #[must_use]
    pub fn is_core(&self) -> bool {
        self.group.is_empty()
    }
}

impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_core() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

/// Parses `pods`, `v1/pods` or `apps/v1/deployments`.
impl FromStr for GroupVersionResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(format!("invalid resource {s:?}"));
        }
        match parts.as_slice() {
            [resource] => Ok(Self::core(*resource)),
            [version, resource] => Ok(Self::new("", *version, *resource)),
            [group, version, resource] => Ok(Self::new(*group, *version, *resource)),
            _ => Err(format!(
                "invalid resource {s:?}: expected RESOURCE, VERSION/RESOURCE or GROUP/VERSION/RESOURCE"
            )),
        }
    }
}

/// Resolve a namespace argument to a concrete namespace, or `None` for all
/// namespaces / cluster scope.
#[must_use]
pub fn scoped_namespace(ns: Option<&str>) -> Option<&str> {
    match ns {
        None | Some("") | Some(CLUSTER_SCOPE) | Some(NAMESPACE_ALL) => None,
        Some(ns) => Some(ns),
    }
}

/// A resource fetched from one context, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextObject {
    pub context: String,
    pub object: Value,
}

impl ContextObject {
    pub fn new(context: impl Into<String>, object: Value) -> Self {
        Self {
            context: context.into(),
            object,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata_str("name").unwrap_or_default()
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.metadata_str("namespace")
    }

    #[must_use]
    pub fn creation_timestamp(&self) -> Option<&str> {
        self.metadata_str("creationTimestamp")
    }

    /// `namespace/name`, or `name` for cluster-scoped objects.
    #[must_use]
    pub fn path(&self) -> String {
        match self.namespace() {
            Some(ns) if !ns.is_empty() => format!("{ns}/{}", self.name()),
            _ => self.name().to_string(),
        }
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.object.get("metadata")?.get(key)?.as_str()
    }
}
