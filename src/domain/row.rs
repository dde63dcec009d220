//! Composite row identities for merged multi-context tables.
//!
//! A row ID is `<context><SEP><path>`. IDs without the separator belong to
//! single-cluster views and decode to an empty context, so one identity type
//! serves both modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved separator between context name and resource path.
///
/// Context names and resource paths must not contain it; inputs that do are
/// not rejected here.
pub const MULTI_CONTEXT_SEP: &str = "@@";

/// Row identifier - newtype over the encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(String);

impl RowId {
    /// Wrap an already-encoded ID (single- or multi-context).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build a multi-context ID.
    #[must_use]
    pub fn join(context: &str, path: &str) -> Self {
        Self(join(context, path))
    }

    /// Decode into `(context, path)`.
    #[must_use]
    pub fn split(&self) -> (&str, &str) {
        split(&self.0)
    }

    /// True when the ID carries an origin context.
    #[must_use]
    pub fn is_multi_context(&self) -> bool {
        self.0.contains(MULTI_CONTEXT_SEP)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Encode a context name and resource path into one row ID.
#[must_use]
pub fn join(context: &str, path: &str) -> String {
    let mut id = String::with_capacity(context.len() + MULTI_CONTEXT_SEP.len() + path.len());
    id.push_str(context);
    id.push_str(MULTI_CONTEXT_SEP);
    id.push_str(path);
    id
}

/// Decode a row ID at the first separator; `("", id)` when there is none.
#[must_use]
pub fn split(id: &str) -> (&str, &str) {
    match id.split_once(MULTI_CONTEXT_SEP) {
        Some((context, path)) => (context, path),
        None => ("", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_then_split_round_trips() {
        let cases = [
            ("prod-eu", "kube-system/coredns-abc"),
            ("", "default/nginx"),
            ("ctx", ""),
            ("arn:aws:eks:eu-west-1:1234:cluster/main", "ns/pod-0"),
        ];
        for (context, path) in cases {
            let id = join(context, path);
            assert_eq!(split(&id), (context, path), "id {id:?}");
        }
    }

    #[test]
    fn split_without_separator_is_single_cluster() {
        assert_eq!(split("default/nginx"), ("", "default/nginx"));
        assert_eq!(split(""), ("", ""));
        assert_eq!(split("a@b"), ("", "a@b"));
    }

    #[test]
    fn split_uses_first_separator() {
        assert_eq!(split("a@@b@@c"), ("a", "b@@c"));
    }

    #[test]
    fn row_id_wraps_codec() {
        let id = RowId::join("ctx1", "default/web");
        assert_eq!(id.as_str(), "ctx1@@default/web");
        assert!(id.is_multi_context());
        assert_eq!(id.split(), ("ctx1", "default/web"));

        let single = RowId::from("default/web");
        assert!(!single.is_multi_context());
        assert_eq!(single.split(), ("", "default/web"));
        assert_eq!(single.to_string(), "default/web");
    }
}
