use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter key selecting categories by parent endpoint id (`""` = roots).
pub const PARENT_ID_FILTER: &str = "parent_id";

/// Filter handed down from the request layer to discovery and count.
///
/// The core only interprets what a controller's table supports; unknown
/// filter keys are carried but ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Column predicates, keyed by filter name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl QueryFilter {
    /// An unrestricted filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Returns the value of a named filter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }
}
