//! Work items — the static (keyword, post_id) list the driver processes.
//!
//! The list is produced offline by a keyword-discovery utility and checked in
//! here as data. Identity is the post ID; the driver never processes the same
//! post ID twice thanks to the artifact skip check.

use serde::{Deserialize, Serialize};

/// One unit of pipeline work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub keyword: String,
    pub post_id: String,
}

impl WorkItem {
    pub fn new(keyword: &str, post_id: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            post_id: post_id.to_string(),
        }
    }
}

/// The enumerated service pages to generate.
pub fn default_work_items() -> Vec<WorkItem> {
    [
        ("marketing automation agency", "1234"),
        ("seo agency", "56767"),
        ("ppc agency", "57321"),
        ("content marketing agency", "57902"),
        ("agencia de marketing digital", "58214"),
        ("agencia seo", "58377"),
        ("conversion rate optimization agency", "59108"),
    ]
    .into_iter()
    .map(|(keyword, post_id)| WorkItem::new(keyword, post_id))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn post_ids_are_unique() {
        let items = default_work_items();
        let ids: HashSet<_> = items.iter().map(|i| i.post_id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn no_item_is_blank() {
        for item in default_work_items() {
            assert!(!item.keyword.trim().is_empty());
            assert!(!item.post_id.trim().is_empty());
        }
    }
}
