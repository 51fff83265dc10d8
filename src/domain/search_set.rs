//! Search result wrapper
//!
//! Matched studies are returned as a FHIR `searchset` Bundle so that callers
//! can hand the result straight to other FHIR tooling.

use super::study::ResearchStudy;
use serde::{Deserialize, Serialize};

/// How an entry came to be in a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEntryMode {
    Match,
    Include,
    Outcome,
}

/// Search metadata for one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInfo {
    pub mode: SearchEntryMode,
}

/// One entry of a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSetEntry {
    pub resource: ResearchStudy,
    pub search: SearchInfo,
}

/// Ordered collection of matched studies
///
/// # Examples
///
/// ```
/// use trialmatch::domain::{ResearchStudy, SearchSet};
///
/// let set = SearchSet::new(vec![ResearchStudy::new(0), ResearchStudy::new(1)]);
/// assert_eq!(set.total, 2);
/// assert_eq!(set.studies().map(|s| s.id.as_str()).collect::<Vec<_>>(), ["0", "1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSet {
    pub resource_type: String,

    #[serde(rename = "type")]
    pub bundle_type: String,

    pub total: usize,

    #[serde(default)]
    pub entry: Vec<SearchSetEntry>,
}

impl SearchSet {
    /// Wraps studies as `match` entries, preserving order
    pub fn new(studies: Vec<ResearchStudy>) -> Self {
        let entry: Vec<SearchSetEntry> = studies
            .into_iter()
            .map(|resource| SearchSetEntry {
                resource,
                search: SearchInfo {
                    mode: SearchEntryMode::Match,
                },
            })
            .collect();

        Self {
            resource_type: "Bundle".to_string(),
            bundle_type: "searchset".to_string(),
            total: entry.len(),
            entry,
        }
    }

    /// Iterates the studies in result order
    pub fn studies(&self) -> impl Iterator<Item = &ResearchStudy> {
        self.entry.iter().map(|entry| &entry.resource)
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }
}

impl From<Vec<ResearchStudy>> for SearchSet {
    fn from(studies: Vec<ResearchStudy>) -> Self {
        Self::new(studies)
    }
}
