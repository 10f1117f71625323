// docveil-core/src/aggregation.rs
//! Document-level aggregation of per-page finding sets.
//!
//! Multi-page documents fuse each page independently (possibly in
//! parallel); this module folds the per-page results into one
//! [`DocumentFindings`]. The merge is associative, commutative, and
//! idempotent, so pages may arrive in any order and a replayed page does
//! not grow the result. Merging is the single serialization point of the
//! pipeline - each in-flight document owns exactly one accumulator.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

use crate::findings::{FusedFinding, PageFindings};

/// Category-keyed finding set for one whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFindings {
    categories: BTreeMap<String, FusedFinding>,
}

impl DocumentFindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions one page's fused findings into the document set.
    ///
    /// Values accumulate without duplicates. Both sides carry the tier
    /// produced by the same immutable mapping, so the existing entry's
    /// tier is already the recomputed one.
    pub fn absorb(&mut self, page: PageFindings) {
        for (category, finding) in page {
            match self.categories.entry(category) {
                btree_map::Entry::Occupied(mut entry) => {
                    entry.get_mut().values.extend(finding.values);
                }
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(finding);
                }
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&FusedFinding> {
        self.categories.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FusedFinding)> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<PageFindings> for DocumentFindings {
    fn from(page: PageFindings) -> Self {
        let mut doc = Self::new();
        doc.absorb(page);
        doc
    }
}

/// Reduce-style merge for parallel page processing:
/// `pages.map(fuse).fold(DocumentFindings::new(), merge)`.
pub fn merge(mut existing: DocumentFindings, incoming: PageFindings) -> DocumentFindings {
    existing.absorb(incoming);
    existing
}
