//! Message-type filtering
//!
//! Resolves a caller-supplied filter into the set of type ids the scanner
//! should extract. Matching is lenient: names or ids that are not declared in
//! the log are skipped silently, and a filter that matches nothing falls back
//! to extracting every declared type.

use crate::types::FormatRecord;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which message types to extract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterSpec {
    /// Extract every declared type
    #[default]
    None,
    /// Extract types whose FMT name matches exactly
    ByName(Vec<String>),
    /// Extract the listed type ids
    ByTypeId(Vec<u8>),
}

impl FilterSpec {
    pub fn by_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSpec::ByName(names.into_iter().map(Into::into).collect())
    }

    pub fn by_ids<I: IntoIterator<Item = u8>>(ids: I) -> Self {
        FilterSpec::ByTypeId(ids.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterSpec::None => true,
            FilterSpec::ByName(names) => names.is_empty(),
            FilterSpec::ByTypeId(ids) => ids.is_empty(),
        }
    }
}

/// Set of type ids accepted for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedTypes {
    ids: BTreeSet<u8>,
}

impl AcceptedTypes {
    pub fn contains(&self, type_id: u8) -> bool {
        self.ids.contains(&type_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.ids.iter().copied()
    }
}

/// Resolve `filter` against the declared formats
pub fn resolve_filter(formats: &[FormatRecord], filter: &FilterSpec, debug: bool) -> AcceptedTypes {
    let all = || AcceptedTypes {
        ids: formats.iter().map(|f| f.type_id).collect(),
    };

    let ids: BTreeSet<u8> = match filter {
        FilterSpec::None => return all(),
        FilterSpec::ByName(names) => names
            .iter()
            .filter_map(|name| {
                let found = formats.iter().find(|f| &f.name == name).map(|f| f.type_id);
                if found.is_none() && debug {
                    println!("Filter name '{}' not declared in log, ignoring", name);
                }
                found
            })
            .collect(),
        FilterSpec::ByTypeId(requested) => requested
            .iter()
            .copied()
            .filter(|id| {
                let declared = formats.iter().any(|f| f.type_id == *id);
                if !declared && debug {
                    println!("Filter id {} not declared in log, ignoring", id);
                }
                declared
            })
            .collect(),
    };

    if ids.is_empty() {
        if debug && !filter.is_empty() {
            println!("Filter matched no declared types, extracting all");
        }
        return all();
    }

    AcceptedTypes { ids }
}
