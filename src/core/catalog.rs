use crate::core::expand::{Expander, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::domain::model::{
    GroupDefinition, Identifier, ResolvedSet, SetSummary, SummaryListing,
};
use crate::utils::error::{CatalogError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable namespace of ticker sets, keyed by group.
///
/// Built once by [`crate::core::loader::CatalogLoader`] and only read afterwards, so a
/// shared `&Catalog` (or `Arc<Catalog>`) can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: BTreeMap<String, GroupDefinition>,
    max_include_depth: usize,
}

impl Catalog {
    /// Assembles a catalog from parsed definitions, each paired with the file it came from.
    pub fn from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, GroupDefinition)>,
    {
        let mut groups: BTreeMap<String, GroupDefinition> = BTreeMap::new();
        let mut origins: BTreeMap<String, String> = BTreeMap::new();

        for (file, definition) in definitions {
            let group = definition.group_key.clone();
            if group.is_empty() {
                return Err(CatalogError::MissingGroupKey { file });
            }
            if let Some(first_file) = origins.get(&group) {
                return Err(CatalogError::DuplicateGroupKey {
                    group,
                    file,
                    first_file: first_file.clone(),
                });
            }
            if group.contains('.') {
                // ids split on the first '.', so these sets only show up in listings
                tracing::warn!(
                    "Group '{}' in {} contains '.'; its sets cannot be resolved by id",
                    group,
                    file
                );
            }

            origins.insert(group.clone(), file);
            groups.insert(group, definition);
        }

        Ok(Self {
            groups,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        })
    }

    pub fn with_max_include_depth(mut self, max_include_depth: usize) -> Self {
        self.max_include_depth = max_include_depth;
        self
    }

    pub fn max_include_depth(&self) -> usize {
        self.max_include_depth
    }

    pub fn group(&self, group_key: &str) -> Option<&GroupDefinition> {
        self.groups.get(group_key)
    }

    pub fn group_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn set_count(&self) -> usize {
        self.groups.values().map(|g| g.sets.len()).sum()
    }

    /// Every identifier in the catalog, sorted by group then set.
    pub fn set_ids(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|(group_key, group)| {
                group
                    .sets
                    .keys()
                    .map(move |set_key| format!("{}.{}", group_key, set_key))
            })
            .collect()
    }

    /// Resolves `group.set` to the set's own title and its flattened, trimmed,
    /// deduplicated and sorted members.
    pub fn resolve(&self, id: &str) -> Result<ResolvedSet> {
        let identifier = Identifier::parse(id)?;

        let group = self
            .groups
            .get(identifier.group)
            .ok_or_else(|| CatalogError::UnknownGroup {
                group: identifier.group.to_string(),
            })?;
        let (set_key, entry) = group
            .sets
            .get_key_value(identifier.set)
            .ok_or_else(|| CatalogError::UnknownSet { id: id.to_string() })?;

        let expanded = Expander::new(group, self.max_include_depth).expand(set_key)?;
        tracing::debug!(
            "Resolved {} to {} raw entries",
            identifier,
            expanded.len()
        );

        Ok(ResolvedSet {
            title: entry.title.clone(),
            tickers: normalize(expanded),
        })
    }

    /// One summary per set, ordered by group key then set key.
    ///
    /// A set that fails to resolve is still listed, with no tickers and its
    /// declared title; the error is logged and otherwise dropped.
    pub fn list_summaries(&self) -> Vec<SetSummary> {
        let mut out = Vec::with_capacity(self.set_count());

        for (group_key, group) in &self.groups {
            for (set_key, entry) in &group.sets {
                let id = format!("{}.{}", group_key, set_key);
                match self.resolve(&id) {
                    Ok(resolved) => out.push(SetSummary {
                        id,
                        title: resolved.title,
                        count: resolved.tickers.len(),
                        tickers: resolved.tickers,
                    }),
                    Err(e) => {
                        tracing::warn!("Listing {} without tickers: {}", id, e);
                        out.push(SetSummary {
                            id,
                            title: entry.title.clone(),
                            count: 0,
                            tickers: Vec::new(),
                        });
                    }
                }
            }
        }

        out
    }

    pub fn listing(&self) -> SummaryListing {
        SummaryListing {
            items: self.list_summaries(),
        }
    }

    /// Identifiers that fail to resolve, with the reason.
    pub fn broken_sets(&self) -> Vec<(String, CatalogError)> {
        self.set_ids()
            .into_iter()
            .filter_map(|id| self.resolve(&id).err().map(|e| (id, e)))
            .collect()
    }
}

/// Trim, drop blanks, dedupe (exact, case-sensitive) and sort ascending.
fn normalize(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
