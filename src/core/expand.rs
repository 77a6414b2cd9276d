use crate::domain::model::GroupDefinition;
use crate::utils::error::{CatalogError, Result};
use std::collections::HashSet;

pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Depth-first flattening of a set's includes within one group.
///
/// Output order is the set's own tickers, then each include's full expansion
/// in declared order. Duplicates are kept; the caller normalizes.
pub(crate) struct Expander<'g> {
    group: &'g GroupDefinition,
    max_depth: usize,
    on_stack: HashSet<&'g str>,
}

impl<'g> Expander<'g> {
    pub(crate) fn new(group: &'g GroupDefinition, max_depth: usize) -> Self {
        Self {
            group,
            max_depth,
            on_stack: HashSet::new(),
        }
    }

    /// `set_key` must already exist in the group.
    pub(crate) fn expand(&mut self, set_key: &'g str) -> Result<Vec<String>> {
        let mut out = Vec::new();
        self.expand_into(set_key, 0, &mut out)?;
        Ok(out)
    }

    fn expand_into(&mut self, set_key: &'g str, depth: usize, out: &mut Vec<String>) -> Result<()> {
        let group = self.group;
        if self.on_stack.contains(set_key) {
            return Err(CatalogError::IncludeCycle {
                group: group.group_key.clone(),
                set: set_key.to_string(),
            });
        }
        if depth > self.max_depth {
            return Err(CatalogError::IncludeDepthExceeded {
                group: group.group_key.clone(),
                set: set_key.to_string(),
                limit: self.max_depth,
            });
        }

        let Some(entry) = group.sets.get(set_key) else {
            return Err(CatalogError::UnknownSet {
                id: format!("{}.{}", group.group_key, set_key),
            });
        };

        self.on_stack.insert(set_key);
        out.extend(entry.tickers.iter().cloned());
        let result = self.expand_includes(set_key, &entry.include, depth, out);
        self.on_stack.remove(set_key);
        result
    }

    fn expand_includes(
        &mut self,
        set_key: &'g str,
        include: &'g [String],
        depth: usize,
        out: &mut Vec<String>,
    ) -> Result<()> {
        let group = self.group;
        for child in include {
            let child = child.trim();
            if child.is_empty() {
                continue;
            }
            let Some((child_key, _)) = group.sets.get_key_value(child) else {
                return Err(CatalogError::UnknownSetReference {
                    group: group.group_key.clone(),
                    from: set_key.to_string(),
                    set: child.to_string(),
                });
            };
            self.expand_into(child_key, depth + 1, out)?;
        }
        Ok(())
    }
}
