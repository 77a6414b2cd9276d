use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::error::{CatalogError, Result};

/// One definition file: a group of named sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupDefinition {
    #[serde(rename = "group", default, deserialize_with = "null_as_default")]
    pub group_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: BTreeMap<String, SetEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_elements_as_blank")]
    pub tickers: Vec<String>,
    #[serde(default, deserialize_with = "null_elements_as_blank")]
    pub include: Vec<String>,
}

// `sets:` with no value is YAML null; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// `[AAPL, ~]` keeps the null as a blank entry, dropped later by trimming.
fn null_elements_as_blank<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<Option<String>> = null_as_default(deserializer)?;
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

/// External `group.set` key, split on the first `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier<'a> {
    pub group: &'a str,
    pub set: &'a str,
}

impl<'a> Identifier<'a> {
    pub fn parse(id: &'a str) -> Result<Self> {
        match id.split_once('.') {
            Some((group, set)) if !group.is_empty() && !set.is_empty() => {
                Ok(Identifier { group, set })
            }
            _ => Err(CatalogError::InvalidIdentifier { id: id.to_string() }),
        }
    }
}

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.set)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSet {
    pub title: String,
    pub tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetSummary {
    pub id: String,
    pub title: String,
    pub count: usize,
    pub tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryListing {
    pub items: Vec<SetSummary>,
}
