pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::local::LocalDirectory;
pub use crate::config::toml_config::CatalogConfig;
pub use crate::core::{catalog::Catalog, loader::CatalogLoader};
pub use crate::domain::model::{GroupDefinition, ResolvedSet, SetEntry, SetSummary, SummaryListing};
pub use crate::utils::error::{CatalogError, Result};
