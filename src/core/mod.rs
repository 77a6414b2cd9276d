pub mod catalog;
pub mod expand;
pub mod loader;
pub mod parser;

pub use crate::domain::model::{GroupDefinition, ResolvedSet, SetEntry, SetSummary};
pub use crate::domain::ports::DefinitionSource;
pub use crate::utils::error::Result;
