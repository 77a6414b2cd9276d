use crate::config::local::LocalDirectory;
use crate::core::catalog::Catalog;
use crate::core::expand::DEFAULT_MAX_INCLUDE_DEPTH;
use crate::core::parser::parse_definition;
use crate::domain::ports::DefinitionSource;
use crate::utils::error::{CatalogError, Result};
use std::path::Path;

/// Loads every definition from a source into a [`Catalog`].
///
/// Any failure aborts the whole load; there is no partial catalog.
pub struct CatalogLoader<S: DefinitionSource> {
    source: S,
    max_include_depth: usize,
}

impl<S: DefinitionSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn with_max_include_depth(mut self, max_include_depth: usize) -> Self {
        self.max_include_depth = max_include_depth;
        self
    }

    pub async fn load(&self) -> Result<Catalog> {
        let location = self.source.location();
        tracing::info!("Loading ticker set definitions from {}", location);

        let names = self.source.list_definitions().await?;
        if names.is_empty() {
            return Err(CatalogError::NoDefinitionsFound { dir: location });
        }

        let mut definitions = Vec::with_capacity(names.len());
        for name in names {
            let bytes = self.source.read_definition(&name).await?;
            let definition = parse_definition(&name, &bytes)?;
            tracing::debug!(
                "Parsed {}: group '{}' with {} sets",
                name,
                definition.group_key,
                definition.sets.len()
            );
            definitions.push((name, definition));
        }

        let catalog =
            Catalog::from_definitions(definitions)?.with_max_include_depth(self.max_include_depth);

        tracing::info!(
            "Loaded {} groups with {} sets from {}",
            catalog.group_count(),
            catalog.set_count(),
            location
        );
        Ok(catalog)
    }
}

impl Catalog {
    /// Loads all `.yaml`/`.yml` files directly inside `dir`.
    pub async fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Catalog> {
        CatalogLoader::new(LocalDirectory::new(dir)).load().await
    }
}
