use crate::core::expand::DEFAULT_MAX_INCLUDE_DEPTH;
use crate::utils::error::{CatalogError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DEFINITIONS_DIR: &str = "./ticker_sets";
pub const MAX_INCLUDE_DEPTH_LIMIT: usize = 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub resolver: ResolverSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    #[serde(default = "default_definitions_dir")]
    pub definitions_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSection {
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn default_definitions_dir() -> String {
    DEFAULT_DEFINITIONS_DIR.to_string()
}

fn default_max_include_depth() -> usize {
    DEFAULT_MAX_INCLUDE_DEPTH
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            definitions_dir: default_definitions_dir(),
        }
    }
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            max_include_depth: default_max_include_depth(),
        }
    }
}

impl CatalogConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| CatalogError::IoError {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn definitions_dir(&self) -> &str {
        &self.catalog.definitions_dir
    }

    pub fn max_include_depth(&self) -> usize {
        self.resolver.max_include_depth
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .format
            .as_deref()
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog.definitions_dir", &self.catalog.definitions_dir)?;
        validation::validate_range(
            "resolver.max_include_depth",
            self.resolver.max_include_depth,
            1,
            MAX_INCLUDE_DEPTH_LIMIT,
        )?;
        if let Some(level) = &self.logging.level {
            validation::validate_one_of(
                "logging.level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }
        if let Some(format) = &self.logging.format {
            validation::validate_one_of("logging.format", format, &["compact", "json"])?;
        }
        Ok(())
    }
}
