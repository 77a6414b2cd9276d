use crate::domain::model::GroupDefinition;
use crate::utils::error::{CatalogError, Result};

/// Parses one definition file. Only syntax and field types are checked here;
/// include targets are validated when a set is expanded.
pub fn parse_definition(file: &str, bytes: &[u8]) -> Result<GroupDefinition> {
    let parse_error = |message: String| CatalogError::ParseError {
        file: file.to_string(),
        message,
    };

    let content =
        std::str::from_utf8(bytes).map_err(|e| parse_error(format!("invalid UTF-8: {}", e)))?;

    // empty, comment-only and bare `---` documents are a group with no key
    if content.trim().is_empty() {
        return Ok(GroupDefinition::default());
    }
    let document: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
    if document.is_null() {
        return Ok(GroupDefinition::default());
    }

    serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
}
