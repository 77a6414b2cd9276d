use crate::utils::error::Result;

/// Where definition files come from. Names returned by `list_definitions`
/// are passed back verbatim to `read_definition`.
pub trait DefinitionSource: Send + Sync {
    /// Human-readable location, used in diagnostics.
    fn location(&self) -> String;

    fn list_definitions(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    fn read_definition(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
