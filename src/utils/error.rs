use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {message}")]
    ParseError { file: String, message: String },

    #[error("No definition files found in {dir}")]
    NoDefinitionsFound { dir: String },

    #[error("Missing 'group' in {file}")]
    MissingGroupKey { file: String },

    #[error("Duplicate group '{group}' (file: {file}, first declared in {first_file})")]
    DuplicateGroupKey {
        group: String,
        file: String,
        first_file: String,
    },

    #[error("Invalid id '{id}', expected 'group.set'")]
    InvalidIdentifier { id: String },

    #[error("Unknown group: {group}")]
    UnknownGroup { group: String },

    #[error("Unknown set: {id}")]
    UnknownSet { id: String },

    #[error("Set '{group}.{from}' includes unknown set: {set}")]
    UnknownSetReference {
        group: String,
        from: String,
        set: String,
    },

    #[error("Include cycle detected at set: {group}.{set}")]
    IncludeCycle { group: String, set: String },

    #[error("Include depth limit of {limit} exceeded at set: {group}.{set}")]
    IncludeDepthExceeded {
        group: String,
        set: String,
        limit: usize,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Query,
    Config,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::IoError { .. }
            | CatalogError::ParseError { .. }
            | CatalogError::NoDefinitionsFound { .. }
            | CatalogError::MissingGroupKey { .. }
            | CatalogError::DuplicateGroupKey { .. } => ErrorCategory::Load,
            CatalogError::InvalidIdentifier { .. }
            | CatalogError::UnknownGroup { .. }
            | CatalogError::UnknownSet { .. }
            | CatalogError::UnknownSetReference { .. }
            | CatalogError::IncludeCycle { .. }
            | CatalogError::IncludeDepthExceeded { .. } => ErrorCategory::Query,
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            CatalogError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Load => ErrorSeverity::Critical,
            ErrorCategory::Config | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Query => ErrorSeverity::Medium,
        }
    }

    /// Lookup misses map to "not found"; every other query error is a bad request.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownGroup { .. } | CatalogError::UnknownSet { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::IoError { .. } => {
                "Check that the definitions directory exists and is readable"
            }
            CatalogError::ParseError { .. } => {
                "Fix the file: it must be UTF-8 YAML with 'group', 'title' and 'sets' fields"
            }
            CatalogError::NoDefinitionsFound { .. } => {
                "Add at least one .yaml definition file or point --dir at the right directory"
            }
            CatalogError::MissingGroupKey { .. } => "Add a top-level 'group' key to the file",
            CatalogError::DuplicateGroupKey { .. } => {
                "Rename one of the groups; group keys must be unique across files"
            }
            CatalogError::InvalidIdentifier { .. } => "Use the form 'group.set'",
            CatalogError::UnknownGroup { .. } | CatalogError::UnknownSet { .. } => {
                "Run the 'list' command to see available identifiers"
            }
            CatalogError::UnknownSetReference { .. } => {
                "Fix the 'include' entry; it must name a set in the same group"
            }
            CatalogError::IncludeCycle { .. } => "Remove the circular 'include' chain",
            CatalogError::IncludeDepthExceeded { .. } => {
                "Flatten the include chain or raise resolver.max_include_depth"
            }
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command-line arguments"
            }
            CatalogError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Load => format!("Failed to load ticker set catalog: {}", self),
            ErrorCategory::Query => format!("Could not resolve ticker set: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Failed to write output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
