use std::path::PathBuf;

use thiserror::Error;

/// Everything that can be wrong with a schema file.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error reading schema at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported schema format for {0}: only .toml is supported")]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse schema TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid attributes for `{id}`: {source}")]
    Attributes {
        id: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("schema declares no entries")]
    Empty,

    #[error("`{id}`: `{name}` is not a valid field name")]
    InvalidName { id: String, name: String },

    #[error("`{id}`: short flag must be a single character, got {value:?}")]
    InvalidShort { id: String, value: String },

    #[error("`{id}`: list items must be a native type, got `{item}`")]
    UnsupportedListItem { id: String, item: String },

    #[error("`{id}`: invalid default: {reason}")]
    InvalidDefault { id: String, reason: String },

    #[error("`{id}`: sections cannot be optional")]
    OptionalSection { id: String },

    #[error("`{id}`: external entries need a `type`")]
    MissingType { id: String },

    #[error("`{id}`: `{flag}` is reserved for help and version output")]
    ReservedFlag { id: String, flag: String },

    #[error("`{flag}` is used by both `{first}` and `{second}`")]
    DuplicateFlag {
        flag: String,
        first: String,
        second: String,
    },

    #[error("type `{type_name}` is generated twice (`{first}` and `{second}`)")]
    DuplicateType {
        type_name: String,
        first: String,
        second: String,
    },
}
