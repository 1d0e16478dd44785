//! Error types for catalog extraction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a catalog file or writing the header failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catalog XML is malformed (not well-formed)
    #[error("Invalid XML: {0}")]
    InvalidXml(#[from] roxmltree::Error),

    /// A catalog element that must carry a name does not
    #[error("Element <{tag}> has no name")]
    MissingName { tag: String },

    /// A template file name has no category prefix before `-`
    #[error("Template file name '{name}' has no category prefix")]
    MissingPrefix { name: String },
}
