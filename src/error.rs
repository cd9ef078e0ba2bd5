//! Error types for the public API
//!
//! Timing races (a placeholder not yet laid out, a click during a transition)
//! are recovered inside the controller and only logged. These variants cover
//! the cases a caller can act on.

use thiserror::Error;

use crate::choreo::Section;

#[derive(Debug, Error)]
pub enum FolioError {
    /// No body in the catalog carries this label
    #[error("no orbiting body labelled {0:?}")]
    UnknownBody(String),

    /// The section's placeholder is not in the layout
    #[error("placeholder for the {0} section is not laid out")]
    MissingPlaceholder(Section),

    /// Catalog JSON could not be parsed
    #[error("invalid body catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Catalog file could not be read
    #[error("could not read body catalog: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
