use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalog fetch failed
    #[error("{0}")]
    Catalog(#[from] shelfmark_catalog::CatalogError),

    /// Note storage or patching failed
    #[error("{0}")]
    Note(#[from] shelfmark_notes::NoteError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
