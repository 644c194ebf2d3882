/// Errors from note storage and block patching.
///
/// The structural errors (`BlockNotFound`, `AmbiguousBlock`,
/// `FieldNotFound`) are propagated to the caller, which decides whether to
/// no-op or report; the patcher never guesses or repairs document
/// structure.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("no bookLog block found in document")]
    BlockNotFound,

    #[error("document contains {count} bookLog blocks; pass a line range to pick one")]
    AmbiguousBlock { count: usize },

    #[error("bookLog block has no {field} field")]
    FieldNotFound { field: &'static str },

    #[error("unknown reading status: {0}")]
    InvalidStatus(String),

    #[error("no note found for catalog id {id}")]
    NotFound { id: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
