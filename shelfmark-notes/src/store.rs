use std::fs;
use std::path::{Path, PathBuf};

use shelfmark_core::{MediaRecord, TitleScript};

use crate::codec::ReadingStatus;
use crate::error::NoteError;
use crate::patch::{self, VolumeMutation};
use crate::template;

/// Whole-document read/modify/write access to note storage.
///
/// Callers serialize writes to the same document themselves; two mutations
/// computed from the same pre-mutation text would silently clobber each
/// other at this layer.
pub trait DocumentStore {
    fn read(&self, path: &Path) -> Result<String, NoteError>;
    fn write(&self, path: &Path, text: &str) -> Result<(), NoteError>;
}

/// Markdown note storage rooted at a vault directory.
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn book_dir(&self) -> PathBuf {
        self.root.join(template::BOOK_LOG_DIR)
    }

    fn attachments_dir(&self) -> PathBuf {
        self.root.join(template::ATTACHMENTS_DIR)
    }

    /// Find an existing note by its `{id}_` file-name prefix.
    pub fn find_by_id(&self, id: u64) -> Result<Option<PathBuf>, NoteError> {
        let dir = self.book_dir();
        if !dir.is_dir() {
            return Ok(None);
        }
        let prefix = format!("{id}_");
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_md = path.extension().and_then(|e| e.to_str()) == Some("md");
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix));
            if is_md && matches {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Create a note for a record, returning its path. `cover` is a
    /// vault-relative path to an already-saved cover image, if any.
    pub fn create_note(
        &self,
        record: &MediaRecord,
        script: TitleScript,
        cover: Option<&str>,
    ) -> Result<PathBuf, NoteError> {
        let dir = self.book_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(template::note_filename(record, script));
        let text = template::render_note(record, script, cover);
        self.write(&path, &text)?;
        log::info!("created note {}", path.display());
        Ok(path)
    }

    /// Save cover image bytes for a record. Returns the vault-relative
    /// path; an already-saved cover is reused, not re-written.
    pub fn save_cover(&self, id: u64, ext: &str, bytes: &[u8]) -> Result<String, NoteError> {
        let dir = self.attachments_dir();
        fs::create_dir_all(&dir)?;
        let file_name = format!("{id}_cover.{ext}");
        let path = dir.join(&file_name);
        if !path.exists() {
            fs::write(&path, bytes)?;
        }
        Ok(format!("{}/{}", template::ATTACHMENTS_DIR, file_name))
    }
}

impl DocumentStore for VaultStore {
    fn read(&self, path: &Path) -> Result<String, NoteError> {
        Ok(fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, text: &str) -> Result<(), NoteError> {
        Ok(fs::write(path, text)?)
    }
}

/// Read-modify-write a status change on one note. Returns whether the
/// document changed.
pub fn update_status<S: DocumentStore>(
    store: &S,
    path: &Path,
    status: ReadingStatus,
) -> Result<bool, NoteError> {
    let text = store.read(path)?;
    let patched = patch::apply_status(&text, status, None)?;
    if patched == text {
        return Ok(false);
    }
    store.write(path, &patched)?;
    Ok(true)
}

/// Read-modify-write a volume-map change on one note. Returns whether the
/// document changed.
pub fn update_volume<S: DocumentStore>(
    store: &S,
    path: &Path,
    mutation: VolumeMutation,
) -> Result<bool, NoteError> {
    let text = store.read(path)?;
    let patched = patch::apply_volume(&text, mutation, None)?;
    if patched == text {
        return Ok(false);
    }
    store.write(path, &patched)?;
    Ok(true)
}
