use std::path::PathBuf;

use shelfmark_notes::{
    NoteError, ReadingStatus, VaultStore, VolumeMutation, update_status, update_volume,
};

use crate::config::Config;
use crate::error::CliError;

pub(crate) fn run_status(
    config: &Config,
    target: &str,
    status: ReadingStatus,
) -> Result<(), CliError> {
    let store = VaultStore::new(&config.vault_root);
    let path = resolve_note(&store, target)?;
    if update_status(&store, &path, status)? {
        log::info!("{}: status set to {}", path.display(), status);
    } else {
        log::info!("{}: already {}", path.display(), status);
    }
    Ok(())
}

pub(crate) fn run_volume(
    config: &Config,
    target: &str,
    index: u32,
    clear: bool,
) -> Result<(), CliError> {
    let store = VaultStore::new(&config.vault_root);
    let path = resolve_note(&store, target)?;
    let mutation = if clear {
        VolumeMutation::Clear(index)
    } else {
        VolumeMutation::Complete(index)
    };
    let verb = if clear { "unmarked" } else { "marked read" };
    if update_volume(&store, &path, mutation)? {
        log::info!("{}: volume {index} {verb}", path.display());
    } else {
        log::info!("{}: volume {index} unchanged", path.display());
    }
    Ok(())
}

/// A target is either a catalog id (resolved through the vault) or a note
/// path used as-is.
fn resolve_note(store: &VaultStore, target: &str) -> Result<PathBuf, CliError> {
    if let Ok(id) = target.parse::<u64>() {
        return Ok(store
            .find_by_id(id)?
            .ok_or(NoteError::NotFound { id })?);
    }
    Ok(PathBuf::from(target))
}
