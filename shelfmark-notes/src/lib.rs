//! Note storage and the embedded `bookLog` block patcher.
//!
//! Reading-progress notes are free-form markdown documents carrying one
//! machine-readable fenced block. The patcher mutates single fields inside
//! that block in place; every byte outside the patched field region passes
//! through untouched.

pub mod block;
pub mod codec;
pub mod error;
pub mod patch;
pub mod store;
pub mod template;

pub use block::{BlockSpan, find_block};
pub use codec::{ReadingStatus, VolumeMap};
pub use error::NoteError;
pub use patch::{VolumeMutation, apply_status, apply_volume};
pub use store::{DocumentStore, VaultStore, update_status, update_volume};
