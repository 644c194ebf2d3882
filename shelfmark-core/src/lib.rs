//! Core domain types for shelfmark: catalog records, search filter state,
//! and the bilingual tag translation table.
//!
//! This crate has no I/O; the catalog client and browse state machine live
//! in `shelfmark-catalog`, note storage and patching in `shelfmark-notes`.

pub mod filter;
pub mod record;
pub mod tags;

pub use filter::{EraBucket, FilterState, FormatFilter, RequestParams, SortKey, VolumeBucket};
pub use record::{
    CoverImage, MediaRecord, RankedTag, RelationEdge, ReleaseStatus, StaffEdge, TitleScript,
    TitleSet,
};
