//! In-place field mutation inside a `bookLog` block.
//!
//! Both patchers locate the exact byte region of one field and splice a
//! replacement for that region only; everything else in the document,
//! including line-ending style and unrelated whitespace, passes through
//! byte-for-byte. Mutations that change nothing semantically return the
//! input unchanged, so repeated application from racing UI events is safe.

use std::ops::Range;

use crate::block;
use crate::codec::{ReadingStatus, VOLUME_FIELD, VolumeMap};
use crate::error::NoteError;

const STATUS_FIELD: &str = "status";

/// One mutation of the sparse volume-completion map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeMutation {
    /// Mark a volume completed.
    Complete(u32),
    /// Remove a volume's entry ("not completed").
    Clear(u32),
}

/// Replace the value of the block's `status` line.
///
/// Only the value portion of the first `status:` line changes; its leading
/// whitespace and the spacing after the colon are preserved. A block with
/// no `status` line fails with [`NoteError::FieldNotFound`] rather than
/// growing one from a stale assumption about the block's shape.
pub fn apply_status(
    text: &str,
    status: ReadingStatus,
    hint: Option<Range<usize>>,
) -> Result<String, NoteError> {
    let span = block::find_block(text, hint)?;
    let body = &text[span.body_start..span.body_end];

    for line in block::lines(body) {
        let raw = &body[line.start..line.content_end];
        let stripped = raw.trim_start();
        let Some(after_key) = stripped.strip_prefix("status:") else {
            continue;
        };
        let indent = raw.len() - stripped.len();
        let gap = after_key.len() - after_key.trim_start().len();
        let value_start = span.body_start + line.start + indent + "status:".len() + gap;
        let value_end = span.body_start + line.content_end;

        if &text[value_start..value_end] == status.as_str() {
            return Ok(text.to_owned());
        }
        let mut out = String::with_capacity(text.len() + 16);
        out.push_str(&text[..value_start]);
        out.push_str(status.as_str());
        out.push_str(&text[value_end..]);
        return Ok(out);
    }

    Err(NoteError::FieldNotFound {
        field: STATUS_FIELD,
    })
}

/// Apply one mutation to the block's `volume_status` map.
///
/// The field region is the header line plus the contiguous run of indented
/// `index: token` lines directly below it; the run ends at the first line
/// that is not indented or not map-shaped, so trailing block content is
/// never consumed. The region is re-serialized in canonical form (numeric
/// key order, two-space indent) and omitted entirely when the map empties.
/// An absent header is the canonical empty map: `Complete` materializes it
/// at the end of the block body, `Clear` is a no-op.
pub fn apply_volume(
    text: &str,
    mutation: VolumeMutation,
    hint: Option<Range<usize>>,
) -> Result<String, NoteError> {
    let span = block::find_block(text, hint)?;
    let body = &text[span.body_start..span.body_end];
    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };

    let region = find_volume_region(body);
    let mut map = region.map.clone();
    match mutation {
        VolumeMutation::Complete(index) => map.complete(index),
        VolumeMutation::Clear(index) => map.clear(index),
    }
    if map == region.map {
        return Ok(text.to_owned());
    }

    let region_start = span.body_start + region.range.start;
    let region_end = span.body_start + region.range.end;
    let rendered = map.render(eol);

    let mut out = String::with_capacity(text.len() + rendered.len() + 8);
    out.push_str(&text[..region_start]);
    if region.insert && region_start > 0 && !text[..region_start].ends_with('\n') {
        // Body does not end in a newline; open a fresh line for the field.
        out.push_str(eol);
    }
    out.push_str(&rendered);
    out.push_str(&text[region_end..]);
    Ok(out)
}

struct VolumeRegion {
    /// Byte range of the field within the block body. When `insert` is
    /// true the range is empty and marks the insertion point.
    range: Range<usize>,
    map: VolumeMap,
    insert: bool,
}

/// Locate the `volume_status` header and the indented entry run below it.
fn find_volume_region(body: &str) -> VolumeRegion {
    let lines = block::lines(body);

    for (i, line) in lines.iter().enumerate() {
        let raw = &body[line.start..line.content_end];
        let stripped = raw.trim_start();
        let Some(after_key) = stripped.strip_prefix(VOLUME_FIELD) else {
            continue;
        };
        let Some(after_colon) = after_key.strip_prefix(':') else {
            continue;
        };
        if !after_colon.trim().is_empty() {
            continue;
        }

        let mut map = VolumeMap::default();
        let mut end = line.next;
        for entry_line in &lines[i + 1..] {
            let entry_raw = &body[entry_line.start..entry_line.content_end];
            if !entry_raw.starts_with([' ', '\t']) {
                break;
            }
            let Some((index, token)) = VolumeMap::parse_entry(entry_raw) else {
                break;
            };
            map.insert(index, token);
            end = entry_line.next;
        }

        return VolumeRegion {
            range: line.start..end,
            map,
            insert: false,
        };
    }

    // No header: the empty map lives (virtually) at the end of the body.
    VolumeRegion {
        range: body.len()..body.len(),
        map: VolumeMap::default(),
        insert: true,
    }
}

#[cfg(test)]
#[path = "tests/patch_tests.rs"]
mod tests;
