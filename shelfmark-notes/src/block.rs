use std::ops::Range;

use crate::error::NoteError;

/// Fence info string naming the structured block.
pub const BLOCK_NAME: &str = "bookLog";

const FENCE: &str = "```";

/// Byte span of a block's body within the document, exclusive of the fence
/// lines themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub body_start: usize,
    pub body_end: usize,
}

/// One physical line of a document: `start..content_end` is the text
/// without its terminator, `next` points past the terminator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line {
    pub start: usize,
    pub content_end: usize,
    pub next: usize,
}

/// Split `text` into physical lines, tolerating both `\n` and `\r\n`.
pub(crate) fn lines(text: &str) -> Vec<Line> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let (line_end, next) = match text[pos..].find('\n') {
            Some(i) => (pos + i, pos + i + 1),
            None => (text.len(), text.len()),
        };
        let mut content_end = line_end;
        if content_end > pos && text.as_bytes()[content_end - 1] == b'\r' {
            content_end -= 1;
        }
        out.push(Line {
            start: pos,
            content_end,
            next,
        });
        pos = next;
    }
    out
}

/// Locate the `bookLog` fenced block in a document.
///
/// `hint` is a 0-based line range the opening fence must fall in; it is
/// only needed when the document contains more than one block. An
/// unterminated block (opening fence, no closing fence) extends to the end
/// of the document.
pub fn find_block(text: &str, hint: Option<Range<usize>>) -> Result<BlockSpan, NoteError> {
    let all_lines = lines(text);
    let opener = format!("{FENCE}{BLOCK_NAME}");

    let mut candidates = Vec::new();
    let mut inside_block = false;
    for (line_no, line) in all_lines.iter().enumerate() {
        let trimmed = text[line.start..line.content_end].trim();
        if inside_block {
            if trimmed == FENCE {
                inside_block = false;
            }
        } else if trimmed == opener {
            candidates.push(line_no);
            inside_block = true;
        }
    }

    if let Some(range) = hint {
        candidates.retain(|line_no| range.contains(line_no));
    }

    let open_line = match candidates.len() {
        0 => return Err(NoteError::BlockNotFound),
        1 => candidates[0],
        count => return Err(NoteError::AmbiguousBlock { count }),
    };

    let body_start = all_lines[open_line].next;
    let body_end = all_lines[open_line + 1..]
        .iter()
        .find(|line| text[line.start..line.content_end].trim() == FENCE)
        .map(|line| line.start)
        .unwrap_or(text.len());

    Ok(BlockSpan {
        body_start,
        body_end,
    })
}
