// Position - Line/column addressing for editor buffers
//
// Lines and columns are zero-based. Columns count Unicode scalar values
// (chars) from the start of the line, which is how `Document` addresses text.

use serde::{Deserialize, Serialize};

/// A location in a line-oriented text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { line: 0, column: 0 };

    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

/// Half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Convert a byte index into `text` to a line/column position
///
/// The line is the number of `\n` characters before `byte_index`; the column
/// is the number of chars between the most recent newline (exclusive) and
/// `byte_index`. An index sitting right after a newline is column 0.
///
/// `byte_index` is clamped to the text length and must fall on a char
/// boundary once clamped.
pub fn position_at(text: &str, byte_index: usize) -> Position {
    let prefix = &text[..byte_index.min(text.len())];

    match prefix.rfind('\n') {
        Some(newline) => Position {
            line: prefix.matches('\n').count(),
            column: prefix[newline + 1..].chars().count(),
        },
        None => Position {
            line: 0,
            column: prefix.chars().count(),
        },
    }
}

/// Convert a position back into a byte index into `text`
///
/// Lines past the end clamp to the end of the text; columns past the end of a
/// line clamp to the end of that line.
pub fn byte_index_of(text: &str, position: Position) -> usize {
    let mut line_start = 0;
    for _ in 0..position.line {
        match text[line_start..].find('\n') {
            Some(newline) => line_start += newline + 1,
            None => return text.len(),
        }
    }

    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |newline| line_start + newline);
    let line = &text[line_start..line_end];

    line.char_indices()
        .nth(position.column)
        .map_or(line_end, |(offset, _)| line_start + offset)
}
