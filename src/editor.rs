// Editor - Host ports for the text buffer and user notices
//
// The host editor implements `TextBuffer` and `Notifier`. `Document` is an
// in-memory buffer with char-based columns for simple hosts and tests.

use crate::position::{byte_index_of, position_at, Position, Span};

/// Line/column addressed text buffer owned by the host editor
///
/// Every `Position` crossing this trait counts columns in chars (Unicode
/// scalar values), not bytes or UTF-16 code units. Hosts that address text in
/// UTF-16 must convert at this boundary, otherwise splices land in the wrong
/// place after any character outside the Basic Multilingual Plane.
pub trait TextBuffer {
    /// Cursor position, column counted in chars
    fn cursor(&self) -> Position;

    /// The selected range, if the user selected any text
    fn selection(&self) -> Option<Span>;

    /// Text between two positions, columns counted in chars
    fn range(&self, start: Position, end: Position) -> String;

    /// Replace the text between two positions, columns counted in chars
    fn replace_range(&mut self, text: &str, start: Position, end: Position);

    fn line_count(&self) -> usize;

    /// The selected text, if any non-empty selection exists
    fn selected_text(&self) -> Option<(Span, String)> {
        let span = self.selection().filter(|span| !span.is_empty())?;
        let text = self.range(span.start, span.end);
        (!text.is_empty()).then_some((span, text))
    }
}

/// Sink for short user-facing messages
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// In-memory text buffer
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    cursor: Position,
    selection: Option<Span>,
}

impl Document {
    /// Create a document with the cursor at the end of `text`
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: position_at(text, text.len()),
            selection: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Move the cursor, clamped to the document, and clear any selection
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = self.clamp(cursor);
        self.selection = None;
    }

    /// Select a range; the cursor moves to its end
    pub fn select(&mut self, start: Position, end: Position) {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));
        self.selection = Some(Span::new(start, end));
        self.cursor = end;
    }

    fn clamp(&self, position: Position) -> Position {
        position_at(&self.text, byte_index_of(&self.text, position))
    }
}

impl TextBuffer for Document {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn selection(&self) -> Option<Span> {
        self.selection
    }

    fn range(&self, start: Position, end: Position) -> String {
        let start = byte_index_of(&self.text, start);
        let end = byte_index_of(&self.text, end);
        if start >= end {
            return String::new();
        }
        self.text[start..end].to_string()
    }

    fn replace_range(&mut self, text: &str, start: Position, end: Position) {
        let start_index = byte_index_of(&self.text, start);
        let end_index = byte_index_of(&self.text, end).max(start_index);

        self.text.replace_range(start_index..end_index, text);
        self.selection = None;
        self.cursor = position_at(&self.text, start_index + text.len());
    }

    fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }
}
