// Sentence Detector - Finds the unfinished sentence before the cursor
//
// When nothing is selected, the text to improve is everything between the
// last terminal mark and the cursor, with leading whitespace skipped.

use crate::editor::TextBuffer;
use crate::position::{position_at, Position, Span};

fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Whitespace skipped before a sentence; includes the byte order mark
fn is_sentence_gap(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// The sentence located before a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceInfo {
    pub text: String,
    /// First non-whitespace character after the previous terminal mark
    pub start: Position,
    /// The cursor the lookup was made from
    pub end: Position,
}

impl SentenceInfo {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Locate the sentence that ends at the cursor
///
/// `text_before_cursor` is the document from its very start up to (not
/// including) the cursor. Returns `None` for an empty document, a cursor at
/// `(0, 0)`, or when only whitespace follows the last terminal mark.
pub fn locate_sentence(text_before_cursor: &str, cursor: Position) -> Option<SentenceInfo> {
    if text_before_cursor.is_empty() || cursor.is_origin() {
        return None;
    }

    // Terminators are ASCII, so the byte after one is always a char boundary
    let after_mark = text_before_cursor
        .rfind(is_sentence_terminator)
        .map_or(0, |index| index + 1);

    let start = text_before_cursor[after_mark..]
        .char_indices()
        .find(|(_, ch)| !is_sentence_gap(*ch))
        .map(|(offset, _)| after_mark + offset)?;

    let text = &text_before_cursor[start..];
    if text.trim_matches(is_sentence_gap).is_empty() {
        return None;
    }

    Some(SentenceInfo {
        text: text.to_string(),
        start: position_at(text_before_cursor, start),
        end: cursor,
    })
}

/// Locate the sentence before the buffer's cursor
pub fn locate_in_buffer<B: TextBuffer + ?Sized>(buffer: &B) -> Option<SentenceInfo> {
    if buffer.line_count() == 0 {
        return None;
    }

    let cursor = buffer.cursor();
    if cursor.is_origin() {
        return None;
    }

    let text_before_cursor = buffer.range(Position::ORIGIN, cursor);
    let located = locate_sentence(&text_before_cursor, cursor);

    tracing::debug!(
        "locate_in_buffer: cursor={}:{} prefix_len={} found={}",
        cursor.line,
        cursor.column,
        text_before_cursor.len(),
        located.is_some()
    );

    located
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Document;

    fn cursor_at_end(text: &str) -> Position {
        position_at(text, text.len())
    }

    fn locate(text: &str) -> Option<SentenceInfo> {
        locate_sentence(text, cursor_at_end(text))
    }

    #[test]
    fn test_sentence_after_terminal_mark() {
        for mark in ['.', '?', '!'] {
            let text = format!("This came first{mark}   and this is unfinished");
            let info = locate(&text).expect("sentence");

            assert_eq!(info.text, "and this is unfinished");
            assert_eq!(info.start, Position::new(0, 19));
            assert_eq!(info.end, cursor_at_end(&text));
        }
    }

    #[test]
    fn test_whole_text_without_terminator() {
        let info = locate("no punctuation yet").expect("sentence");

        assert_eq!(info.text, "no punctuation yet");
        assert_eq!(info.start, Position::ORIGIN);
    }

    #[test]
    fn test_leading_whitespace_skipped_without_terminator() {
        let info = locate("   indented start").expect("sentence");

        assert_eq!(info.text, "indented start");
        assert_eq!(info.start, Position::new(0, 3));
    }

    #[test]
    fn test_empty_text_is_none() {
        assert_eq!(locate_sentence("", Position::new(0, 0)), None);
        assert_eq!(locate_sentence("", Position::new(3, 1)), None);
    }

    #[test]
    fn test_cursor_at_origin_is_none() {
        assert_eq!(locate_sentence("Some text", Position::ORIGIN), None);
    }

    #[test]
    fn test_only_whitespace_after_mark_is_none() {
        assert_eq!(locate("Finished sentence.   "), None);
        assert_eq!(locate("Finished sentence.\n\n\t"), None);
        assert_eq!(locate("Finished sentence."), None);
    }

    #[test]
    fn test_start_on_following_line() {
        let text = "First sentence.\nSecond one is still";
        let info = locate(text).expect("sentence");

        assert_eq!(info.text, "Second one is still");
        assert_eq!(info.start, Position::new(1, 0));
    }

    #[test]
    fn test_start_in_middle_of_later_line() {
        let text = "Line one\nline two. Then\nmore words";
        let info = locate(text).expect("sentence");

        assert_eq!(info.text, "Then\nmore words");
        assert_eq!(info.start, Position::new(1, 10));
    }

    #[test]
    fn test_skips_blank_lines_after_mark() {
        let text = "Done!\n\n\n  Next paragraph";
        let info = locate(text).expect("sentence");

        assert_eq!(info.text, "Next paragraph");
        assert_eq!(info.start, Position::new(3, 2));
    }

    #[test]
    fn test_unicode_columns() {
        let text = "Ça va? Très bien";
        let info = locate(text).expect("sentence");

        assert_eq!(info.text, "Très bien");
        assert_eq!(info.start, Position::new(0, 7));
        assert_eq!(info.end, Position::new(0, 16));
    }

    #[test]
    fn test_byte_order_mark_skipped() {
        let info = locate("Hi!\u{FEFF}there").expect("sentence");

        assert_eq!(info.text, "there");
        assert_eq!(info.start, Position::new(0, 4));

        assert_eq!(locate("Done.\u{FEFF} "), None);
    }

    #[test]
    fn test_span_runs_to_cursor() {
        let text = "A. b";
        let info = locate(text).expect("sentence");

        assert_eq!(info.span(), Span::new(Position::new(0, 3), Position::new(0, 4)));
    }

    #[test]
    fn test_locate_in_buffer_uses_text_before_cursor() {
        let mut doc = Document::new("One. Two three four. Five");
        doc.set_cursor(Position::new(0, 14));

        let info = locate_in_buffer(&doc).expect("sentence");
        assert_eq!(info.text, "Two three");
        assert_eq!(info.start, Position::new(0, 5));
        assert_eq!(info.end, Position::new(0, 14));
    }

    #[test]
    fn test_locate_in_buffer_cursor_right_after_mark() {
        let mut doc = Document::new("One. Two three. Four");
        doc.set_cursor(Position::new(0, 15));

        assert_eq!(locate_in_buffer(&doc), None);
    }

    #[test]
    fn test_locate_in_buffer_empty_document() {
        let doc = Document::new("");
        assert_eq!(locate_in_buffer(&doc), None);
    }
}
