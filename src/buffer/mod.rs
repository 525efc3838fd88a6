// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Document positions and host notifications.
//!
//! The highlighter works on byte offsets into the document text. Hosts place
//! decorations by line and column, so this module also provides [`LineIndex`]
//! for converting between the two.

pub mod text_change_notifier;

pub use text_change_notifier::{DocumentId, EventSink, HostEvent, SubscriptionId, Topic};

/// A zero-based line and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Line start offsets of a text, for byte offset to [`Position`] conversion.
///
/// Lines end at `\n`. Columns count characters, so a `\r` before the newline
/// is an ordinary column.
#[derive(Debug, Clone)]
pub struct LineIndex<'t> {
    text: &'t str,
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    /// Indexes the line starts of `text`.
    pub fn new(text: &'t str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Returns the number of lines; an empty text has one line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a position.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character resolve to that character's column.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.text[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < offset)
            .count();
        Position::new(line, column)
    }

    /// Converts a byte range to a [`TextRange`].
    pub fn range(&self, span: std::ops::Range<usize>) -> TextRange {
        TextRange::new(self.position(span.start), self.position(span.end))
    }
}
