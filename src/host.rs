// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The editor host as seen by the highlighter.
//!
//! The host owns the documents and the rendering surface. The highlighter only
//! reads the active document's text, converts offsets to positions, and manages
//! the style handles it allocates.

use crate::buffer::{DocumentId, EventSink, Position, SubscriptionId, TextRange, Topic};
use crate::error::Result;
use crate::highlight::DecorationStyle;

/// Services the highlighter consumes from its editor host.
pub trait EditorHost {
    /// Host rendering resource bound to one decoration style.
    type Style;

    /// Returns the focused document, if any.
    fn active_document(&self) -> Option<DocumentId>;

    /// Returns the full text of the focused document, if any.
    fn document_text(&self) -> Option<&str>;

    /// Converts a byte offset in the focused document to a position.
    fn offset_to_position(&self, offset: usize) -> Position;

    /// Allocates a style handle. Every handle is later passed to
    /// [`EditorHost::release_style`] exactly once.
    fn create_style(&mut self, style: &DecorationStyle) -> Result<Self::Style>;

    /// Replaces every range rendered with `style`; an empty slice clears it.
    fn apply_style(&mut self, style: &Self::Style, ranges: &[TextRange]);

    /// Frees a style handle and anything rendered with it.
    fn release_style(&mut self, style: Self::Style);

    /// Registers `sink` for notifications on `topic`.
    fn subscribe(&mut self, topic: Topic, sink: EventSink) -> SubscriptionId;

    /// Disposes of a subscription made with [`EditorHost::subscribe`].
    fn unsubscribe(&mut self, subscription: SubscriptionId);
}
