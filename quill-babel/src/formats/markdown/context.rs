//! Per-call context and per-conversion state.
//!
//! [`SerializationContext`] is a small `Copy` value rebuilt for every recursive call;
//! derived contexts are produced with the `with_*` methods and never shared mutably.
//! [`SerializerState`] is the one mutable object of a conversion, owned by the top-level
//! call and threaded through the walk by reference.

use super::footnotes::{is_note_id, FootnoteRegistry};
use super::options::MarkdownOptions;
use crate::dom::Element;
use crate::error::FormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializationContext {
    inline: bool,
    depth: usize,
    skip_footnote_capture: bool,
    level: usize,
    in_note_scope: bool,
}

impl SerializationContext {
    /// Context for the document root: block mode, list depth 0, capture enabled.
    pub fn root() -> Self {
        SerializationContext {
            inline: false,
            depth: 0,
            skip_footnote_capture: false,
            level: 0,
            in_note_scope: false,
        }
    }

    pub fn with_inline(self, inline: bool) -> Self {
        SerializationContext { inline, ..self }
    }

    pub fn with_depth(self, depth: usize) -> Self {
        SerializationContext { depth, ..self }
    }

    pub fn with_capture_disabled(self) -> Self {
        SerializationContext {
            skip_footnote_capture: true,
            ..self
        }
    }

    /// Context for an element one level below the current one.
    ///
    /// Tracks nesting for the depth guard and whether the nearest element carrying
    /// an `id` is a word-processor note.
    pub fn descend(self, element: &Element) -> Self {
        let in_note_scope = match element.id() {
            Some(id) => is_note_id(id),
            None => self.in_note_scope,
        };
        SerializationContext {
            level: self.level + 1,
            in_note_scope,
            ..self
        }
    }

    /// Context for the detached copy of a footnote definition: block mode, list depth
    /// reset, capture suppressed, outside any note scope.
    pub fn detached(self) -> Self {
        SerializationContext {
            inline: false,
            depth: 0,
            skip_footnote_capture: true,
            level: self.level,
            in_note_scope: false,
        }
    }

    pub fn inline(&self) -> bool {
        self.inline
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn skip_footnote_capture(&self) -> bool {
        self.skip_footnote_capture
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn in_note_scope(&self) -> bool {
        self.in_note_scope
    }
}

/// Mutable state of one conversion.
#[derive(Debug)]
pub struct SerializerState<'a> {
    pub options: &'a MarkdownOptions,
    pub footnotes: FootnoteRegistry,
    pub errors: Vec<FormatError>,
    depth_exceeded: bool,
}

impl<'a> SerializerState<'a> {
    pub fn new(options: &'a MarkdownOptions) -> Self {
        SerializerState {
            options,
            footnotes: FootnoteRegistry::default(),
            errors: Vec::new(),
            depth_exceeded: false,
        }
    }

    /// Whether the element at this context lies deeper than the depth guard allows.
    ///
    /// The first violation is recorded as an error; later ones only drop their subtree.
    pub fn exceeds_depth(&mut self, ctx: &SerializationContext) -> bool {
        let limit = self.options.max_depth;
        if ctx.level() <= limit {
            return false;
        }
        self.record_depth_limit(limit);
        true
    }

    /// Record that content nested deeper than `limit` was dropped, once per conversion.
    pub fn record_depth_limit(&mut self, limit: usize) {
        if !self.depth_exceeded {
            self.depth_exceeded = true;
            log::warn!("element nesting exceeds {limit} levels; dropping deeper content");
            self.errors
                .push(FormatError::RecursionLimitExceeded { limit });
        }
    }
}
