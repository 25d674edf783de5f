// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live ink geometry and its immutable snapshots.
//!
//! [`InkPath`] is the mutable accumulator the curve renderer appends to while
//! the user draws. [`InkPath::snapshot`] freezes it into an [`InkSnapshot`]
//! for the history. Segments are reference counted, so snapshots share
//! geometry with the live path and with each other instead of duplicating it,
//! and a snapshot can never observe later edits of the live path.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{BezPath, Rect, Shape};
use peniko::Color;

/// One closed outline of ink together with the color it was drawn in.
///
/// Every segment is rendered the same way: filled, then stroked with a
/// 1-unit round-join, round-cap outline in the same color.
#[derive(Clone, Debug)]
pub struct InkSegment {
    outline: BezPath,
    color: Color,
}

impl InkSegment {
    /// Create a segment from a closed outline and its paint color.
    pub fn new(outline: BezPath, color: Color) -> Self {
        Self { outline, color }
    }

    /// The closed outline in view coordinates.
    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    /// The paint color, alpha included.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Tight bounding box of the outline.
    pub fn bounding_box(&self) -> Rect {
        self.outline.bounding_box()
    }
}

impl PartialEq for InkSegment {
    fn eq(&self, other: &Self) -> bool {
        self.outline == other.outline && self.color.components == other.color.components
    }
}

/// The in-progress, append-only ink of the canvas.
#[derive(Clone, Default, PartialEq)]
pub struct InkPath {
    segments: Vec<Arc<InkSegment>>,
}

impl fmt::Debug for InkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InkPath")
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl InkPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no ink has been added.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Append a segment and return a shared handle to it.
    pub fn push(&mut self, segment: InkSegment) -> Arc<InkSegment> {
        let segment = Arc::new(segment);
        self.segments.push(Arc::clone(&segment));
        segment
    }

    /// Iterate the segments in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = &InkSegment> + '_ {
        self.segments.iter().map(|s| &**s)
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Union of the segment bounding boxes, or `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.segments
            .iter()
            .map(|s| s.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    /// Freeze the current geometry.
    pub fn snapshot(&self) -> InkSnapshot {
        InkSnapshot {
            segments: Arc::from(self.segments.as_slice()),
        }
    }

    /// Replace the current geometry with a stored snapshot.
    pub fn restore(&mut self, snapshot: &InkSnapshot) {
        self.segments.clear();
        self.segments.extend(snapshot.segments.iter().cloned());
    }

    /// Returns `true` if this path holds exactly the geometry of `snapshot`.
    pub fn matches(&self, snapshot: &InkSnapshot) -> bool {
        self.segments.as_slice() == &*snapshot.segments
    }
}

/// An immutable, cheaply clonable copy of an [`InkPath`].
#[derive(Clone, PartialEq)]
pub struct InkSnapshot {
    segments: Arc<[Arc<InkSegment>]>,
}

impl fmt::Debug for InkSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InkSnapshot")
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl InkSnapshot {
    /// Number of segments in the snapshot.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` when the snapshot holds no ink.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate the segments in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = &InkSegment> + '_ {
        self.segments.iter().map(|s| &**s)
    }
}

impl From<&InkSnapshot> for InkPath {
    fn from(snapshot: &InkSnapshot) -> Self {
        let mut path = Self::new();
        path.restore(snapshot);
        path
    }
}
