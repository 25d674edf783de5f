// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface consumed by widget glue, and its ink implementation.
//!
//! [`SignaturePad`] is what a host widget talks to: gesture intake, the
//! clear/undo/redo actions, styling and bitmap export. [`InkCanvas`] is the
//! implementation built from the curve renderer, the compositor and the
//! history in this crate. Other implementations (for example one backed by a
//! platform ink toolkit) can satisfy the same trait; pick one at construction
//! time and hand it around as `Box<dyn SignaturePad>`.
//!
//! Every entry point is synchronous and takes `&mut self`; hosts deliver
//! events one at a time.

use alloc::rc::{Rc, Weak};
use core::fmt;

use kurbo::{BezPath, Point};
use log::debug;

use crate::compositor::{Compositor, RasterBackend};
use crate::history::{History, Transition};
use crate::ribbon::{Step, StrokeBuilder, dot};
use crate::{Bitmap, CanvasConfig, InkPath, InkSegment, InkSnapshot, StrokeStyle};

/// A raw gesture event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A drag started at this point.
    Began(Point),
    /// The drag moved to this point.
    Moved(Point),
    /// The drag finished.
    Ended,
    /// The drag was interrupted; handled like [`GestureEvent::Ended`].
    Cancelled,
    /// A discrete tap at this point.
    Tapped(Point),
}

/// Editing actions a host can trigger from buttons or menus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PadAction {
    /// Clear the ink, keeping the history.
    Clear,
    /// Step back in the history.
    Undo,
    /// Step forward in the history.
    Redo,
}

/// Callbacks for hosts that mirror pad state elsewhere.
///
/// Observers are attached by [`Weak`] reference: the pad never keeps an
/// observer alive, and a dropped observer is simply no longer called.
pub trait SignaturePadObserver {
    /// Called after every gesture event has been handled.
    fn did_draw_gesture(&self, pad: &dyn SignaturePad, event: GestureEvent);

    /// Called after a gesture or tap has been committed to the history.
    fn did_draw(&self, pad: &dyn SignaturePad);
}

/// The signature-capture contract.
pub trait SignaturePad {
    /// Remove all ink and the bitmap. With `evict_history` the undo history is
    /// dropped too; otherwise it is kept and its cursor rewound.
    fn clear(&mut self, evict_history: bool);

    /// Step back to the previous committed state. No-op with an empty history.
    fn undo(&mut self);

    /// Step forward again after an undo. No-op when there is nothing to redo.
    fn redo(&mut self);

    /// Whether [`Self::undo`] would change what is shown.
    fn can_undo(&self) -> bool;

    /// Whether [`Self::redo`] would change what is shown.
    fn can_redo(&self) -> bool;

    /// Returns `true` when no ink is present.
    fn is_empty(&self) -> bool;

    /// The rendered signature, if any.
    fn signature(&self) -> Option<&Bitmap>;

    /// Replace the rendered signature with an externally supplied bitmap.
    ///
    /// This bypasses the ink model: [`Self::is_empty`] and the history are
    /// unaffected, and later ink is drawn on top of the new bitmap.
    fn set_signature(&mut self, signature: Option<Bitmap>);

    /// The signature cropped to the ink's bounds plus half the maximum width.
    fn cropped_signature(&self) -> Option<Bitmap>;

    /// The current stroke style.
    fn style(&self) -> &StrokeStyle;

    /// Mutable access to the stroke style; its setters validate every write.
    fn style_mut(&mut self) -> &mut StrokeStyle;

    /// A drag started at `point`.
    fn on_gesture_begin(&mut self, point: Point);

    /// The drag moved to `point`.
    fn on_gesture_move(&mut self, point: Point);

    /// The drag finished; its ink is committed to the history.
    fn on_gesture_end(&mut self);

    /// The drag was interrupted; its ink is committed like a normal end.
    fn on_gesture_cancel(&mut self);

    /// A tap at `point` draws a dot and commits it.
    fn on_tap(&mut self, point: Point);

    /// Perform an editing action.
    fn apply(&mut self, action: PadAction) {
        match action {
            PadAction::Clear => self.clear(false),
            PadAction::Undo => self.undo(),
            PadAction::Redo => self.redo(),
        }
    }
}

/// Variable-width ink signature pad rendering through a [`RasterBackend`].
pub struct InkCanvas<B> {
    style: StrokeStyle,
    stroke: StrokeBuilder,
    path: InkPath,
    history: History,
    compositor: Compositor<B>,
    observer: Option<Weak<dyn SignaturePadObserver>>,
}

impl<B> fmt::Debug for InkCanvas<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InkCanvas")
            .field("style", &self.style)
            .field("stroke", &self.stroke)
            .field("path", &self.path)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl<B: RasterBackend> InkCanvas<B> {
    /// Create an empty canvas.
    pub fn new(backend: B, config: CanvasConfig) -> Self {
        Self {
            style: StrokeStyle::default(),
            stroke: StrokeBuilder::new(),
            path: InkPath::new(),
            history: History::new(),
            compositor: Compositor::new(backend, config),
            observer: None,
        }
    }

    /// Replace the stroke style used for new ink.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// The canvas size and scale.
    pub fn config(&self) -> CanvasConfig {
        self.compositor.config()
    }

    /// Resize or rescale the canvas. The current ink is redrawn at the new
    /// resolution; a bitmap set through [`SignaturePad::set_signature`] is lost.
    ///
    /// A config that fails [`CanvasConfig::is_valid`] is rejected and the
    /// current one kept. Returns whether the write was accepted.
    pub fn set_config(&mut self, config: CanvasConfig) -> bool {
        if !config.is_valid() {
            debug!("rejected canvas config {config:?}, keeping {:?}", self.config());
            return false;
        }
        self.compositor.set_config(config);
        if !self.path.is_empty() {
            self.compositor.redraw(self.path.segments());
        }
        true
    }

    /// The live ink.
    pub fn path(&self) -> &InkPath {
        &self.path
    }

    /// The undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The raster backend.
    pub fn backend(&self) -> &B {
        self.compositor.backend()
    }

    /// Mutable access to the raster backend.
    pub fn backend_mut(&mut self) -> &mut B {
        self.compositor.backend_mut()
    }

    /// Returns `true` between a gesture's begin and its end or cancel.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }

    /// Attach an observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Weak<dyn SignaturePadObserver>) {
        self.observer = Some(observer);
    }

    /// Detach the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn observer(&self) -> Option<Rc<dyn SignaturePadObserver>> {
        self.observer.as_ref()?.upgrade()
    }

    fn notify_gesture(&self, event: GestureEvent) {
        if let Some(observer) = self.observer() {
            observer.did_draw_gesture(self, event);
        }
    }

    fn notify_draw(&self) {
        if let Some(observer) = self.observer() {
            observer.did_draw(self);
        }
    }

    fn add_ink(&mut self, outline: BezPath) {
        let segment = self.path.push(InkSegment::new(outline, self.style.paint()));
        self.compositor.composite([&*segment]);
    }

    fn commit(&mut self) {
        self.history.push(self.path.snapshot());
        self.notify_draw();
    }

    fn restore(&mut self, snapshot: &InkSnapshot) {
        self.path.restore(snapshot);
        self.compositor.redraw(self.path.segments());
    }

    fn finish_gesture(&mut self, event: GestureEvent) {
        if self.stroke.end() {
            self.commit();
        } else {
            debug!("{event:?} without an active gesture");
        }
        self.notify_gesture(event);
    }
}

impl<B: RasterBackend> SignaturePad for InkCanvas<B> {
    fn clear(&mut self, evict_history: bool) {
        self.path.clear();
        if evict_history {
            self.history.clear();
        } else {
            self.history.rewind();
        }
        self.compositor.clear();
    }

    fn undo(&mut self) {
        match self.history.undo() {
            Transition::None => {}
            Transition::Clear => self.clear(false),
            Transition::Restore(snapshot) => self.restore(&snapshot),
        }
    }

    fn redo(&mut self) {
        match self.history.redo() {
            Transition::None => {}
            Transition::Clear => self.clear(false),
            Transition::Restore(snapshot) => self.restore(&snapshot),
        }
    }

    fn can_undo(&self) -> bool {
        !self.history.is_empty() && !self.path.is_empty()
    }

    fn can_redo(&self) -> bool {
        self.history
            .peek_redo()
            .is_some_and(|snapshot| !self.path.matches(snapshot))
    }

    fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    fn signature(&self) -> Option<&Bitmap> {
        self.compositor.bitmap()
    }

    fn set_signature(&mut self, signature: Option<Bitmap>) {
        self.compositor.set_bitmap(signature);
    }

    fn cropped_signature(&self) -> Option<Bitmap> {
        let bounds = self.path.bounding_box()?;
        self.compositor.crop(bounds, self.style.max_width() / 2.0)
    }

    fn style(&self) -> &StrokeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut StrokeStyle {
        &mut self.style
    }

    fn on_gesture_begin(&mut self, point: Point) {
        if self.stroke.is_active() {
            // A new touch implicitly ends the previous gesture.
            self.stroke.end();
            self.commit();
        }
        self.stroke.begin(point);
        self.notify_gesture(GestureEvent::Began(point));
    }

    fn on_gesture_move(&mut self, point: Point) {
        match self.stroke.advance(point, &self.style) {
            Step::Ribbon(outline) => self.add_ink(outline),
            Step::Idle => debug!("move to {point:?} outside a gesture"),
            Step::Skipped | Step::Degenerate => {}
        }
        self.notify_gesture(GestureEvent::Moved(point));
    }

    fn on_gesture_end(&mut self) {
        self.finish_gesture(GestureEvent::Ended);
    }

    fn on_gesture_cancel(&mut self) {
        self.finish_gesture(GestureEvent::Cancelled);
    }

    fn on_tap(&mut self, point: Point) {
        self.add_ink(dot(point));
        self.commit();
        self.notify_gesture(GestureEvent::Tapped(point));
    }
}
