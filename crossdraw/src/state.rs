// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State snapshots and the save/restore scaffold backends embed.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::color::{palette, Color};
use crate::font::{Font, SYSTEM_FAMILY};
use crate::kurbo::{Affine, Point, Rect};
use crate::{Error, Result};

/// One snapshot of the four stateful fields a context draws under.
#[derive(Clone, Debug)]
pub struct GraphicsState {
    /// The composed coordinate transform.
    pub transform: Affine,
    /// The active clip rectangle in device space, if any.
    pub clip: Option<Rect>,
    /// The font used for text.
    pub font: Arc<Font>,
    /// The color used for filling and stroking.
    pub color: Color,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clip: None,
            font: Arc::new(Font::from_name(SYSTEM_FAMILY, 16)),
            color: palette::BLACK,
        }
    }
}

impl PartialEq for GraphicsState {
    fn eq(&self, other: &Self) -> bool {
        self.transform.as_coeffs() == other.transform.as_coeffs()
            && self.clip == other.clip
            && self.font == other.font
            && self.color == other.color
    }
}

/// A single segment accumulated in a line session, in device space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    /// Segment start point.
    pub start: Point,
    /// Segment end point.
    pub end: Point,
    /// Stroke width.
    pub width: f64,
}

/// An open batched-line session.
///
/// Segments accumulate between `begin_lines` and `end_lines` and are
/// flushed to the backend as one batch.
#[derive(Clone, Debug)]
pub struct LineSession {
    rounded: bool,
    segments: SmallVec<[LineSegment; 8]>,
}

impl LineSession {
    fn new(rounded: bool) -> Self {
        Self {
            rounded,
            segments: SmallVec::new(),
        }
    }

    /// Whether the batch was requested with rounded joins and caps.
    pub fn rounded(&self) -> bool {
        self.rounded
    }

    /// The segments accumulated so far.
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Consume the session, yielding its segments.
    pub fn into_segments(self) -> SmallVec<[LineSegment; 8]> {
        self.segments
    }
}

/// The current state, its LIFO history, and the line-session flag.
///
/// Backends embed one of these per context instance and route the
/// state-management half of the contract through it, so the protocol
/// bookkeeping (and its error cases) is implemented once. No internal
/// synchronization: a context is driven by one thread at a time.
#[derive(Debug, Default)]
pub struct ContextState {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
    session: Option<LineSession>,
}

impl ContextState {
    /// Create a state scaffold with the default state: identity transform,
    /// no clip, black, system font at size 16.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state snapshot.
    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    /// The current transform.
    pub fn transform(&self) -> Affine {
        self.current.transform
    }

    /// The current device-space clip rectangle, if any.
    pub fn clip(&self) -> Option<Rect> {
        self.current.clip
    }

    /// The current font.
    pub fn font(&self) -> &Arc<Font> {
        &self.current.font
    }

    /// The current color.
    pub fn color(&self) -> Color {
        self.current.color
    }

    /// Replace the current font.
    pub fn set_font(&mut self, font: Arc<Font>) {
        self.current.font = font;
    }

    /// Replace the current color.
    pub fn set_color(&mut self, color: Color) {
        self.current.color = color;
    }

    /// The number of saved snapshots.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop the most recent save, restoring all four fields at once.
    pub fn restore(&mut self) -> Result<()> {
        self.current = self.saved.pop().ok_or(Error::StateStackEmpty)?;
        Ok(())
    }

    /// Post-multiply a translation onto the current transform.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current.transform *= Affine::translate((dx, dy));
    }

    /// Post-multiply an axis-aligned scale onto the current transform.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current.transform *= Affine::scale_non_uniform(sx, sy);
    }

    /// Replace the clip with a rectangle given in the current coordinate
    /// space.
    ///
    /// The rectangle is mapped through the current transform and *replaces*
    /// any previous clip. Since the contract only composes translations and
    /// axis-aligned scales, the mapping is exact. A degenerate rectangle
    /// leaves the clip unchanged.
    pub fn set_clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::trace!("ignoring degenerate clip rect {width}x{height}");
            return;
        }
        self.current.clip = Some(self.map_rect(x, y, width, height));
    }

    /// Map a point from the current coordinate space to device space.
    pub fn map_point(&self, x: f64, y: f64) -> Point {
        self.current.transform * Point::new(x, y)
    }

    /// Map an axis-aligned rectangle to device space.
    pub fn map_rect(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        self.current
            .transform
            .transform_rect_bbox(Rect::new(x, y, x + width, y + height))
    }

    /// The per-axis scale factors of the current transform.
    pub fn scale_factors(&self) -> (f64, f64) {
        let [sx, _, _, sy, _, _] = self.current.transform.as_coeffs();
        (sx, sy)
    }

    /// Whether a line session is open.
    pub fn line_session_open(&self) -> bool {
        self.session.is_some()
    }

    /// Open a line session.
    pub fn begin_lines(&mut self, rounded: bool) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::LineSessionAlreadyOpen);
        }
        self.session = Some(LineSession::new(rounded));
        Ok(())
    }

    /// Append a segment to the open session.
    pub fn push_line(&mut self, segment: LineSegment) -> Result<()> {
        self.session
            .as_mut()
            .ok_or(Error::LineSessionNotOpen)?
            .segments
            .push(segment);
        Ok(())
    }

    /// Close the session, yielding the accumulated batch for submission.
    pub fn end_lines(&mut self) -> Result<LineSession> {
        self.session.take().ok_or(Error::LineSessionNotOpen)
    }
}
