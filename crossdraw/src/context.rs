// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing contract implemented by every rendering backend.

use std::sync::Arc;

use crate::color::Color;
use crate::font::Font;
use crate::image::Image;
use crate::Result;

/// How [`RenderContext::draw_string`] handles text that does not fit its
/// layout box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineBreakMode {
    /// Lay the text out on a single line, letting it overflow the box.
    None,
    /// Lay the text out on a single line, clipped to the box.
    Clip,
    /// Wrap at word boundaries within the box.
    WordWrap,
}

/// Placement of text along one axis of its layout box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Leading edge: left, or top.
    Start,
    /// Centered.
    Center,
    /// Trailing edge: right, or bottom.
    End,
}

/// An opaque client-supplied reference associating draws with an
/// application entity, for backend-side hit-testing or debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// The drawing contract.
///
/// A context interprets an immediate-mode stream of drawing calls under its
/// current state: a coordinate transform accumulated by [`translate`] and
/// [`scale`], an optional clip rectangle, and the active [`Font`] and
/// [`Color`]. Backends are interchangeable; client code is written against
/// this trait and dispatch is static per context instance.
///
/// All geometry is given as `f64` scalars in the context's current
/// coordinate space. Angles are radians measured from the positive x-axis.
///
/// # Degenerate input
///
/// A primitive given a zero, negative, or non-finite width, height, radius,
/// or stroke width draws nothing. This is never an error: the call is a
/// silent no-op and the context stays usable.
///
/// # Protocol errors
///
/// The stateful sub-protocols fail fast with
/// [`ErrorKind::InvalidState`][crate::ErrorKind::InvalidState]: a
/// [`draw_line`] outside a line session, unbalanced [`begin_lines`] /
/// [`end_lines`], a [`restore_state`] on an empty stack, and an
/// [`end_offscreen`] with no open target. Using a destroyed [`Image`] is
/// [`ErrorKind::ResourceMisuse`][crate::ErrorKind::ResourceMisuse]. A
/// backend must not abort the process on malformed geometry.
///
/// [`translate`]: Self::translate
/// [`scale`]: Self::scale
/// [`draw_line`]: Self::draw_line
/// [`begin_lines`]: Self::begin_lines
/// [`end_lines`]: Self::end_lines
/// [`restore_state`]: Self::restore_state
/// [`end_offscreen`]: Self::end_offscreen
pub trait RenderContext {
    /// Associate subsequent draws with an application entity.
    ///
    /// Pure annotation: this has no effect on pixel output.
    fn begin_entity(&mut self, entity: EntityId);

    /// Set the font used by subsequent [`draw_string`][Self::draw_string]
    /// calls. Already-issued draws are unaffected.
    fn set_font(&mut self, font: Arc<Font>);

    /// Set the color used by subsequent drawing calls. Already-issued draws
    /// are unaffected.
    fn set_color(&mut self, color: Color);

    /// Fill a rectangle with the current color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Stroke a rectangle's outline with the current color.
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke_width: f64);

    /// Fill a rounded rectangle with the current color.
    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);

    /// Stroke a rounded rectangle's outline with the current color.
    fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        stroke_width: f64,
    );

    /// Fill an oval inscribed in the given rectangle with the current color.
    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Stroke an oval's outline with the current color.
    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64, stroke_width: f64);

    /// Open a batched line session.
    ///
    /// Until the matching [`end_lines`][Self::end_lines], every
    /// [`draw_line`][Self::draw_line] accumulates a segment of one logical
    /// polyline, submitted to the backend as a single batch. `rounded`
    /// requests rounded joins and caps for the whole batch instead of
    /// per-segment caps. Batching exists so a backend can submit one native
    /// path or vertex buffer rather than one draw call per segment.
    fn begin_lines(&mut self, rounded: bool) -> Result<()>;

    /// Add a segment to the open line session.
    fn draw_line(&mut self, sx: f64, sy: f64, ex: f64, ey: f64, width: f64) -> Result<()>;

    /// Close the line session and flush the accumulated batch.
    fn end_lines(&mut self) -> Result<()>;

    /// Fill a circular arc around `(cx, cy)` with the current color.
    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);

    /// Stroke a circular arc around `(cx, cy)` with the current color.
    fn draw_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke_width: f64,
    );

    /// Draw an image at its natural size.
    fn draw_image(&mut self, image: &dyn Image, x: f64, y: f64) -> Result<()> {
        let size = image.natural_size();
        self.draw_image_scaled(image, x, y, size.width, size.height)
    }

    /// Draw an image scaled into the given rectangle.
    fn draw_image_scaled(
        &mut self,
        image: &dyn Image,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()>;

    /// Lay out and draw text within a box using the current font and color.
    ///
    /// Glyph layout and rasterization are entirely the backend's; the
    /// contract only carries the request.
    #[allow(clippy::too_many_arguments)]
    fn draw_string(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_break: LineBreakMode,
        horizontal: TextAlignment,
        vertical: TextAlignment,
    );

    /// Push a copy of the current state (transform, clip, font, color) onto
    /// the state stack.
    fn save_state(&mut self);

    /// Pop the state stack, restoring all four state fields atomically.
    fn restore_state(&mut self) -> Result<()>;

    /// Replace the clip region with the given rectangle.
    ///
    /// The rectangle is expressed in the current coordinate space and is
    /// mapped through the active transform. It *replaces* any previous
    /// clip; backends that need intersection semantics compose it
    /// themselves with [`save_state`][Self::save_state].
    fn set_clipping_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Post-multiply a translation onto the current transform.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Post-multiply an axis-aligned scale onto the current transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Push an offscreen render target.
    ///
    /// Until the matching [`end_offscreen`][Self::end_offscreen], all
    /// primitives target the pushed surface. If `previous` is given, it is
    /// composited into the new target immediately; the caller keeps
    /// ownership of the handle (and the obligation to destroy it).
    /// Targets nest; the backend bounds the depth.
    fn begin_offscreen(
        &mut self,
        width: f64,
        height: f64,
        previous: Option<&dyn Image>,
    ) -> Result<()>;

    /// Pop the current offscreen target, returning its rendered contents.
    fn end_offscreen(&mut self) -> Result<Box<dyn Image>>;
}
