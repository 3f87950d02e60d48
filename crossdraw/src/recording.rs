// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command-recording implementation of the drawing contract.
//!
//! [`RecordingContext`] resolves every call against the current state at the
//! moment it is issued: geometry is mapped through the active transform into
//! device space, and the active color (and font, for text) is captured into
//! the emitted [`Command`]. The result is the exact stream a rasterizing
//! backend would consume, which makes the recorder both the reference for
//! the contract's state semantics and the harness the contract is tested
//! with.

use std::sync::Arc;

use crate::color::Color;
use crate::context::{EntityId, LineBreakMode, RenderContext, TextAlignment};
use crate::font::Font;
use crate::image::Image;
use crate::kurbo::{Point, Rect, Size, Vec2};
use crate::offscreen::{OffscreenFrame, OffscreenStack};
use crate::state::{ContextState, LineSegment};
use crate::{Error, Result};

/// A drawing call resolved into device space.
///
/// Rectangular geometry is exact: the contract composes only translations
/// and axis-aligned scales, so mapped rectangles stay axis-aligned. Arcs
/// record their mapped center and per-axis radii. Stroke widths are
/// recorded as given, unscaled.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Annotation associating subsequent commands with an entity.
    BeginEntity(EntityId),
    /// Fill a rectangle.
    FillRect { rect: Rect, color: Color },
    /// Stroke a rectangle outline.
    DrawRect {
        rect: Rect,
        stroke_width: f64,
        color: Color,
    },
    /// Fill a rounded rectangle.
    FillRoundedRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    /// Stroke a rounded rectangle outline.
    DrawRoundedRect {
        rect: Rect,
        radius: f64,
        stroke_width: f64,
        color: Color,
    },
    /// Fill an oval inscribed in `rect`.
    FillOval { rect: Rect, color: Color },
    /// Stroke an oval outline.
    DrawOval {
        rect: Rect,
        stroke_width: f64,
        color: Color,
    },
    /// Fill a circular arc.
    FillArc {
        center: Point,
        radii: Vec2,
        start_angle: f64,
        end_angle: f64,
        color: Color,
    },
    /// Stroke a circular arc.
    DrawArc {
        center: Point,
        radii: Vec2,
        start_angle: f64,
        end_angle: f64,
        stroke_width: f64,
        color: Color,
    },
    /// One flushed line batch.
    Lines {
        rounded: bool,
        segments: Vec<LineSegment>,
        color: Color,
    },
    /// Draw an image into `dest`. `image_id` is set when the source is a
    /// [`RecordingImage`].
    DrawImage { image_id: Option<u64>, dest: Rect },
    /// Lay out text within `bounds`.
    DrawString {
        text: String,
        bounds: Rect,
        line_break: LineBreakMode,
        horizontal: TextAlignment,
        vertical: TextAlignment,
        font: Arc<Font>,
        color: Color,
    },
    /// A previous image composited into a freshly pushed offscreen target.
    CompositePrevious { size: Size },
}

/// An image handle produced by [`RecordingContext`]'s `end_offscreen`.
///
/// Holds the command stream that was rendered into the offscreen target.
/// `destroy` releases that storage; the handle then refuses all further use.
#[derive(Debug)]
pub struct RecordingImage {
    id: u64,
    size: Size,
    commands: Vec<Command>,
    destroyed: bool,
}

impl RecordingImage {
    /// A recorder-unique id, usable as a stand-in for a native texture
    /// handle.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The commands rendered into this image.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl Image for RecordingImage {
    fn natural_size(&self) -> Size {
        self.size
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(Error::ImageDestroyed);
        }
        self.destroyed = true;
        self.commands = Vec::new();
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Drop for RecordingImage {
    fn drop(&mut self) {
        if !self.destroyed {
            log::warn!("recording image {} dropped without destroy", self.id);
        }
    }
}

/// A non-rasterizing [`RenderContext`] that captures resolved commands.
#[derive(Debug, Default)]
pub struct RecordingContext {
    state: ContextState,
    commands: Vec<Command>,
    offscreen: OffscreenStack<Vec<Command>>,
    next_image_id: u64,
}

impl RecordingContext {
    /// Create a recorder with the default drawing state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state scaffold, for inspection.
    pub fn state(&self) -> &ContextState {
        &self.state
    }

    /// The top-level commands recorded so far. Commands issued inside an
    /// open offscreen target are not included.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Consume the recorder, yielding the top-level command stream.
    ///
    /// Fails with [`Error::UnfinishedFrame`] if a line session or an
    /// offscreen target is still open.
    pub fn finish(self) -> Result<Vec<Command>> {
        if self.state.line_session_open() || !self.offscreen.is_empty() {
            return Err(Error::UnfinishedFrame);
        }
        Ok(self.commands)
    }

    fn record(&mut self, command: Command) {
        match self.offscreen.top_mut() {
            Some(frame) => frame.surface.push(command),
            None => self.commands.push(command),
        }
    }

    fn arc_command(
        &self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke_width: Option<f64>,
    ) -> Command {
        let (sx, sy) = self.state.scale_factors();
        let center = self.state.map_point(cx, cy);
        let radii = Vec2::new((radius * sx).abs(), (radius * sy).abs());
        let color = self.state.color();
        match stroke_width {
            None => Command::FillArc {
                center,
                radii,
                start_angle,
                end_angle,
                color,
            },
            Some(stroke_width) => Command::DrawArc {
                center,
                radii,
                start_angle,
                end_angle,
                stroke_width,
                color,
            },
        }
    }
}

fn positive_size(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn skip_degenerate(op: &'static str) {
    log::trace!("{op}: degenerate geometry, skipping");
}

impl RenderContext for RecordingContext {
    fn begin_entity(&mut self, entity: EntityId) {
        self.record(Command::BeginEntity(entity));
    }

    fn set_font(&mut self, font: Arc<Font>) {
        self.state.set_font(font);
    }

    fn set_color(&mut self, color: Color) {
        self.state.set_color(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !positive_size(width, height) {
            skip_degenerate("fill_rect");
            return;
        }
        let rect = self.state.map_rect(x, y, width, height);
        let color = self.state.color();
        self.record(Command::FillRect { rect, color });
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke_width: f64) {
        if !positive_size(width, height) || !positive(stroke_width) {
            skip_degenerate("draw_rect");
            return;
        }
        let rect = self.state.map_rect(x, y, width, height);
        let color = self.state.color();
        self.record(Command::DrawRect {
            rect,
            stroke_width,
            color,
        });
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        if !positive_size(width, height) || !positive(radius) {
            skip_degenerate("fill_rounded_rect");
            return;
        }
        let rect = self.state.map_rect(x, y, width, height);
        let color = self.state.color();
        self.record(Command::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        stroke_width: f64,
    ) {
        if !positive_size(width, height) || !positive(radius) || !positive(stroke_width) {
            skip_degenerate("draw_rounded_rect");
            return;
        }
        let rect = self.state.map_rect(x, y, width, height);
        let color = self.state.color();
        self.record(Command::DrawRoundedRect {
            rect,
            radius,
            stroke_width,
            color,
        });
    }

    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !positive_size(width, height) {
            skip_degenerate("fill_oval");
            return;
        }
        let rect = self.state.map_rect(x, y, width, height);
        let color = self.state.color();
        self.record(Command::FillOval { rect, color });
    }

    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64, stroke_width: f64) {
        if !positive_size(width, height) || !positive(stroke_width) {
            skip_degenerate("draw_oval");
            return;
        }
        let rect = self.state.map_rect(x, y, width, height);
        let color = self.state.color();
        self.record(Command::DrawOval {
            rect,
            stroke_width,
            color,
        });
    }

    fn begin_lines(&mut self, rounded: bool) -> Result<()> {
        self.state.begin_lines(rounded)
    }

    fn draw_line(&mut self, sx: f64, sy: f64, ex: f64, ey: f64, width: f64) -> Result<()> {
        if !self.state.line_session_open() {
            return Err(Error::LineSessionNotOpen);
        }
        if !positive(width) {
            skip_degenerate("draw_line");
            return Ok(());
        }
        let segment = LineSegment {
            start: self.state.map_point(sx, sy),
            end: self.state.map_point(ex, ey),
            width,
        };
        self.state.push_line(segment)
    }

    fn end_lines(&mut self) -> Result<()> {
        let session = self.state.end_lines()?;
        if session.segments().is_empty() {
            skip_degenerate("end_lines");
            return Ok(());
        }
        let rounded = session.rounded();
        let color = self.state.color();
        self.record(Command::Lines {
            rounded,
            segments: session.into_segments().into_vec(),
            color,
        });
        Ok(())
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        if !positive(radius) || !start_angle.is_finite() || !end_angle.is_finite() {
            skip_degenerate("fill_arc");
            return;
        }
        let command = self.arc_command(cx, cy, radius, start_angle, end_angle, None);
        self.record(command);
    }

    fn draw_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke_width: f64,
    ) {
        if !positive(radius)
            || !positive(stroke_width)
            || !start_angle.is_finite()
            || !end_angle.is_finite()
        {
            skip_degenerate("draw_arc");
            return;
        }
        let command = self.arc_command(cx, cy, radius, start_angle, end_angle, Some(stroke_width));
        self.record(command);
    }

    fn draw_image_scaled(
        &mut self,
        image: &dyn Image,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        if image.is_destroyed() {
            return Err(Error::ImageDestroyed);
        }
        if !positive_size(width, height) {
            skip_degenerate("draw_image");
            return Ok(());
        }
        let dest = self.state.map_rect(x, y, width, height);
        let image_id = image
            .as_any()
            .downcast_ref::<RecordingImage>()
            .map(RecordingImage::id);
        self.record(Command::DrawImage { image_id, dest });
        Ok(())
    }

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
    ) {
        if !positive_size(width, height) {
            skip_degenerate("draw_string");
            return;
        }
        let bounds = self.state.map_rect(x, y, width, height);
        let font = self.state.font().clone();
        let color = self.state.color();
        self.record(Command::DrawString {
            text: text.to_owned(),
            bounds,
            line_break,
            horizontal,
            vertical,
            font,
            color,
        });
    }

    fn save_state(&mut self) {
        self.state.save();
    }

    fn restore_state(&mut self) -> Result<()> {
        self.state.restore()
    }

    fn set_clipping_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.state.set_clip_rect(x, y, width, height);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
    }

    fn begin_offscreen(
        &mut self,
        width: f64,
        height: f64,
        previous: Option<&dyn Image>,
    ) -> Result<()> {
        let mut surface = Vec::new();
        let mut composited_previous = false;
        if let Some(previous) = previous {
            if previous.is_destroyed() {
                return Err(Error::ImageDestroyed);
            }
            surface.push(Command::CompositePrevious {
                size: previous.natural_size(),
            });
            composited_previous = true;
        }
        self.offscreen.push(OffscreenFrame {
            surface,
            width,
            height,
            composited_previous,
        });
        Ok(())
    }

    fn end_offscreen(&mut self) -> Result<Box<dyn Image>> {
        let frame = self.offscreen.pop()?;
        let id = self.next_image_id;
        self.next_image_id += 1;
        Ok(Box::new(RecordingImage {
            id,
            size: Size::new(frame.width, frame.height),
            commands: frame.surface,
            destroyed: false,
        }))
    }
}
