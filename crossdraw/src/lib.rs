// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crossdraw is a device-independent 2D drawing contract.
//!
//! A single stream of immediate-mode drawing calls (rectangles, ovals, arcs,
//! polylines, text, images) is issued against a [`RenderContext`], and any
//! number of native backends can implement that trait to interpret the
//! stream. The crate defines the contract and everything it is parameterized
//! over; rasterization, glyph shaping, and image decoding are left entirely
//! to the implementing backend.
//!
//! # Contents
//!
//! - [`RenderContext`], the trait every backend implements, together with the
//!   [`LineBreakMode`] and [`TextAlignment`] enums and the [`Image`] handle
//!   capability.
//! - [`Color`] and [`Font`], the two value types drawing state is built
//!   from, with the named [`palette`] constants and the size-indexed
//!   [`FontCache`].
//! - [`GraphicsState`], [`ContextState`], and [`OffscreenStack`], the state
//!   scaffold a backend embeds to inherit the save/restore, line-session,
//!   and render-target bookkeeping.
//! - [`RecordingContext`], a non-rasterizing reference implementation that
//!   resolves every call into a device-space [`Command`] stream.
//!
//! # Example
//!
//! ```
//! use crossdraw::{palette, RecordingContext, RenderContext};
//!
//! let mut ctx = RecordingContext::new();
//! ctx.set_color(palette::RED);
//! ctx.fill_rect(0.0, 0.0, 100.0, 50.0);
//! ctx.translate(10.0, 10.0);
//! ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
//! let commands = ctx.finish().unwrap();
//! assert_eq!(commands.len(), 2);
//! ```
//!
//! # Threading
//!
//! A context is single-threaded: one thread issues the full call
//! sequence for a frame. The state stack and line-session flag carry no
//! internal synchronization. [`Color`], [`Font`], and the enums are
//! `Send + Sync` values and may be shared freely.

#![forbid(unsafe_code)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]

pub mod color;
pub mod context;
pub mod font;
pub mod image;
pub mod offscreen;
pub mod recording;
pub mod state;

/// 2D geometry, with a focus on curves.
pub use peniko::kurbo;

pub use color::{palette, Color};
pub use context::{EntityId, LineBreakMode, RenderContext, TextAlignment};
pub use font::{Font, FontCache, FontCategory, FontOptions};
pub use image::Image;
pub use offscreen::{OffscreenFrame, OffscreenStack};
pub use recording::{Command, RecordingContext, RecordingImage};
pub use state::{ContextState, GraphicsState, LineSegment, LineSession};

use thiserror::Error;

/// Errors that can occur in the drawing contract.
///
/// The contract fails fast on protocol violations and never recovers or
/// retries on behalf of the caller. Degenerate geometry (zero or negative
/// width, height, or radius, or non-finite coordinates) is not an error:
/// such draws are silent no-ops.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// `begin_lines` was called while a line session was already open.
    #[error("a line session is already open")]
    LineSessionAlreadyOpen,
    /// `draw_line` or `end_lines` was called without an open line session.
    #[error("no line session is open")]
    LineSessionNotOpen,
    /// `restore_state` was called with no saved state left to pop.
    #[error("the state stack is empty")]
    StateStackEmpty,
    /// `end_offscreen` was called without a matching `begin_offscreen`.
    #[error("no offscreen target is open")]
    NoOffscreenTarget,
    /// The context was finished while a line session or an offscreen target
    /// was still open.
    #[error("context finished with an open line session or offscreen target")]
    UnfinishedFrame,
    /// An [`Image`] handle was used after `destroy`.
    #[error("image was already destroyed")]
    ImageDestroyed,
}

impl Error {
    /// The class of failure this error represents.
    pub fn kind(self) -> ErrorKind {
        match self {
            Self::ImageDestroyed => ErrorKind::ResourceMisuse,
            Self::LineSessionAlreadyOpen
            | Self::LineSessionNotOpen
            | Self::StateStackEmpty
            | Self::NoOffscreenTarget
            | Self::UnfinishedFrame => ErrorKind::InvalidState,
        }
    }
}

/// Coarse classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A stateful protocol (line session, state stack, offscreen stack) was
    /// driven out of order.
    InvalidState,
    /// A backend-owned resource was used after it was released.
    ResourceMisuse,
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
