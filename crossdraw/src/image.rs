// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque image handles.

use std::any::Any;

use crate::kurbo::Size;
use crate::Result;

/// A handle to a backend-owned image.
///
/// Images are produced by offscreen rendering
/// ([`RenderContext::end_offscreen`][crate::RenderContext::end_offscreen])
/// or supplied by the host, and are consumed by
/// [`RenderContext::draw_image`][crate::RenderContext::draw_image]. The
/// handle owns native resources with no automatic reclamation: the holder
/// must call [`destroy`][Self::destroy] exactly once on every handle it
/// receives, on every exit path. Any use after `destroy`, including a second
/// `destroy`, fails with [`Error::ImageDestroyed`][crate::Error::ImageDestroyed].
pub trait Image {
    /// The pixel dimensions the image was created with.
    fn natural_size(&self) -> Size;

    /// Whether [`destroy`][Self::destroy] has been called.
    fn is_destroyed(&self) -> bool;

    /// Release the backend resources behind this handle.
    fn destroy(&mut self) -> Result<()>;

    /// Downcasting support, letting a backend recover its concrete image
    /// type from a `&dyn Image`.
    fn as_any(&self) -> &dyn Any;
}
