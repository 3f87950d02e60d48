// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font descriptors and the size-indexed font cache.
//!
//! A [`Font`] is an immutable description (family, style flags, point size)
//! that backends resolve to a native font object. To let a backend key its
//! native objects by *identity* rather than by value, the four common system
//! categories are served out of a [`FontCache`] that returns the same shared
//! [`Arc`] for repeated requests of a small size. The cache is an explicitly
//! owned object rather than process-wide state, so two caches never alias
//! and tests stay deterministic; whoever owns the cache decides how it is
//! shared between threads.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Family name used by the system font categories.
pub const SYSTEM_FAMILY: &str = "SystemFont";

/// Family name used by the fixed-pitch font categories.
pub const FIXED_PITCH_FAMILY: &str = "Monospace";

/// Style flags carried by a [`Font`].
///
/// `italic` is carried through to backends, but no current category or
/// behavior sets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontOptions {
    /// Request a bold face.
    pub bold: bool,
    /// Request an italic face.
    pub italic: bool,
}

impl FontOptions {
    /// No styling.
    pub const NONE: Self = Self {
        bold: false,
        italic: false,
    };
    /// Bold, upright.
    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
    };
    /// Italic, regular weight.
    pub const ITALIC: Self = Self {
        bold: false,
        italic: true,
    };
}

/// An immutable font description.
///
/// Equality and hashing cover family, options, and size; the backend tag is
/// invisible to both. Cached instances are shared as `Arc<Font>`, so a
/// backend can treat pointer identity as a cache key for its native font
/// objects.
pub struct Font {
    family: String,
    options: FontOptions,
    size: u32,
    tag: OnceLock<Box<dyn Any + Send + Sync>>,
}

static_assertions::assert_impl_all!(Font: Send, Sync);

impl Font {
    /// Create a font with an explicit family and style.
    pub fn new(family: impl Into<String>, options: FontOptions, size: u32) -> Self {
        Self {
            family: family.into(),
            options,
            size,
            tag: OnceLock::new(),
        }
    }

    /// Create an unstyled font for a named family.
    ///
    /// The result is always a fresh instance; named fonts are never cached.
    pub fn from_name(name: impl Into<String>, size: u32) -> Self {
        Self::new(name, FontOptions::NONE, size)
    }

    /// The font family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The style flags.
    pub fn options(&self) -> FontOptions {
        self.options
    }

    /// The point size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether the bold flag is set.
    pub fn is_bold(&self) -> bool {
        self.options.bold
    }

    /// Attach a backend-owned object to this font.
    ///
    /// The slot is write-once: the first call stores the value, and any
    /// later call returns the rejected value unchanged. Typical use is a
    /// backend stashing its resolved native font against a cached instance.
    pub fn set_tag(
        &self,
        tag: Box<dyn Any + Send + Sync>,
    ) -> std::result::Result<(), Box<dyn Any + Send + Sync>> {
        self.tag.set(tag)
    }

    /// The attached backend object, if any.
    pub fn tag(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.tag.get().map(|tag| &**tag)
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.options == other.options && self.size == other.size
    }
}

impl Eq for Font {}

impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.options.hash(state);
        self.size.hash(state);
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family)
            .field("options", &self.options)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if self.options.bold {
            write!(f, " Bold")?;
        }
        if self.options.italic {
            write!(f, " Italic")?;
        }
        write!(f, " {}", self.size)
    }
}

/// One of the four cached font categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontCategory {
    /// The plain system font.
    System,
    /// The bold system font.
    BoldSystem,
    /// The fixed-pitch font.
    FixedPitch,
    /// The bold fixed-pitch font.
    BoldFixedPitch,
}

impl FontCategory {
    fn family(self) -> &'static str {
        match self {
            Self::System | Self::BoldSystem => SYSTEM_FAMILY,
            Self::FixedPitch | Self::BoldFixedPitch => FIXED_PITCH_FAMILY,
        }
    }

    fn options(self) -> FontOptions {
        match self {
            Self::System | Self::FixedPitch => FontOptions::NONE,
            Self::BoldSystem | Self::BoldFixedPitch => FontOptions::BOLD,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::System => 0,
            Self::BoldSystem => 1,
            Self::FixedPitch => 2,
            Self::BoldFixedPitch => 3,
        }
    }
}

/// Default upper bound (exclusive) on cached point sizes.
pub const DEFAULT_CACHE_BOUND: u32 = 128;

/// A size-indexed cache of the four system font categories.
///
/// Each category is a sparse array indexed by point size. The first request
/// for a size below the bound allocates and stores a shared instance;
/// repeats return the same `Arc`, so `Arc::ptr_eq` holds. Sizes at or past
/// the bound are served fresh and uncached, so unusually large sizes never
/// benefit from identity reuse.
#[derive(Debug)]
pub struct FontCache {
    bound: u32,
    slots: [Vec<Option<Arc<Font>>>; 4],
}

impl FontCache {
    /// Create a cache with the default size bound.
    pub fn new() -> Self {
        Self::with_bound(DEFAULT_CACHE_BOUND)
    }

    /// Create a cache that only caches sizes below `bound`.
    pub fn with_bound(bound: u32) -> Self {
        Self {
            bound,
            slots: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// The exclusive upper bound on cached sizes.
    pub fn bound(&self) -> u32 {
        self.bound
    }

    /// Look up a font, allocating and caching it on first use.
    pub fn get(&mut self, category: FontCategory, size: u32) -> Arc<Font> {
        if size >= self.bound {
            return Arc::new(Font::new(category.family(), category.options(), size));
        }
        let slots = &mut self.slots[category.index()];
        let index = size as usize;
        if slots.len() <= index {
            slots.resize_with(index + 1, || None);
        }
        slots[index]
            .get_or_insert_with(|| Arc::new(Font::new(category.family(), category.options(), size)))
            .clone()
    }

    /// The system font of the given size.
    pub fn system(&mut self, size: u32) -> Arc<Font> {
        self.get(FontCategory::System, size)
    }

    /// The bold system font of the given size.
    pub fn bold_system(&mut self, size: u32) -> Arc<Font> {
        self.get(FontCategory::BoldSystem, size)
    }

    /// The fixed-pitch font of the given size.
    pub fn fixed_pitch(&mut self, size: u32) -> Arc<Font> {
        self.get(FontCategory::FixedPitch, size)
    }

    /// The bold fixed-pitch font of the given size.
    pub fn bold_fixed_pitch(&mut self, size: u32) -> Arc<Font> {
        self.get(FontCategory::BoldFixedPitch, size)
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}
