//! PixColormap - Color palette for indexed images
//!
//! A colormap is used with 1, 2, 4, and 8 bpp images to map pixel
//! values to colors. Storage for all `2^depth` slots is allocated up
//! front; only the first [`PixColormap::len`] slots hold defined colors.
//!
//! # See also
//!
//! C Leptonica: `colormap.c`

mod convert;
pub mod handle;
mod query;
mod serial;

pub use convert::ColormapArrays;
pub use query::BlackOrWhite;

use crate::error::{Error, Result};

/// RGBA color entry
///
/// # See also
///
/// C Leptonica: `RGBA_QUAD` in `pix.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaQuad {
    /// Blue component (stored first for BMP compatibility)
    pub blue: u8,
    /// Green component
    pub green: u8,
    /// Red component
    pub red: u8,
    /// Alpha component; carried along but not interpreted
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// The (r, g, b) triple
    #[inline]
    pub fn to_rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Brightness used for rank selection: r + g + b
    #[inline]
    pub fn intensity(self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32
    }

    /// True if the channels are not all equal
    #[inline]
    pub fn is_chromatic(self) -> bool {
        self.red != self.green || self.red != self.blue
    }
}

/// Colormap for indexed images
///
/// Cloning performs a deep copy of every slot, including the undefined
/// ones beyond `len()`.
///
/// # See also
///
/// C Leptonica: `PIXCMAP` in `pix.h`, `pixcmapCreate()` in `colormap.c`
#[derive(Debug, Clone)]
pub struct PixColormap {
    colors: Box<[RgbaQuad]>,
    n: usize,
    depth: u32,
}

impl PixColormap {
    /// Create a new, empty colormap for the specified depth
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDepth`] unless depth is 1, 2, 4 or 8;
    /// [`Error::AllocationFailed`] if the slots cannot be allocated.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapCreate()`
    pub fn new(depth: u32) -> Result<Self> {
        if !matches!(depth, 1 | 2 | 4 | 8) {
            return Err(Error::InvalidDepth(depth));
        }
        let nalloc = 1usize << depth;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(nalloc)
            .map_err(|_| Error::AllocationFailed)?;
        slots.resize(nalloc, RgbaQuad::default());

        Ok(Self {
            colors: slots.into_boxed_slice(),
            n: 0,
            depth,
        })
    }

    /// Create a full grayscale ramp
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapCreateLinear()`
    pub fn create_linear(depth: u32, dark_to_light: bool) -> Result<Self> {
        let mut cmap = Self::new(depth)?;
        let max = cmap.max_entries() - 1;
        for i in 0..=max {
            let step = if dark_to_light { i } else { max - i };
            cmap.add_color(RgbaQuad::gray((255 * step / max) as u8))?;
        }
        Ok(cmap)
    }

    /// Deep copy with independent storage
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapCopy()`
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Get the depth
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Get the number of defined colors
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetCount()`
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Get maximum number of entries (`2^depth`)
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.colors.len()
    }

    /// Check that depth and count are consistent.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapIsValid()`
    pub fn is_valid(&self) -> bool {
        matches!(self.depth, 1 | 2 | 4 | 8)
            && self.max_entries() == 1 << self.depth
            && self.n <= self.max_entries()
    }

    /// Get a defined color by index
    pub fn get(&self, index: usize) -> Option<&RgbaQuad> {
        self.colors().get(index)
    }

    /// Get a mutable defined color by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut RgbaQuad> {
        self.colors[..self.n].get_mut(index)
    }

    /// Defined colors as a slice
    pub fn colors(&self) -> &[RgbaQuad] {
        &self.colors[..self.n]
    }

    /// Iterate over the defined colors
    pub fn iter(&self) -> std::slice::Iter<'_, RgbaQuad> {
        self.colors().iter()
    }

    /// Append a color, returning its index.
    ///
    /// Duplicates are allowed; see [`PixColormap::add_new_color`] for the
    /// deduplicating form.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExhausted`] if all slots are in use; the colormap
    /// is left unchanged.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapAddColor()`
    pub fn add_color(&mut self, color: RgbaQuad) -> Result<usize> {
        if self.n >= self.max_entries() {
            return Err(Error::CapacityExhausted {
                capacity: self.max_entries(),
            });
        }
        let index = self.n;
        self.colors[index] = color;
        self.n += 1;
        Ok(index)
    }

    /// Add an RGB color
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(RgbaQuad::rgb(r, g, b))
    }

    /// Add an RGBA color
    pub fn add_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) -> Result<usize> {
        self.add_color(RgbaQuad::new(r, g, b, a))
    }

    /// Overwrite a defined entry
    pub fn set_color(&mut self, index: usize, color: RgbaQuad) -> Result<()> {
        let len = self.n;
        let entry = self
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *entry = color;
        Ok(())
    }

    /// Get RGB values at index
    pub fn get_rgb(&self, index: usize) -> Option<(u8, u8, u8)> {
        self.get(index).map(|c| c.to_rgb())
    }

    /// Get RGBA values at index
    pub fn get_rgba(&self, index: usize) -> Option<(u8, u8, u8, u8)> {
        self.get(index).map(|c| (c.red, c.green, c.blue, c.alpha))
    }

    /// Remove all colors (set count to 0).
    ///
    /// Capacity is unchanged.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapClear()`
    pub fn clear(&mut self) {
        self.n = 0;
    }
}

/// Colormaps are equal when depth and the defined entries match;
/// undefined slots are ignored.
impl PartialEq for PixColormap {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.colors() == other.colors()
    }
}

impl Eq for PixColormap {}

impl<'a> IntoIterator for &'a PixColormap {
    type Item = &'a RgbaQuad;
    type IntoIter = std::slice::Iter<'a, RgbaQuad>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
