//! PixColormap lookup, insertion and random access
//!
//! # See also
//!
//! C Leptonica: `colormap.c`

use super::PixColormap;
use crate::error::{Error, Result};
use crate::sort::{SortOrder, sort_index};

/// Selects pure black or pure white.
///
/// # See also
///
/// C Leptonica: `color` argument of `pixcmapAddBlackOrWhite()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackOrWhite {
    /// (0, 0, 0), darkest rank
    Black,
    /// (255, 255, 255), lightest rank
    White,
}

impl BlackOrWhite {
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            BlackOrWhite::Black => (0, 0, 0),
            BlackOrWhite::White => (255, 255, 255),
        }
    }

    fn rank(self) -> f32 {
        match self {
            BlackOrWhite::Black => 0.0,
            BlackOrWhite::White => 1.0,
        }
    }
}

impl PixColormap {
    /// Get the number of unused (free) entries.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetFreeCount()`
    pub fn free_count(&self) -> usize {
        self.max_entries() - self.len()
    }

    /// Get the RGB color of a defined entry.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetColor()`
    pub fn get_color(&self, index: usize) -> Result<(u8, u8, u8)> {
        self.get_rgb(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Reset the RGB color of an existing entry; alpha is kept.
    ///
    /// This never changes the count.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapResetColor()`
    pub fn reset_color(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<()> {
        let len = self.len();
        let entry = self
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        entry.red = r;
        entry.green = g;
        entry.blue = b;
        Ok(())
    }

    /// Find the index of the first exact RGB match.
    ///
    /// Returns `None` when the color is not among the defined entries.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetIndex()`
    pub fn get_index(&self, r: u8, g: u8, b: u8) -> Option<usize> {
        self.colors()
            .iter()
            .position(|c| c.red == r && c.green == g && c.blue == b)
    }

    /// Add a color only if it does not already exist.
    ///
    /// Returns the index of the existing entry, or of the newly added one.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExhausted`] if the color is absent and the
    /// colormap is full.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapAddNewColor()`
    pub fn add_new_color(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        if let Some(idx) = self.get_index(r, g, b) {
            return Ok(idx);
        }
        self.add_rgb(r, g, b)
    }

    /// Add black or white, falling back to the nearest intensity if full.
    ///
    /// With a free slot this behaves like [`PixColormap::add_new_color`].
    /// Otherwise the darkest (black) or lightest (white) existing entry is
    /// returned.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapAddBlackOrWhite()`
    pub fn add_black_or_white(&mut self, which: BlackOrWhite) -> Result<usize> {
        if self.free_count() > 0 {
            let (r, g, b) = which.rgb();
            self.add_new_color(r, g, b)
        } else {
            self.get_rank_intensity(which.rank())
        }
    }

    /// Set the darkest color to pure black and/or the lightest to pure white.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapSetBlackAndWhite()`
    pub fn set_black_and_white(&mut self, set_black: bool, set_white: bool) -> Result<()> {
        if set_black {
            let idx = self.get_rank_intensity(0.0)?;
            self.reset_color(idx, 0, 0, 0)?;
        }
        if set_white {
            let idx = self.get_rank_intensity(1.0)?;
            self.reset_color(idx, 255, 255, 255)?;
        }
        Ok(())
    }

    /// True if any defined entry is not a shade of gray.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapHasColor()`
    pub fn has_color(&self) -> bool {
        self.colors().iter().any(|c| c.is_chromatic())
    }

    /// Count unique gray colors (entries where r == g == b).
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapCountGrayColors()`
    pub fn count_gray_colors(&self) -> usize {
        let mut seen = [false; 256];
        let mut count = 0;
        for c in self.colors() {
            if !c.is_chromatic() && !seen[c.red as usize] {
                seen[c.red as usize] = true;
                count += 1;
            }
        }
        count
    }

    /// Get the index of the color at a given intensity rank.
    ///
    /// Intensity is `r + g + b`. `rank` is in [0.0, 1.0] where 0.0 is the
    /// darkest entry and 1.0 the lightest. The selected position in the
    /// sorted order is `rank * (n - 1)` rounded half up, over a stable
    /// increasing sort, so equal intensities keep index order. At the top
    /// position the lowest index among the tied maxima is returned, just
    /// as the stable sort already gives for the minima.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] if `rank` is outside [0.0, 1.0];
    /// [`Error::EmptyColormap`] if there are no colors.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetRankIntensity()`
    pub fn get_rank_intensity(&self, rank: f32) -> Result<usize> {
        if !(0.0..=1.0).contains(&rank) {
            return Err(Error::InvalidRange(format!(
                "rank must be in [0.0, 1.0], got {rank}"
            )));
        }
        let n = self.len();
        if n == 0 {
            return Err(Error::EmptyColormap);
        }

        let intensities: Vec<u32> = self.colors().iter().map(|&c| c.intensity()).collect();
        let sorted = sort_index(&intensities, SortOrder::Increasing);

        let rank_index = ((rank * (n - 1) as f32 + 0.5) as usize).min(n - 1);
        if rank_index < n - 1 {
            return Ok(sorted[rank_index]);
        }
        // Lightest entry: lowest index among the tied maxima
        let target = intensities[sorted[rank_index]];
        let first = sorted.partition_point(|&i| intensities[i] < target);
        Ok(sorted[first])
    }
}
