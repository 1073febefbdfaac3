//! Operations on optional colormap handles
//!
//! Code that keeps a colormap in an `Option` (an image that may or may not
//! carry a palette, for example) can use these functions instead of
//! matching on the option at every call site.

use super::PixColormap;
use crate::error::{Error, Result, Warning};
use std::io::Write;

/// Deep copy of the colormap held by `cmap`.
///
/// # Errors
///
/// [`Error::NullInput`] if there is no colormap.
///
/// # See also
///
/// C Leptonica: `pixcmapCopy()`
pub fn copy(cmap: Option<&PixColormap>) -> Result<PixColormap> {
    cmap.map(PixColormap::copy)
        .ok_or(Error::NullInput("colormap"))
}

/// Drop the colormap held by `slot`, leaving `None`.
///
/// An already-empty slot is left alone and reported as
/// [`Warning::DestroyEmptyHandle`].
///
/// # See also
///
/// C Leptonica: `pixcmapDestroy()`
pub fn destroy(slot: &mut Option<PixColormap>) -> Option<Warning> {
    match slot.take() {
        Some(_) => None,
        None => Some(Warning::DestroyEmptyHandle),
    }
}

/// Number of defined colors; 0 when there is no colormap.
pub fn count(cmap: Option<&PixColormap>) -> usize {
    cmap.map_or(0, PixColormap::len)
}

/// Number of free slots; 0 when there is no colormap.
pub fn free_count(cmap: Option<&PixColormap>) -> usize {
    cmap.map_or(0, PixColormap::free_count)
}

/// Write the colormap to `writer` in the standard text format.
///
/// # Errors
///
/// [`Error::NullInput`] if either the writer or the colormap is absent.
pub fn write_stream<W: Write>(writer: Option<&mut W>, cmap: Option<&PixColormap>) -> Result<()> {
    let writer = writer.ok_or(Error::NullInput("stream"))?;
    let cmap = cmap.ok_or(Error::NullInput("colormap"))?;
    cmap.write_stream(writer)
}
