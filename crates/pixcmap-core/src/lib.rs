//! pixcmap core - Colormaps for indexed images
//!
//! This crate provides the bounded color palette used with 1, 2, 4 and
//! 8 bpp images, together with the small collaborators its transforms
//! rely on:
//!
//! - [`PixColormap`] - Fixed-capacity palette of [`RgbaQuad`] entries
//! - [`ColormapArrays`] - Per-channel snapshot of a palette
//! - [`trc`] - Gamma and contrast tone reproduction curves
//! - [`sort`] - Stable sort permutations
//! - [`color`] - RGB <-> HSV conversion
//!
//! # Example
//!
//! ```
//! use pixcmap_core::PixColormap;
//!
//! let mut cmap = PixColormap::new(2).unwrap();
//! cmap.add_rgb(10, 10, 10).unwrap();
//! assert_eq!(cmap.add_new_color(10, 10, 10).unwrap(), 0);
//! assert_eq!(cmap.free_count(), 3);
//! ```
//!
//! # See also
//!
//! C Leptonica: `colormap.c`, `pix.h`

pub mod colormap;
pub mod error;
pub mod sort;
pub mod trc;

pub use colormap::handle;
pub use colormap::{BlackOrWhite, ColormapArrays, PixColormap, RgbaQuad};
pub use error::{Error, Result, Warning};
pub use sort::{SortOrder, sort_index};
pub use trc::{StandardCurves, ToneCurveSource, TrcLut};

/// RGB <-> HSV conversion.
///
/// HSV values use the Leptonica integer encoding so that they fit in the
/// same 8-bit slots as RGB.
///
/// # See also
///
/// C Leptonica: `colorspace.c`
pub mod color {
    /// HSV color values.
    ///
    /// Ranges: h [0..239] (h=240 wraps to 0), s [0..255], v [0..255].
    ///
    /// Hue correspondence (same as C Leptonica `convertRGBToHSV()`):
    /// - 0: red
    /// - 40: yellow
    /// - 80: green
    /// - 120: cyan
    /// - 160: blue
    /// - 200: magenta
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Hsv {
        pub h: i32,
        pub s: i32,
        pub v: i32,
    }

    /// Pixel-level color space conversion used by the colormap transforms.
    ///
    /// Both directions work on 3-tuples of 8-bit values.
    pub trait ColorSpaceConverter {
        /// (r, g, b) -> (h, s, v)
        fn rgb_to_hsv(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8);

        /// (h, s, v) -> (r, g, b)
        fn hsv_to_rgb(&self, h: u8, s: u8, v: u8) -> (u8, u8, u8);
    }

    /// Leptonica's HSV definition.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StandardHsv;

    impl ColorSpaceConverter for StandardHsv {
        fn rgb_to_hsv(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
            let Hsv { h, s, v } = rgb_to_hsv(r, g, b);
            (h as u8, s as u8, v as u8)
        }

        fn hsv_to_rgb(&self, h: u8, s: u8, v: u8) -> (u8, u8, u8) {
            hsv_to_rgb(Hsv {
                h: h as i32,
                s: s as i32,
                v: v as i32,
            })
        }
    }

    /// Convert RGB to HSV color space.
    ///
    /// # See also
    ///
    /// C Leptonica: `convertRGBToHSV()` in `colorspace.c`
    pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
        let ri = r as i32;
        let gi = g as i32;
        let bi = b as i32;

        let min = ri.min(gi).min(bi);
        let max = ri.max(gi).max(bi);
        let delta = max - min;

        let v = max;
        if delta == 0 {
            return Hsv { h: 0, s: 0, v };
        }

        let s = (255.0 * delta as f32 / max as f32 + 0.5) as i32;
        let h_raw = if ri == max {
            (gi - bi) as f32 / delta as f32
        } else if gi == max {
            2.0 + (bi - ri) as f32 / delta as f32
        } else {
            4.0 + (ri - gi) as f32 / delta as f32
        };

        let mut h = h_raw * 40.0;
        if h < 0.0 {
            h += 240.0;
        }
        if h >= 239.5 {
            h = 0.0;
        }
        let h = (h + 0.5) as i32;

        Hsv { h, s, v }
    }

    /// Convert HSV to RGB color space.
    ///
    /// Hue values outside [0..239] (other than the 240 wraparound) and
    /// channel values outside [0..255] are clamped.
    ///
    /// # See also
    ///
    /// C Leptonica: `convertHSVToRGB()` in `colorspace.c`
    pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
        let Hsv { h, s: sval, v: vval } = hsv;
        let vval = vval.clamp(0, 255);
        let sval = sval.clamp(0, 255);

        if sval == 0 {
            return (vval as u8, vval as u8, vval as u8);
        }

        let h = if h == 240 { 0 } else { h.clamp(0, 239) };
        let hf = h as f32 / 40.0;
        let i = hf as i32;
        let f = hf - i as f32;
        let s = sval as f32 / 255.0;
        let x = (vval as f32 * (1.0 - s) + 0.5) as i32;
        let y = (vval as f32 * (1.0 - s * f) + 0.5) as i32;
        let z = (vval as f32 * (1.0 - s * (1.0 - f)) + 0.5) as i32;

        let (r, g, b) = match i {
            0 => (vval, z, x),
            1 => (y, vval, x),
            2 => (x, vval, z),
            3 => (x, y, vval),
            4 => (z, x, vval),
            _ => (vval, x, y),
        };

        (r as u8, g as u8, b as u8)
    }

}
