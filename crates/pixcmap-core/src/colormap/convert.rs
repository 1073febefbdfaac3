//! PixColormap array extraction and in-place color transforms
//!
//! Every transform rewrites the defined entries only; depth, count and
//! alpha are preserved. Correctable parameter problems are reported as
//! [`Warning`]s in the returned list.
//!
//! # See also
//!
//! C Leptonica: `colormap.c` (pixcmapToArrays, pixcmapGammaTRC,
//! pixcmapContrastTRC, pixcmapShiftIntensity, pixcmapConvertRGBToHSV,
//! pixcmapConvertHSVToRGB)

use super::PixColormap;
use crate::color::{ColorSpaceConverter, StandardHsv};
use crate::error::{Error, Result, Warning};
use crate::trc::{StandardCurves, ToneCurveSource, TrcLut};

/// Extracted color channel arrays from a colormap.
///
/// `red[i]`, `green[i]` and `blue[i]` come from entry `i`. The arrays are
/// a snapshot and do not follow later changes to the colormap.
///
/// # See also
///
/// C Leptonica: `pixcmapToArrays()`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColormapArrays {
    /// Red channel values
    pub red: Vec<u8>,
    /// Green channel values
    pub green: Vec<u8>,
    /// Blue channel values
    pub blue: Vec<u8>,
}

impl ColormapArrays {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// Allocate an empty channel vector, reporting allocation failure.
fn channel_vec(n: usize) -> Result<Vec<u8>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| Error::AllocationFailed)?;
    Ok(v)
}

impl PixColormap {
    // ---------------------------------------------------------------
    //  Array extraction
    // ---------------------------------------------------------------

    /// Extract the red, green and blue channels of the defined entries.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the arrays cannot be allocated.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapToArrays()`
    pub fn to_arrays(&self) -> Result<ColormapArrays> {
        let n = self.len();
        let mut red = channel_vec(n)?;
        let mut green = channel_vec(n)?;
        let mut blue = channel_vec(n)?;

        for c in self.colors() {
            red.push(c.red);
            green.push(c.green);
            blue.push(c.blue);
        }

        Ok(ColormapArrays { red, green, blue })
    }

    // ---------------------------------------------------------------
    //  In-place color transforms
    // ---------------------------------------------------------------

    /// Apply gamma TRC to all colors in place, using [`StandardCurves`].
    ///
    /// See [`PixColormap::gamma_trc_with`].
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGammaTRC()`
    pub fn gamma_trc(&mut self, gamma: f32, minval: i32, maxval: i32) -> Result<Vec<Warning>> {
        self.gamma_trc_with(&StandardCurves, gamma, minval, maxval)
    }

    /// Apply a gamma TRC obtained from `curves` to all colors in place.
    ///
    /// Each of R, G, B is remapped independently through the same table.
    /// Values in `[minval, maxval]` are spread over `[0, 255]`.
    ///
    /// A `gamma` that is not > 0.0 is replaced by 1.0 and reported as
    /// [`Warning::GammaReset`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] if `minval >= maxval`, or any error from
    /// the curve source. The colormap is unchanged on error.
    pub fn gamma_trc_with<S: ToneCurveSource + ?Sized>(
        &mut self,
        curves: &S,
        gamma: f32,
        minval: i32,
        maxval: i32,
    ) -> Result<Vec<Warning>> {
        let mut warnings = Vec::new();
        let gamma = if gamma > 0.0 {
            gamma
        } else {
            warnings.push(Warning::GammaReset { requested: gamma });
            1.0
        };
        if minval >= maxval {
            return Err(Error::InvalidRange(format!(
                "minval ({minval}) must be less than maxval ({maxval})"
            )));
        }

        let lut = curves.gamma_curve(gamma, minval, maxval)?;
        self.apply_trc(&lut)?;
        Ok(warnings)
    }

    /// Apply contrast enhancement to all colors in place, using
    /// [`StandardCurves`].
    ///
    /// See [`PixColormap::contrast_trc_with`].
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapContrastTRC()`
    pub fn contrast_trc(&mut self, factor: f32) -> Result<Vec<Warning>> {
        self.contrast_trc_with(&StandardCurves, factor)
    }

    /// Apply a contrast TRC obtained from `curves` to all colors in place.
    ///
    /// `factor` is generally in [0.0, 1.0] (0.0 = no change) but can be
    /// larger. A negative factor is replaced by 0.0 and reported as
    /// [`Warning::ContrastFactorReset`].
    pub fn contrast_trc_with<S: ToneCurveSource + ?Sized>(
        &mut self,
        curves: &S,
        factor: f32,
    ) -> Result<Vec<Warning>> {
        let mut warnings = Vec::new();
        let factor = if factor >= 0.0 {
            factor
        } else {
            warnings.push(Warning::ContrastFactorReset { requested: factor });
            0.0
        };

        let lut = curves.contrast_curve(factor)?;
        self.apply_trc(&lut)?;
        Ok(warnings)
    }

    /// Remap every channel of every defined entry through `lut`.
    fn apply_trc(&mut self, lut: &TrcLut) -> Result<()> {
        let arrays = self.to_arrays()?;
        for i in 0..arrays.len() {
            let r = lut[arrays.red[i] as usize];
            let g = lut[arrays.green[i] as usize];
            let b = lut[arrays.blue[i] as usize];
            self.reset_color(i, r, g, b)?;
        }
        Ok(())
    }

    /// Shift the intensity of all colors in place.
    ///
    /// `fraction` in [-1.0, 1.0]:
    /// - Negative: each channel `v` becomes `(1 + fraction) * v` (darken)
    /// - Otherwise: `v + fraction * (255 - v)` (fade toward white)
    ///
    /// Results are truncated toward zero.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] if fraction is outside [-1.0, 1.0].
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapShiftIntensity()`
    pub fn shift_intensity(&mut self, fraction: f32) -> Result<()> {
        if !(-1.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidRange(format!(
                "fraction must be in [-1.0, 1.0], got {fraction}"
            )));
        }

        let shift = |v: u8| -> u8 {
            if fraction < 0.0 {
                ((1.0 + fraction) * v as f32) as u8
            } else {
                v + (fraction * (255 - v) as f32) as u8
            }
        };

        for i in 0..self.len() {
            let (r, g, b) = self.get_color(i)?;
            self.reset_color(i, shift(r), shift(g), shift(b))?;
        }
        Ok(())
    }

    /// Convert every entry from RGB to HSV in place, using [`StandardHsv`].
    ///
    /// Afterwards the red, green and blue slots hold h, s and v. The
    /// colormap does not record which space it is in.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapConvertRGBToHSV()`
    pub fn convert_rgb_to_hsv(&mut self) -> Result<()> {
        self.convert_rgb_to_hsv_with(&StandardHsv)
    }

    /// Convert every entry from RGB to HSV in place with `conv`.
    pub fn convert_rgb_to_hsv_with<C: ColorSpaceConverter + ?Sized>(
        &mut self,
        conv: &C,
    ) -> Result<()> {
        self.map_entries(|r, g, b| conv.rgb_to_hsv(r, g, b))
    }

    /// Convert every entry from HSV back to RGB in place, using
    /// [`StandardHsv`].
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapConvertHSVToRGB()`
    pub fn convert_hsv_to_rgb(&mut self) -> Result<()> {
        self.convert_hsv_to_rgb_with(&StandardHsv)
    }

    /// Convert every entry from HSV to RGB in place with `conv`.
    pub fn convert_hsv_to_rgb_with<C: ColorSpaceConverter + ?Sized>(
        &mut self,
        conv: &C,
    ) -> Result<()> {
        self.map_entries(|h, s, v| conv.hsv_to_rgb(h, s, v))
    }

    /// Replace the channels of every defined entry with `f(c1, c2, c3)`.
    fn map_entries(&mut self, mut f: impl FnMut(u8, u8, u8) -> (u8, u8, u8)) -> Result<()> {
        for i in 0..self.len() {
            let (c1, c2, c3) = self.get_color(i)?;
            let (d1, d2, d3) = f(c1, c2, c3);
            self.reset_color(i, d1, d2, d3)?;
        }
        Ok(())
    }
}
