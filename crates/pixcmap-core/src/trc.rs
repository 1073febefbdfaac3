//! Tone reproduction curves
//!
//! A TRC is a 256-entry table that remaps an 8-bit channel value. The
//! colormap transforms ask a [`ToneCurveSource`] for their tables, so a
//! caller can substitute its own curves; [`StandardCurves`] provides the
//! usual gamma and contrast shapes.
//!
//! # See also
//!
//! C Leptonica: `numaGammaTRC()`, `numaContrastTRC()` in `enhance.c`

use crate::error::{Error, Result};

/// Scale factor for contrast enhancement, matching C Leptonica.
const ENHANCE_SCALE_FACTOR: f64 = 5.0;

/// A 256-entry lookup table mapping input values [0..255] to output [0..255].
pub type TrcLut = [u8; 256];

/// Source of tone reproduction curves.
///
/// Implementations must be deterministic.
pub trait ToneCurveSource {
    /// Gamma curve: `minval` maps to 0 and `maxval` maps to 255.
    fn gamma_curve(&self, gamma: f32, minval: i32, maxval: i32) -> Result<TrcLut>;

    /// Contrast curve; `factor == 0.0` is the identity.
    fn contrast_curve(&self, factor: f32) -> Result<TrcLut>;
}

/// The standard Leptonica gamma and contrast curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCurves;

impl ToneCurveSource for StandardCurves {
    fn gamma_curve(&self, gamma: f32, minval: i32, maxval: i32) -> Result<TrcLut> {
        gamma_trc(gamma, minval, maxval)
    }

    fn contrast_curve(&self, factor: f32) -> Result<TrcLut> {
        contrast_trc(factor)
    }
}

/// Identity mapping.
pub fn identity_trc() -> TrcLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }
    lut
}

/// Generate a gamma TRC lookup table.
///
/// `output = 255 * ((input - minval) / (maxval - minval)) ^ (1/gamma)`,
/// saturating to 0 below `minval` and 255 above `maxval`.
///
/// # Arguments
///
/// * `gamma` - Gamma correction factor; must be > 0.0.
///   Values > 1.0 lighten; values < 1.0 darken.
/// * `minval` - Input value that maps to 0 output. Can be negative.
/// * `maxval` - Input value that maps to 255 output. Can exceed 255.
///
/// # See also
///
/// C Leptonica: `numaGammaTRC()` in `enhance.c`
pub fn gamma_trc(gamma: f32, minval: i32, maxval: i32) -> Result<TrcLut> {
    if minval >= maxval {
        return Err(Error::InvalidRange(format!(
            "minval ({minval}) must be less than maxval ({maxval})"
        )));
    }
    if gamma <= 0.0 || gamma.is_nan() {
        return Err(Error::InvalidRange(format!("gamma must be > 0.0, got {gamma}")));
    }
    if gamma == 1.0 && minval == 0 && maxval == 255 {
        return Ok(identity_trc());
    }

    let inv_gamma = 1.0 / gamma as f64;
    // minval and maxval may span more than i32 can hold
    let range = maxval as f64 - minval as f64;
    let mut lut = [0u8; 256];

    for i in 0..256i32 {
        let val = if i < minval {
            0
        } else if i > maxval {
            255
        } else {
            let x = (i as f64 - minval as f64) / range;
            let mapped = 255.0 * x.powf(inv_gamma) + 0.5;
            (mapped as i32).clamp(0, 255)
        };
        lut[i as usize] = val as u8;
    }

    Ok(lut)
}

/// Generate a contrast enhancement TRC lookup table.
///
/// Uses an atan-based mapping with maximum slope at value 127.
/// Values below 127 are darkened and values above 127 are lightened.
///
/// # Arguments
///
/// * `factor` - 0.0 is no enhancement; useful range is (0.0, 1.0) but
///   larger values are allowed.
///
/// # See also
///
/// C Leptonica: `numaContrastTRC()` in `enhance.c`
pub fn contrast_trc(factor: f32) -> Result<TrcLut> {
    if factor < 0.0 || factor.is_nan() {
        return Err(Error::InvalidRange(format!(
            "factor must be >= 0.0, got {factor}"
        )));
    }
    if factor == 0.0 {
        return Ok(identity_trc());
    }

    let scale = ENHANCE_SCALE_FACTOR;
    let factor_d = factor as f64;
    let ymax = (1.0 * factor_d * scale).atan();
    let ymin = (-127.0 * factor_d * scale / 128.0).atan();
    let dely = ymax - ymin;

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let x = i as f64;
        let val = (255.0 / dely) * (-ymin + (factor_d * scale * (x - 127.0) / 128.0).atan()) + 0.5;
        *entry = (val as i32).clamp(0, 255) as u8;
    }

    Ok(lut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_trc_identity() {
        let lut = gamma_trc(1.0, 0, 255).unwrap();
        assert_eq!(lut, identity_trc());
    }

    #[test]
    fn test_gamma_trc_endpoints() {
        let lut = gamma_trc(2.0, 0, 255).unwrap();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        assert!(lut[100] > 100);
    }

    #[test]
    fn test_gamma_trc_minmax_range() {
        let lut = gamma_trc(1.0, 50, 200).unwrap();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[50], 0);
        assert_eq!(lut[200], 255);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_gamma_trc_wide_range() {
        // minval < 0 and maxval > 255 compress the output range
        let lut = gamma_trc(1.0, -255, 510).unwrap();
        assert!(lut[0] > 0);
        assert!(lut[255] < 255);
    }

    #[test]
    fn test_gamma_trc_extreme_range() {
        let lut = gamma_trc(1.0, -2_000_000_000, 2_000_000_000).unwrap();
        // The whole input range sits at the midpoint
        assert!(lut.iter().all(|&v| v == 128));

        let lut = gamma_trc(1.0, i32::MIN, 255).unwrap();
        assert_eq!(lut[255], 255);
        assert!(lut[0] >= 254);

        let lut = gamma_trc(2.0, 0, i32::MAX).unwrap();
        assert_eq!(lut[0], 0);
        assert!(lut[255] < 255);
    }

    #[test]
    fn test_gamma_trc_invalid() {
        assert!(gamma_trc(0.0, 0, 255).is_err());
        assert!(gamma_trc(1.0, 200, 100).is_err());
        assert!(gamma_trc(1.0, 100, 100).is_err());
    }

    #[test]
    fn test_contrast_trc_zero() {
        assert_eq!(contrast_trc(0.0).unwrap(), identity_trc());
    }

    #[test]
    fn test_contrast_trc_endpoints_and_monotonic() {
        let lut = contrast_trc(0.5).unwrap();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1], "not monotonic at {i}");
        }
    }

    #[test]
    fn test_contrast_trc_negative() {
        assert!(contrast_trc(-0.1).is_err());
    }

    #[test]
    fn test_standard_curves_delegate() {
        let src = StandardCurves;
        assert_eq!(src.gamma_curve(1.0, 0, 255).unwrap(), identity_trc());
        assert_eq!(src.contrast_curve(1.0).unwrap(), contrast_trc(1.0).unwrap());
    }
}
