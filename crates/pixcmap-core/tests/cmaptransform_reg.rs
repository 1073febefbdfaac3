//! Colormap photometric transform regression test
//!
//! Tests gamma and contrast TRCs, intensity shift, HSV conversion and
//! rank intensity selection on small colormaps.
//!
//! # See also
//!
//! C Leptonica: `colormap.c` (pixcmapGammaTRC, pixcmapContrastTRC,
//! pixcmapShiftIntensity, pixcmapConvertRGBToHSV, pixcmapGetRankIntensity)

use pixcmap_core::{PixColormap, Warning};
use pixcmap_test::{RegParams, colormap_from_rgb};

fn sample() -> PixColormap {
    colormap_from_rgb(
        8,
        &[(10, 10, 10), (200, 200, 200), (50, 50, 50), (255, 0, 128)],
    )
    .unwrap()
}

// ========================================================================
// Test: Rank intensity
// ========================================================================

#[test]
fn cmaptransform_reg_rank() {
    let mut rp = RegParams::new("cmaptransform_rank");

    let cmap = colormap_from_rgb(8, &[(10, 10, 10), (200, 200, 200), (50, 50, 50)]).unwrap();
    rp.compare_values(0.0, cmap.get_rank_intensity(0.0).unwrap() as f64, 0.0);
    rp.compare_values(1.0, cmap.get_rank_intensity(1.0).unwrap() as f64, 0.0);
    rp.compare_values(2.0, cmap.get_rank_intensity(0.5).unwrap() as f64, 0.0);

    // Ties at either extreme resolve to the lowest index
    let tied = colormap_from_rgb(
        4,
        &[(90, 90, 90), (10, 10, 10), (90, 90, 90), (10, 10, 10)],
    )
    .unwrap();
    rp.compare_values(1.0, tied.get_rank_intensity(0.0).unwrap() as f64, 0.0);
    rp.compare_values(0.0, tied.get_rank_intensity(1.0).unwrap() as f64, 0.0);
    // Interior ranks follow the stable order [1, 3, 0, 2]
    rp.compare_values(3.0, tied.get_rank_intensity(0.3).unwrap() as f64, 0.0);
    rp.compare_values(0.0, tied.get_rank_intensity(0.5).unwrap() as f64, 0.0);

    assert!(cmap.get_rank_intensity(1.5).is_err());
    assert!(cmap.get_rank_intensity(-0.1).is_err());

    assert!(rp.cleanup(), "cmaptransform rank tests failed");
}

// ========================================================================
// Test: Gamma and contrast
// ========================================================================

#[test]
fn cmaptransform_reg_trc() {
    let mut rp = RegParams::new("cmaptransform_trc");

    let mut cmap = sample();
    let warnings = cmap.gamma_trc(1.0, 0, 255).unwrap();
    rp.compare_values(0.0, warnings.len() as f64, 0.0);
    rp.compare_colormaps(&sample(), &cmap);

    // gamma = -1 is corrected to 1 and reported
    let warnings = cmap.gamma_trc(-1.0, 0, 255).unwrap();
    assert_eq!(warnings, vec![Warning::GammaReset { requested: -1.0 }]);
    rp.compare_colormaps(&sample(), &cmap);

    // minval/maxval stretch: 50 -> 0, 200 -> 255
    cmap.gamma_trc(1.0, 50, 200).unwrap();
    rp.compare_values(0.0, cmap.get_rgb(0).unwrap().0 as f64, 0.0);
    rp.compare_values(255.0, cmap.get_rgb(1).unwrap().0 as f64, 0.0);
    rp.compare_values(0.0, cmap.get_rgb(2).unwrap().0 as f64, 0.0);
    rp.compare_values(4.0, cmap.len() as f64, 0.0);

    // Very wide input ranges squeeze every value to the midpoint
    let mut cmap = sample();
    cmap.gamma_trc(1.0, -2_000_000_000, 2_000_000_000).unwrap();
    for c in cmap.iter() {
        rp.compare_values(384.0, c.intensity() as f64, 0.0);
    }
    let mut cmap = sample();
    cmap.gamma_trc(1.0, i32::MIN, 255).unwrap();
    rp.compare_values(255.0, cmap.get_rgb(3).unwrap().0 as f64, 0.0);
    rp.compare_values(254.0, cmap.get_rgb(3).unwrap().1 as f64, 1.0);

    let mut cmap = sample();
    let warnings = cmap.contrast_trc(-0.5).unwrap();
    rp.compare_values(1.0, warnings.len() as f64, 0.0);
    rp.compare_colormaps(&sample(), &cmap);

    cmap.contrast_trc(0.5).unwrap();
    let (dark, _, _) = cmap.get_rgb(0).unwrap();
    let (light, _, _) = cmap.get_rgb(1).unwrap();
    assert!(dark <= 10 && light >= 200);

    assert!(rp.cleanup(), "cmaptransform trc tests failed");
}

// ========================================================================
// Test: Intensity shift
// ========================================================================

#[test]
fn cmaptransform_reg_shift() {
    let mut rp = RegParams::new("cmaptransform_shift");

    let mut cmap = sample();
    cmap.shift_intensity(-1.0).unwrap();
    for c in cmap.iter() {
        rp.compare_values(0.0, c.intensity() as f64, 0.0);
    }

    let mut cmap = sample();
    cmap.shift_intensity(1.0).unwrap();
    for c in cmap.iter() {
        rp.compare_values(765.0, c.intensity() as f64, 0.0);
    }

    let mut cmap = sample();
    cmap.shift_intensity(-0.2).unwrap();
    // trunc(0.8 * 200) = 160
    rp.compare_values(160.0, cmap.get_rgb(1).unwrap().0 as f64, 0.0);

    assert!(cmap.shift_intensity(2.0).is_err());

    assert!(rp.cleanup(), "cmaptransform shift tests failed");
}

// ========================================================================
// Test: HSV conversion
// ========================================================================

#[test]
fn cmaptransform_reg_hsv() {
    let mut rp = RegParams::new("cmaptransform_hsv");

    let orig = colormap_from_rgb(
        4,
        &[(255, 0, 0), (0, 255, 0), (0, 0, 255), (255, 255, 0), (77, 77, 77)],
    )
    .unwrap();
    let mut cmap = orig.copy();
    cmap.convert_rgb_to_hsv().unwrap();

    let hues: Vec<u8> = cmap.iter().map(|c| c.red).collect();
    rp.compare_strings(&[0, 80, 160, 40, 0], &hues);
    rp.compare_values(0.0, cmap.get_rgb(4).unwrap().1 as f64, 0.0);
    rp.compare_values(77.0, cmap.get_rgb(4).unwrap().2 as f64, 0.0);

    cmap.convert_hsv_to_rgb().unwrap();
    rp.compare_colormaps(&orig, &cmap);

    assert!(rp.cleanup(), "cmaptransform hsv tests failed");
}
