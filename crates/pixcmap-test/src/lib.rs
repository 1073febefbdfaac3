//! pixcmap-test - Regression test framework for pixcmap
//!
//! This crate provides a regression test framework similar to the C version's
//! regutils.c, supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use pixcmap_test::RegParams;
//!
//! let mut rp = RegParams::new("cmap_basic");
//! rp.compare_values(16.0, cmap.max_entries() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use pixcmap_core::PixColormap;

/// Build a colormap of the given depth from a list of RGB triples.
///
/// Entries beyond the depth's capacity are an error.
pub fn colormap_from_rgb(depth: u32, colors: &[(u8, u8, u8)]) -> TestResult<PixColormap> {
    let mut cmap = PixColormap::new(depth)?;
    for &(r, g, b) in colors {
        cmap.add_rgb(r, g, b)?;
    }
    Ok(cmap)
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixcmap-test is at crates/pixcmap-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
