//! pixcmap - Indexed color palettes for Rust
//!
//! Colormaps for 1, 2, 4 and 8 bpp images, modeled on the
//! [Leptonica](http://www.leptonica.org/) `PIXCMAP`.
//!
//! # Overview
//!
//! - Fixed-capacity palettes sized by image depth
//! - Deduplicating insertion and linear color lookup
//! - Text serialization compatible with Leptonica
//! - Gamma, contrast, intensity shift and HSV transforms
//! - Rank intensity selection
//!
//! # Example
//!
//! ```
//! use pixcmap::PixColormap;
//!
//! let mut cmap = PixColormap::new(8).unwrap();
//! cmap.add_rgb(10, 10, 10).unwrap();
//! cmap.add_rgb(200, 200, 200).unwrap();
//! cmap.add_rgb(50, 50, 50).unwrap();
//! assert_eq!(cmap.get_rank_intensity(0.0).unwrap(), 0);
//! assert_eq!(cmap.get_rank_intensity(1.0).unwrap(), 1);
//!
//! let text = cmap.write_to_bytes().unwrap();
//! assert_eq!(PixColormap::read_from_bytes(&text).unwrap(), cmap);
//! ```

pub use pixcmap_core::*;
