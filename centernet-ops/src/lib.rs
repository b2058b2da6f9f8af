//! Label encoding operations for center-point object detectors.
//!
//! The crate turns ground-truth boxes into dense training targets: it derives
//! an overlap-preserving Gaussian radius per box, stamps clipped Gaussian blobs
//! onto `(H, W, C)` heatmaps, letterboxes images together with their boxes and
//! pads variable-length label sets to a fixed instance count.

mod common;

pub mod config;
pub mod heatmap;
pub mod image;
pub mod kernel;
pub mod letterbox;
pub mod pad;
pub mod product;
pub mod radius;
pub mod targets;

pub use config::*;
pub use heatmap::*;
pub use image::*;
pub use kernel::*;
pub use letterbox::*;
pub use pad::*;
pub use product::*;
pub use radius::*;
pub use targets::*;
