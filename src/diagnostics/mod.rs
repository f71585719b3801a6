//! Calibration diagnostics.
//!
//! This module provides:
//! - Strip profiles and dominant colour buckets for raw screenshots
//! - Arrow-pixel histograms and masked crops of the detected pitch

pub mod inspect;
pub mod palette;

pub use inspect::inspect_match;
pub use palette::log_palette;
