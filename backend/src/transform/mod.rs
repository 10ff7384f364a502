//! Transformation module.
//!
//! Pure string transforms applied to manifest fields:
//! - Display: name → presentation text (price and dimension markers)

pub mod display;

pub use display::{display_name, mark_dimensions, mark_price};
