//! Terminal rendering
//!
//! This module turns fetched records into display lines:
//! - Profile card layout (boxed and narrow modes)
//! - Contribution heatmap
//! - Colors and hyperlinks
//! - Width-aware wrapping and truncation

pub mod heatmap;
pub mod layout;
pub mod style;
pub mod text;

pub use heatmap::render_heatmap;
pub use layout::{ProfileCard, Renderer, Showcase, MIN_BOXED_WIDTH};
pub use style::{Palette, Role};
