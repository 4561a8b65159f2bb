//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Main draw functions
//! - `form.rs` - Add-meme overlay form
//! - `theme.rs` - Color themes and presets
//! - `layout.rs` - Grid layout logic
//! - `meme_card.rs` - Meme card widget

mod draw;
mod form;
pub mod layout;
pub mod meme_card;
pub mod theme;

// Re-export main draw function
pub use draw::draw;
