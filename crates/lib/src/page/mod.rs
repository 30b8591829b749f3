//! Page identity and content.
//!
//! A page is one drawing bound to a calendar date. `PageKey` names it and
//! `PageImage` holds the PNG bytes produced by the drawing surface.

pub mod image;
pub mod key;

pub use image::{ImageError, PageImage};
pub use key::{KeyError, PageKey};
