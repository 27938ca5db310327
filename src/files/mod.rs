//! File operations module for Inkpad
//!
//! Native image picker dialogs and the background reader that turns a
//! picked image into a `data:` URL.

pub mod dialogs;
pub mod image_loader;

pub use dialogs::pick_image_dialog;
pub use image_loader::{ImageLoadEvent, ImageLoader};
