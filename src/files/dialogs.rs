//! Native file dialog integration using the rfd crate

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Image types offered by the picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "ico"];

/// Opens a native file picker for choosing an image to insert.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn pick_image_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Insert Image")
        .add_filter("Images", IMAGE_EXTENSIONS);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}
