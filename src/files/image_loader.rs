//! Background image reading
//!
//! Reading and encoding a picked image happens on a worker thread so large
//! files never stall a frame. Results come back over a channel that the app
//! drains with [`ImageLoader::poll`] once per frame.

use base64::Engine;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::error::{Error, Result};

/// Outcome of a background image read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadEvent {
    /// The file was read and encoded
    Loaded { path: PathBuf, data_url: String },
    /// The file could not be read
    Failed { path: PathBuf, message: String },
}

/// Spawns image reads and collects their results.
#[derive(Debug)]
pub struct ImageLoader {
    sender: Sender<ImageLoadEvent>,
    receiver: Receiver<ImageLoadEvent>,
    pending: usize,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Start reading `path` on a worker thread.
    pub fn spawn(&mut self, path: PathBuf) {
        let tx = self.sender.clone();
        let thread_path = path.clone();
        let spawned = thread::Builder::new()
            .name("image-reader".to_string())
            .spawn(move || {
                let event = match read_image_as_data_url(&thread_path) {
                    Ok(data_url) => ImageLoadEvent::Loaded {
                        path: thread_path,
                        data_url,
                    },
                    Err(e) => ImageLoadEvent::Failed {
                        path: thread_path,
                        message: e.to_string(),
                    },
                };
                // The loader may be gone by now; the result is simply dropped
                let _ = tx.send(event);
            });

        match spawned {
            Ok(_) => {
                self.pending += 1;
                debug!("Reading image in background: {}", path.display());
            }
            Err(e) => {
                warn!("Failed to spawn image reader: {}", e);
                let _ = self.sender.send(ImageLoadEvent::Failed {
                    path,
                    message: e.to_string(),
                });
                self.pending += 1;
            }
        }
    }

    /// Drain finished reads. Non-blocking.
    pub fn poll(&mut self) -> Vec<ImageLoadEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            events.push(event);
        }
        events
    }

    /// Whether a read is still in flight.
    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Read a file and encode it as a `data:<mime>;base64,...` URL.
pub fn read_image_as_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mime = sniff_mime_type(path, &bytes).ok_or_else(|| Error::UnsupportedImage {
        path: path.to_path_buf(),
    })?;
    info!(
        "Encoded image {} ({}, {} bytes)",
        path.display(),
        mime,
        bytes.len()
    );
    Ok(encode_data_url(mime, &bytes))
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

/// Image MIME type from the file contents, falling back to the extension.
///
/// Returns `None` for anything that is not recognisably an image.
pub fn sniff_mime_type(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(bytes) {
        let mime = format.to_mime_type();
        if mime.starts_with("image/") {
            return Some(mime);
        }
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}
