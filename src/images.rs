//! Image loading and display support.
//!
//! Cards show real images where the terminal speaks a graphics protocol:
//! - Kitty graphics protocol (kitty terminal)
//! - Sixel graphics (foot, mlterm, xterm)
//! - iTerm2 protocol (iTerm2, WezTerm)
//!
//! Fetching and decoding happen in spawned tasks; results come back over
//! a channel and the draw pass only ever reads the cache. A failed load
//! substitutes the bundled placeholder - it never propagates.

use image::DynamicImage;
use parking_lot::Mutex;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::ui::meme_card::ImageSlot;

/// One finished fetch/decode, tagged with the meme id it belongs to
pub type DecodeResult = (u64, Result<DynamicImage, ImageError>);

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),
    #[error("failed to parse svg")]
    Svg(#[from] usvg::Error),
    #[error("svg has invalid dimensions")]
    SvgSize,
}

/// Image manager - graphics detection, protocol cache, placeholder.
/// Must be created once at startup before entering raw mode.
pub struct ImageManager {
    /// The picker determines the graphics protocol and font size
    picker: Option<Picker>,
    /// Loaded protocols by meme id (placeholder-backed after a failure)
    cache: HashMap<u64, Arc<Mutex<StatefulProtocol>>>,
    /// Ids with a fetch in flight
    pending: HashSet<u64>,
    /// Ids whose load failed (kept for logging, the cache holds the
    /// placeholder for them)
    failed: HashSet<u64>,
    /// Rasterized fallback, substituted on load failure
    placeholder: Option<DynamicImage>,
}

impl ImageManager {
    /// Query the terminal for graphics support and rasterize the
    /// placeholder. MUST be called before raw mode / alternate screen.
    pub fn new(placeholder_path: &str) -> Self {
        let picker = match Picker::from_query_stdio() {
            Ok(p) => {
                tracing::info!("Graphics protocol detected: {:?}", p.protocol_type());
                Some(p)
            }
            Err(e) => {
                tracing::debug!("No graphics protocol available: {}", e);
                None
            }
        };

        let placeholder = match rasterize_svg(placeholder_path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!("Placeholder {} unavailable: {}", placeholder_path, e);
                None
            }
        };

        Self {
            picker,
            cache: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            placeholder,
        }
    }

    /// Check if graphics images are supported
    pub fn supports_graphics(&self) -> bool {
        self.picker.is_some()
    }

    /// Whether this meme still needs a fetch spawned for it
    pub fn needs_fetch(&self, id: u64) -> bool {
        self.supports_graphics()
            && !self.cache.contains_key(&id)
            && !self.pending.contains(&id)
            && !self.failed.contains(&id)
    }

    /// Record that a fetch was spawned for this meme
    pub fn mark_pending(&mut self, id: u64) {
        self.pending.insert(id);
    }

    /// Apply one finished fetch: turn the decoded image into a protocol,
    /// or fall back to the placeholder on failure.
    pub fn complete(&mut self, id: u64, result: Result<DynamicImage, ImageError>) {
        self.pending.remove(&id);

        let image = match result {
            Ok(img) => img,
            Err(e) => {
                tracing::debug!("Image load failed for meme {}: {}", id, e);
                self.failed.insert(id);
                match self.placeholder {
                    Some(ref ph) => ph.clone(),
                    None => return, // nothing to show; card keeps its text fallback
                }
            }
        };

        if let Some(ref mut picker) = self.picker {
            let protocol = picker.new_resize_protocol(image);
            self.cache.insert(id, Arc::new(Mutex::new(protocol)));
        }
    }

    /// Get a cached protocol for rendering
    pub fn get_cached(&self, id: u64) -> Option<Arc<Mutex<StatefulProtocol>>> {
        self.cache.get(&id).cloned()
    }

    /// What the card's image area should show for this meme
    pub fn slot(&self, id: u64) -> ImageSlot {
        if self.cache.contains_key(&id) {
            ImageSlot::Ready
        } else if self.supports_graphics() && self.pending.contains(&id) {
            ImageSlot::Loading
        } else {
            ImageSlot::Unavailable
        }
    }
}

/// Spawn a background fetch+decode for one meme image.
/// The result lands on `tx`; the event loop applies it between draws.
pub fn spawn_fetch(id: u64, url: String, tx: mpsc::UnboundedSender<DecodeResult>) {
    tokio::spawn(async move {
        let result = fetch_and_decode(&url).await;
        // Receiver gone means we're shutting down
        let _ = tx.send((id, result));
    });
}

/// Load image bytes from a URL or a local path, then decode them.
/// The image reference is opaque: anything that fetches and decodes
/// renders, everything else becomes the placeholder.
async fn fetch_and_decode(url: &str) -> Result<DynamicImage, ImageError> {
    let bytes = if url.starts_with("http://") || url.starts_with("https://") {
        let response = reqwest::get(url).await?.error_for_status()?;
        response.bytes().await?.to_vec()
    } else {
        tokio::fs::read(url).await.map_err(|source| ImageError::Read {
            path: url.to_string(),
            source,
        })?
    };

    Ok(image::load_from_memory(&bytes)?)
}

/// Rasterize an SVG file to an RGBA image at its intrinsic size
fn rasterize_svg(path: &str) -> Result<DynamicImage, ImageError> {
    let data = std::fs::read(path).map_err(|source| ImageError::Read {
        path: path.to_string(),
        source,
    })?;

    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())?;
    let size = tree.size().to_int_size();
    let mut pixmap =
        tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(ImageError::SvgSize)?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let raster = image::RgbaImage::from_raw(size.width(), size.height(), pixmap.take())
        .ok_or(ImageError::SvgSize)?;
    Ok(DynamicImage::ImageRgba8(raster))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_path_missing() {
        let result = fetch_and_decode("assets/definitely-not-here.jpg").await;
        assert!(matches!(result, Err(ImageError::Read { .. })));
    }

    #[tokio::test]
    async fn test_local_path_not_an_image() {
        // Readable but undecodable bytes surface as a decode error
        let result = fetch_and_decode("Cargo.toml").await;
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_rasterize_placeholder() {
        let image = rasterize_svg("assets/placeholder.svg").unwrap();
        assert!(image.width() > 0);
        assert!(image.height() > 0);
    }
}
