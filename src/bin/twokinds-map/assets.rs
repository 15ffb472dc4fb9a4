//! Embedded content and image assets.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::sync::mpsc;
use thiserror::Error;
use twokinds_map::MapContent;

/// Content file describing the image, hotspots and panels.
pub const CONTENT_PATH: &str = "map.ron";

/// Everything under assets/. Read from disk in debug builds, compressed into
/// the binary in release builds.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

#[derive(Error, Debug)]
pub enum ContentLoadError {
    #[error("{0} is missing from the embedded assets")]
    Missing(&'static str),
    #[error("{path} is not valid UTF-8: {source}")]
    Encoding {
        path: &'static str,
        source: std::str::Utf8Error,
    },
    #[error("{path}: {source}")]
    Syntax {
        path: &'static str,
        source: ron::de::SpannedError,
    },
}

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("image {0} is missing from the embedded assets")]
    Missing(String),
    #[error("cannot decode image {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

/// RGBA pixels handed from the decoding thread to the UI thread.
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Progress of the base image.
pub enum AssetLoadState {
    /// Decoding on a background thread.
    Loading(mpsc::Receiver<Result<DecodedImage, ImageLoadError>>),
    /// The texture exists.
    Ready,
    /// Failed; the message was already shown in a toast.
    Error(String),
}

fn embedded(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|file| file.data)
}

/// Decodes an embedded image into RGBA8.
pub fn load_and_decode_image(path: &str) -> Result<DecodedImage, ImageLoadError> {
    let bytes = embedded(path).ok_or_else(|| ImageLoadError::Missing(path.to_owned()))?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|source| ImageLoadError::Decode {
            path: path.to_owned(),
            source,
        })?
        .into_rgba8();

    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Parses the embedded [`CONTENT_PATH`].
pub fn load_content() -> Result<MapContent, ContentLoadError> {
    let bytes = embedded(CONTENT_PATH).ok_or(ContentLoadError::Missing(CONTENT_PATH))?;
    let source = std::str::from_utf8(&bytes).map_err(|source| ContentLoadError::Encoding {
        path: CONTENT_PATH,
        source,
    })?;

    let content = MapContent::from_ron(source).map_err(|source| ContentLoadError::Syntax {
        path: CONTENT_PATH,
        source,
    })?;
    log::info!(
        "{CONTENT_PATH}: {} hotspots, {} panels, {} labels",
        content.hotspots.len(),
        content.panels.len(),
        content.labels.len()
    );
    Ok(content)
}
