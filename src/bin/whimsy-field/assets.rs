//! Embedded content: the catalog and artifact images.

use rust_embed::RustEmbed;
use std::sync::mpsc;
use thiserror::Error;
use whimsy_field::{Block, Catalog, CatalogError, validate_catalog};

/// Embeds everything under assets/ into the binary.
/// Debug builds read from the filesystem; release builds embed compressed copies.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

const CATALOG_PATH: &str = "catalog.ron";

/// Errors that can occur when loading the catalog.
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("catalog.ron not found in embedded assets")]
    NotFound,
    #[error("invalid UTF-8 in catalog.ron: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse catalog.ron: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Errors that can occur when loading and decoding images.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

/// Decoded image data ready for texture creation.
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// State of an image being decoded in the background.
pub enum AssetLoadState {
    Loading(mpsc::Receiver<Result<DecodedImage, ImageLoadError>>),
    Ready(DecodedImage),
    /// Already reported through a toast.
    Error(String),
}

pub fn load_and_decode_image(path: &str) -> Result<DecodedImage, ImageLoadError> {
    let file = Assets::get(path).ok_or_else(|| ImageLoadError::AssetNotFound(path.to_string()))?;

    let img = image::load_from_memory(&file.data).map_err(|source| ImageLoadError::Decode {
        path: path.to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// Loads and validates the embedded catalog.
pub fn load_catalog() -> Result<Catalog, CatalogLoadError> {
    let file = Assets::get(CATALOG_PATH).ok_or(CatalogLoadError::NotFound)?;
    let ron_string = std::str::from_utf8(&file.data)?;
    let catalog: Catalog = ron::from_str(ron_string)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Every artifact image referenced by the catalog, in order, without repeats.
pub fn artifact_images(catalog: &Catalog) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for block in catalog.iter().flat_map(|item| &item.body) {
        if let Block::Artifact { image_path, .. } = block
            && !paths.contains(image_path)
        {
            paths.push(image_path.clone());
        }
    }
    paths
}
