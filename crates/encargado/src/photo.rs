//! Photo preparation.
//!
//! Turns an arbitrary image into the compact form stored on an event: turned
//! upright according to its EXIF orientation, scaled down so the longest edge
//! fits the configured limit, re-encoded as JPEG and wrapped in a `data:` URL.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::debug;

use crate::config::PhotoConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::model::PhotoDraft;

/// Prefix of every prepared photo's data URL.
pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Prepare a photo from encoded image bytes (PNG, JPEG or WebP).
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded or re-encoded.
pub fn prepare<E: Environment + ?Sized>(
    bytes: &[u8],
    config: &PhotoConfig,
    env: &mut E,
) -> Result<PhotoDraft> {
    let img = decode_upright(bytes)?;
    let (width, height) = (img.width(), img.height());
    let (target_width, target_height) = fit_within(width, height, config.max_dimension);

    let img = if (target_width, target_height) == (width, height) {
        img
    } else {
        img.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality);
    img.to_rgb8().write_with_encoder(encoder)?;

    debug!(
        "Prepared photo {}x{} -> {}x{}, {} bytes",
        width,
        height,
        target_width,
        target_height,
        buffer.len()
    );

    Ok(PhotoDraft {
        id: env.next_id(),
        data_url: format!("{DATA_URL_PREFIX}{}", STANDARD.encode(&buffer)),
    })
}

/// Prepare a photo from an image file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a supported image.
pub fn prepare_file<E: Environment + ?Sized>(
    path: impl AsRef<Path>,
    config: &PhotoConfig,
    env: &mut E,
) -> Result<PhotoDraft> {
    let bytes = std::fs::read(path.as_ref())?;
    prepare(&bytes, config, env)
}

/// Decode an image and apply its EXIF orientation.
fn decode_upright(bytes: &[u8]) -> Result<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Scale dimensions down so the longest edge is at most `max`.
///
/// Aspect ratio is kept, images are never enlarged, and neither edge drops
/// below one pixel.
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }
    let scale = |edge: u32| {
        let scaled = (u64::from(edge) * u64::from(max) + u64::from(longest) / 2) / u64::from(longest);
        u32::try_from(scaled).unwrap_or(max).max(1)
    };
    (scale(width), scale(height))
}
