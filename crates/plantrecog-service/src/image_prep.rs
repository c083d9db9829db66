//! Image preparation: forced 1:1 crop and low-quality JPEG re-encode
//!
//! Uploads favor speed over fidelity, so both the camera and the gallery
//! path funnel through [`prepare_square`] before anything hits the network.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageReader};
use plantrecog_core::prelude::*;

/// Rotation applied to the captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Natural,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    fn apply(&self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Natural => img,
            Orientation::Rotate90 => img.rotate90(),
            Orientation::Rotate180 => img.rotate180(),
            Orientation::Rotate270 => img.rotate270(),
        }
    }
}

/// Map a 0.0..=1.0 quality to a JPEG quality percentage.
///
/// 0.0 is "lowest acceptable", which still has to be a valid JPEG quality.
pub fn jpeg_quality(quality: f32) -> u8 {
    let clamped = if quality.is_nan() {
        0.0
    } else {
        quality.clamp(0.0, 1.0)
    };
    ((clamped * 100.0).round() as u8).max(1)
}

/// Largest centered square inside a `width x height` frame: `(x, y, side)`
pub fn square_crop_rect(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Decode `source` (format sniffed from content), rotate, crop to a centered square and write a JPEG to `dest`.
///
/// Blocking; call from `spawn_blocking`.
pub fn prepare_square(
    source: &Path,
    dest: &Path,
    quality: f32,
    orientation: Orientation,
) -> Result<()> {
    let img = ImageReader::open(source)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| Error::image(source, e.to_string()))?;
    let img = orientation.apply(img);

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::image(source, "image has no pixels"));
    }
    let (x, y, side) = square_crop_rect(width, height);
    let square = DynamicImage::ImageRgb8(img.crop_imm(x, y, side, side).to_rgb8());

    let file = File::create(dest)?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality(quality));
    square
        .write_with_encoder(encoder)
        .map_err(|e| Error::image(dest, e.to_string()))?;

    debug!(
        "Prepared {} -> {} ({}x{} crop of {}x{})",
        source.display(),
        dest.display(),
        side,
        side,
        width,
        height
    );
    Ok(())
}
