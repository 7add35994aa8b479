use image::imageops::FilterType;
use image::DynamicImage;

use super::images_model::Dimensions;
use crate::errors::{ImageError, Result};

/// Decode/resize/encode seam used by the budget encoder.
pub trait ImageCodec {
    type Image;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image>;
    fn dimensions(&self, image: &Self::Image) -> Dimensions;
    /// Scales and crops `image` so that it exactly fills `target`.
    fn resize_cover(&self, image: &Self::Image, target: Dimensions) -> Self::Image;
    fn encode(&self, image: &Self::Image, quality: u8) -> Result<Vec<u8>>;
}

/// Lossy WebP output over any input format the `image` crate decodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebpCodec;

impl ImageCodec for WebpCodec {
    type Image = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()).into())
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn resize_cover(&self, image: &DynamicImage, target: Dimensions) -> DynamicImage {
        image.resize_to_fill(target.width, target.height, FilterType::Lanczos3)
    }

    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ImageError::Encode("cannot encode an empty image".to_string()).into());
        }
        let rgba = image.to_rgba8();
        let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
            .encode_simple(false, f32::from(quality))
            .map_err(|e| {
                ImageError::Encode(format!(
                    "WebP encoder rejected {}x{} frame: {:?}",
                    rgba.width(),
                    rgba.height(),
                    e
                ))
            })?;
        Ok(encoded.to_vec())
    }
}
