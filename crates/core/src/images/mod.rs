//! Images module - size-budgeted re-encoding of uploaded pictures.

mod budget_encoder;
mod image_codec;
mod images_model;

pub use budget_encoder::encode_to_budget;
pub use image_codec::{ImageCodec, WebpCodec};
pub use images_model::{Dimensions, EncodedImage, ImageEncodingJob, ImagePreset};
