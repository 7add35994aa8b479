use log::debug;

use super::image_codec::ImageCodec;
use super::images_model::{EncodedImage, ImageEncodingJob};
use crate::constants::QUALITY_STEP;
use crate::errors::Result;

/// Re-encodes `job.source_bytes` at decreasing quality until the output fits
/// `job.max_size_bytes` or the quality floor has been tried.
///
/// Sources larger than the target box on either axis are first cover-fitted
/// to the per-axis minimum of source and target, so nothing is upscaled.
/// Quality starts at `start_quality` (raised to the floor if below it) and
/// drops by [`QUALITY_STEP`], with the last step clamped to the floor. The
/// loop therefore runs at most `ceil((start - floor) / step) + 1` times.
///
/// An unreachable budget is not an error: the floor-quality result is
/// returned and the caller decides. Only decode and encode failures of the
/// codec are propagated.
pub fn encode_to_budget<C: ImageCodec>(codec: &C, job: &ImageEncodingJob) -> Result<EncodedImage> {
    job.validate()?;

    let source = codec.decode(&job.source_bytes)?;
    let original_dimensions = codec.dimensions(&source);
    let image = if original_dimensions.exceeds(job.target) {
        codec.resize_cover(&source, original_dimensions.clamp_to(job.target))
    } else {
        source
    };
    let final_dimensions = codec.dimensions(&image);

    let floor = job.quality_floor;
    let mut quality = job.start_quality.max(floor);
    let mut attempts = 0u32;

    loop {
        let bytes = codec.encode(&image, quality)?;
        attempts += 1;
        debug!(
            "Encoded {}x{} at quality {}: {} bytes (budget {})",
            final_dimensions.width,
            final_dimensions.height,
            quality,
            bytes.len(),
            job.max_size_bytes
        );

        if bytes.len() <= job.max_size_bytes || quality <= floor {
            return Ok(EncodedImage {
                final_size: bytes.len(),
                bytes,
                final_quality: quality,
                original_dimensions,
                final_dimensions,
                attempts,
            });
        }

        quality = quality.saturating_sub(QUALITY_STEP).max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ImageError};
    use crate::images::Dimensions;
    use std::cell::RefCell;

    /// Fake codec: the "image" is its dimensions, and the encoded size is
    /// `pixels * quality / 100` bytes.
    #[derive(Default)]
    struct FakeCodec {
        qualities: RefCell<Vec<u8>>,
        resized_to: RefCell<Option<Dimensions>>,
    }

    impl ImageCodec for FakeCodec {
        type Image = Dimensions;

        fn decode(&self, bytes: &[u8]) -> Result<Dimensions> {
            match bytes {
                [w, h] => Ok(Dimensions::new(u32::from(*w) * 10, u32::from(*h) * 10)),
                _ => Err(ImageError::Decode("unsupported".to_string()).into()),
            }
        }

        fn dimensions(&self, image: &Dimensions) -> Dimensions {
            *image
        }

        fn resize_cover(&self, _image: &Dimensions, target: Dimensions) -> Dimensions {
            *self.resized_to.borrow_mut() = Some(target);
            target
        }

        fn encode(&self, image: &Dimensions, quality: u8) -> Result<Vec<u8>> {
            self.qualities.borrow_mut().push(quality);
            let size = (image.width * image.height) as usize * usize::from(quality) / 100;
            Ok(vec![0; size])
        }
    }

    fn job(max_size_bytes: usize) -> ImageEncodingJob {
        // 100x100 source, 200x200 target box
        ImageEncodingJob::new(vec![10, 10], Dimensions::new(200, 200), max_size_bytes)
    }

    #[test]
    fn returns_first_attempt_when_already_within_budget() {
        let codec = FakeCodec::default();
        let encoded = encode_to_budget(&codec, &job(10_000)).unwrap();
        assert_eq!(encoded.final_quality, 80);
        assert_eq!(encoded.attempts, 1);
        assert_eq!(encoded.final_size, 8_000);
        assert_eq!(*codec.qualities.borrow(), vec![80]);
        assert!(codec.resized_to.borrow().is_none());
        assert_eq!(encoded.final_dimensions, Dimensions::new(100, 100));
    }

    #[test]
    fn steps_down_until_budget_is_met() {
        let codec = FakeCodec::default();
        let encoded = encode_to_budget(&codec, &job(6_500)).unwrap();
        assert_eq!(*codec.qualities.borrow(), vec![80, 75, 70, 65]);
        assert_eq!(encoded.final_quality, 65);
        assert!(encoded.within_budget(6_500));
    }

    #[test]
    fn unreachable_budget_stops_at_floor() {
        let codec = FakeCodec::default();
        let encoded = encode_to_budget(&codec, &job(1)).unwrap();
        assert_eq!(encoded.final_quality, 10);
        assert_eq!(encoded.attempts, 15);
        assert!(!encoded.within_budget(1));
        assert_eq!(codec.qualities.borrow().last(), Some(&10));
    }

    #[test]
    fn last_step_is_clamped_to_floor() {
        let codec = FakeCodec::default();
        let encoded = encode_to_budget(&codec, &job(1).with_quality_floor(12)).unwrap();
        assert_eq!(encoded.final_quality, 12);
        assert_eq!(codec.qualities.borrow().len(), 15);
    }

    #[test]
    fn start_below_floor_encodes_once_at_floor() {
        let codec = FakeCodec::default();
        let encoded = encode_to_budget(
            &codec,
            &job(1).with_quality_floor(30).with_start_quality(20),
        )
        .unwrap();
        assert_eq!(*codec.qualities.borrow(), vec![30]);
        assert_eq!(encoded.final_quality, 30);
    }

    #[test]
    fn oversized_sources_are_cover_fitted_without_upscaling() {
        let codec = FakeCodec::default();
        // 300x100 source into a 200x200 box: width shrinks, height stays.
        let job = ImageEncodingJob::new(vec![30, 10], Dimensions::new(200, 200), usize::MAX);
        let encoded = encode_to_budget(&codec, &job).unwrap();
        assert_eq!(*codec.resized_to.borrow(), Some(Dimensions::new(200, 100)));
        assert_eq!(encoded.original_dimensions, Dimensions::new(300, 100));
        assert_eq!(encoded.final_dimensions, Dimensions::new(200, 100));
    }

    #[test]
    fn decode_failure_is_propagated() {
        let codec = FakeCodec::default();
        let job = ImageEncodingJob::new(vec![1, 2, 3], Dimensions::new(10, 10), 100);
        assert!(matches!(
            encode_to_budget(&codec, &job),
            Err(Error::Image(ImageError::Decode(_)))
        ));
        assert!(codec.qualities.borrow().is_empty());
    }

    #[test]
    fn invalid_jobs_are_rejected_before_decoding() {
        let codec = FakeCodec::default();
        let zero_box = ImageEncodingJob::new(vec![10, 10], Dimensions::new(0, 10), 100);
        assert!(matches!(
            encode_to_budget(&codec, &zero_box),
            Err(Error::Image(ImageError::InvalidJob(_)))
        ));
        let bad_quality = job(100).with_start_quality(101);
        assert!(encode_to_budget(&codec, &bad_quality).is_err());
    }
}
