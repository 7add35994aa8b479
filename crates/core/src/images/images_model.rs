//! Image encoding models.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUALITY_FLOOR, DEFAULT_START_QUALITY};
use crate::errors::{ImageError, Result};

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Dimensions { width, height }
    }

    /// True when either side is larger than the matching side of `target`.
    pub fn exceeds(&self, target: Dimensions) -> bool {
        self.width > target.width || self.height > target.height
    }

    /// Per-axis minimum of `self` and `target`.
    pub fn clamp_to(&self, target: Dimensions) -> Dimensions {
        Dimensions::new(self.width.min(target.width), self.height.min(target.height))
    }
}

/// Target boxes used by the upload forms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ImagePreset {
    ProjectBackground,
    OrganizationLogo,
}

impl ImagePreset {
    pub const fn dimensions(&self) -> Dimensions {
        match self {
            ImagePreset::ProjectBackground => Dimensions::new(1600, 900),
            ImagePreset::OrganizationLogo => Dimensions::new(400, 400),
        }
    }
}

/// One request to fit an image into a size budget.
#[derive(Debug, Clone)]
pub struct ImageEncodingJob {
    pub source_bytes: Vec<u8>,
    pub target: Dimensions,
    pub max_size_bytes: usize,
    pub quality_floor: u8,
    pub start_quality: u8,
}

impl ImageEncodingJob {
    pub fn new(source_bytes: Vec<u8>, target: Dimensions, max_size_bytes: usize) -> Self {
        ImageEncodingJob {
            source_bytes,
            target,
            max_size_bytes,
            quality_floor: DEFAULT_QUALITY_FLOOR,
            start_quality: DEFAULT_START_QUALITY,
        }
    }

    pub fn with_quality_floor(mut self, quality_floor: u8) -> Self {
        self.quality_floor = quality_floor;
        self
    }

    pub fn with_start_quality(mut self, start_quality: u8) -> Self {
        self.start_quality = start_quality;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.width == 0 || self.target.height == 0 {
            return Err(ImageError::InvalidJob(format!(
                "target box {}x{} has a zero side",
                self.target.width, self.target.height
            ))
            .into());
        }
        for (name, quality) in [
            ("quality floor", self.quality_floor),
            ("start quality", self.start_quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ImageError::InvalidJob(format!(
                    "{name} {quality} is outside 1..=100"
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Result of a budgeted encode. `bytes` may still exceed the budget when the
/// quality floor was reached first.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub final_quality: u8,
    pub final_size: usize,
    pub original_dimensions: Dimensions,
    pub final_dimensions: Dimensions,
    pub attempts: u32,
}

impl EncodedImage {
    pub fn within_budget(&self, max_size_bytes: usize) -> bool {
        self.final_size <= max_size_bytes
    }
}
