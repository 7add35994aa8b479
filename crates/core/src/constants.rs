use rust_decimal::Decimal;

/// Number of calendar days covered by a donor's donation series (today inclusive).
pub const DONATION_SERIES_DAYS: u32 = 90;

/// Upper bound of the percent-funded figure.
pub const PERCENT_FUNDED_MAX: u8 = 100;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Largest single donation accepted (one billion).
pub const MAX_DONATION_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Status literal that marks a project as finished.
pub const PROJECT_STATUS_COMPLETED: &str = "completed";

/// Number of featured projects returned when the caller does not ask for a count.
pub const DEFAULT_FEATURED_PROJECTS: usize = 6;

/// Number of recent projects scanned when ranking featured projects.
pub const FEATURED_CANDIDATE_POOL: i64 = 50;

/// Encoder quality the budget search starts from.
pub const DEFAULT_START_QUALITY: u8 = 80;

/// Lowest encoder quality the budget search will try.
pub const DEFAULT_QUALITY_FLOOR: u8 = 10;

/// Quality decrement between two attempts of the budget search.
pub const QUALITY_STEP: u8 = 5;

/// Default size budget for optimized images (500 KiB).
pub const DEFAULT_IMAGE_MAX_BYTES: usize = 500 * 1024;
