//! Parsing and calendar helpers shared by the donation and project modules.

pub mod decimal_utils;
pub mod time_utils;
