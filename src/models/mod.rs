pub mod config;
pub mod sample;

pub use config::{OutputFormat, RecorderConfig};
pub use sample::{bytes_to_mb, Sample};
