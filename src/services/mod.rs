pub mod metrics_writer;
pub mod process_checker;
pub mod sampler;

pub use metrics_writer::write_samples;
pub use process_checker::{process_exists, resolve_target_pid};
pub use sampler::Sampler;
