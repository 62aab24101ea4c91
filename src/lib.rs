mod utils;
pub mod announce;
pub mod common;
pub mod data;
pub mod detection_processing;
pub mod detection_runners;
pub mod detectors;

pub use crate::common::{EvBox, EvDetection, EvRect, LabelTable, ProcessorConfig, UNKNOWN_LABEL};
pub use crate::data::RawDetections;
pub use crate::detection_processing::{post_process, DetectionPostProcessor};

/// Builds a post-processor from the config file in the platform config directory.
pub fn init_post_processor() -> anyhow::Result<DetectionPostProcessor> {
    let config = ProcessorConfig::load_default()?;
    log::info!("Initializing post-processor\n{}", config);
    DetectionPostProcessor::from_config(config)
}
