mod filesystem_access;
mod raw_detections;
mod time_calc;
pub mod send_channels;

pub use filesystem_access::FsAccess;
pub use raw_detections::RawDetections;
pub use send_channels::{detection_channels, DetectionState, FrameDetections, FrameOutput, SendState};
pub use time_calc::TimeCalc;
