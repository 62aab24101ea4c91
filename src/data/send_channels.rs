use std::time::Duration;
use crate::common::EvDetection;
use crate::data::RawDetections;

/// One frame's raw model output on its way to the post-processing worker.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub frame_id: u64,
    pub raw: RawDetections,
    pub image_width: u32,
    pub image_height: u32,
}

/// Post-processed result for the frame with the same `frame_id`.
#[derive(Debug, Clone, Default)]
pub struct FrameDetections {
    pub frame_id: u64,
    pub detections: Vec<EvDetection>,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct DetectionState {
    pub opt_rx: crossbeam_channel::Receiver<Box<FrameOutput>>,
    pub det_tx: crossbeam_channel::Sender<Box<FrameDetections>>,
}

#[derive(Debug)]
pub struct SendState {
    pub opt_tx: crossbeam_channel::Sender<Box<FrameOutput>>,
    pub det_rx: crossbeam_channel::Receiver<Box<FrameDetections>>,
}

/// Creates both ends of the frame pipeline, each channel bounded to `capacity`.
pub fn detection_channels(capacity: usize) -> (SendState, DetectionState) {
    let (opt_tx, opt_rx) = crossbeam_channel::bounded(capacity);
    let (det_tx, det_rx) = crossbeam_channel::bounded(capacity);
    (SendState { opt_tx, det_rx }, DetectionState { opt_rx, det_tx })
}
