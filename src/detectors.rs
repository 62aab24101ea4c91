use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use crossbeam_channel::RecvError;
use crate::data::{detection_channels, DetectionState, FrameDetections, SendState, TimeCalc};
use crate::detection_processing::DetectionPostProcessor;

/// Post-processing loop: receives raw frames, sends back detections.
///
/// Returns `Ok` once every sender of `opt_rx` is gone, and an error if the
/// receiving side of `det_tx` was dropped while frames were still flowing.
pub fn detector_worker(detection_state: DetectionState, processor: Arc<DetectionPostProcessor>) -> anyhow::Result<()> {
    let mut time_calc = TimeCalc::default();
    log::info!("Detection worker started");

    loop {
        // MESSAGE LOOP STARTS HERE
        let frame = match detection_state.opt_rx.recv() {
            Ok(msg) => msg,
            Err(RecvError) => break,
        };
        let detect_time = Instant::now();

        let detections = processor.process(&frame.raw, frame.image_width, frame.image_height);
        let elapsed = detect_time.elapsed();
        time_calc.push(elapsed);

        log::trace!("Frame {}: {} detections in {:.2?}", frame.frame_id, detections.len(), elapsed);

        if let Err(err) = detection_state.det_tx.send(Box::new(FrameDetections {
            frame_id: frame.frame_id,
            detections,
            elapsed,
        })) {
            log::error!("Failed to send detections for frame {}: {}", frame.frame_id, err);
            anyhow::bail!("Detection receiver disconnected");
        }
    }

    log::info!("Detection worker stopped");
    log::debug!(
        "Processed {} frames | Avg={:.2?} | Max={:.2?}",
        time_calc.n(),
        time_calc.avg(),
        time_calc.max()
    );
    Ok(())
}

/// Spawns `detector_worker` on its own thread with channels bounded to `capacity`.
pub fn spawn_detector(processor: Arc<DetectionPostProcessor>, capacity: usize) -> anyhow::Result<(SendState, JoinHandle<anyhow::Result<()>>)> {
    let (send_state, detection_state) = detection_channels(capacity);
    let handle = std::thread::Builder::new()
        .name("echovision-detect".to_string())
        .spawn(move || detector_worker(detection_state, processor))?;
    Ok((send_state, handle))
}
