use std::sync::Arc;
use std::time::Instant;
use anyhow::Context;
use rayon::prelude::*;
use crate::common::{EvBox, EvDetection, EvRect, LabelTable, ProcessorConfig};
use crate::data::RawDetections;
use crate::detection_runners::nms::{self, Candidate};

/// Turns raw detector output into ranked, de-duplicated detections.
///
/// The processor holds only immutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct DetectionPostProcessor {
    labels: LabelTable,
    config: Arc<ProcessorConfig>,
}

impl DetectionPostProcessor {
    pub fn new(labels: LabelTable, config: ProcessorConfig) -> Self {
        log::info!(
            "Post-processor ready: {} labels, confidence >= {}, NMS IoU <= {}",
            labels.len(),
            config.confidence_threshold,
            config.nms_threshold
        );
        Self {
            labels,
            config: Arc::new(config),
        }
    }

    /// Validates `config` and loads the label table from `config.labels_path`.
    pub fn from_config(config: ProcessorConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let labels = match &config.labels_path {
            Some(path) => LabelTable::from_file(path)
                .context("Failed to initialise post-processor")?,
            None => {
                log::warn!("No labels path configured, every detection will be labelled Unknown");
                LabelTable::default()
            }
        };
        Ok(Self::new(labels, config))
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn process(&self, raw: &RawDetections, image_width: u32, image_height: u32) -> Vec<EvDetection> {
        let n = raw.valid_len().min(self.config.max_detections);
        post_process(
            &raw.boxes[..n],
            &raw.class_indices[..n],
            &raw.scores[..n],
            n,
            &self.labels,
            self.config.confidence_threshold,
            self.config.nms_threshold,
            image_width,
            image_height,
        )
    }

    /// Processes independent frames in parallel. Output order matches `frames`.
    pub fn process_batch(&self, frames: &[(RawDetections, u32, u32)]) -> Vec<Vec<EvDetection>> {
        frames
            .par_iter()
            .map(|(raw, w, h)| self.process(raw, *w, *h))
            .collect()
    }
}

/// Confidence filter, greedy NMS and pixel conversion over one frame's raw arrays.
///
/// Only the first `count` slots are read (further limited by the shortest array).
/// Scores that are not `>= confidence_threshold` are discarded, which includes NaN.
/// Reported confidences are clamped to [0, 1].
/// The returned detections are in NMS acceptance order, highest confidence first.
#[allow(clippy::too_many_arguments)]
pub fn post_process(
    boxes: &[[f32; 4]],
    class_indices: &[f32],
    scores: &[f32],
    count: usize,
    labels: &LabelTable,
    confidence_threshold: f32,
    nms_threshold: f32,
    image_width: u32,
    image_height: u32,
) -> Vec<EvDetection> {
    let now = Instant::now();
    let n = count
        .min(boxes.len())
        .min(class_indices.len())
        .min(scores.len());

    let mut candidates: Vec<Candidate> = (0..n)
        .filter(|&i| scores[i] >= confidence_threshold)
        .map(|i| Candidate {
            bbox: EvBox::from_yxyx(boxes[i]),
            class_index: class_indices[i],
            score: scores[i],
        })
        .collect();
    let passed = candidates.len();

    nms::nms(&mut candidates, nms_threshold);

    let detections: Vec<EvDetection> = candidates
        .iter()
        .map(|c| {
            let (class_id, label) = labels.get(c.class_index);
            if class_id.is_none() {
                log::debug!("Class index {} has no label, using {}", c.class_index, label);
            }
            EvDetection::new(
                class_id,
                EvRect::from_normalized(&c.bbox, image_width, image_height),
                label,
                c.score.clamp(0., 1.),
            )
        })
        .collect();

    log::debug!(
        "Post-processing: {} slots, {} above threshold, {} kept in {:.2?}",
        n,
        passed,
        detections.len(),
        now.elapsed()
    );

    detections
}
