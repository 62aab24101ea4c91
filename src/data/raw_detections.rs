use ndarray::{ArrayView1, ArrayView2, ArrayView3, Axis};
use serde::{Deserialize, Serialize};

/// Raw output of one image from an SSD style detector: four parallel arrays.
///
/// `count` is the number of valid slots reported by the model and may be smaller
/// than the allocated array length.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetections {
    pub boxes: Vec<[f32; 4]>,
    pub class_indices: Vec<f32>,
    pub scores: Vec<f32>,
    pub count: usize,
}

impl RawDetections {
    pub fn new(boxes: Vec<[f32; 4]>, class_indices: Vec<f32>, scores: Vec<f32>, count: usize) -> Self {
        Self {
            boxes,
            class_indices,
            scores,
            count,
        }
    }

    /// Uses every slot of the arrays as a candidate.
    pub fn from_arrays(boxes: Vec<[f32; 4]>, class_indices: Vec<f32>, scores: Vec<f32>) -> Self {
        let count = boxes.len();
        Self::new(boxes, class_indices, scores, count)
    }

    /// Number of slots that are safe to read across all three arrays.
    pub fn valid_len(&self) -> usize {
        self.count
            .min(self.boxes.len())
            .min(self.class_indices.len())
            .min(self.scores.len())
    }

    /// Splits batched output tensors into one `RawDetections` per image.
    ///
    /// # Arguments
    /// * `locations` - `[batch, n, 4]` boxes as `[yMin, xMin, yMax, xMax]`.
    /// * `classes` - `[batch, n]` float class indices.
    /// * `scores` - `[batch, n]` confidence scores.
    /// * `counts` - `[batch]` number of valid detections per image.
    pub fn from_tensors(
        locations: ArrayView3<f32>,
        classes: ArrayView2<f32>,
        scores: ArrayView2<f32>,
        counts: ArrayView1<f32>,
    ) -> anyhow::Result<Vec<Self>> {
        let (batch, n, coords) = locations.dim();
        if coords != 4 {
            anyhow::bail!("Box tensor must have 4 coordinates per anchor, got {}", coords);
        }
        if classes.dim() != (batch, n) || scores.dim() != (batch, n) {
            anyhow::bail!(
                "Output shapes disagree: boxes {:?}, classes {:?}, scores {:?}",
                locations.shape(),
                classes.shape(),
                scores.shape(),
            );
        }
        if counts.len() != batch {
            anyhow::bail!("Expected {} detection counts, got {}", batch, counts.len());
        }

        let ys = locations
            .axis_iter(Axis(0))
            .zip(classes.axis_iter(Axis(0)))
            .zip(scores.axis_iter(Axis(0)))
            .zip(counts.iter())
            .map(|(((boxes, clss), confs), &count)| {
                let boxes = boxes
                    .outer_iter()
                    .map(|b| [b[0], b[1], b[2], b[3]])
                    .collect();
                // `as` saturates: NaN and negatives become 0
                Self::new(boxes, clss.to_vec(), confs.to_vec(), count as usize)
            })
            .collect();

        Ok(ys)
    }
}
