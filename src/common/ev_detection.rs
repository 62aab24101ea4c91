use serde::{Deserialize, Serialize};
use crate::common::{EvRect, UNKNOWN_LABEL};

/// A final detection handed back to the caller.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvDetection {
    pub class_id: Option<usize>,
    pub bbox: EvRect,
    pub label: String,
    pub confidence: f32,
}

impl EvDetection {
    pub fn new(class_id: Option<usize>, bbox: EvRect, label: &str, confidence: f32) -> Self {
        Self {
            class_id,
            bbox,
            label: label.to_string(),
            confidence,
        }
    }

    /// Sets the rectangle using `(left, top, right, bottom)` pixel coordinates.
    pub fn with_ltrb(mut self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        self.bbox = EvRect::new(left, top, right, bottom);
        self
    }

    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// True when the class index had no entry in the label table.
    pub fn is_unknown(&self) -> bool {
        self.class_id.is_none() && self.label == UNKNOWN_LABEL
    }

    /// Confidence as a whole percentage, as it is read out to the user.
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.).round() as u32
    }
}
