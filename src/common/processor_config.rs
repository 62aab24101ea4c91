use std::fmt;
use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::data::FsAccess;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;
pub const DEFAULT_NMS_THRESHOLD: f32 = 0.5;
// Fixed output size of the SSD MobileNet detector.
pub const DEFAULT_MAX_DETECTIONS: usize = 10;

const CONFIG_FILE_NAME: &str = "postprocess.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub confidence_threshold: f32,
    pub nms_threshold: f32,
    pub max_detections: usize,
    pub labels_path: Option<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            nms_threshold: DEFAULT_NMS_THRESHOLD,
            max_detections: DEFAULT_MAX_DETECTIONS,
            labels_path: None,
        }
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_confidence_threshold(mut self, x: f32) -> Self {
        self.confidence_threshold = x;
        self
    }

    pub fn with_nms_threshold(mut self, x: f32) -> Self {
        self.nms_threshold = x;
        self
    }

    pub fn with_max_detections(mut self, x: usize) -> Self {
        self.max_detections = x;
        self
    }

    pub fn with_labels_path(mut self, labels_path: &str) -> Self {
        self.labels_path = Some(labels_path.to_string());
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0. ..=1.).contains(&self.confidence_threshold) {
            anyhow::bail!("Confidence threshold must be within [0, 1], got {}", self.confidence_threshold);
        }
        if !(0. ..=1.).contains(&self.nms_threshold) {
            anyhow::bail!("NMS threshold must be within [0, 1], got {}", self.nms_threshold);
        }
        if self.max_detections == 0 {
            anyhow::bail!("max_detections must be greater than zero");
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse post-processing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Loads `<config dir>/echovision/postprocess.json`, falling back to defaults when
    /// the file does not exist.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = FsAccess::Config.path()?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_json_file(&path)
    }
}

impl fmt::Display for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Labels Path: {}\n\
        Confidence Threshold: {}\n\
        NMS Threshold: {}\n\
        Max Detections: {}",
               self.labels_path.as_deref().unwrap_or("<none>"),
               self.confidence_threshold, self.nms_threshold, self.max_detections)
    }
}
