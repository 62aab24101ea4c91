use std::time::Instant;
use crate::common::EvDetection;
use crate::data::RawDetections;
use crate::detection_processing::DetectionPostProcessor;
use crate::utils;

/// Boundary to the inference backend that produces raw detector arrays.
///
/// Model loading, preprocessing and the inference call itself live behind this
/// trait. A failing `infer` short-circuits `detect` so post-processing never sees
/// output from a failed run.
pub trait InferenceProcess {
    type Input;

    /// Executes the model on one input and returns its raw output arrays.
    fn infer(&mut self, input: &Self::Input) -> anyhow::Result<RawDetections>;

    /// Pixel dimensions of `input`, used to scale boxes out of normalized space.
    fn dimensions(&self, input: &Self::Input) -> (u32, u32);

    /// Executes the full pipeline.
    fn detect(&mut self, input: &Self::Input, processor: &DetectionPostProcessor, profile: bool) -> anyhow::Result<Vec<EvDetection>> {
        let detect_time = Instant::now();
        let mut _detect_elapsed = detect_time.elapsed();

        let raw = self.infer(input)?;
        _detect_elapsed = utils::trace(profile, "TIME", "Inference", detect_time, _detect_elapsed);

        let (width, height) = self.dimensions(input);
        let ys = processor.process(&raw, width, height);
        _detect_elapsed = utils::trace(profile, "TIME", "Postprocessing", detect_time, _detect_elapsed);

        Ok(ys)
    }
}
