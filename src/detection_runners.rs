pub mod inference_process;
pub mod nms;

pub use inference_process::InferenceProcess;
pub use nms::{nms, Candidate, Nms};
