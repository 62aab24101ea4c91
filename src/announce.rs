//! Short spoken sentences describing detections, for a text-to-speech engine.

use crate::common::EvDetection;

pub const NO_DETECTIONS: &str = "No objects detected";

/// Describes `detections` in the order given, e.g.
/// `"Detected 2 objects: person 91%, chair 64%"`.
pub fn summarize(detections: &[EvDetection]) -> String {
    if detections.is_empty() {
        return NO_DETECTIONS.to_string();
    }

    let noun = if detections.len() == 1 { "object" } else { "objects" };
    let items = detections
        .iter()
        .map(|d| format!("{} {}%", d.label, d.percent()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Detected {} {}: {}", detections.len(), noun, items)
}

/// Detections whose label matches `query`, ignoring case and surrounding spaces.
pub fn filter_by_label<'a>(detections: &'a [EvDetection], query: &str) -> Vec<&'a EvDetection> {
    let query = query.trim();
    detections
        .iter()
        .filter(|d| d.label.eq_ignore_ascii_case(query))
        .collect()
}
