use crate::common::EvBox;

pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn confidence(&self) -> f32;
}

/// A scored anchor that passed the confidence filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub bbox: EvBox,
    pub class_index: f32,
    pub score: f32,
}

impl Nms for Candidate {
    /// IoU in normalized space.
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.iou(&other.bbox)
    }

    fn confidence(&self) -> f32 {
        self.score
    }
}

/// Greedy non-maximum suppression.
///
/// Sorts `boxes` by confidence, highest first (stable, so equal scores keep their
/// input order), then keeps a box only if its IoU with every box kept before it is
/// at most `iou_threshold`. Survivors stay in ranked order.
pub fn nms<T: Nms>(boxes: &mut Vec<T>, iou_threshold: f32) {
    boxes.sort_by(|b1, b2| b2.confidence().total_cmp(&b1.confidence()));
    let mut current_index = 0;
    for index in 0..boxes.len() {
        let mut drop = false;
        for prev_index in 0..current_index {
            let iou = boxes[prev_index].iou(&boxes[index]);
            if iou > iou_threshold {
                log::trace!("Suppressed candidate {} (IoU {:.3} with kept #{})", index, iou, prev_index);
                drop = true;
                break;
            }
        }
        if !drop {
            boxes.swap(current_index, index);
            current_index += 1;
        }
    }
    boxes.truncate(current_index);
}
