use serde::{Deserialize, Serialize};
use crate::common::EvBox;

/// Bounding box in image pixel space.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

// NaN collapses to the image origin.
fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.
    } else {
        v.clamp(0., 1.)
    }
}

impl EvRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Scales a normalized box to an image of `image_width` x `image_height` pixels.
    ///
    /// Each coordinate is clamped to `[0, 1]` before scaling, so the result always
    /// lies inside the image.
    pub fn from_normalized(bbox: &EvBox, image_width: u32, image_height: u32) -> Self {
        let (w, h) = (image_width as f32, image_height as f32);
        Self {
            left: unit(bbox.x_min) * w,
            top: unit(bbox.y_min) * h,
            right: unit(bbox.x_max) * w,
            bottom: unit(bbox.y_max) * h,
        }
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the center of the rectangle as `(cx, cy)`.
    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) / 2., (self.top + self.bottom) / 2.)
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.left.round() as i32,
         self.top.round() as i32,
         self.width().round() as i32,
         self.height().round() as i32)
    }
}
