use serde::{Deserialize, Serialize};

/// Bounding box in normalized model space, stored in the `[yMin, xMin, yMax, xMax]`
/// order that SSD style detectors emit.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvBox {
    pub y_min: f32,
    pub x_min: f32,
    pub y_max: f32,
    pub x_max: f32,
}

impl EvBox {
    pub fn new(y_min: f32, x_min: f32, y_max: f32, x_max: f32) -> Self {
        Self {
            y_min,
            x_min,
            y_max,
            x_max,
        }
    }

    /// Builds a box from one row of the model's location output.
    pub fn from_yxyx(row: [f32; 4]) -> Self {
        Self::new(row[0], row[1], row[2], row[3])
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Computes the area of the bounding box. Inverted boxes give a negative area.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Computes the intersection area between this bounding box and another.
    pub fn intersect(&self, other: &EvBox) -> f32 {
        let left = self.x_min.max(other.x_min);
        let right = self.x_max.min(other.x_max);
        let top = self.y_min.max(other.y_min);
        let bottom = self.y_max.min(other.y_max);
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &EvBox) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Computes the intersection over union (IoU) between this bounding box and another.
    ///
    /// Degenerate pairs whose union is not positive have an IoU of zero.
    pub fn iou(&self, other: &EvBox) -> f32 {
        let union = self.union(other);
        if union <= 0. {
            return 0.;
        }
        self.intersect(other) / union
    }
}
