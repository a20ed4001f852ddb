//! Shape statistics derived from area moments.

use crate::moments::Moments;

/// Centroid, spread and slant of a region, treating it as a uniform
/// distribution of mass.
///
/// All values are independent of winding direction: reversing every contour
/// negates the moments and the area together.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Signed area.
    pub area: f64,
    /// X coordinate of the centroid.
    pub mean_x: f64,
    /// Y coordinate of the centroid.
    pub mean_y: f64,
    /// Mean squared horizontal distance from the centroid.
    pub variance_x: f64,
    /// Mean squared vertical distance from the centroid.
    pub variance_y: f64,
    /// Square root of `variance_x`, carrying its sign when negative.
    pub stddev_x: f64,
    /// Square root of `variance_y`, carrying its sign when negative.
    pub stddev_y: f64,
    /// Mean product of the horizontal and vertical distances from the
    /// centroid.
    pub covariance: f64,
    /// Pearson correlation of x and y, in `[-1, 1]`.
    pub correlation: f64,
    /// Horizontal shift per unit of vertical distance that best fits the
    /// region, i.e. the regression of x on y.
    pub slant: f64,
}

impl Statistics {
    /// Computes statistics from accumulated moments.
    ///
    /// A region with zero area has no centroid; every value is zero.
    pub fn from_moments(moments: &Moments) -> Self {
        let area = moments.area;
        if area == 0.0 {
            return Self::default();
        }
        let mean_x = moments.moment_x / area;
        let mean_y = moments.moment_y / area;
        let variance_x = moments.moment_xx / area - mean_x * mean_x;
        let variance_y = moments.moment_yy / area - mean_y * mean_y;
        let covariance = moments.moment_xy / area - mean_x * mean_y;
        let stddev_x = signed_sqrt(variance_x);
        let stddev_y = signed_sqrt(variance_y);
        let correlation = if stddev_x == 0.0 || stddev_y == 0.0 {
            0.0
        } else {
            (covariance / (stddev_x * stddev_y)).clamp(-1.0, 1.0)
        };
        let slant = if variance_y == 0.0 {
            0.0
        } else {
            covariance / variance_y
        };
        Self {
            area,
            mean_x,
            mean_y,
            variance_x,
            variance_y,
            stddev_x,
            stddev_y,
            covariance,
            correlation,
            slant,
        }
    }
}

impl From<&Moments> for Statistics {
    fn from(moments: &Moments) -> Self {
        Self::from_moments(moments)
    }
}

// self-intersecting outlines can produce a negative variance
fn signed_sqrt(value: f64) -> f64 {
    value.abs().sqrt().copysign(value)
}
