//! Errors that may occur while measuring an outline.

use core::fmt;

use kurbo::Point;

/// Errors that may occur when feeding path events to a measuring pen.
#[derive(Clone, Debug, PartialEq)]
pub enum MeasureError {
    /// A segment or contour terminator arrived before any `move_to`.
    MissingMoveTo,
    /// `end_path` was reached on a contour that does not return to its
    /// start point.
    ///
    /// Green's theorem is only defined for closed boundaries, so this is
    /// fatal for moment accumulation.
    OpenContour { start: Point, end: Point },
    /// The pen already reported a fatal error and its totals are no longer
    /// meaningful.
    Failed,
    /// The perimeter tolerance was negative or not finite.
    InvalidTolerance(f64),
    /// Contour end point at this index was out of bounds or less than its
    /// preceding end point.
    ContourOrder(usize),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingMoveTo => write!(f, "Path segment without a preceding move_to"),
            Self::OpenContour { start, end } => write!(
                f,
                "Open contour (starts at ({}, {}), ends at ({}, {})) has no enclosed area",
                start.x, start.y, end.x, end.y
            ),
            Self::Failed => write!(f, "Pen was used after a fatal error"),
            Self::InvalidTolerance(tolerance) => {
                write!(f, "Tolerance must be finite and non-negative, got {tolerance}")
            }
            Self::ContourOrder(ix) => write!(
                f,
                "Contour end point at index {ix} was out of bounds or less than preceding end point"
            ),
        }
    }
}

impl std::error::Error for MeasureError {}
