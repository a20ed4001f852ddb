//! Shapes shared by unit tests.

use core::f64::consts::TAU;

use kurbo::Point;

use crate::{error::MeasureError, pen::Pen};

/// Draws a closed polygon through `points`.
pub(crate) fn draw_polygon(pen: &mut impl Pen, points: &[(f64, f64)]) -> Result<(), MeasureError> {
    let (first, rest) = points.split_first().ok_or(MeasureError::MissingMoveTo)?;
    pen.move_to((*first).into())?;
    for point in rest {
        pen.line_to((*point).into())?;
    }
    pen.close_path()
}

/// Draws a counter-clockwise unit circle from `segments` quadratic beziers
/// whose control points sit on the tangents at their end points.
pub(crate) fn draw_circle(pen: &mut impl Pen, segments: usize) -> Result<(), MeasureError> {
    let step = TAU / segments as f64;
    let control_radius = 1.0 / (step / 2.0).cos();
    pen.move_to(Point::new(1.0, 0.0))?;
    for i in 0..segments {
        let mid_angle = step * (i as f64 + 0.5);
        let control = Point::new(
            control_radius * mid_angle.cos(),
            control_radius * mid_angle.sin(),
        );
        let end = if i + 1 == segments {
            Point::new(1.0, 0.0)
        } else {
            let end_angle = step * (i + 1) as f64;
            Point::new(end_angle.cos(), end_angle.sin())
        };
        pen.quad_to(control, end)?;
    }
    pen.close_path()
}

/// Draws a counter-clockwise unit circle from four quadratic beziers through
/// the points on the axes, with control points at `(±control, ±control)`.
pub(crate) fn draw_axis_circle(pen: &mut impl Pen, control: f64) -> Result<(), MeasureError> {
    pen.move_to(Point::new(1.0, 0.0))?;
    pen.quad_to(Point::new(control, control), Point::new(0.0, 1.0))?;
    pen.quad_to(Point::new(-control, control), Point::new(-1.0, 0.0))?;
    pen.quad_to(Point::new(-control, -control), Point::new(0.0, -1.0))?;
    pen.quad_to(Point::new(control, -control), Point::new(1.0, 0.0))?;
    pen.close_path()
}

/// A closed contour mixing every segment type, ending with an implied line.
pub(crate) fn draw_closed_test_shape(pen: &mut impl Pen) -> Result<(), MeasureError> {
    pen.move_to((125.0, 100.0).into())?;
    pen.quad_to((200.0, 150.0).into(), (175.0, 300.0).into())?;
    pen.curve_to(
        (150.0, 150.0).into(),
        (50.0, 150.0).into(),
        (25.0, 300.0).into(),
    )?;
    pen.quad_to((0.0, 150.0).into(), (75.0, 100.0).into())?;
    pen.line_to((100.0, 50.0).into())?;
    pen.close_path()
}

/// Asserts that `actual` is within `epsilon` of `expected`.
pub(crate) fn assert_near(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "{actual} != {expected} (epsilon {epsilon})"
    );
}
