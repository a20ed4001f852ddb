//! Sources of path events: stored point lists and kurbo paths.
//!
//! The measuring pens only understand single-control quadratic segments.
//! TrueType style outlines store runs of consecutive off-curve points with
//! implied on-curve points halfway between them, so they are decomposed
//! here before reaching a pen.

use kurbo::{BezPath, PathEl, Point};

use crate::{error::MeasureError, pen::Pen};

/// Point of a stored quadratic outline.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ContourPoint {
    pub point: Point,
    pub on_curve: bool,
}

impl ContourPoint {
    /// An on-curve point at (x, y).
    pub fn on(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            on_curve: true,
        }
    }

    /// An off-curve quadratic control point at (x, y).
    pub fn off(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            on_curve: false,
        }
    }
}

/// Draws a quadratic spline from the current point through the control
/// points in `off_curve` to `end`.
///
/// Each pair of consecutive control points has an implied on-curve point at
/// its midpoint. With no control points this is a straight line.
pub fn draw_quadratic_spline(
    off_curve: &[Point],
    end: Point,
    pen: &mut impl Pen,
) -> Result<(), MeasureError> {
    quadratic_spline(off_curve.iter().copied(), end, pen)
}

fn quadratic_spline(
    off_curve: impl IntoIterator<Item = Point>,
    end: Point,
    pen: &mut impl Pen,
) -> Result<(), MeasureError> {
    let mut off_curve = off_curve.into_iter();
    let Some(mut control) = off_curve.next() else {
        return pen.line_to(end);
    };
    for next in off_curve {
        pen.quad_to(control, control.midpoint(next))?;
        control = next;
    }
    pen.quad_to(control, end)
}

/// Draws a single closed contour described by on and off-curve points.
///
/// If the first point is off-curve, the contour starts at the last point when
/// that is on-curve and at the implied midpoint between the last and first
/// points otherwise. An empty contour draws nothing.
pub fn draw_contour(points: &[ContourPoint], pen: &mut impl Pen) -> Result<(), MeasureError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Ok(());
    };
    let (start, rest) = if first.on_curve {
        (first.point, &points[1..])
    } else if last.on_curve {
        (last.point, &points[..points.len() - 1])
    } else {
        (last.point.midpoint(first.point), points)
    };
    pen.move_to(start)?;
    let mut pending = 0;
    for (ix, point) in rest.iter().enumerate() {
        if point.on_curve {
            let controls = &rest[pending..ix];
            quadratic_spline(controls.iter().map(|p| p.point), point.point, pen)?;
            pending = ix + 1;
        }
    }
    let controls = &rest[pending..];
    if !controls.is_empty() {
        quadratic_spline(controls.iter().map(|p| p.point), start, pen)?;
    }
    pen.close_path()
}

/// Draws every contour of a stored outline.
///
/// `contour_ends` holds the index of the last point of each contour, in
/// increasing order.
pub fn draw_glyph(
    points: &[ContourPoint],
    contour_ends: &[usize],
    pen: &mut impl Pen,
) -> Result<(), MeasureError> {
    let mut start_ix = 0;
    for (contour_ix, &end_ix) in contour_ends.iter().enumerate() {
        if end_ix < start_ix || end_ix >= points.len() {
            return Err(MeasureError::ContourOrder(contour_ix));
        }
        draw_contour(&points[start_ix..=end_ix], pen)?;
        start_ix = end_ix + 1;
    }
    Ok(())
}

/// Draws a kurbo path.
///
/// Subpaths that are not terminated by `ClosePath` are ended with
/// [`end_path`](Pen::end_path), so they are treated as open contours.
pub fn draw_bez_path(path: &BezPath, pen: &mut impl Pen) -> Result<(), MeasureError> {
    let mut open = false;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p0) => {
                if open {
                    pen.end_path()?;
                }
                pen.move_to(p0)?;
                open = true;
            }
            PathEl::LineTo(p1) => {
                pen.line_to(p1)?;
                open = true;
            }
            PathEl::QuadTo(p1, p2) => {
                pen.quad_to(p1, p2)?;
                open = true;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                pen.curve_to(p1, p2, p3)?;
                open = true;
            }
            PathEl::ClosePath => {
                pen.close_path()?;
                open = false;
            }
        }
    }
    if open {
        pen.end_path()?;
    }
    Ok(())
}
