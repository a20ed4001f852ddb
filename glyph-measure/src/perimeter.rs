//! Arc length of open and closed outlines.
//!
//! Lines are measured exactly and quadratic beziers with a closed form
//! solution. Cubic beziers have no closed form, so they are measured with
//! a [`CubicLength`] strategy chosen from the requested tolerance.

use kurbo::{BezPath, Point, Vec2};

use crate::{
    contour::draw_bez_path,
    error::MeasureError,
    pen::{replay, ContourCursor, PathEvent, Pen},
};

/// Tolerance used by [`PerimeterPen::default`].
pub const DEFAULT_TOLERANCE: f64 = 0.005;

/// Maximum number of times a cubic is bisected when measuring by
/// subdivision.
///
/// Pieces that are still not flat at this depth contribute their estimated
/// length.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Tolerances below this need subdivision; above it the error of the
/// quadrature is within tolerance for real world outlines.
const SUBDIVISION_CUTOFF: f64 = 0.0015;

/// Offset of the interior Lobatto nodes from t = 0.5, `sqrt(3 / 28)`.
const LOBATTO_OFFSET: f64 = 0.32732683535398854;

/// How the length of a cubic bezier is computed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CubicLength {
    /// Bisect until the chord and the control polygon of each piece agree
    /// within a factor of `flatness`, then take the mean of the two.
    ///
    /// Accurate to arbitrary tolerances.
    Subdivide { flatness: f64 },
    /// Five point Gauss-Lobatto quadrature of the derivative's magnitude.
    ///
    /// Constant cost with a small, fixed error.
    Lobatto,
}

impl CubicLength {
    /// Selects the strategy for the given tolerance.
    pub fn for_tolerance(tolerance: f64) -> Self {
        if tolerance < SUBDIVISION_CUTOFF {
            // the 1.5 scale was found empirically
            Self::Subdivide {
                flatness: 1.0 + 1.5 * tolerance,
            }
        } else {
            Self::Lobatto
        }
    }

    /// Length of the cubic bezier from `p0` with control points `p1` and
    /// `p2`, ending at `p3`.
    pub fn length(&self, p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
        let c = [p0.to_vec2(), p1.to_vec2(), p2.to_vec2(), p3.to_vec2()];
        match *self {
            Self::Subdivide { flatness } => subdivided_length(c, flatness),
            Self::Lobatto => lobatto_length(c),
        }
    }
}

/// Length of the line from `p0` to `p1`.
pub fn line_length(p0: Point, p1: Point) -> f64 {
    p0.distance(p1)
}

/// Length of the quadratic bezier from `p0` with control point `p1`, ending
/// at `p2`.
///
/// Substituting the tangent angle in the arc length integral turns it into
/// an integral of `sec(atan(x))`, which has a closed form.
pub fn quad_length(p0: Point, p1: Point, p2: Point) -> f64 {
    let d0 = p1 - p0;
    let d1 = p2 - p1;
    let d = d1 - d0;
    let n = Vec2::new(-d.y, d.x);
    let scale = n.hypot();
    if scale == 0.0 {
        return line_length(p0, p2);
    }
    let orig_dist = n.dot(d0);
    if orig_dist == 0.0 {
        if d0.dot(d1) >= 0.0 {
            return line_length(p0, p2);
        }
        return cusp_length(p0, p2, d0, d);
    }
    let x0 = d.dot(d0) / orig_dist;
    let x1 = d.dot(d1) / orig_dist;
    (2.0 * (int_sec_atan(x1) - int_sec_atan(x0)) * orig_dist / (scale * (x1 - x0))).abs()
}

/// Antiderivative of `sec(atan(x))`.
fn int_sec_atan(x: f64) -> f64 {
    x * (x * x + 1.0).sqrt() / 2.0 + x.asinh() / 2.0
}

/// Length of a collinear quadratic whose control point lies outside the
/// segment from `p0` to `p2`.
///
/// The curve runs out to the point where its derivative vanishes and comes
/// back, so it is measured as the two straight pieces on either side of that
/// point.
fn cusp_length(p0: Point, p2: Point, d0: Vec2, d: Vec2) -> f64 {
    let t = -d.dot(d0) / d.hypot2();
    let turn = p0 + d0 * (2.0 * t) + d * (t * t);
    log::trace!("splitting quadratic cusp at t = {t}");
    line_length(p0, turn) + line_length(turn, p2)
}

fn subdivided_length(cubic: [Vec2; 4], flatness: f64) -> f64 {
    let mut length = 0.0;
    let mut stack = Vec::with_capacity(MAX_SUBDIVISION_DEPTH as usize + 1);
    stack.push((cubic, 0));
    while let Some(([c0, c1, c2, c3], depth)) = stack.pop() {
        let arch = (c0 - c3).hypot();
        let polygon = (c0 - c1).hypot() + (c1 - c2).hypot() + (c2 - c3).hypot();
        let estimate = (arch + polygon) * 0.5;
        if arch * flatness >= polygon {
            length += estimate;
        } else if !estimate.is_finite() {
            log::warn!("cubic with non-finite coordinates {:?}", [c0, c1, c2, c3]);
            length += estimate;
        } else if depth >= MAX_SUBDIVISION_DEPTH {
            log::debug!("cubic subdivision reached depth {depth}, using estimate");
            length += estimate;
        } else {
            let (left, right) = split_in_half([c0, c1, c2, c3]);
            // left half is popped first so pieces are summed in curve order
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }
    length
}

/// Splits a cubic at t = 0.5.
fn split_in_half([c0, c1, c2, c3]: [Vec2; 4]) -> ([Vec2; 4], [Vec2; 4]) {
    let mid = (c0 + (c1 + c2) * 3.0 + c3) * 0.125;
    let deriv3 = (c3 + c2 - c1 - c0) * 0.125;
    (
        [c0, (c0 + c1) * 0.5, mid - deriv3, mid],
        [mid, mid + deriv3, (c2 + c3) * 0.5, c3],
    )
}

fn lobatto_length(cubic: [Vec2; 4]) -> f64 {
    let speed = |t: f64| cubic_derivative(cubic, t).hypot();
    let v0 = speed(0.0);
    let v1 = speed(0.5 - LOBATTO_OFFSET);
    let v2 = speed(0.5);
    let v3 = speed(0.5 + LOBATTO_OFFSET);
    let v4 = speed(1.0);
    (9.0 * (v0 + v4) + 49.0 * (v1 + v3) + 64.0 * v2) / 180.0
}

/// Derivative of a cubic at `t`, from the Bernstein form.
fn cubic_derivative([c0, c1, c2, c3]: [Vec2; 4], t: f64) -> Vec2 {
    let mt = 1.0 - t;
    (c1 - c0) * (3.0 * mt * mt) + (c2 - c1) * (6.0 * mt * t) + (c3 - c2) * (3.0 * t * t)
}

/// A pen that accumulates the length of every contour drawn into it.
///
/// Open contours are measured as drawn; closed contours include the
/// implied closing line.
#[derive(Clone, Debug)]
pub struct PerimeterPen {
    cursor: ContourCursor,
    cubic: CubicLength,
    value: f64,
}

impl PerimeterPen {
    /// Creates a pen measuring cubics to within `tolerance`.
    ///
    /// The tolerance must be finite and non-negative.
    pub fn new(tolerance: f64) -> Result<Self, MeasureError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MeasureError::InvalidTolerance(tolerance));
        }
        Ok(Self::with_strategy(CubicLength::for_tolerance(tolerance)))
    }

    /// Creates a pen measuring cubics with the given strategy.
    pub fn with_strategy(cubic: CubicLength) -> Self {
        Self {
            cursor: ContourCursor::default(),
            cubic,
            value: 0.0,
        }
    }

    /// The strategy used for cubic segments.
    pub fn cubic_strategy(&self) -> CubicLength {
        self.cubic
    }

    /// The length accumulated so far.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Consumes the pen, returning the accumulated length.
    pub fn finish(self) -> f64 {
        self.value
    }
}

impl Default for PerimeterPen {
    fn default() -> Self {
        Self::with_strategy(CubicLength::for_tolerance(DEFAULT_TOLERANCE))
    }
}

impl Pen for PerimeterPen {
    fn move_to(&mut self, p0: Point) -> Result<(), MeasureError> {
        self.cursor.move_to(p0);
        Ok(())
    }

    fn line_to(&mut self, p1: Point) -> Result<(), MeasureError> {
        let p0 = self.cursor.advance(p1)?;
        self.value += line_length(p0, p1);
        Ok(())
    }

    fn quad_to(&mut self, p1: Point, p2: Point) -> Result<(), MeasureError> {
        let p0 = self.cursor.advance(p2)?;
        self.value += quad_length(p0, p1, p2);
        Ok(())
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) -> Result<(), MeasureError> {
        let p0 = self.cursor.advance(p3)?;
        self.value += self.cubic.length(p0, p1, p2, p3);
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), MeasureError> {
        if let Some((p0, p1)) = self.cursor.close()? {
            self.value += line_length(p0, p1);
        }
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), MeasureError> {
        self.cursor.end()?;
        Ok(())
    }
}

/// Measures a sequence of events with a fresh [`PerimeterPen`].
pub fn perimeter(
    events: impl IntoIterator<Item = PathEvent>,
    tolerance: f64,
) -> Result<f64, MeasureError> {
    let mut pen = PerimeterPen::new(tolerance)?;
    replay(events, &mut pen)?;
    Ok(pen.finish())
}

/// Measures a kurbo path with a fresh [`PerimeterPen`].
pub fn perimeter_of_path(path: &BezPath, tolerance: f64) -> Result<f64, MeasureError> {
    let mut pen = PerimeterPen::new(tolerance)?;
    draw_bez_path(path, &mut pen)?;
    Ok(pen.finish())
}
