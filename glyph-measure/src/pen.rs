//! The event interface shared by everything that consumes an outline.

use kurbo::{BezPath, Point};

use crate::error::MeasureError;

/// Interface for accepting a sequence of path events.
///
/// Each contour begins with a single [`move_to`](Pen::move_to), continues
/// with any number of segments and ends with exactly one of
/// [`close_path`](Pen::close_path) or [`end_path`](Pen::end_path).
///
/// Every method is fallible so that a failure is reported to the caller of
/// the event that caused it.
pub trait Pen {
    /// Begin a new contour at `p0`.
    fn move_to(&mut self, p0: Point) -> Result<(), MeasureError>;

    /// Emit a line segment from the current point to `p1`.
    fn line_to(&mut self, p1: Point) -> Result<(), MeasureError>;

    /// Emit a quadratic bezier segment from the current point with a control
    /// point at `p1` and ending at `p2`.
    fn quad_to(&mut self, p1: Point, p2: Point) -> Result<(), MeasureError>;

    /// Emit a cubic bezier segment from the current point with control
    /// points at `p1` and `p2` and ending at `p3`.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) -> Result<(), MeasureError>;

    /// Close the current contour, implying a straight line back to its start
    /// point if the contour doesn't already end there.
    fn close_path(&mut self) -> Result<(), MeasureError>;

    /// End the current contour without closing it.
    fn end_path(&mut self) -> Result<(), MeasureError>;
}

/// Single path event.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathEvent {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    ClosePath,
    EndPath,
}

impl PathEvent {
    /// Returns the on-curve point this event finishes at, if any.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathEvent::MoveTo(p) | PathEvent::LineTo(p) => Some(p),
            PathEvent::QuadTo(_, p) | PathEvent::CurveTo(_, _, p) => Some(p),
            PathEvent::ClosePath | PathEvent::EndPath => None,
        }
    }

    /// Send this event to `pen`.
    pub fn apply_to(&self, pen: &mut impl Pen) -> Result<(), MeasureError> {
        match *self {
            PathEvent::MoveTo(p0) => pen.move_to(p0),
            PathEvent::LineTo(p1) => pen.line_to(p1),
            PathEvent::QuadTo(p1, p2) => pen.quad_to(p1, p2),
            PathEvent::CurveTo(p1, p2, p3) => pen.curve_to(p1, p2, p3),
            PathEvent::ClosePath => pen.close_path(),
            PathEvent::EndPath => pen.end_path(),
        }
    }
}

/// Feeds every event in `events` to `pen`, stopping at the first error.
pub fn replay(
    events: impl IntoIterator<Item = PathEvent>,
    pen: &mut impl Pen,
) -> Result<(), MeasureError> {
    events.into_iter().try_for_each(|event| event.apply_to(pen))
}

impl Pen for Vec<PathEvent> {
    fn move_to(&mut self, p0: Point) -> Result<(), MeasureError> {
        self.push(PathEvent::MoveTo(p0));
        Ok(())
    }

    fn line_to(&mut self, p1: Point) -> Result<(), MeasureError> {
        self.push(PathEvent::LineTo(p1));
        Ok(())
    }

    fn quad_to(&mut self, p1: Point, p2: Point) -> Result<(), MeasureError> {
        self.push(PathEvent::QuadTo(p1, p2));
        Ok(())
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) -> Result<(), MeasureError> {
        self.push(PathEvent::CurveTo(p1, p2, p3));
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), MeasureError> {
        self.push(PathEvent::ClosePath);
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), MeasureError> {
        self.push(PathEvent::EndPath);
        Ok(())
    }
}

/// A [`BezPath`] records events verbatim; it has no way to mark an open
/// contour so `end_path` adds nothing.
impl Pen for BezPath {
    fn move_to(&mut self, p0: Point) -> Result<(), MeasureError> {
        BezPath::move_to(self, p0);
        Ok(())
    }

    fn line_to(&mut self, p1: Point) -> Result<(), MeasureError> {
        BezPath::line_to(self, p1);
        Ok(())
    }

    fn quad_to(&mut self, p1: Point, p2: Point) -> Result<(), MeasureError> {
        BezPath::quad_to(self, p1, p2);
        Ok(())
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) -> Result<(), MeasureError> {
        BezPath::curve_to(self, p1, p2, p3);
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), MeasureError> {
        BezPath::close_path(self);
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), MeasureError> {
        Ok(())
    }
}

/// Tracks the current point and the start of the current contour on behalf
/// of the measuring pens.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct ContourCursor {
    start: Point,
    current: Option<Point>,
}

impl ContourCursor {
    pub(crate) fn move_to(&mut self, p0: Point) {
        self.start = p0;
        self.current = Some(p0);
    }

    /// The current point, or an error if no contour was begun.
    pub(crate) fn current(&self) -> Result<Point, MeasureError> {
        self.current.ok_or(MeasureError::MissingMoveTo)
    }

    /// Returns the current point and moves the cursor to `to`.
    pub(crate) fn advance(&mut self, to: Point) -> Result<Point, MeasureError> {
        let from = self.current()?;
        self.current = Some(to);
        Ok(from)
    }

    /// Returns the closing edge if the contour doesn't already end at its
    /// start point.
    ///
    /// The contour is finished; the next segment needs a new `move_to`.
    pub(crate) fn close(&mut self) -> Result<Option<(Point, Point)>, MeasureError> {
        let (start, current) = self.end()?;
        Ok((current != start).then_some((current, start)))
    }

    /// Finishes the contour, returning its (start, end) points.
    pub(crate) fn end(&mut self) -> Result<(Point, Point), MeasureError> {
        let current = self.current()?;
        self.current = None;
        Ok((self.start, current))
    }

    /// The (start, end) points of a contour that has not been terminated.
    pub(crate) fn in_progress(&self) -> Option<(Point, Point)> {
        self.current.map(|current| (self.start, current))
    }
}
