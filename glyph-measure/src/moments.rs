//! Area and image moments of closed outlines.
//!
//! The six values are boundary integrals evaluated with Green's theorem. For
//! each segment degree the integral along the segment's parametrization has
//! a closed form, a polynomial in the control point coordinates, so no
//! numerical integration is involved.

use core::{
    iter::Sum,
    ops::{Add, AddAssign, Neg},
};

use kurbo::{BezPath, Point};

use crate::{
    contour::draw_bez_path,
    error::MeasureError,
    pen::{replay, ContourCursor, PathEvent, Pen},
};

/// Area and first and second moments of the region bounded by a set of
/// closed contours.
///
/// A counter-clockwise contour contributes positively and a clockwise one
/// negatively, so an outer contour with holes wound the other way sums to
/// the net region.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    /// Signed area.
    pub area: f64,
    /// Integral of `x` over the region.
    pub moment_x: f64,
    /// Integral of `y` over the region.
    pub moment_y: f64,
    /// Integral of `x²` over the region.
    pub moment_xx: f64,
    /// Integral of `xy` over the region.
    pub moment_xy: f64,
    /// Integral of `y²` over the region.
    pub moment_yy: f64,
}

impl Moments {
    /// Measures a sequence of events with a fresh [`MomentsPen`].
    pub fn from_events(events: impl IntoIterator<Item = PathEvent>) -> Result<Self, MeasureError> {
        let mut pen = MomentsPen::new();
        replay(events, &mut pen)?;
        pen.finish()
    }

    /// Measures a kurbo path with a fresh [`MomentsPen`].
    ///
    /// Every subpath must be closed, either explicitly or by ending at its
    /// start point.
    pub fn from_path(path: &BezPath) -> Result<Self, MeasureError> {
        let mut pen = MomentsPen::new();
        draw_bez_path(path, &mut pen)?;
        pen.finish()
    }

    /// Contribution of the line from `p0` to `p1`.
    pub fn line(p0: Point, p1: Point) -> Self {
        let (x0, y0) = (p0.x, p0.y);
        let (x1, y1) = (p1.x, p1.y);
        let r0 = x0 - x1;
        let r1 = y0 - y1;
        let r2 = r1 * x0;
        let r3 = x1.powi(2);
        let r4 = x0.powi(2);
        let r5 = 2.0 * y0;
        let r6 = y0.powi(2);
        let r7 = y1.powi(2);
        let r8 = r5 * y1;
        let area = r0 * (y0 + y1);
        let moment_x = -r2 * x1 - r3 * (y0 + 2.0 * y1) + r4 * (r5 + y1);
        let moment_y = r0 * (r6 + r7 + y0 * y1);
        let moment_xx = -r1 * r4 * x1
            - r2 * r3
            + x0.powi(3) * (3.0 * y0 + y1)
            - x1.powi(3) * (y0 + 3.0 * y1);
        let moment_xy = -r3 * (r6 + 3.0 * r7 + r8)
            + r4 * (3.0 * r6 + r7 + r8)
            - 2.0 * x0 * x1 * (r6 - r7);
        let moment_yy = r0 * (r6 * y1 + r7 * y0 + y0.powi(3) + y1.powi(3));
        Self {
            area: area / 2.0,
            moment_x: moment_x / 6.0,
            moment_y: moment_y / 6.0,
            moment_xx: moment_xx / 12.0,
            moment_xy: moment_xy / 24.0,
            moment_yy: moment_yy / 12.0,
        }
    }

    /// Contribution of the quadratic bezier from `p0` with control point
    /// `p1`, ending at `p2`.
    pub fn quad(p0: Point, p1: Point, p2: Point) -> Self {
        let (x0, y0) = (p0.x, p0.y);
        let (x1, y1) = (p1.x, p1.y);
        let (x2, y2) = (p2.x, p2.y);
        let r0 = 2.0 * y1;
        let r1 = r0 * x2;
        let r2 = x2 * y2;
        let r3 = 3.0 * r2;
        let r4 = 2.0 * x1;
        let r5 = 4.0 * x1;
        let r6 = r2 * r5;
        let r7 = x1.powi(2);
        let r8 = 2.0 * r7;
        let r9 = x2.powi(2);
        let r10 = 4.0 * y1;
        let r11 = r9 * y2;
        let r12 = x0.powi(2);
        let r13 = 10.0 * y0;
        let r14 = r10 + y2;
        let r15 = r5 + x2;
        let r16 = r4 * y2;
        let r17 = r0 * x1 + r2;
        let r18 = r10 * r2;
        let r19 = y2.powi(2);
        let r20 = y1.powi(2);
        let r21 = 2.0 * r20;
        let r22 = 5.0 * r19 * x2;
        let r23 = y0.powi(2);
        let r24 = 5.0 * r23;
        let r25 = 8.0 * x1.powi(3);
        let r26 = x2.powi(3);
        let r27 = 20.0 * x1 * y1;
        let r28 = x1 * y2;
        let r29 = x2 * y1;
        let r30 = 8.0 * r7;
        let r31 = 20.0 * r7;
        let r32 = 6.0 * y1;
        let r33 = r32 + y2;
        let r34 = 12.0 * x2;
        let r35 = 6.0 * x1;
        let r36 = r35 + x2;
        let r37 = 5.0 * r36;
        let r38 = r27 + r3;
        let r39 = r31 + r34 * x1 + 3.0 * r9;
        let r40 = 12.0 * y2;
        let r41 = 12.0 * x1;
        let r42 = 5.0 * r11 + r30 * y1;
        let r43 = r20 * x1;
        let r44 = 20.0 * r20;
        let r45 = 3.0 * r19 + r40 * y1 + r44;
        let r46 = 12.0 * y1;
        let r47 = r22 + 8.0 * r43;
        let r48 = y2.powi(3);
        let r49 = 8.0 * y1.powi(3);
        let r50 = y0.powi(3);
        let area = -r1 - r3 + x0 * (r0 + 3.0 * y0 + y2) + 2.0 * x1 * y2 - y0 * (r4 + x2);
        let moment_x = -r1 * x1
            - r10 * r9
            - 10.0 * r11
            + r12 * (r13 + r14)
            + r6
            + r8 * y2
            + x0 * (-r15 * y0 + r16 + r17)
            - y0 * (r4 * x2 + r8 + r9);
        let moment_y = -r15 * r23
            - r18
            + 4.0 * r19 * x1
            - r21 * x2
            - r22
            + x0 * (r0 * y2 + r14 * y0 + r19 + r21 + r24)
            + 2.0 * x1 * y1 * y2
            - y0 * (r1 + r17);
        let moment_xx = r12 * (r1 + 10.0 * r28 - r37 * y0 + r38)
            + r2 * r31
            + r25 * y2
            - 30.0 * r26 * y1
            - 105.0 * r26 * y2
            - r27 * r9
            + 30.0 * r28 * r9
            - r29 * r30
            + 5.0 * x0.powi(3) * (r33 + 21.0 * y0)
            + x0 * (-r0 * r9 + r2 * r41 - r39 * y0 + r40 * r7 + r42)
            - y0 * (r25 + 5.0 * r26 + r34 * r7 + 10.0 * r9 * x1);
        let moment_xy = -60.0 * r11 * y1
            + r12 * (r13 * r33 + 105.0 * r23 + r45)
            + 20.0 * r19 * r7
            - 105.0 * r19 * r9
            + 60.0 * r19 * x1 * x2
            - r23 * r39
            - 16.0 * r43 * x2
            - r44 * r9
            + 16.0 * r7 * y1 * y2
            + 2.0 * x0 * (r18 + r19 * r35 - r24 * r36 + r28 * r46 + r47 + 4.0 * y0 * (r28 - r29))
            - 2.0 * y0 * (r29 * r41 + r32 * r9 + r42 + r6);
        let moment_yy = -30.0 * r19 * r29
            + 20.0 * r19 * x1 * y1
            - r2 * r44
            + 8.0 * r20 * x1 * y2
            - r23 * (r16 + 10.0 * r29 + r38)
            - r37 * r50
            + 30.0 * r48 * x1
            - 35.0 * r48 * x2
            - r49 * x2
            + x0 * (10.0 * r19 * y1
                + r20 * r40
                + r24 * r33
                + r45 * y0
                + 5.0 * r48
                + r49
                + 35.0 * r50)
            - y0 * (-r19 * r4 + r2 * r46 + r20 * r34 + r47);
        Self {
            area: area / 6.0,
            moment_x: moment_x / 30.0,
            moment_y: moment_y / 30.0,
            moment_xx: moment_xx / 420.0,
            moment_xy: moment_xy / 840.0,
            moment_yy: moment_yy / 420.0,
        }
    }

    /// Contribution of the cubic bezier from `p0` with control points `p1`
    /// and `p2`, ending at `p3`.
    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        let (x0, y0) = (p0.x, p0.y);
        let (x1, y1) = (p1.x, p1.y);
        let (x2, y2) = (p2.x, p2.y);
        let (x3, y3) = (p3.x, p3.y);
        let r0 = -3.0 * x1 * y3;
        let r1 = 3.0 * x2;
        let r2 = x3 * y1;
        let r3 = 3.0 * r2;
        let r4 = 6.0 * y2;
        let r5 = x3 * y3;
        let r6 = 6.0 * x1;
        let r7 = 6.0 * y1;
        let r8 = 3.0 * y2;
        let r9 = 21.0 * x1;
        let r10 = r9 + 6.0 * x2 + x3;
        let r11 = 5.0 * y0;
        let r12 = 12.0 * y3;
        let r13 = x1 * y3;
        let r14 = 45.0 * x1;
        let r15 = r14 * y2;
        let r16 = 5.0 * r5;
        let r17 = x2 * y2;
        let r18 = 18.0 * r17;
        let r19 = r14 * y1 + r16 + r18;
        let r20 = r14 * x2;
        let r21 = 12.0 * x3;
        let r22 = x2 * x3;
        let r23 = x1.powi(2);
        let r24 = 45.0 * r23;
        let r25 = x2.powi(2);
        let r26 = x3.powi(2);
        let r27 = 5.0 * r26;
        let r28 = r26 * y3;
        let r29 = r26 * y2;
        let r30 = r26 * y1;
        let r31 = x0.powi(2);
        let r32 = 21.0 * y1;
        let r33 = r32 + r4 + y3;
        let r34 = r23 * y3;
        let r35 = r23 * y2;
        let r36 = 27.0 * r35;
        let r37 = 45.0 * y1;
        let r38 = 45.0 * x3;
        let r39 = x1 * x2;
        let r40 = 27.0 * y1;
        let r41 = r17 * x1;
        let r42 = 105.0 * r5;
        let r43 = r25 * y1;
        let r44 = 45.0 * r25;
        let r45 = r2 * x1;
        let r46 = 30.0 * r5;
        let r47 = -27.0 * r43 + r44 * y3 - 18.0 * r45 + r46 * x1;
        let r48 = x1 * y2;
        let r49 = r13 * y1;
        let r50 = 18.0 * r49;
        let r51 = 45.0 * y3;
        let r52 = r37 * y2;
        let r53 = r46 * y1;
        let r54 = y2.powi(2);
        let r55 = r54 * x1;
        let r56 = 27.0 * r55;
        let r57 = y3.powi(2);
        let r58 = r57 * x1;
        let r59 = y1.powi(2);
        let r60 = r59 * x2;
        let r61 = 27.0 * r60;
        let r62 = r57 * x2;
        let r63 = r59 * x3;
        let r64 = r54 * x3;
        let r65 = 45.0 * r64;
        let r66 = r57 * x3;
        let r67 = y0.powi(2);
        let r68 = y2 * y3;
        let r69 = 45.0 * r59;
        let r70 = 5.0 * r57;
        let r71 = x1.powi(3);
        let r72 = x2.powi(3);
        let r73 = 81.0 * y1;
        let r74 = x3.powi(3);
        let r75 = 126.0 * y1;
        let r76 = 630.0 * y2;
        let r77 = 252.0 * r39;
        let r78 = 189.0 * r25;
        let r79 = 42.0 * x1;
        let r80 = r23 * x2;
        let r81 = 135.0 * r17;
        let r82 = 378.0 * r26;
        let r83 = x3 * y2;
        let r84 = 9.0 * y2;
        let r85 = r37 + r84 + y3;
        let r86 = 9.0 * x2;
        let r87 = 14.0 * r14 + 14.0 * r86 + 14.0 * x3;
        let r88 = x2 * y3;
        let r89 = 42.0 * x2;
        let r90 = r16 + 63.0 * r17 + 378.0 * x1 * y1;
        let r91 = 90.0 * x1;
        let r92 = 135.0 * r25;
        let r93 = 63.0 * r25;
        let r94 = 30.0 * r22 + 378.0 * r23 + r27 + r77 + r79 * x3 + r93;
        let r95 = r2 * x2;
        let r96 = r23 * r75 + 14.0 * r28 + r44 * y2 + 30.0 * r48 * x3;
        let r97 = x2 * y1;
        let r98 = 252.0 * y1;
        let r99 = 63.0 * r59;
        let r100 = r98 * y2;
        let r101 = 63.0 * r54;
        let r102 = r100 + r101 + 378.0 * r59 + 30.0 * r68 + r70 + 42.0 * y1 * y3;
        let r103 = 21.0 * r5;
        let r104 = 54.0 * r17;
        let r105 = 189.0 * y1;
        let r106 = r13 * y2;
        let r107 = r54 * x2;
        let r108 = 45.0 * r107 + 126.0 * r59 * x1 + 14.0 * r66 + 30.0 * r88 * y1;
        let r109 = y2.powi(3);
        let r110 = y3.powi(3);
        let r111 = y1.powi(3);
        let r112 = y0.powi(3);
        let r113 = 42.0 * y2;
        let area = -r0
            - r1 * y1
            - r3
            - r4 * x3
            - 10.0 * r5
            + x0 * (r7 + r8 + 10.0 * y0 + y3)
            + 3.0 * x1 * y2
            + 6.0 * x2 * y3
            - y0 * (r1 + r6 + x3);
        let moment_x = -r17 * r38
            + r20 * y3
            - r22 * r37
            - 280.0 * r28
            - 105.0 * r29
            - 30.0 * r30
            + 5.0 * r31 * (r33 + 56.0 * y0)
            + 18.0 * r34
            + r36
            - r39 * r40
            + 27.0 * r41
            + r42 * x2
            + r47
            + x0 * (-r10 * r11 + r12 * x2 + 15.0 * r13 + r15 + r19 - r3 + r8 * x3)
            - y0 * (r20 + r21 * x1 + 15.0 * r22 + r24 + 18.0 * r25 + r27);
        let moment_y = -5.0 * r10 * r67
            + r15 * y3
            - r17 * r40
            + r17 * r51
            + r40 * r48
            - r42 * y2
            + r50
            - r52 * x3
            - r53
            + r56
            + 30.0 * r58
            - r61
            + 105.0 * r62
            - 18.0 * r63
            - r65
            - 140.0 * r66
            + x0 * (r11 * r33 + r12 * y1 + r52 + 18.0 * r54 + 140.0 * r67 + 15.0 * r68 + r69 + r70)
            + y0 * (-r0 - r1 * y3 - r19 - 15.0 * r2 - r21 * y2 - r37 * x2);
        let moment_xx = 126.0 * r13 * r26
            + r13 * r78
            - r17 * r82
            - r2 * r24
            - 162.0 * r2 * r39
            - r2 * r78
            + 63.0 * r23 * r5
            + r23 * r81
            + 81.0 * r25 * r48
            + 378.0 * r25 * r5
            - 126.0 * r25 * r83
            + 630.0 * r28 * x2
            - r29 * r79
            - 63.0 * r30 * x1
            - 210.0 * r30 * x2
            + r31 * (42.0 * r13 + 210.0 * r48 + r84 * x3 - r87 * y0 + 21.0 * r88 + r89 * y1 + r90)
            + 135.0 * r34 * x2
            + r36 * x3
            - 135.0 * r43 * x1
            + r5 * r77
            + r51 * r71
            + 81.0 * r71 * y2
            - r72 * r73
            + 126.0 * r72 * y3
            - r73 * r80
            - r74 * r75
            - r74 * r76
            - 2310.0 * r74 * y3
            + 14.0 * x0.powi(3) * (r85 + 165.0 * y0)
            + x0 * (90.0 * r13 * x2
                + r18 * x3
                - 9.0 * r30
                + 63.0 * r34
                + 189.0 * r35
                + 162.0 * r41
                + r47
                + r5 * r89
                - r94 * y0
                - 30.0 * r95
                + r96)
            - y0 * (r22 * r91
                + r24 * x3
                + r26 * r89
                + r26 * r9
                + 126.0 * r71
                + 45.0 * r72
                + 14.0 * r74
                + 189.0 * r80
                + r92 * x1
                + r93 * x3);
        let moment_xy = -378.0 * r17 * r2
            - 108.0 * r2 * r48
            - 252.0 * r22 * r54
            - 162.0 * r22 * r59
            + 135.0 * r23 * r54
            + 63.0 * r23 * r57
            + 162.0 * r23 * y1 * y2
            + 90.0 * r23 * y1 * y3
            + 162.0 * r23 * y2 * y3
            + 378.0 * r25 * r57
            + 252.0 * r25 * y2 * y3
            - 2310.0 * r26 * r57
            - r26 * r99
            - r28 * r98
            - 1260.0 * r28 * y2
            - r29 * r98
            + r31 * (r102 + 2310.0 * r67 + 28.0 * r85 * y0)
            - 162.0 * r43 * y2
            - 168.0 * r5 * r97
            - r54 * r82
            + 162.0 * r54 * x1 * x2
            + 252.0 * r57 * x1 * x2
            + 252.0 * r57 * x1 * x3
            + 1260.0 * r57 * x2 * x3
            - r59 * r92
            - 162.0 * r60 * x1
            - r63 * r91
            - r67 * r94
            + 2.0 * x0 * (r103 * y2
                + r104 * y1
                + r104 * y3
                + r105 * r48
                + 60.0 * r106
                + r108
                + 54.0 * r49
                + r5 * r7
                + 81.0 * r55
                + 15.0 * r58
                + 21.0 * r62
                - 9.0 * r63
                + 9.0 * r64
                - r67 * r87
                + 3.0 * y0 * (7.0 * r13
                    - 7.0 * r2
                    + 28.0 * r48
                    - 2.0 * r83
                    + 2.0 * r88
                    - 28.0 * r97))
            + 108.0 * x1 * x2 * y1 * y3
            + 378.0 * x1 * x2 * y2 * y3
            + 168.0 * x1 * x3 * y2 * y3
            - 2.0 * y0 * (r103 * x2
                + r104 * x3
                + r105 * r39
                + 9.0 * r25 * y3
                + 21.0 * r29
                + 15.0 * r30
                - 9.0 * r34
                + 54.0 * r41
                + 81.0 * r43
                + 54.0 * r45
                + r5 * r6
                + 60.0 * r95
                + r96);
        let moment_yy = -r100 * r5
            - r107 * r73
            + 81.0 * r109 * x1
            - 126.0 * r109 * x3
            + 126.0 * r110 * x1
            + 630.0 * r110 * x2
            - 770.0 * r110 * x3
            - r111 * r38
            - 81.0 * r111 * x2
            - r112 * r87
            - 189.0 * r2 * r54
            - 126.0 * r2 * r57
            - 378.0 * r5 * r54
            - r5 * r99
            + 135.0 * r54 * x1 * y1
            + 189.0 * r54 * x1 * y3
            + 126.0 * r54 * x2 * y3
            + 63.0 * r57 * x1 * y1
            + 210.0 * r57 * x1 * y2
            + 42.0 * r57 * x2 * y1
            + 378.0 * r57 * x2 * y2
            - r59 * r81
            + 81.0 * r59 * x1 * y2
            + 45.0 * r59 * x1 * y3
            - r61 * y3
            - 135.0 * r63 * y2
            - r66 * r76
            - r67 * (42.0 * r2 + r79 * y2 + 21.0 * r83 + r86 * y3 + r90 + 210.0 * r97)
            + x0 * (r101 * y3
                + r102 * y0
                + 45.0 * r109
                + 14.0 * r110
                + 126.0 * r111
                + 770.0 * r112
                + r113 * r57
                + r32 * r57
                + 135.0 * r54 * y1
                + 189.0 * r59 * y2
                + 14.0 * r67 * r85
                + 90.0 * r68 * y1
                + r69 * y3)
            + 162.0 * x1 * y1 * y2 * y3
            - y0 * (-30.0 * r106
                + r108
                + r113 * r5
                + 162.0 * r17 * y1
                + r18 * y3
                + 90.0 * r2 * y2
                - r50
                + r53
                - r56
                - 9.0 * r58
                + 189.0 * r60
                + 63.0 * r63
                + r65);
        Self {
            area: area / 20.0,
            moment_x: moment_x / 840.0,
            moment_y: moment_y / 840.0,
            moment_xx: moment_xx / 9240.0,
            moment_xy: moment_xy / 18480.0,
            moment_yy: moment_yy / 9240.0,
        }
    }
}

impl Add for Moments {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            area: self.area + rhs.area,
            moment_x: self.moment_x + rhs.moment_x,
            moment_y: self.moment_y + rhs.moment_y,
            moment_xx: self.moment_xx + rhs.moment_xx,
            moment_xy: self.moment_xy + rhs.moment_xy,
            moment_yy: self.moment_yy + rhs.moment_yy,
        }
    }
}

impl AddAssign for Moments {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Reversing the winding direction of a contour negates its moments.
impl Neg for Moments {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            area: -self.area,
            moment_x: -self.moment_x,
            moment_y: -self.moment_y,
            moment_xx: -self.moment_xx,
            moment_xy: -self.moment_xy,
            moment_yy: -self.moment_yy,
        }
    }
}

impl Sum for Moments {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A pen that accumulates the [`Moments`] of every contour drawn into it.
///
/// Contours must be closed: ending an open contour with
/// [`end_path`](Pen::end_path) fails the pen, after which every event and
/// [`finish`](Self::finish) report [`MeasureError::Failed`].
#[derive(Clone, Default, Debug)]
pub struct MomentsPen {
    cursor: ContourCursor,
    moments: Moments,
    failed: bool,
}

impl MomentsPen {
    /// Creates a pen with all moments zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The moments accumulated so far.
    ///
    /// A contour that was not terminated must already be back at its start
    /// point, otherwise this is [`MeasureError::OpenContour`].
    pub fn moments(&self) -> Result<&Moments, MeasureError> {
        self.check_complete()?;
        Ok(&self.moments)
    }

    /// Consumes the pen, returning the accumulated moments.
    ///
    /// Fails like [`moments`](Self::moments) on an open contour.
    pub fn finish(self) -> Result<Moments, MeasureError> {
        self.check_complete()?;
        Ok(self.moments)
    }

    fn check(&self) -> Result<(), MeasureError> {
        if self.failed {
            return Err(MeasureError::Failed);
        }
        Ok(())
    }

    fn check_complete(&self) -> Result<(), MeasureError> {
        self.check()?;
        match self.cursor.in_progress() {
            Some((start, end)) if start != end => Err(MeasureError::OpenContour { start, end }),
            _ => Ok(()),
        }
    }
}

impl Pen for MomentsPen {
    fn move_to(&mut self, p0: Point) -> Result<(), MeasureError> {
        self.check()?;
        self.cursor.move_to(p0);
        Ok(())
    }

    fn line_to(&mut self, p1: Point) -> Result<(), MeasureError> {
        self.check()?;
        let p0 = self.cursor.advance(p1)?;
        self.moments += Moments::line(p0, p1);
        Ok(())
    }

    fn quad_to(&mut self, p1: Point, p2: Point) -> Result<(), MeasureError> {
        self.check()?;
        let p0 = self.cursor.advance(p2)?;
        self.moments += Moments::quad(p0, p1, p2);
        Ok(())
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) -> Result<(), MeasureError> {
        self.check()?;
        let p0 = self.cursor.advance(p3)?;
        self.moments += Moments::cubic(p0, p1, p2, p3);
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), MeasureError> {
        self.check()?;
        if let Some((p0, p1)) = self.cursor.close()? {
            self.moments += Moments::line(p0, p1);
        }
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), MeasureError> {
        self.check()?;
        let (start, end) = self.cursor.end()?;
        if start != end {
            log::trace!("open contour from {start:?} to {end:?}");
            self.failed = true;
            return Err(MeasureError::OpenContour { start, end });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        assert_near, draw_axis_circle, draw_circle, draw_closed_test_shape, draw_polygon,
    };
    use core::f64::consts::PI;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const UNIT_SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

    fn polygon_moments(points: &[(f64, f64)]) -> Moments {
        let mut pen = MomentsPen::new();
        draw_polygon(&mut pen, points).unwrap();
        pen.finish().unwrap()
    }

    fn assert_moments_near(actual: &Moments, expected: &Moments, epsilon: f64) {
        let fields = |m: &Moments| {
            [
                m.area,
                m.moment_x,
                m.moment_y,
                m.moment_xx,
                m.moment_xy,
                m.moment_yy,
            ]
        };
        for (a, e) in fields(actual).into_iter().zip(fields(expected)) {
            assert_near(a, e, epsilon * e.abs().max(1.0));
        }
    }

    #[test]
    fn unit_square() {
        let moments = polygon_moments(&UNIT_SQUARE);
        let expected = Moments {
            area: 1.0,
            moment_x: 0.5,
            moment_y: 0.5,
            moment_xx: 1.0 / 3.0,
            moment_xy: 0.25,
            moment_yy: 1.0 / 3.0,
        };
        assert_moments_near(&moments, &expected, 1e-12);
    }

    #[test]
    fn clockwise_square_is_negated() {
        let mut clockwise = UNIT_SQUARE;
        clockwise.reverse();
        let moments = polygon_moments(&clockwise);
        assert_near(moments.area, -1.0, 1e-9);
        assert_moments_near(&moments, &-polygon_moments(&UNIT_SQUARE), 1e-12);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn invariant_under_start_rotation(#[case] shift: usize) {
        let mut pentagon = [(0.0, 0.0), (4.0, -1.0), (5.0, 3.0), (2.0, 6.0), (-1.0, 2.5)];
        let expected = polygon_moments(&pentagon);
        pentagon.rotate_left(shift);
        assert_moments_near(&polygon_moments(&pentagon), &expected, 1e-9);
    }

    #[test]
    fn square_with_hole() {
        let mut pen = MomentsPen::new();
        draw_polygon(&mut pen, &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]).unwrap();
        draw_polygon(&mut pen, &[(0.5, 0.5), (0.5, 1.5), (1.5, 1.5), (1.5, 0.5)]).unwrap();
        let expected = Moments {
            area: 3.0,
            moment_x: 3.0,
            moment_y: 3.0,
            moment_xx: 4.25,
            moment_xy: 3.0,
            moment_yy: 4.25,
        };
        assert_moments_near(pen.moments().unwrap(), &expected, 1e-9);
    }

    #[test]
    fn quadratic_circle() {
        let mut pen = MomentsPen::new();
        draw_circle(&mut pen, 8).unwrap();
        let moments = pen.finish().unwrap();
        assert!((moments.area / PI - 1.0).abs() < 0.01, "{}", moments.area);
        assert_near(moments.area, 3.1519480409052374, 1e-9);
        assert_near(moments.moment_x, 0.0, 1e-9);
        assert_near(moments.moment_y, 0.0, 1e-9);
        // four tangent quadratics enclose exactly 10/3
        let mut pen = MomentsPen::new();
        draw_circle(&mut pen, 4).unwrap();
        assert_near(pen.finish().unwrap().area, 10.0 / 3.0, 1e-12);
    }

    #[test]
    fn four_segment_circle() {
        let control = 0.928;
        let mut pen = MomentsPen::new();
        draw_axis_circle(&mut pen, control).unwrap();
        let moments = pen.finish().unwrap();
        assert!((moments.area / PI - 1.0).abs() < 0.01, "{}", moments.area);
        // the inscribed square plus four parabolic segments
        assert_near(moments.area, 2.0 + 4.0 * (2.0 * control - 1.0) / 3.0, 1e-12);
        assert_near(moments.moment_x, 0.0, 1e-12);
        assert_near(moments.moment_xy, 0.0, 1e-12);
    }

    #[test]
    fn mixed_shape() {
        let mut pen = MomentsPen::new();
        draw_closed_test_shape(&mut pen).unwrap();
        let expected = Moments {
            area: 17208.333333333332,
            moment_x: 1720833.333333334,
            moment_y: 2886904.7619047617,
            moment_xx: 208762344.42640692,
            moment_xy: 288690476.19047624,
            moment_yy: 522135416.6666668,
        };
        assert_moments_near(&pen.finish().unwrap(), &expected, 1e-9);
    }

    #[test]
    fn degree_elevation_is_exact() {
        let (p0, p1, p2) = (
            Point::new(3.0, -2.0),
            Point::new(40.0, 75.0),
            Point::new(90.0, 10.0),
        );
        let c1 = p0.lerp(p1, 2.0 / 3.0);
        let c2 = p2.lerp(p1, 2.0 / 3.0);
        assert_moments_near(
            &Moments::cubic(p0, c1, c2, p2),
            &Moments::quad(p0, p1, p2),
            1e-9,
        );
        // and a straight quadratic is a line
        assert_moments_near(
            &Moments::quad(p0, p0.midpoint(p2), p2),
            &Moments::line(p0, p2),
            1e-9,
        );
    }

    #[test]
    fn open_contour_fails_pen() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut pen = MomentsPen::new();
        pen.move_to((0.0, 0.0).into()).unwrap();
        pen.line_to((10.0, 0.0).into()).unwrap();
        pen.line_to((10.0, 10.0).into()).unwrap();
        assert_eq!(
            pen.end_path(),
            Err(MeasureError::OpenContour {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 10.0),
            })
        );
        assert_eq!(pen.moments(), Err(MeasureError::Failed));
        assert_eq!(
            pen.move_to((0.0, 0.0).into()),
            Err(MeasureError::Failed)
        );
        assert_eq!(pen.finish(), Err(MeasureError::Failed));
    }

    #[test]
    fn end_path_on_start_point_is_closed() {
        let mut pen = MomentsPen::new();
        pen.move_to((0.0, 0.0).into()).unwrap();
        for point in &UNIT_SQUARE[1..] {
            pen.line_to((*point).into()).unwrap();
        }
        pen.line_to((0.0, 0.0).into()).unwrap();
        pen.end_path().unwrap();
        assert_moments_near(&pen.finish().unwrap(), &polygon_moments(&UNIT_SQUARE), 1e-12);
    }

    #[test]
    fn unterminated_contour_is_open() {
        let mut pen = MomentsPen::new();
        pen.move_to((0.0, 0.0).into()).unwrap();
        pen.line_to((2.0, 0.0).into()).unwrap();
        pen.line_to((2.0, 2.0).into()).unwrap();
        let open = MeasureError::OpenContour {
            start: Point::new(0.0, 0.0),
            end: Point::new(2.0, 2.0),
        };
        assert_eq!(pen.moments(), Err(open.clone()));
        // still usable: closing the contour yields the triangle
        pen.close_path().unwrap();
        assert_near(pen.moments().unwrap().area, 2.0, 1e-12);

        let events = [
            PathEvent::MoveTo(Point::new(0.0, 0.0)),
            PathEvent::LineTo(Point::new(2.0, 0.0)),
            PathEvent::LineTo(Point::new(2.0, 2.0)),
        ];
        assert_eq!(Moments::from_events(events), Err(open));
    }

    #[test]
    fn unterminated_contour_back_at_start() {
        let mut pen = MomentsPen::new();
        pen.move_to((0.0, 0.0).into()).unwrap();
        for point in &UNIT_SQUARE[1..] {
            pen.line_to((*point).into()).unwrap();
        }
        pen.line_to((0.0, 0.0).into()).unwrap();
        assert_moments_near(&pen.finish().unwrap(), &polygon_moments(&UNIT_SQUARE), 1e-12);
    }

    #[test]
    fn segment_after_terminator_needs_move() {
        let mut pen = MomentsPen::new();
        draw_polygon(&mut pen, &UNIT_SQUARE).unwrap();
        assert_eq!(
            pen.line_to((5.0, 5.0).into()),
            Err(MeasureError::MissingMoveTo)
        );
        assert_eq!(pen.close_path(), Err(MeasureError::MissingMoveTo));
        assert_eq!(pen.end_path(), Err(MeasureError::MissingMoveTo));
        assert_moments_near(pen.moments().unwrap(), &polygon_moments(&UNIT_SQUARE), 0.0);
    }

    #[test]
    fn segment_before_move() {
        let mut pen = MomentsPen::new();
        assert_eq!(
            pen.quad_to((1.0, 1.0).into(), (2.0, 0.0).into()),
            Err(MeasureError::MissingMoveTo)
        );
        // not fatal
        assert_eq!(pen.moments(), Ok(&Moments::default()));
    }

    #[test]
    fn contours_are_additive() {
        let mut both = MomentsPen::new();
        draw_closed_test_shape(&mut both).unwrap();
        draw_circle(&mut both, 8).unwrap();
        let both = both.finish().unwrap();

        let mut shape = MomentsPen::new();
        draw_closed_test_shape(&mut shape).unwrap();
        let mut circle = MomentsPen::new();
        draw_circle(&mut circle, 8).unwrap();
        let sum = [shape.finish().unwrap(), circle.finish().unwrap()]
            .into_iter()
            .sum::<Moments>();
        assert_moments_near(&both, &sum, 1e-12);
    }

    #[test]
    fn deterministic() {
        let run = || {
            let mut pen = MomentsPen::new();
            draw_closed_test_shape(&mut pen).unwrap();
            pen.finish().unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn from_path() {
        let path =
            BezPath::from_svg("M0,0 L2,0 L2,2 L0,2 Z M0.5,0.5 L0.5,1.5 L1.5,1.5 L1.5,0.5 Z")
                .unwrap();
        assert_near(Moments::from_path(&path).unwrap().area, 3.0, 1e-12);
        let open = BezPath::from_svg("M0,0 L2,0 L2,2").unwrap();
        assert!(matches!(
            Moments::from_path(&open),
            Err(MeasureError::OpenContour { .. })
        ));
    }

    #[test]
    fn from_events() {
        let mut events = Vec::new();
        draw_polygon(&mut events, &UNIT_SQUARE).unwrap();
        assert_moments_near(
            &Moments::from_events(events).unwrap(),
            &polygon_moments(&UNIT_SQUARE),
            0.0,
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_field_names() {
        let json = serde_json::to_value(Moments::default()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["area", "moment_x", "moment_xx", "moment_xy", "moment_y", "moment_yy"]
        );
    }
}
