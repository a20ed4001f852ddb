//! Area, image moments and perimeter of glyph outlines.
//!
//! Outlines are fed to a measuring pen as a stream of path events
//! (see [`Pen`]). Two pens are provided:
//!
//! * [`MomentsPen`] computes the signed area and the first and second image
//!   moments of the region bounded by closed contours, exactly, using
//!   Green's theorem.
//! * [`PerimeterPen`] computes the total boundary length of all contours,
//!   open or closed. Lines and quadratic curves are measured in closed form;
//!   cubic curves are approximated to a configurable tolerance.
//!
//! Derived shape statistics such as the centroid and slant are available
//! from [`Statistics`], and the [`contour`] module decomposes stored
//! TrueType-style point lists and kurbo paths into events.
//!
//! ```
//! use glyph_measure::{kurbo::BezPath, Moments, DEFAULT_TOLERANCE};
//!
//! let square = BezPath::from_svg("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
//! let moments = Moments::from_path(&square).unwrap();
//! assert_eq!(moments.area, 100.0);
//! let perimeter = glyph_measure::perimeter_of_path(&square, DEFAULT_TOLERANCE).unwrap();
//! assert_eq!(perimeter, 40.0);
//! ```

#![forbid(unsafe_code)]

/// Expose the geometry crate used in our public API.
pub extern crate kurbo;

pub mod contour;
pub mod perimeter;

mod error;
mod moments;
mod pen;
mod statistics;

#[cfg(test)]
mod testing;

pub use error::MeasureError;
pub use moments::{Moments, MomentsPen};
pub use pen::{replay, PathEvent, Pen};
pub use statistics::Statistics;

#[doc(inline)]
pub use perimeter::{perimeter, perimeter_of_path, CubicLength, PerimeterPen, DEFAULT_TOLERANCE};
