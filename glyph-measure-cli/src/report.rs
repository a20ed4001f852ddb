//! Per-glyph measurement and output formatting.

use glyph_measure::{
    contour::draw_bez_path, CubicLength, MeasureError, Moments, MomentsPen, PerimeterPen,
    Statistics,
};
use rayon::prelude::*;
use serde::Serialize;

use crate::input::GlyphSource;

/// Measures glyphs with a fixed perimeter tolerance.
#[derive(Copy, Clone, Debug)]
pub struct Measurer {
    cubic: CubicLength,
}

impl Measurer {
    /// Validates `tolerance` and selects the matching cubic strategy.
    pub fn new(tolerance: f64) -> Result<Self, MeasureError> {
        let cubic = PerimeterPen::new(tolerance)?.cubic_strategy();
        log::debug!("tolerance {tolerance} uses {cubic:?} for cubic lengths");
        Ok(Self { cubic })
    }

    /// Measures a single glyph with a fresh pair of pens.
    ///
    /// Failures are recorded in the report rather than returned, so one bad
    /// outline does not prevent measuring the rest.
    pub fn measure(&self, glyph: &GlyphSource) -> GlyphReport {
        let mut errors = Vec::new();
        let mut record = |what: &str, e: MeasureError| {
            log::warn!("glyph '{}' (line {}): {what}: {e}", glyph.name, glyph.line);
            errors.push(format!("{what}: {e}"));
        };

        let mut moments_pen = MomentsPen::new();
        let moments = match draw_bez_path(&glyph.path, &mut moments_pen)
            .and_then(|_| moments_pen.finish())
        {
            Ok(moments) => Some(moments),
            Err(e) => {
                record("moments", e);
                None
            }
        };

        let mut perimeter_pen = PerimeterPen::with_strategy(self.cubic);
        let perimeter = match draw_bez_path(&glyph.path, &mut perimeter_pen) {
            Ok(()) => Some(perimeter_pen.finish()),
            Err(e) => {
                record("perimeter", e);
                None
            }
        };

        GlyphReport {
            name: glyph.name.clone(),
            statistics: moments.as_ref().map(Statistics::from_moments),
            moments,
            perimeter,
            errors,
        }
    }

    /// Measures every glyph on the current rayon thread pool.
    ///
    /// Reports are returned in the order of `glyphs`.
    pub fn measure_all(&self, glyphs: &[GlyphSource]) -> Vec<GlyphReport> {
        glyphs.par_iter().map(|glyph| self.measure(glyph)).collect()
    }
}

/// Measurements of one glyph.
///
/// A value that could not be computed is `None` and the reason is listed in
/// `errors`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlyphReport {
    pub name: String,
    pub moments: Option<Moments>,
    pub statistics: Option<Statistics>,
    pub perimeter: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl GlyphReport {
    /// Formats the report as a tab separated row matching [`tsv_header`].
    pub fn to_tsv(&self, with_statistics: bool) -> String {
        let mut columns = vec![self.name.clone()];
        let stats = self.statistics.as_ref();
        columns.extend(
            [
                stats.map(|s| s.area),
                stats.map(|s| s.mean_x),
                stats.map(|s| s.mean_y),
                self.perimeter,
            ]
            .map(format_value),
        );
        if with_statistics {
            columns.extend(
                [
                    stats.map(|s| s.variance_x),
                    stats.map(|s| s.variance_y),
                    stats.map(|s| s.covariance),
                    stats.map(|s| s.slant),
                ]
                .map(format_value),
            );
        }
        columns.join("\t")
    }

    /// Formats the report as a single line of JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Column names of the tab separated output.
pub fn tsv_header(with_statistics: bool) -> String {
    let mut header = String::from("name\tarea\tmean_x\tmean_y\tperimeter");
    if with_statistics {
        header.push_str("\tvariance_x\tvariance_y\tcovariance\tslant");
    }
    header
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
