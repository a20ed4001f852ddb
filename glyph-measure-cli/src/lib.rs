//! Batch measurement of glyph outlines given as SVG path data.

mod error;
mod input;
mod report;

pub use error::ErrorReport;
pub use input::{parse_glyphs, GlyphSource, InputError};
pub use report::{tsv_header, GlyphReport, Measurer};
