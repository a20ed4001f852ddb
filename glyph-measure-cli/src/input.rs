//! Parsing of glyph listing files.
//!
//! Each non-empty line that does not start with `#` holds a glyph name
//! followed by whitespace and the glyph's outline as SVG path data.

use std::{fmt, ops::Range};

use glyph_measure::kurbo::BezPath;

/// A named outline read from an input file.
#[derive(Clone, Debug)]
pub struct GlyphSource {
    pub name: String,
    pub path: BezPath,
    /// One-based line number in the input.
    pub line: usize,
}

/// A line of input that could not be parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct InputError {
    /// One-based line number.
    pub line: usize,
    /// Byte range of the offending entry in the input text.
    pub span: Range<usize>,
    pub message: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for InputError {}

/// Parses every glyph entry in `text`, failing on the first malformed line.
pub fn parse_glyphs(text: &str) -> Result<Vec<GlyphSource>, InputError> {
    let mut glyphs = Vec::new();
    let mut line_start = 0;
    for (ix, raw_line) in text.split_inclusive('\n').enumerate() {
        let offset = line_start + (raw_line.len() - raw_line.trim_start().len());
        line_start += raw_line.len();
        let entry = raw_line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let line = ix + 1;
        let error = |message: String| InputError {
            line,
            span: offset..offset + entry.len(),
            message,
        };
        let Some((name, data)) = entry.split_once(char::is_whitespace) else {
            return Err(error(format!("missing path data for glyph '{entry}'")));
        };
        let path = BezPath::from_svg(data.trim())
            .map_err(|e| error(format!("invalid path data for glyph '{name}': {e}")))?;
        log::trace!("line {line}: glyph '{name}' with {} elements", path.elements().len());
        glyphs.push(GlyphSource {
            name: name.to_string(),
            path,
            line,
        });
    }
    Ok(glyphs)
}
