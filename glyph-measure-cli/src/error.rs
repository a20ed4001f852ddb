use std::{fmt, path::Path};

use miette::{Diagnostic, LabeledSpan, NamedSource};

use crate::input::InputError;

/// A fatal error of the command line tool.
///
/// Errors caused by a malformed input line carry the input file so the
/// report can show the offending entry in context.
#[derive(Debug)]
pub struct ErrorReport {
    message: String,
    input: Option<NamedSource>,
    entry: Option<LabeledSpan>,
}

impl ErrorReport {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            input: None,
            entry: None,
        }
    }

    /// Reports a malformed line of the file at `path`, whose contents are
    /// `text`.
    pub fn from_input_error(error: &InputError, path: &Path, text: &str) -> Self {
        Self {
            message: format!("{}:{}: {}", path.display(), error.line, error.message),
            input: Some(NamedSource::new(path.to_string_lossy(), text.to_string())),
            entry: Some(LabeledSpan::new(
                Some(error.message.clone()),
                error.span.start,
                error.span.len(),
            )),
        }
    }
}

impl Diagnostic for ErrorReport {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.input.as_ref().map(|input| input as _)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let entry = self.entry.clone()?;
        Some(Box::new(std::iter::once(entry)))
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorReport {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_glyphs;

    #[test]
    fn names_file_and_line() {
        let text = "a M0,0 L1,1 Z\n\nb\n";
        let err = parse_glyphs(text).unwrap_err();
        let report = ErrorReport::from_input_error(&err, Path::new("glyphs.txt"), text);
        assert_eq!(
            report.to_string(),
            "glyphs.txt:3: missing path data for glyph 'b'"
        );
        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 15);
        assert_eq!(labels[0].len(), 1);
        assert!(report.source_code().is_some());
    }
}
