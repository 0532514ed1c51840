//! Error adapter for converting TrellisError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};

use trellis::TrellisError;

/// Adapter that renders a [`TrellisError`] as a miette diagnostic.
///
/// Each error variant gets a stable diagnostic code and, where the fix is
/// usually on the caller's side, a short help message.
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrellisError::InvalidDimensions { .. } => "trellis::dimensions",
            TrellisError::InvalidGeometry(_) => "trellis::geometry",
            TrellisError::UnsupportedShape(_) => "trellis::shape",
            TrellisError::UnknownDiagram(_) => "trellis::diagram",
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Encode(_) => "trellis::encode",
            TrellisError::Config(_) => "trellis::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TrellisError::UnknownDiagram(_) => "run `trellis --list` to see the available diagrams",
            TrellisError::Io(_) => "check that the output directory is writable",
            TrellisError::Encode(_) => "use a .png, .jpg or .bmp output format",
            TrellisError::Config(_) => {
                "check the configuration file; colors must be CSS color strings"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
