use oxlmodel::Diagnostic;
use std::{fmt, io};

/// Error returned by [`DocumentLoader::load_file`](crate::DocumentLoader::load_file).
#[derive(Debug, thiserror::Error)]
pub enum DocumentLoadError {
    /// The file cannot be read.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The document is not valid in its format.
    #[error("{}", Diagnostics(.0))]
    Load(Vec<Diagnostic>),
}

impl From<Vec<Diagnostic>> for DocumentLoadError {
    #[inline]
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::Load(diagnostics)
    }
}

/// Displays one diagnostic per line.
struct Diagnostics<'a>(&'a [Diagnostic]);

impl fmt::Display for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            diagnostic.fmt(f)?;
        }
        Ok(())
    }
}
