//! Loading markup to hand to the parser.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::WeftError;

/// Where a document's markup comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk, decoded as UTF-8.
    File(PathBuf),
    /// Markup given directly as a string.
    Inline(String),
}

impl DocumentSource {
    /// Pick a source from an optional path and optional inline markup.
    /// Inline markup wins when both are present.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::MissingInput`] when neither is given.
    pub fn from_parts(path: Option<&Path>, inline: Option<String>) -> Result<Self, WeftError> {
        match (inline, path) {
            (Some(html), _) => Ok(Self::Inline(html)),
            (None, Some(path)) => Ok(Self::File(path.to_path_buf())),
            (None, None) => Err(WeftError::MissingInput),
        }
    }
}

/// Read the markup for a [`DocumentSource`].
///
/// # Errors
///
/// Returns [`WeftError::Io`] if the file cannot be read or is not valid UTF-8.
pub fn load_source(source: &DocumentSource) -> Result<String, WeftError> {
    match source {
        DocumentSource::Inline(html) => Ok(html.clone()),
        DocumentSource::File(path) => {
            debug!("reading document from {}", path.display());
            fs::read_to_string(path).map_err(|source| WeftError::Io {
                path: path.clone(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_markup_takes_precedence() {
        let source =
            DocumentSource::from_parts(Some(Path::new("page.html")), Some("<p>".to_string()))
                .unwrap();
        assert_eq!(source, DocumentSource::Inline("<p>".to_string()));
        assert_eq!(load_source(&source).unwrap(), "<p>");
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(matches!(
            DocumentSource::from_parts(None, None),
            Err(WeftError::MissingInput)
        ));
    }

    #[test]
    fn unreadable_file_reports_path() {
        let source = DocumentSource::File(PathBuf::from("/nonexistent/weft/page.html"));
        let err = load_source(&source).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/weft/page.html"));
    }
}
