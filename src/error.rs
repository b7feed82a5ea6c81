//! Error handling for template parsing
use std::path::PathBuf;

/// A result type for template parsing, which can be either a successful value or an error.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// Return early with an [`XmlError`] located at the given line.
macro_rules! bail {
    ($line:expr, msg = $($arg:tt)+) => {
        return Err($crate::error::XmlError::new(
            $crate::error::XmlErrorKind::Custom(format!($($arg)+)),
            $crate::error::ErrorContext::new($line),
        ))
    };

    ($line:expr, $kind:expr) => {
        return Err($crate::error::XmlError::new(
            $kind,
            $crate::error::ErrorContext::new($line),
        ))
    };
}

/// An error that occurred while parsing a template.
#[derive(Debug)]
pub struct XmlError {
    /// The context of the error
    pub context: Box<ErrorContext>,

    /// The kind of error that occurred while parsing a template
    pub kind: XmlErrorKind,
}
impl XmlError {
    /// Creates a new `XmlError`
    #[must_use]
    pub fn new(kind: XmlErrorKind, context: ErrorContext) -> Self {
        Self {
            context: Box::new(context),
            kind,
        }
    }

    /// Adds a path to the error context.
    #[must_use]
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.context.path = Some(path);
        self
    }

    /// Returns the 1-based line the error was raised at, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.context.line
    }
}
impl std::fmt::Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.context)?;

        for line in self.kind.to_string().lines() {
            writeln!(f, "= {line}")?;
        }
        Ok(())
    }
}
impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        Self::new(XmlErrorKind::Io(err), ErrorContext::default())
    }
}

/// The kind of error that occurred while parsing a template.
#[derive(Debug, thiserror::Error)]
pub enum XmlErrorKind {
    /// Another error occurred while parsing the template
    #[error("{0}")]
    Custom(String),

    /// A tag was still open when the input ended
    #[error("Unclosed tag: {0}")]
    UnclosedTag(String),

    /// A closing tag did not match the innermost open tag
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// Name of the tag that is open
        expected: String,

        /// Name found in the closing tag
        found: String,
    },

    /// The input contained no markup at all
    #[error("Empty template")]
    EmptyDocument,

    /// Tokenizing failed
    #[error("XML parser error: {0}")]
    Xml(#[source] xmlparser::Error),

    /// IO error occurred while reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Context describing the error location in the template source.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The path to the file that was parsed, if available.
    pub path: Option<PathBuf>,

    /// 1-based line of the error, if known.
    pub line: Option<usize>,
}
impl ErrorContext {
    /// Creates a new `ErrorContext` at the given line.
    #[must_use]
    pub fn new(line: usize) -> Self {
        Self {
            path: None,
            line: Some(line),
        }
    }
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.as_ref().map(|p| p.display());

        match (path, self.line) {
            (Some(path), Some(line)) => writeln!(f, "= At {path}:{line}"),
            (None, Some(line)) => writeln!(f, "= At line {line}"),
            (Some(path), None) => writeln!(f, "= In {path}"),
            (None, None) => Ok(()),
        }
    }
}
