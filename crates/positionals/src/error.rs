use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::Severity;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Remote source unreachable: {0}")]
    TransportUnreachable(String),

    #[error("Request timed out: {0}")]
    TransportTimeout(String),

    #[error("Remote source returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("Transport error: {0}")]
    TransportOther(String),

    #[error("Failed to write cache file {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read cache file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed positional table{}: {message}", line_suffix(.line))]
    Malformed { line: Option<u64>, message: String },

    #[error("Failed to parse positional table: {0}")]
    ParseOther(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::FileUnreadable { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Severity this error is reported at.
    ///
    /// Conditions where the local cache is expected to carry on (remote down,
    /// slow, or refusing the request) are warnings. Everything else needs a look.
    pub fn severity(&self) -> Severity {
        match self {
            Error::TransportUnreachable(_) | Error::TransportTimeout(_) | Error::HttpStatus(_) => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Whether the error came from the fetch phase
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::TransportUnreachable(_)
                | Error::TransportTimeout(_)
                | Error::HttpStatus(_)
                | Error::TransportOther(_)
        )
    }

    pub(crate) fn malformed(line: Option<u64>, message: impl Into<String>) -> Self {
        Error::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Convert a csv error raised while reading `path`.
    pub(crate) fn from_csv(err: csv::Error, path: &std::path::Path) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Error::FileUnreadable {
                path: path.to_path_buf(),
                source,
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => Error::malformed(
                line,
                format!("expected {} fields, found {}", expected_len, len),
            ),
            csv::ErrorKind::Utf8 { err, .. } => Error::malformed(line, err.to_string()),
            csv::ErrorKind::Deserialize { err, .. } => Error::malformed(line, err.to_string()),
            other => Error::ParseOther(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let err = Error::FileUnreadable {
            path: PathBuf::from("positionals.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert!(err.is_not_found());

        let err2 = Error::FileUnreadable {
            path: PathBuf::from("positionals.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_transport_severity() {
        assert_eq!(
            Error::TransportUnreachable("dns".into()).severity(),
            Severity::Warning
        );
        assert_eq!(
            Error::TransportTimeout("10s".into()).severity(),
            Severity::Warning
        );
        assert_eq!(Error::HttpStatus(503).severity(), Severity::Warning);
        assert_eq!(
            Error::TransportOther("tls".into()).severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_load_errors_are_errors() {
        let err = Error::malformed(Some(3), "bad percent");
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(
            err.to_string(),
            "Malformed positional table at line 3: bad percent"
        );
        assert!(!err.is_transport());

        let err = Error::malformed(None, "missing column");
        assert_eq!(err.to_string(), "Malformed positional table: missing column");
    }
}
