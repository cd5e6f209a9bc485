#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Corruption,
    NotFound,
    InvalidArgument,
    Configuration,
}

#[derive(Debug, thiserror::Error)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error { kind, context: context.into() }
    }

    /// True when the segment data could not be read or decoded.
    /// Value computation for the field must be abandoned.
    pub fn is_io_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Io | ErrorKind::Parse | ErrorKind::Corruption)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

impl From<fst::Error> for Error {
    fn from(err: fst::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: format!("FST error: {}", err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Configuration,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failure_class() {
        let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(io.is_io_failure());
        assert!(Error::new(ErrorKind::Corruption, "crc").is_io_failure());
        assert!(!Error::new(ErrorKind::Configuration, "dialect").is_io_failure());
    }

    #[test]
    fn display_includes_kind_and_context() {
        let err = Error::new(ErrorKind::Configuration, "unknown dialect 'perl'");
        assert_eq!(err.to_string(), "Configuration: unknown dialect 'perl'");
    }
}
