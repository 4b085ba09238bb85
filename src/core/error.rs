use std::fmt;

#[derive(Debug)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
    InvalidArgument,
    Internal,
    InvalidInput,
    InvalidState,
    /// Dictionary file could not be read or its JSON structure was invalid. Fatal.
    DictionaryCorrupt,
    /// Seek/read/parse failure against the postings file. Fatal.
    PostingsIOError,
    /// Unbalanced parentheses, a dangling operator, or another syntax error in
    /// a single query line. Recoverable — the driver logs and moves on.
    MalformedQuery,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::DictionaryCorrupt,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
