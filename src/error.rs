use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Transport or protocol failure while talking to the upstream server.
    Transfer(String),
    /// The transfer succeeded but the zone holds no owner names at all,
    /// which usually means AXFR is disabled for this client upstream.
    EmptyZone(String),
    /// A requested record type is outside the supported set.
    UnsupportedRecordType(String),
    /// The zone has records, but none of the requested types.
    NoMatchingRecords(String),
    /// The remote API rejected a change batch. `batch` is 1-based.
    Submission { batch: usize, source: Box<Error> },
    Api(String),
    HttpError(String),
    ParseError(String),
    IoError(std::io::Error),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Transfer(e) => write!(f, "zone transfer failed: {}", e),
            Error::EmptyZone(domain) => write!(
                f,
                "zone {}: transfer returned no names, is AXFR enabled for this client?",
                domain
            ),
            Error::UnsupportedRecordType(t) => write!(f, "unsupported record type: {}", t),
            Error::NoMatchingRecords(domain) => {
                write!(f, "zone {}: no records of the requested types", domain)
            }
            Error::Submission { batch, source } => {
                write!(f, "batch {} rejected: {}", batch, source)
            }
            Error::Api(e) => write!(f, "API error: {}", e),
            Error::HttpError(e) => write!(f, "HTTP error: {}", e),
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::HttpError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::ParseError(err.to_string())
    }
}
