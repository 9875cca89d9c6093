use std::fmt;
use std::io;
use std::result;

#[derive(Debug)]
pub enum Error {
    Encoding(String),
    Argument(String),
    Io(String),
    Transport(String),
    Server(String),
    Persistence(String),
    State(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Encoding(msg)    => write!(f, "{}", msg),
            Error::Argument(msg)    => write!(f, "{}", msg),
            Error::Io(msg)          => write!(f, "{}", msg),
            Error::Transport(msg)   => write!(f, "{}", msg),
            Error::Server(msg)      => write!(f, "{}", msg),
            Error::Persistence(msg) => write!(f, "{}", msg),
            Error::State(msg)       => write!(f, "{}", msg),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(format!("IO error: {}", err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Argument(format!("Invalid URL: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(format!("Http transport error: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(format!("JSON error: {}", err))
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Persistence(format!("SQLite execution error: {}", err))
    }
}

impl From<diesel::ConnectionError> for Error {
    fn from(err: diesel::ConnectionError) -> Self {
        Error::Persistence(format!("SQLite connection error: {}", err))
    }
}

pub type Result<T> = result::Result<T, Error>;
