use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketError {
    #[error("cannot read tickets from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ticket document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date or time format '{input}', expected dd.MM.yy H:mm")]
    InvalidFormat {
        input: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("invalid UTC offset '{0}', expected e.g. UTC+10, +3 or -05:30")]
    InvalidOffset(String),
}

pub type Result<T> = std::result::Result<T, TicketError>;
