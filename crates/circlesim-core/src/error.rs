use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File missing or empty: {0}")]
    FileMissingOrEmpty(String),

    #[error("Unsupported beatmap format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed [{section}] section: {message}")]
    MalformedSection { section: String, message: String },

    #[error("Unknown hit object type: {0}")]
    UnknownObjectType(i32),

    #[error("Unknown slider type: {0}")]
    UnknownSliderType(String),

    #[error("Replay beatmap hash {replay} does not match beatmap hash {beatmap}")]
    HashMismatch { replay: String, beatmap: String },

    #[error("Truncated replay: read of {count} bytes at position {position} exceeds length {length}")]
    TruncatedReplay {
        position: usize,
        count: usize,
        length: usize,
    },

    #[error("Replay decode error: {0}")]
    ReplayDecode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(section: &str, message: impl Into<String>) -> Self {
        Error::MalformedSection {
            section: section.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
