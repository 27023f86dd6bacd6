use std::string::{FromUtf8Error, FromUtf16Error};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidName(#[from] InvalidName),

    #[error("cookie value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded cookie value is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("decoded cookie value is not valid UTF-16: {0}")]
    Utf16(#[from] FromUtf16Error),

    #[error("decoded cookie value has an odd number of bytes ({0}) for UTF-16")]
    OddUtf16Length(usize),

    #[error("cookie value could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a cookie name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidName {
    #[error("cookie name cannot be missing")]
    Missing,

    #[error("cookie name cannot be empty or blank")]
    Blank,
}
