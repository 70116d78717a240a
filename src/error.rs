use std::fmt;

/// Errors surfaced by storage, audio and game operations
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A read or write against durable storage failed
    Storage { key: String, message: String },
    /// The host exposes no durable storage
    StorageUnavailable,
    /// A stored value could not be parsed
    Decode { key: String, value: String },
    /// The platform audio API rejected a call
    Audio(String),
    /// A hold request named a die that does not exist
    DieIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn storage(key: &str, message: impl Into<String>) -> Self {
        Error::Storage {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn audio(message: impl Into<String>) -> Self {
        Error::Audio(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Storage { key, message } => write!(f, "Storage error on '{key}': {message}"),
            Error::StorageUnavailable => write!(f, "Durable storage is not available"),
            Error::Decode { key, value } => write!(f, "Cannot decode '{value}' stored under '{key}'"),
            Error::Audio(message) => write!(f, "Audio error: {message}"),
            Error::DieIndex { index, len } => {
                write!(f, "Die index {index} out of range (have {len} dice)")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(target_arch = "wasm32")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
