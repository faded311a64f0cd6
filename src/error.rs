use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("Image source not found: {0}")]
    NotFound(String),

    #[error("Image decode error: {0}")]
    DecodeError(String),

    #[error("Image encode error: {0}")]
    EncodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Image source disposed: {0}")]
    Disposed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`ImageSourceError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl ImageSourceError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a not-found error (missing file, failing stream provider).
    not_found => NotFound,
    /// Create a decode error.
    decode => DecodeError,
    /// Create an encode error.
    encode => EncodeError,
    /// Create a configuration error.
    config => ConfigError,
    /// Create an error for an operation on a disposed image source.
    disposed => Disposed,
}

impl From<serde_yml::Error> for ImageSourceError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImageSourceError>;
