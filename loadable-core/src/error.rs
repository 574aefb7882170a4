use std::{error, fmt};

#[derive(Debug)]
pub enum Error {
    MissingKey(&'static str),
    UnexpectedValue { key: &'static str, expected: &'static str },
    AmbiguousUpdate,
    UnknownMedia(i64),
    NotSquare { width: f64, height: f64 },
    EmptyImage { width: u32, height: u32 },
    ImageDecoding(Box<dyn error::Error + Send>),
    JsonError(Box<dyn error::Error + Send>),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "User info is missing key `{key}`"),
            Self::UnexpectedValue { key, expected } => {
                write!(f, "User info key `{key}` does not hold {expected}")
            }
            Self::AmbiguousUpdate => {
                write!(f, "Media update must carry exactly one of image or new identifier")
            }
            Self::UnknownMedia(raw) => write!(f, "Unknown media kind: {raw}"),
            Self::NotSquare { width, height } => {
                write!(f, "Rounded content is not square: {width}x{height}")
            }
            Self::EmptyImage { width, height } => {
                write!(f, "Image must not be empty: {width}x{height}")
            }
            Self::ImageDecoding(err) | Self::JsonError(err) => write!(f, "{err}"),
        }
    }
}

impl From<::image::ImageError> for Error {
    fn from(err: ::image::ImageError) -> Error {
        Error::ImageDecoding(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::JsonError(Box::new(err))
    }
}
