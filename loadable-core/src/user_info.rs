use std::{collections::HashMap, sync::Arc};

use crate::{bitmap::Image, error::Error};

/// Untyped payload carried over a notification channel.
pub type UserInfo = HashMap<String, Value>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bytes(Arc<[u8]>),
    Image(Image),
    Text(String),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "an integer",
            Self::Bytes(_) => "bytes",
            Self::Image(_) => "an image",
            Self::Text(_) => "text",
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl From<Image> for Value {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Conversion between a typed payload and the untyped user info map.
pub trait UserInfoMapper: Sized {
    fn map(&self) -> UserInfo;

    fn map_from(user_info: &UserInfo) -> Result<Self, Error>;
}

/// Typed accessors over a `UserInfo` map.
pub trait UserInfoExt {
    fn int(&self, key: &'static str) -> Result<i64, Error>;
    fn optional_int(&self, key: &'static str) -> Result<Option<i64>, Error>;
    fn image(&self, key: &'static str) -> Result<Image, Error>;
    fn optional_bytes(&self, key: &'static str) -> Result<Option<Arc<[u8]>>, Error>;
}

impl UserInfoExt for UserInfo {
    fn int(&self, key: &'static str) -> Result<i64, Error> {
        self.optional_int(key)?.ok_or(Error::MissingKey(key))
    }

    fn optional_int(&self, key: &'static str) -> Result<Option<i64>, Error> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(unexpected(key, "an integer", other)),
        }
    }

    fn image(&self, key: &'static str) -> Result<Image, Error> {
        match self.get(key) {
            None => Err(Error::MissingKey(key)),
            Some(Value::Image(image)) => Ok(image.clone()),
            Some(other) => Err(unexpected(key, "an image", other)),
        }
    }

    fn optional_bytes(&self, key: &'static str) -> Result<Option<Arc<[u8]>>, Error> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bytes(bytes)) => Ok(Some(bytes.clone())),
            Some(other) => Err(unexpected(key, "bytes", other)),
        }
    }
}

fn unexpected(key: &'static str, expected: &'static str, found: &Value) -> Error {
    log::debug!("user info key {key} holds {}", found.kind());
    Error::UnexpectedValue { key, expected }
}
