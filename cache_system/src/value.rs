//! Hash field values
//!
//! A field holds either raw bytes or text. Callers pick the variant when
//! writing; scalars are stored through their `Display` form and are read
//! back as text, never as the original type.

use crate::errors::CacheError;
use redis::{ErrorKind, FromRedisValue, RedisResult, RedisWrite, ToRedisArgs, Value};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

/// Value stored under a single hash field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheValue {
    Bytes(Vec<u8>),
    Text(String),
}

impl CacheValue {
    /// Store any displayable value as its string form
    pub fn text(value: impl fmt::Display) -> Self {
        CacheValue::Text(value.to_string())
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        CacheValue::Bytes(value.into())
    }

    /// Serialize a value to JSON text
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, CacheError> {
        Ok(CacheValue::Text(serde_json::to_string(value)?))
    }

    /// Classify a payload read back from the store: UTF-8 becomes text
    pub fn from_stored(payload: Vec<u8>) -> Self {
        match String::from_utf8(payload) {
            Ok(text) => CacheValue::Text(text),
            Err(err) => CacheValue::Bytes(err.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            CacheValue::Bytes(bytes) => bytes,
            CacheValue::Text(text) => text.as_bytes(),
        }
    }

    /// Text content, `None` for binary values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CacheValue::Text(text) => Some(text),
            CacheValue::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CacheValue::Bytes(bytes) => bytes,
            CacheValue::Text(text) => text.into_bytes(),
        }
    }

    /// Deserialize a value previously written with [`CacheValue::json`]
    pub fn to_json<T: DeserializeOwned>(&self) -> Result<T, CacheError> {
        Ok(serde_json::from_slice(self.as_bytes())?)
    }
}

impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheValue::Text(text) => f.write_str(text),
            CacheValue::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

impl PartialEq<&str> for CacheValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Text(value)
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

macro_rules! text_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CacheValue {
                fn from(value: $ty) -> Self {
                    CacheValue::text(value)
                }
            }
        )*
    };
}

text_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, bool, char);

impl ToRedisArgs for CacheValue {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        out.write_arg(self.as_bytes());
    }
}

impl FromRedisValue for CacheValue {
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        match v {
            Value::BulkString(payload) => Ok(CacheValue::from_stored(payload.clone())),
            Value::SimpleString(text) => Ok(CacheValue::Text(text.clone())),
            Value::VerbatimString { text, .. } => Ok(CacheValue::Text(text.clone())),
            Value::Int(number) => Ok(CacheValue::Text(number.to_string())),
            other => Err((
                ErrorKind::TypeError,
                "Response was of incompatible type",
                format!("expected a hash field value, got {:?}", other),
            )
                .into()),
        }
    }
}
