/*!
Loosely typed boundary values.

Frames arrive from callers that do not share our type system, so every
field of a raw frame is a `Value`. The ingestion adapter is the only place
that narrows a `Value` into a protocol type.
*/

use bytes::Bytes;

/// A single untyped field of a raw boundary frame
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent or explicit null
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer, wide enough for every u64 and every negative i64
    Integer(i128),
    /// Floating point number
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Bytes),
}

impl Value {
    /// Short name of the value's kind, used in violation context
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Integer(v as i128)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v as i128)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i128)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(v: &[u8; N]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(7u64), Value::Integer(7));
        assert_eq!(Value::from(-1i64), Value::Integer(-1));
        assert_eq!(Value::from("REKEY"), Value::Text("REKEY".into()));
        assert_eq!(Value::from(b"abc"), Value::Bytes(Bytes::from_static(b"abc")));
        assert_eq!(Value::from(None::<u64>), Value::Null);
        assert_eq!(Value::from(Some("PQC+QKD")), Value::Text("PQC+QKD".into()));
    }

    #[test]
    fn test_u64_max_fits() {
        assert_eq!(Value::from(u64::MAX), Value::Integer(u64::MAX as i128));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Float(1.5).kind(), "float");
        assert_eq!(Value::Bool(true).kind(), "bool");
        assert_eq!(Value::default(), Value::Null);
    }
}
