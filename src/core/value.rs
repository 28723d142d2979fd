use std::cmp::Ordering;
use std::fmt;

use crate::core::{CoreError, Result};

/// A typed filter/sort value.
///
/// Conference fields are compared against caller-supplied criteria as
/// `Value`s; integers and floats coerce to each other, every other
/// cross-type comparison is an error rather than a silent non-match.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    /// Total order used by filter evaluation and result sorting.
    ///
    /// NULL sorts last (greater than every concrete value).
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) => Ok(Ordering::Greater),
            (_, Value::Null) => Ok(Ordering::Less),

            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => {
                Ok(a.partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),

            // Mixed numeric types (implicit coercion)
            (Value::Integer(a), Value::Float(b)) => {
                Ok((*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (Value::Float(a), Value::Integer(b)) => {
                Ok(a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal))
            }

            _ => Err(CoreError::TypeMismatch(format!(
                "Cannot compare incompatible types: {} and {}",
                self.type_name(),
                other.type_name()
            ))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Text(_) => "TEXT",
            Self::Boolean(_) => "BOOLEAN",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts a JSON scalar from a request payload into a `Value`.
    ///
    /// Arrays and objects are rejected: filter criteria are always scalar.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(CoreError::InvalidFilterValue(format!(
                        "numeric value {n} is out of range"
                    )))
                }
            }
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            other => Err(CoreError::InvalidFilterValue(format!(
                "expected a scalar filter value, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => write!(f, "{}", fl),
            Self::Text(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_coerce() {
        assert_eq!(
            Value::Integer(3).compare(&Value::Float(3.5)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            Value::Float(7.0).compare(&Value::Integer(7)).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn null_sorts_last() {
        assert_eq!(
            Value::Null.compare(&Value::Integer(1)).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            Value::Text("a".into()).compare(&Value::Null).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn incompatible_types_error() {
        let err = Value::Text("London".into())
            .compare(&Value::Integer(6))
            .unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch(_)));
    }

    #[test]
    fn json_scalars_convert() {
        assert_eq!(
            Value::from_json(&serde_json::json!("London")).unwrap(),
            Value::Text("London".into())
        );
        assert_eq!(
            Value::from_json(&serde_json::json!(6)).unwrap(),
            Value::Integer(6)
        );
        assert!(Value::from_json(&serde_json::json!(["a", "b"])).is_err());
    }
}
