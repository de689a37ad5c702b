//! Payload leaf values.
//!
//! Two kinds of "missing" coexist in a plate payload and must never be
//! confused:
//!
//! - [`Field::Omitted`]: the value is absent or not applicable; the key is
//!   dropped from the serialized payload entirely.
//! - [`AxleLeaf::Empty`]: an unused axle slot; the key is kept and serialized
//!   as an empty string.

use std::fmt::Display;

use serde::{Serialize, Serializer};

/// A top-level payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Value(String),
    Omitted,
}

impl Field {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Field::Omitted)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Field::Value(v) => Some(v),
            Field::Omitted => None,
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => serializer.serialize_str(v),
            Field::Omitted => serializer.serialize_none(),
        }
    }
}

/// Format an optional scalar: present values become their string form,
/// missing values become [`Field::Omitted`]. `0` and `false` are present.
pub fn format_field<T: Display + ?Sized>(value: Option<&T>) -> Field {
    match value {
        Some(v) => Field::Value(v.to_string()),
        None => Field::Omitted,
    }
}

/// A leaf inside an axle group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxleLeaf {
    Value(String),
    Empty,
}

impl AxleLeaf {
    pub fn is_empty(&self) -> bool {
        matches!(self, AxleLeaf::Empty)
    }

    pub fn of<T: Display + ?Sized>(value: &T) -> Self {
        AxleLeaf::Value(value.to_string())
    }
}

impl From<Field> for AxleLeaf {
    fn from(field: Field) -> Self {
        match field {
            Field::Value(v) => AxleLeaf::Value(v),
            Field::Omitted => AxleLeaf::Empty,
        }
    }
}

impl Serialize for AxleLeaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AxleLeaf::Value(v) => serializer.serialize_str(v),
            AxleLeaf::Empty => serializer.serialize_str(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Scalar;

    #[test]
    fn zero_and_false_are_present() {
        assert_eq!(
            format_field(Some(&Scalar::from(0))),
            Field::Value("0".to_string())
        );
        assert_eq!(
            format_field(Some(&Scalar::from(false))),
            Field::Value("false".to_string())
        );
    }

    #[test]
    fn missing_is_omitted() {
        assert!(format_field::<Scalar>(None).is_omitted());
    }

    #[test]
    fn omitted_field_becomes_empty_axle_leaf() {
        assert_eq!(AxleLeaf::from(Field::Omitted), AxleLeaf::Empty);
        assert_eq!(serde_json::to_string(&AxleLeaf::Empty).unwrap(), "\"\"");
    }
}
