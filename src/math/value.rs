use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ShapeError;

/// Raw, rank-tagged matrix contents.
///
/// A `Value` is not validated on its own: `Rect(vec![vec![2.0]])` is a
/// perfectly good `Value` even though no [`Matrix`](crate::math::Matrix)
/// may hold it. Inversion backends consume and produce `Value`s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
    Rect(Vec<Vec<f64>>),
}

impl Value {
    /// Parse a dynamically-typed document into a `Value`.
    ///
    /// Any non-numeric leaf, however deeply nested, is reported as
    /// [`ShapeError::NotNumeric`] before the nesting itself is looked at.
    /// Row-count and row-length rules are left to
    /// [`Matrix::new`](crate::math::Matrix::new).
    pub fn from_json(json: &JsonValue) -> Result<Self, ShapeError> {
        if !all_leaves_numeric(json) {
            return Err(ShapeError::NotNumeric);
        }

        match json {
            JsonValue::Number(n) => Ok(Value::Scalar(number(n)?)),
            JsonValue::Array(items) => match items.first() {
                Some(JsonValue::Array(_)) => items
                    .iter()
                    .map(|item| match item {
                        JsonValue::Array(row) => row
                            .iter()
                            .map(|cell| match cell {
                                JsonValue::Number(n) => number(n),
                                _ => Err(ShapeError::TooDeep),
                            })
                            .collect::<Result<Vec<f64>, _>>(),
                        _ => Err(ShapeError::MixedNesting),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Rect),
                _ => items
                    .iter()
                    .map(|item| match item {
                        JsonValue::Number(n) => number(n),
                        _ => Err(ShapeError::MixedNesting),
                    })
                    .collect::<Result<Vec<f64>, _>>()
                    .map(Value::Vector),
            },
            _ => Err(ShapeError::NotNumeric),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        // Every f64 except NaN/inf is representable; those become null as serde_json does.
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }

    pub fn rank(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Vector(_) => 1,
            Value::Rect(_) => 2,
        }
    }
}

fn all_leaves_numeric(json: &JsonValue) -> bool {
    match json {
        JsonValue::Number(_) => true,
        JsonValue::Array(items) => items.iter().all(all_leaves_numeric),
        _ => false,
    }
}

fn number(n: &serde_json::Number) -> Result<f64, ShapeError> {
    n.as_f64().ok_or(ShapeError::NotNumeric)
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::Vector(value)
    }
}

impl From<Vec<Vec<f64>>> for Value {
    fn from(value: Vec<Vec<f64>>) -> Self {
        Value::Rect(value)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(value: [f64; N]) -> Self {
        Value::Vector(value.to_vec())
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Value {
    fn from(value: [[f64; C]; R]) -> Self {
        Value::Rect(value.iter().map(|row| row.to_vec()).collect())
    }
}

/// A single-row array becomes a vector, anything else a rectangle.
impl From<&Array2<f64>> for Value {
    fn from(value: &Array2<f64>) -> Self {
        if value.nrows() == 1 {
            Value::Vector(value.row(0).to_vec())
        } else {
            Value::Rect(value.rows().into_iter().map(|row| row.to_vec()).collect())
        }
    }
}

impl From<Array2<f64>> for Value {
    fn from(value: Array2<f64>) -> Self {
        Value::from(&value)
    }
}

impl TryFrom<&JsonValue> for Value {
    type Error = ShapeError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        Value::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_ranks() {
        assert_eq!(Value::from_json(&json!(3)).unwrap(), Value::Scalar(3.0));
        assert_eq!(
            Value::from_json(&json!([1, 2.5])).unwrap(),
            Value::Vector(vec![1.0, 2.5])
        );
        assert_eq!(
            Value::from_json(&json!([[1], [2]])).unwrap(),
            Value::Rect(vec![vec![1.0], vec![2.0]])
        );
        assert_eq!(Value::from_json(&json!([])).unwrap(), Value::Vector(vec![]));
    }

    #[test]
    fn test_non_numeric_reported_before_nesting() {
        assert_eq!(
            Value::from_json(&json!([[1, 2], [3, [["x"]]]])),
            Err(ShapeError::NotNumeric)
        );
        assert_eq!(Value::from_json(&json!(null)), Err(ShapeError::NotNumeric));
        assert_eq!(Value::from_json(&json!({"a": 1})), Err(ShapeError::NotNumeric));
    }

    #[test]
    fn test_nesting_errors() {
        assert_eq!(
            Value::from_json(&json!([[[1]], [[2]]])),
            Err(ShapeError::TooDeep)
        );
        assert_eq!(
            Value::from_json(&json!([[1], 2])),
            Err(ShapeError::MixedNesting)
        );
        assert_eq!(
            Value::from_json(&json!([1, [2]])),
            Err(ShapeError::MixedNesting)
        );
    }

    #[test]
    fn test_single_row_array2_is_vector() {
        let a = Array2::from_shape_vec((1, 3), vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(Value::from(a), Value::Vector(vec![1.0, 2.0, 3.0]));
    }
}
