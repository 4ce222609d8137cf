use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{IncompatibleShapeError, InversionError, MatrixError, ShapeError};
use crate::inverse::{GaussJordan, Inverter};
use crate::math::value::Value;

/// Immutable, shape-validated matrix.
///
/// Every associated function taking `&self` doubles as a two-argument
/// function: `Matrix::add(&a, &b)` and `a.add(&b)` are the same call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonValue", into = "Value")]
pub struct Matrix {
    value: Value,
}

/// A top-level entry handed to [`Matrix::map`]: a number of a vector or a
/// row of a rectangle.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Number(f64),
    Row(Vec<f64>),
}

impl Matrix {
    /// Validate `value` and wrap it.
    ///
    /// A rectangle must have at least two rows of equal, non-zero length;
    /// a single row has to be given as a vector.
    pub fn new(value: impl Into<Value>) -> Result<Self, ShapeError> {
        let value = value.into();
        if let Value::Rect(rows) = &value {
            if let Err(err) = check_rows(rows) {
                log::debug!("rejected matrix input: {}", err);
                return Err(err);
            }
        }
        Ok(Self { value })
    }

    /// Build a matrix from a number or a nested array of numbers.
    pub fn from_json(json: &JsonValue) -> Result<Self, ShapeError> {
        let value = Value::from_json(json).map_err(|err| {
            log::debug!("rejected matrix input: {}", err);
            err
        })?;
        Self::new(value)
    }

    pub fn scalar(value: f64) -> Self {
        Self {
            value: Value::Scalar(value),
        }
    }

    pub fn vector(values: Vec<f64>) -> Self {
        Self {
            value: Value::Vector(values),
        }
    }

    /// Caller guarantees the rectangle invariants.
    fn rect_unchecked(rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(check_rows(&rows).is_ok());
        Self {
            value: Value::Rect(rows),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn to_json(&self) -> JsonValue {
        self.value.to_json()
    }

    /// Two-dimensional view: a scalar is 1 x 1, a vector a single row.
    pub fn to_array2(&self) -> Array2<f64> {
        match &self.value {
            Value::Scalar(x) => Array2::from_elem((1, 1), *x),
            Value::Vector(v) => Array2::from_shape_fn((1, v.len()), |(_, j)| v[j]),
            Value::Rect(rows) => {
                Array2::from_shape_fn((rows.len(), rows[0].len()), |(i, j)| rows[i][j])
            }
        }
    }

    pub fn count_rows(&self) -> usize {
        match &self.value {
            Value::Scalar(_) => 0,
            Value::Vector(_) => 1,
            Value::Rect(rows) => rows.len(),
        }
    }

    pub fn count_columns(&self) -> usize {
        match &self.value {
            Value::Scalar(_) => 0,
            Value::Vector(v) => v.len(),
            Value::Rect(rows) => rows[0].len(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.count_rows(), self.count_columns())
    }

    pub fn rank(&self) -> usize {
        self.value.rank()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.value, Value::Scalar(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.value, Value::Vector(_))
    }

    pub fn is_square(&self) -> bool {
        self.count_rows() == self.count_columns()
    }

    pub fn addable(&self, other: &Matrix) -> bool {
        self.shape() == other.shape()
    }

    /// Left columns must equal right rows. Two scalars qualify (0 == 0).
    pub fn multipliable(&self, other: &Matrix) -> bool {
        self.count_columns() == other.count_rows()
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        let not_addable = || IncompatibleShapeError::NotAddable {
            lhs: self.shape(),
            rhs: other.shape(),
        };
        if !self.addable(other) {
            return Err(not_addable().into());
        }

        match (&self.value, &other.value) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Matrix::scalar(a + b)),
            (Value::Vector(a), Value::Vector(b)) => Ok(Matrix::vector(add_rows(a, b))),
            (Value::Rect(a), Value::Rect(b)) => Ok(Matrix::rect_unchecked(
                a.iter().zip(b).map(|(x, y)| add_rows(x, y)).collect(),
            )),
            _ => Err(not_addable().into()),
        }
    }

    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if !self.multipliable(other) {
            return Err(IncompatibleShapeError::NotMultipliable {
                lhs: self.shape(),
                rhs: other.shape(),
            }
            .into());
        }
        log::trace!("multiplying {:?} by {:?}", self.shape(), other.shape());

        if let (Value::Scalar(a), Value::Scalar(b)) = (&self.value, &other.value) {
            return Ok(Matrix::scalar(a * b));
        }

        let columns = other.columns();
        let product_row = |i: usize| -> Vec<f64> {
            columns
                .iter()
                .map(|column| inner_product(self.row(i), column))
                .collect()
        };

        match self.count_rows() {
            1 => Ok(Matrix::vector(product_row(0))),
            rows => Ok(Matrix::new((0..rows).map(product_row).collect::<Vec<_>>())?),
        }
    }

    /// Row `i` of the matrix. The only row of a vector is the vector itself.
    fn row(&self, i: usize) -> &[f64] {
        match &self.value {
            Value::Scalar(x) => std::slice::from_ref(x),
            Value::Vector(v) => v,
            Value::Rect(rows) => &rows[i],
        }
    }

    /// Columns, obtained by transposing the representation once. A scalar has none.
    fn columns(&self) -> Vec<Vec<f64>> {
        match &self.value {
            Value::Scalar(_) => Vec::new(),
            Value::Vector(v) => v.iter().map(|x| vec![*x]).collect(),
            Value::Rect(rows) => transpose_rows(rows),
        }
    }

    pub fn transpose(&self) -> Matrix {
        match &self.value {
            Value::Scalar(x) => Matrix::scalar(*x),
            Value::Vector(v) if v.len() < 2 => Matrix::vector(v.clone()),
            Value::Vector(v) => Matrix::rect_unchecked(v.iter().map(|x| vec![*x]).collect()),
            Value::Rect(rows) if rows[0].len() == 1 => {
                Matrix::vector(rows.iter().map(|row| row[0]).collect())
            }
            Value::Rect(rows) => Matrix::rect_unchecked(transpose_rows(rows)),
        }
    }

    /// Apply `f` to each top-level entry and validate the result as a new
    /// matrix. Not recursive: rows are handed over whole.
    pub fn map<F>(&self, mut f: F) -> Result<Matrix, ShapeError>
    where
        F: FnMut(Entry, usize) -> Entry,
    {
        let entries: Vec<Entry> = match &self.value {
            Value::Scalar(x) => {
                return match f(Entry::Number(*x), 0) {
                    Entry::Number(y) => Ok(Matrix::scalar(y)),
                    Entry::Row(row) => Ok(Matrix::vector(row)),
                }
            }
            Value::Vector(v) => v
                .iter()
                .enumerate()
                .map(|(i, x)| f(Entry::Number(*x), i))
                .collect(),
            Value::Rect(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| f(Entry::Row(row.clone()), i))
                .collect(),
        };

        // The first entry decides the rank of the result.
        if matches!(entries.first(), Some(Entry::Row(_))) {
            let rows = entries
                .into_iter()
                .map(|entry| match entry {
                    Entry::Row(row) => Ok(row),
                    Entry::Number(_) => Err(ShapeError::MixedNesting),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Matrix::new(rows)
        } else {
            entries
                .into_iter()
                .map(|entry| match entry {
                    Entry::Number(x) => Ok(x),
                    Entry::Row(_) => Err(ShapeError::MixedNesting),
                })
                .collect::<Result<Vec<f64>, _>>()
                .map(Matrix::vector)
        }
    }

    /// Apply `f` to every number, keeping the shape.
    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        let value = match &self.value {
            Value::Scalar(x) => Value::Scalar(f(*x)),
            Value::Vector(v) => Value::Vector(v.iter().map(|x| f(*x)).collect()),
            Value::Rect(rows) => Value::Rect(
                rows.iter()
                    .map(|row| row.iter().map(|x| f(*x)).collect())
                    .collect(),
            ),
        };
        Matrix { value }
    }

    /// Invert with the default [`GaussJordan`] backend.
    pub fn invert(&self) -> Result<Matrix, MatrixError> {
        self.invert_with(&GaussJordan::default())
    }

    pub fn invert_with<I>(&self, inverter: &I) -> Result<Matrix, MatrixError>
    where
        I: Inverter + ?Sized,
    {
        Matrix::invert_value_with(inverter, self.value.clone())
    }

    /// Invert a matrix or raw value with the default [`GaussJordan`] backend.
    pub fn invert_value(value: impl Into<Value>) -> Result<Matrix, MatrixError> {
        Matrix::invert_value_with(&GaussJordan::default(), value)
    }

    /// Hand `value` to `inverter` and validate what comes back.
    ///
    /// Backend failures are returned as [`MatrixError::Inversion`] unchanged.
    /// The result must itself be a valid matrix, so inverting a raw 1 x 1
    /// rectangle fails with [`ShapeError::ExtraNesting`].
    pub fn invert_value_with<I>(
        inverter: &I,
        value: impl Into<Value>,
    ) -> Result<Matrix, MatrixError>
    where
        I: Inverter + ?Sized,
    {
        let value = value.into();
        log::debug!(
            "inverting rank {} value with {}",
            value.rank(),
            inverter.name()
        );
        let inverse = inverter.invert(&value).map_err(InversionError::from)?;
        Ok(Matrix::new(inverse)?)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn check_rows(rows: &[Vec<f64>]) -> Result<(), ShapeError> {
    let first = match rows {
        [] => return Err(ShapeError::NoRows),
        [_] => return Err(ShapeError::ExtraNesting),
        [first, ..] => first.len(),
    };
    if let Some((row, found)) = rows
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, len)| *len != first)
    {
        return Err(ShapeError::UnevenRows {
            row,
            expected: first,
            found,
        });
    }
    if first == 0 {
        return Err(ShapeError::EmptyRow);
    }
    Ok(())
}

fn add_rows(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

fn inner_product(row: &[f64], column: &[f64]) -> f64 {
    row.iter().zip(column).fold(0.0, |acc, (a, b)| acc + a * b)
}

fn transpose_rows(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let ncols = rows.first().map_or(0, Vec::len);
    (0..ncols)
        .map(|j| rows.iter().map(|row| row[j]).collect())
        .collect()
}

impl TryFrom<Value> for Matrix {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Matrix::new(value)
    }
}

impl TryFrom<JsonValue> for Matrix {
    type Error = ShapeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Matrix::from_json(&value)
    }
}

impl TryFrom<&JsonValue> for Matrix {
    type Error = ShapeError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        Matrix::from_json(value)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = ShapeError;

    fn try_from(value: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::new(value)
    }
}

impl TryFrom<Array2<f64>> for Matrix {
    type Error = ShapeError;

    fn try_from(value: Array2<f64>) -> Result<Self, Self::Error> {
        Matrix::new(value)
    }
}

impl From<f64> for Matrix {
    fn from(value: f64) -> Self {
        Matrix::scalar(value)
    }
}

impl From<Vec<f64>> for Matrix {
    fn from(value: Vec<f64>) -> Self {
        Matrix::vector(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        value.value
    }
}

impl From<&Matrix> for Value {
    fn from(value: &Matrix) -> Self {
        value.value.clone()
    }
}
