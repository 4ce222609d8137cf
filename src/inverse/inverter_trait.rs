use thiserror::Error;

use crate::math::Value;

/// Capability a [`Matrix`](crate::math::Matrix) delegates inversion to.
///
/// Implementations receive the raw value (which may not be a valid matrix,
/// e.g. a 1 x 1 rectangle) and return the raw inverse. Whatever error they
/// return reaches the caller unchanged inside
/// [`InversionError`](crate::error::InversionError).
pub trait Inverter: Send + Sync {
    fn invert(&self, value: &Value) -> anyhow::Result<Value>;

    /// Optional human readable name for the backend
    fn name(&self) -> &str {
        "inverter"
    }
}

/// Plain functions and closures are inverters too.
impl<F> Inverter for F
where
    F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync,
{
    fn invert(&self, value: &Value) -> anyhow::Result<Value> {
        self(value)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Errors raised by the inverters shipped with this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InversionFailure {
    #[error("Matrix must be square to be inverted, got {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },
    #[error("Cannot calculate inverse, matrix is singular")]
    Singular,
}

/// Side length of a square rectangle.
pub(crate) fn square_rows(rows: &[Vec<f64>]) -> Result<usize, InversionFailure> {
    let n = rows.len();
    match rows.iter().find(|row| row.len() != n) {
        Some(row) => Err(InversionFailure::NotSquare {
            rows: n,
            columns: row.len(),
        }),
        None => Ok(n),
    }
}

/// Largest absolute entry, the scale pivot tolerances are relative to.
pub(crate) fn largest_magnitude(rows: &[Vec<f64>]) -> f64 {
    rows.iter()
        .flatten()
        .fold(0.0, |largest: f64, x| largest.max(x.abs()))
}

/// Whether `x` counts as zero against `threshold`. NaN always does.
pub(crate) fn is_negligible(x: f64, threshold: f64) -> bool {
    x.is_nan() || x.abs() <= threshold
}

/// Dispatch on rank: a scalar inverts to its reciprocal, a one-element
/// vector to the vector of its reciprocal, longer vectors are not square,
/// and rectangles go to `invert_rows`.
pub(crate) fn invert_by_rank<F>(value: &Value, invert_rows: F) -> anyhow::Result<Value>
where
    F: FnOnce(&[Vec<f64>]) -> anyhow::Result<Vec<Vec<f64>>>,
{
    match value {
        Value::Scalar(x) => reciprocal(*x).map(Value::Scalar),
        Value::Vector(v) if v.len() == 1 => reciprocal(v[0]).map(|x| Value::Vector(vec![x])),
        Value::Vector(v) => Err(InversionFailure::NotSquare {
            rows: 1,
            columns: v.len(),
        }
        .into()),
        Value::Rect(rows) => invert_rows(rows).map(Value::Rect),
    }
}

/// A lone number is its own scale, so only zero is singular.
pub(crate) fn reciprocal(x: f64) -> anyhow::Result<f64> {
    if is_negligible(x, 0.0) {
        anyhow::bail!(InversionFailure::Singular);
    }
    Ok(1.0 / x)
}
