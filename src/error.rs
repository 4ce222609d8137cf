use thiserror::Error;

/// Rejected construction input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Matrix must be a number or array of numbers: found a non-numeric element")]
    NotNumeric,
    #[error("Matrix must be a number or array of numbers: a single row must not be wrapped in an outer array")]
    ExtraNesting,
    #[error("Matrix must be a number or array of numbers: arrays nested deeper than rows of numbers are not supported")]
    TooDeep,
    #[error("Matrix must be a number or array of numbers: rows and numbers are mixed at the same level")]
    MixedNesting,
    #[error("Matrix must be a number or array of numbers: row {row} has {found} columns, expected {expected}")]
    UnevenRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Matrix must be a number or array of numbers: rows must contain at least one number")]
    EmptyRow,
    #[error("Matrix must be a number or array of numbers: an array of rows must contain rows")]
    NoRows,
}

/// Operands whose (rows, columns) do not fit the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncompatibleShapeError {
    #[error("Matrices are not addable: {lhs:?} and {rhs:?}")]
    NotAddable {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("Matrices are not multipliable: {lhs:?} and {rhs:?}")]
    NotMultipliable {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
}

/// Failure raised by an inversion backend, passed through untouched.
///
/// Displays exactly as the backend's error; use [`InversionError::downcast_ref`]
/// to get the concrete type back.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InversionError(#[from] anyhow::Error);

impl InversionError {
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    IncompatibleShape(#[from] IncompatibleShapeError),
    #[error(transparent)]
    Inversion(#[from] InversionError),
}
