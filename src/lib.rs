//! matrix-value: an immutable, shape-validated matrix value type.
//!
//! A `Matrix` holds a scalar, a row vector, or a rectangle of at least two
//! equal-length rows. Construction validates eagerly; addition,
//! multiplication, transpose, mapping, and rendering all return new values.
//! Inversion is delegated to an injected `Inverter` backend so the value
//! type carries no hard dependency on a particular linear-algebra routine.
//!
//! The crate only emits records through the `log` facade; installing a
//! logger is up to the caller.
pub mod config;
pub mod error;
pub mod inverse;
pub mod math;

pub use config::{InverterConfig, InverterType};
pub use error::{IncompatibleShapeError, InversionError, MatrixError, ShapeError};
pub use inverse::{build_inverter, GaussJordan, InversionFailure, Inverter};
pub use math::{Entry, Matrix, Value};
