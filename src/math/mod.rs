//! The matrix value type.
//!
//! `Value` is the raw, rank-tagged representation (scalar, row vector, or
//! rectangle); `Matrix` wraps a `Value` that passed validation and never
//! changes afterwards. Rendering lives in `display`.
pub mod display;
pub mod matrix;
pub mod value;

pub use display::format_number;
pub use matrix::{Entry, Matrix};
pub use value::Value;
