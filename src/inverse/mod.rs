//! Inversion backends.
//!
//! A `Matrix` never inverts itself: it hands its raw `Value` to an
//! `Inverter` and validates whatever comes back. `GaussJordan` (ndarray) is
//! the default; `NalgebraInverter` needs the `nalgebra` feature.
pub mod factory;
pub mod gauss_jordan;
pub mod inverter_trait;
#[cfg(feature = "nalgebra")]
pub mod nalgebra_backend;

pub use factory::build_inverter;
pub use gauss_jordan::GaussJordan;
pub use inverter_trait::{InversionFailure, Inverter};
#[cfg(feature = "nalgebra")]
pub use nalgebra_backend::NalgebraInverter;
