use nalgebra::DMatrix;

use crate::inverse::inverter_trait::{
    invert_by_rank, is_negligible, largest_magnitude, square_rows, InversionFailure, Inverter,
};
use crate::math::Value;

/// Inversion through `nalgebra`'s partially pivoted LU decomposition.
///
/// A diagonal entry of `U` at or below `pivot_tolerance` times the largest
/// absolute entry makes the matrix singular, as with
/// [`GaussJordan`](crate::inverse::GaussJordan).
#[derive(Debug, Clone)]
pub struct NalgebraInverter {
    pivot_tolerance: f64,
}

impl NalgebraInverter {
    pub fn new(pivot_tolerance: f64) -> Self {
        NalgebraInverter { pivot_tolerance }
    }
}

impl Inverter for NalgebraInverter {
    fn invert(&self, value: &Value) -> anyhow::Result<Value> {
        invert_by_rank(value, |rows| {
            let n = square_rows(rows)?;
            log::debug!("nalgebra inversion of a {}x{} matrix", n, n);
            let flat: Vec<f64> = rows.iter().flatten().copied().collect();
            let lu = DMatrix::from_row_slice(n, n, &flat).lu();
            let smallest_pivot = lu.u().diagonal().amin();
            if is_negligible(smallest_pivot, self.pivot_tolerance * largest_magnitude(rows)) {
                anyhow::bail!(InversionFailure::Singular);
            }
            let inverse = lu.try_inverse().ok_or(InversionFailure::Singular)?;
            Ok((0..n)
                .map(|i| inverse.row(i).iter().copied().collect())
                .collect())
        })
    }

    fn name(&self) -> &str {
        "nalgebra"
    }
}
