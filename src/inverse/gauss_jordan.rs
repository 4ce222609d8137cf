use ndarray::{s, Array2, Axis};

use crate::inverse::inverter_trait::{
    invert_by_rank, is_negligible, largest_magnitude, reciprocal, square_rows, InversionFailure,
    Inverter,
};
use crate::math::Value;

/// Gauss-Jordan elimination with partial pivoting over an augmented
/// `[A | I]` ndarray.
///
/// With `closed_form_small` set, 1 x 1 and 2 x 2 inputs use the
/// determinant formula instead, which keeps results such as the inverse of
/// `[[1, 2], [3, 4]]` exact.
///
/// `pivot_tolerance` is relative: a pivot counts as zero when it is at or
/// below `pivot_tolerance` times the largest absolute entry, and a 2 x 2
/// determinant when it is at or below `pivot_tolerance` times that entry
/// squared. Uniformly scaling a matrix never changes whether it inverts.
#[derive(Debug, Clone)]
pub struct GaussJordan {
    pivot_tolerance: f64,
    closed_form_small: bool,
}

impl GaussJordan {
    /// Default relative tolerance below which a pivot or determinant counts as zero.
    pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

    pub fn new(pivot_tolerance: f64, closed_form_small: bool) -> Self {
        GaussJordan {
            pivot_tolerance,
            closed_form_small,
        }
    }

    fn invert_rows(&self, rows: &[Vec<f64>]) -> anyhow::Result<Vec<Vec<f64>>> {
        let n = square_rows(rows)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let scale = largest_magnitude(rows);
        if self.closed_form_small && n <= 2 {
            return self.closed_form(rows, scale);
        }

        let mut aug = Array2::<f64>::zeros((n, 2 * n));
        for (i, row) in rows.iter().enumerate() {
            for (j, x) in row.iter().enumerate() {
                aug[(i, j)] = *x;
            }
            aug[(i, n + i)] = 1.0;
        }

        for col in 0..n {
            // Largest remaining entry in this column becomes the pivot.
            let pivot_row = (col..n)
                .max_by(|&a, &b| aug[(a, col)].abs().total_cmp(&aug[(b, col)].abs()))
                .unwrap_or(col);
            let pivot = aug[(pivot_row, col)];
            if is_negligible(pivot, self.pivot_tolerance * scale) {
                anyhow::bail!(InversionFailure::Singular);
            }
            if pivot_row != col {
                for j in 0..2 * n {
                    aug.swap((col, j), (pivot_row, j));
                }
            }

            aug.row_mut(col).mapv_inplace(|x| x / pivot);
            let pivot_values = aug.row(col).to_owned();
            for (i, mut row) in aug.axis_iter_mut(Axis(0)).enumerate() {
                if i == col {
                    continue;
                }
                let factor = row[col];
                if factor != 0.0 {
                    row.scaled_add(-factor, &pivot_values);
                }
            }
        }

        Ok(aug
            .slice(s![.., n..])
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect())
    }

    fn closed_form(&self, rows: &[Vec<f64>], scale: f64) -> anyhow::Result<Vec<Vec<f64>>> {
        if rows.len() == 1 {
            return Ok(vec![vec![reciprocal(rows[0][0])?]]);
        }

        let (a, b, c, d) = (rows[0][0], rows[0][1], rows[1][0], rows[1][1]);
        let det = a * d - b * c;
        if is_negligible(det, self.pivot_tolerance * scale * scale) {
            anyhow::bail!(InversionFailure::Singular);
        }
        Ok(vec![vec![d / det, -b / det], vec![-c / det, a / det]])
    }
}

impl Default for GaussJordan {
    fn default() -> Self {
        GaussJordan::new(Self::DEFAULT_PIVOT_TOLERANCE, true)
    }
}

impl Inverter for GaussJordan {
    fn invert(&self, value: &Value) -> anyhow::Result<Value> {
        invert_by_rank(value, |rows| {
            log::debug!("Gauss-Jordan inversion of a {}x{} matrix", rows.len(), rows.len());
            self.invert_rows(rows)
        })
    }

    fn name(&self) -> &str {
        "gauss-jordan"
    }
}
