use std::fmt;

use crate::math::matrix::Matrix;
use crate::math::value::Value;

/// Number text as a matrix prints it: `3` rather than `3.0`, `0` for
/// negative zero, `Infinity` and `-Infinity` for the infinities.
///
/// Decimal exponents from -6 to 20 print positionally, anything outside
/// that range as shortest digits with a signed exponent (`1e+21`, `1e-7`).
pub fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    } else if x == f64::INFINITY {
        return "Infinity".to_string();
    } else if x == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }

    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return x.to_string(),
    };
    match exponent.parse::<i32>() {
        Ok(e) if (-6..=20).contains(&e) => x.to_string(),
        Ok(e) if e > 0 => format!("{}e+{}", mantissa, e),
        _ => format!("{}e{}", mantissa, exponent),
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Value::Scalar(x) => write!(f, "{}", format_number(*x)),
            Value::Vector(v) => {
                let cells: Vec<String> = v.iter().map(|x| format_number(*x)).collect();
                write!(f, "[ {} ]", cells.join(" "))
            }
            Value::Rect(rows) => {
                let cells: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| row.iter().map(|x| format_number(*x)).collect())
                    .collect();

                // Width per column, not one global width.
                let mut widths = vec![0usize; cells[0].len()];
                for row in &cells {
                    for (width, cell) in widths.iter_mut().zip(row) {
                        *width = (*width).max(cell.len());
                    }
                }

                for (i, row) in cells.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let padded: Vec<String> = row
                        .iter()
                        .zip(&widths)
                        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
                        .collect();
                    write!(f, "[ {} ]", padded.join(" "))?;
                }
                Ok(())
            }
        }
    }
}
