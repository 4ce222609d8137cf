use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::inverse::GaussJordan;

/// Central configuration for the inversion backend.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InverterConfig {
    /// Relative singularity threshold, applied by every backend: a pivot at or
    /// below `pivot_tolerance` times the largest absolute entry counts as zero.
    pub pivot_tolerance: f64,

    #[serde(flatten)]
    pub inverter_type: InverterType,
}

/// Supported inversion backends and their options.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum InverterType {
    GaussJordan {
        closed_form_small: bool,
    },
    #[cfg(feature = "nalgebra")]
    Nalgebra {},
}

impl Default for InverterType {
    fn default() -> Self {
        InverterType::GaussJordan {
            closed_form_small: true,
        }
    }
}

impl FromStr for InverterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gauss-jordan" | "gauss_jordan" | "gaussjordan" => Ok(InverterType::default()),
            #[cfg(feature = "nalgebra")]
            "nalgebra" => Ok(InverterType::Nalgebra {}),
            _ => Err(format!(
                "Unknown inverter type: {}. To use nalgebra, please compile with `--features nalgebra`",
                s
            )),
        }
    }
}

impl InverterConfig {
    pub fn new(pivot_tolerance: f64, inverter_type: InverterType) -> Self {
        Self {
            pivot_tolerance,
            inverter_type,
        }
    }
}

impl Default for InverterConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: GaussJordan::DEFAULT_PIVOT_TOLERANCE,
            inverter_type: InverterType::default(),
        }
    }
}
