use crate::config::{InverterConfig, InverterType};
use crate::inverse::gauss_jordan::GaussJordan;
use crate::inverse::inverter_trait::Inverter;

/// Build a boxed inverter from an `InverterConfig`.
pub fn build_inverter(config: InverterConfig) -> Box<dyn Inverter> {
    log::debug!("building inverter from {:?}", config);
    match config.inverter_type {
        InverterType::GaussJordan { closed_form_small } => {
            Box::new(GaussJordan::new(config.pivot_tolerance, closed_form_small))
        }

        #[cfg(feature = "nalgebra")]
        InverterType::Nalgebra {} => Box::new(
            crate::inverse::nalgebra_backend::NalgebraInverter::new(config.pivot_tolerance),
        ),
        // Only the variants enabled by features exist in the compiled enum,
        // so the arms above are exhaustive.
    }
}
