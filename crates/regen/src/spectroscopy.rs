//! Gain-medium spectroscopy.

use lightwave_core::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};
use thiserror::Error;
use uom::si::{
    area::square_meter,
    energy::joule,
    f64::{Area, Energy, Length},
    length::meter,
};

/// Planck constant, in J s.
pub const PLANCK_CONSTANT: f64 = 6.626_069_57e-34;

/// Speed of light in vacuum, in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Errors that can occur in [`saturation_energy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("wavelength is invalid: {0}")]
    Wavelength(#[source] ConstraintError),

    #[error("cross section is invalid: {0}")]
    CrossSection(#[source] ConstraintError),

    #[error("the sum of emission and absorption cross sections must be positive")]
    ZeroCrossSection,

    #[error("mode area is invalid: {0}")]
    ModeArea(#[source] ConstraintError),
}

/// Saturation energy of a gain medium pumped over `mode_area`,
/// `Esat = h c / (lambda (sigma_e + sigma_a)) * A`.
///
/// # Errors
///
/// Returns an error if the wavelength or mode area is not strictly positive,
/// or if either cross section is negative or both are zero.
pub fn saturation_energy(
    wavelength: Length,
    emission_cross_section: Area,
    absorption_cross_section: Area,
    mode_area: Area,
) -> Result<Energy, Error> {
    let wavelength = Constrained::<f64, StrictlyPositive>::new(wavelength.get::<meter>())
        .map_err(Error::Wavelength)?
        .into_inner();
    let mut cross_section = 0.0;
    for sigma in [emission_cross_section, absorption_cross_section] {
        cross_section += Constrained::<f64, NonNegative>::new(sigma.get::<square_meter>())
            .map_err(Error::CrossSection)?
            .into_inner();
    }
    if cross_section == 0.0 {
        return Err(Error::ZeroCrossSection);
    }
    let mode_area = Constrained::<f64, StrictlyPositive>::new(mode_area.get::<square_meter>())
        .map_err(Error::ModeArea)?
        .into_inner();

    let photon_energy = PLANCK_CONSTANT * SPEED_OF_LIGHT / wavelength;
    Ok(Energy::new::<joule>(photon_energy / cross_section * mode_area))
}
