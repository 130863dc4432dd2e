/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::{kelvin, Float, SIGMA};
use model::physical_range::{AIR_PRESSURE, CALCULATED_CONDUCTANCE};
use model::SoilResult;

/// Von Karman's constant
pub const VON_KARMAN: Float = 0.41;

/// Number of times the stability corrections are refreshed when
/// calculating the conductance
pub const STABILITY_ITERATIONS: usize = 3;

const GRAVITY: Float = 9.8;

/// kg/mol
const MOLAR_MASS_AIR: Float = 0.02897;

/// J/mol/K
const GAS_CONSTANT: Float = 8.3143;

/// J/kg/K
const AIR_SPECIFIC_HEAT: Float = 1010.0;

/// Emissivity used for the radiative part of the conductance
const EMISSIVITY: Float = 0.98;

/// Calculates the air pressure (hPa) at a certain altitude (m), checking
/// that the result is plausible.
///
/// ```
/// use heat::boundary_layer::air_pressure;
///
/// assert!((air_pressure(0.0).unwrap() - 1013.25).abs() < 1e-9);
/// assert!(air_pressure(3000.0).is_err());
/// ```
pub fn air_pressure(altitude: Float) -> SoilResult<Float> {
    let p = 1013.25 * (1. - 2.25577e-5 * altitude).powf(5.25588);
    AIR_PRESSURE.check(p)
}

/// The roughness of the surface, given by the canopy (or residue, or
/// soil clods) covering the soil
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRoughness {
    /// The height of the roughness elements, in m
    pub canopy_height: Float,

    /// The height at which wind speed and air temperature
    /// are considered to be measured, in m
    pub reference_height: Float,
}

impl SurfaceRoughness {
    /// Creates a new `SurfaceRoughness`.
    ///
    /// # Arguments
    /// * `canopy_height`: height of the canopy, in m
    /// * `bare_soil_height`: the minimum height of the roughness elements, in mm
    /// * `instrument_height`: the height of the weather instruments, in m. The
    ///   reference height is moved upwards when the canopy is too tall
    pub fn new(canopy_height: Float, bare_soil_height: Float, instrument_height: Float) -> Self {
        let canopy_height = (canopy_height * 1000.).max(bare_soil_height) / 1000.;
        Self {
            canopy_height,
            reference_height: instrument_height.max(canopy_height + 0.5),
        }
    }

    /// Roughness length for momentum (m)
    pub fn momentum_roughness(&self) -> Float {
        0.13 * self.canopy_height
    }

    /// Roughness length for heat (m)
    pub fn heat_roughness(&self) -> Float {
        0.2 * self.momentum_roughness()
    }

    /// Zero plane displacement (m)
    pub fn displacement(&self) -> Float {
        0.77 * self.canopy_height
    }
}

/// Corrections to the logarithmic wind profile that account for
/// atmospheric stability
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StabilityCorrection {
    /// Correction for heat
    pub heat: Float,
    /// Correction for momentum
    pub momentum: Float,
}

impl StabilityCorrection {
    /// The correction for a neutral atmosphere (i.e., none)
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Calculates the corrections from the stability parameter $`\zeta`$.
    ///
    /// When $`\zeta > 0`$ the atmosphere is stable (the surface is colder than
    /// the air) and both corrections are $`4.7\zeta`$. Otherwise
    ///
    /// ```math
    /// \psi_h = -2 \ln \left( \frac{1 + \sqrt{1 - 16 \zeta}}{2} \right) \\
    /// \psi_m = 0.6 \psi_h
    /// ```
    pub fn from_stability_parameter(zeta: Float) -> Self {
        if zeta > 0.0 {
            let heat = 4.7 * zeta;
            Self {
                heat,
                momentum: heat,
            }
        } else {
            let heat = -2. * ((1. + (1. - 16. * zeta).sqrt()) / 2.).ln();
            Self {
                heat,
                momentum: 0.6 * heat,
            }
        }
    }
}

/// The conditions that determine the conductance between the soil
/// surface and the air during one day.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryLayer {
    /// Wind speed (m/s)
    pub wind_speed: Float,

    /// Fraction of the radiative exchange that reaches the bare soil
    pub penetration: Float,

    /// Air pressure (hPa)
    pub air_pressure: Float,

    /// The roughness of the surface
    pub roughness: SurfaceRoughness,
}

impl BoundaryLayer {
    /// Volumetric heat capacity of the air (J/m3/K)
    pub fn air_heat_capacity(&self, air_temperature: Float) -> Float {
        let air_density =
            MOLAR_MASS_AIR * self.air_pressure * 100. / (kelvin(air_temperature) * GAS_CONSTANT);
        AIR_SPECIFIC_HEAT * air_density
    }

    /// The part of the conductance (W/m2/K) that is due to
    /// long-wave radiation
    pub fn radiative_conductance(&self, air_temperature: Float) -> Float {
        4. * SIGMA * EMISSIVITY * self.penetration * kelvin(air_temperature).powi(3)
    }

    /// Calculates the conductance (W/m2/K) for a given set of stability
    /// corrections, and returns it together with the corrections that
    /// result from the heat flux it produces.
    pub fn iterate(
        &self,
        air_temperature: Float,
        surface_temperature: Float,
        correction: StabilityCorrection,
    ) -> (Float, StabilityCorrection) {
        let z = self.roughness.reference_height;
        let zm = self.roughness.momentum_roughness();
        let zh = self.roughness.heat_roughness();
        let d = self.roughness.displacement();
        let rho_cp = self.air_heat_capacity(air_temperature);

        let friction_velocity =
            self.wind_speed * VON_KARMAN / (((z - d + zm) / zm).ln() + correction.momentum);
        let conductance = rho_cp * VON_KARMAN * friction_velocity
            / (((z - d + zh) / zh).ln() + correction.heat)
            + self.radiative_conductance(air_temperature);

        // Without wind there is nothing to correct
        if friction_velocity <= 0.0 {
            return (conductance, StabilityCorrection::neutral());
        }

        let heat_flux = conductance * (surface_temperature - air_temperature);
        let zeta = -VON_KARMAN * z * GRAVITY * heat_flux
            / (rho_cp * kelvin(air_temperature) * friction_velocity.powi(3));

        (
            conductance,
            StabilityCorrection::from_stability_parameter(zeta),
        )
    }

    /// Calculates the conductance (W/m2/K) between the surface and
    /// the air, starting from a neutral atmosphere and refreshing the
    /// stability corrections [`STABILITY_ITERATIONS`] times
    pub fn conductance(&self, air_temperature: Float, surface_temperature: Float) -> Float {
        let mut correction = StabilityCorrection::neutral();
        let mut conductance = 0.0;
        for _ in 0..STABILITY_ITERATIONS {
            let (g, c) = self.iterate(air_temperature, surface_temperature, correction);
            conductance = g;
            correction = c;
        }
        conductance
    }

    /// Like [`BoundaryLayer::conductance`], but fails if the
    /// result is not physically plausible
    pub fn checked_conductance(
        &self,
        air_temperature: Float,
        surface_temperature: Float,
    ) -> SoilResult<Float> {
        CALCULATED_CONDUCTANCE.check(self.conductance(air_temperature, surface_temperature))
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use model::SoilError;

    fn layer(wind_speed: Float) -> Result<BoundaryLayer, String> {
        Ok(BoundaryLayer {
            wind_speed,
            penetration: 1.0,
            air_pressure: air_pressure(18.).map_err(|e| e.to_string())?,
            roughness: SurfaceRoughness::new(0.0, 57., 1.2),
        })
    }

    #[test]
    fn pressure() -> Result<(), String> {
        let p = air_pressure(18.).map_err(|e| e.to_string())?;
        assert!((p - 1011.1).abs() < 0.1, "p = {}", p);
        assert!(air_pressure(1000.).map_err(|e| e.to_string())? < p);
        Ok(())
    }

    #[test]
    fn roughness() {
        let bare = SurfaceRoughness::new(0.0, 57., 1.2);
        assert!((bare.canopy_height - 0.057).abs() < 1e-12);
        assert_eq!(bare.reference_height, 1.2);
        assert!((bare.momentum_roughness() - 0.00741).abs() < 1e-12);
        assert!((bare.heat_roughness() - 0.001482).abs() < 1e-12);

        let crop = SurfaceRoughness::new(2.0, 57., 1.2);
        assert_eq!(crop.canopy_height, 2.0);
        assert!((crop.reference_height - 2.5).abs() < 1e-12);
        assert!((crop.displacement() - 1.54).abs() < 1e-12);
    }

    #[test]
    fn corrections() {
        let stable = StabilityCorrection::from_stability_parameter(0.1);
        assert!((stable.heat - 0.47).abs() < 1e-12);
        assert_eq!(stable.heat, stable.momentum);

        let unstable = StabilityCorrection::from_stability_parameter(-0.5);
        let expected = -2. * ((1. + (9. as Float).sqrt()) / 2.).ln();
        assert!((unstable.heat - expected).abs() < 1e-12);
        assert!((unstable.momentum - 0.6 * expected).abs() < 1e-12);

        let neutral = StabilityCorrection::from_stability_parameter(0.0);
        assert!(neutral.heat.abs() < 1e-12);
        assert!(neutral.momentum.abs() < 1e-12);
    }

    #[test]
    fn neutral_conductance() -> Result<(), String> {
        let bl = layer(2.0)?;
        let ta: Float = 20.;
        let r = bl.roughness;
        let (z, zm, zh, d) = (
            r.reference_height,
            r.momentum_roughness(),
            r.heat_roughness(),
            r.displacement(),
        );
        let u_star = 2.0 * VON_KARMAN / ((z - d + zm) / zm).ln();
        let expected = bl.air_heat_capacity(ta) * VON_KARMAN * u_star / ((z - d + zh) / zh).ln()
            + bl.radiative_conductance(ta);

        let found = bl.conductance(ta, ta);
        assert!((found - expected).abs() < 1e-9, "{} vs {}", found, expected);
        Ok(())
    }

    #[test]
    fn stability() -> Result<(), String> {
        let bl = layer(2.0)?;
        let neutral = bl.conductance(20., 20.);
        let unstable = bl.conductance(20., 30.);
        let stable = bl.conductance(20., 10.);
        assert!(unstable > neutral);
        assert!(stable < neutral);

        // More wind, more conductance
        assert!(layer(4.0)?.conductance(20., 20.) > neutral);
        Ok(())
    }

    #[test]
    fn no_wind() -> Result<(), String> {
        let bl = layer(0.0)?;
        let g = bl.conductance(20., 25.);
        assert!(g.is_finite());
        assert!((g - bl.radiative_conductance(20.)).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn implausible_conductance() -> Result<(), String> {
        let bl = layer(2.0)?;
        let g = bl.checked_conductance(20., 25.).map_err(|e| e.to_string())?;
        assert_eq!(g, bl.conductance(20., 25.));

        let gale = layer(5000.)?;
        assert!(gale.conductance(20., 25.) > 10000.);
        match gale.checked_conductance(20., 25.) {
            Err(SoilError::OutOfRange { quantity, .. }) => {
                assert_eq!(quantity, "calculated boundary layer conductance")
            }
            other => panic!("expected OutOfRange, found {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn iterations_are_threaded() -> Result<(), String> {
        let bl = layer(1.5)?;
        let (g0, c0) = bl.iterate(15., 25., StabilityCorrection::neutral());
        let (g1, _) = bl.iterate(15., 25., c0);
        assert!(c0.heat < 0.0);
        assert!(g1 > g0);
        Ok(())
    }
}
