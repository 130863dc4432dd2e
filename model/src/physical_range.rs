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

use crate::{Float, SoilError, SoilResult};

/// Values this close to the bounds of a range are still
/// considered to be within it.
const MARGIN: Float = 1e-5;

/// A closed range of physically plausible values for a named quantity.
///
/// ```
/// use model::physical_range::{PhysicalRange, SOIL_TEMPERATURE};
///
/// assert!(SOIL_TEMPERATURE.check(25.0).is_ok());
/// assert!(SOIL_TEMPERATURE.check(120.0).is_err());
///
/// let r = PhysicalRange::new("albedo", 0.0, 1.0);
/// assert!(r.check(-0.000001).is_ok()); // within margin
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalRange {
    /// The name of the quantity, used for reporting
    pub name: &'static str,
    /// The lower bound
    pub lower: Float,
    /// The upper bound
    pub upper: Float,
}

impl PhysicalRange {
    /// Creates a new range
    pub const fn new(name: &'static str, lower: Float, upper: Float) -> Self {
        Self { name, lower, upper }
    }

    /// Checks whether `value` is within the range. `NaN` never is.
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower - MARGIN && value <= self.upper + MARGIN
    }

    /// Returns the value if it is within the range, or an
    /// [`SoilError::OutOfRange`] tagged with the quantity's name if it is not.
    pub fn check(&self, value: Float) -> SoilResult<Float> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(self.out_of_range(self.name.to_string(), value))
        }
    }

    /// Like [`PhysicalRange::check`], but reports the position of
    /// the value (e.g., the layer or node) as well
    pub fn check_at(&self, index: usize, value: Float) -> SoilResult<Float> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(self.out_of_range(format!("{} [{}]", self.name, index), value))
        }
    }

    /// Checks every element in a slice, reporting the first one that fails
    pub fn check_all(&self, values: &[Float]) -> SoilResult<()> {
        for (i, v) in values.iter().enumerate() {
            self.check_at(i, *v)?;
        }
        Ok(())
    }

    fn out_of_range(&self, quantity: String, value: Float) -> SoilError {
        SoilError::OutOfRange {
            quantity,
            value,
            lower: self.lower,
            upper: self.upper,
        }
    }
}

/// Temperature of any soil node (C)
pub const SOIL_TEMPERATURE: PhysicalRange = PhysicalRange::new("soil temperature", -50.0, 100.0);

/// Thickness of a soil layer (mm)
pub const LAYER_THICKNESS: PhysicalRange = PhysicalRange::new("layer thickness", 0.0, 1000.0);

/// Bulk density of a soil layer (g/cm3)
pub const BULK_DENSITY: PhysicalRange = PhysicalRange::new("bulk density", 0.0, 2.65);

/// Clay content of a soil layer (fraction)
pub const CLAY_FRACTION: PhysicalRange = PhysicalRange::new("clay fraction", 1e-4, 1.0);

/// Volumetric water content of a soil layer (mm/mm)
pub const WATER_CONTENT: PhysicalRange = PhysicalRange::new("volumetric water content", 0.0, 1.0);

/// Volumetric water content at the lower limit of a soil layer (mm/mm)
pub const LOWER_LIMIT: PhysicalRange = PhysicalRange::new("lower limit water content", 0.0, 1.0);

/// Time weighting of the heat equation
pub const NU: PhysicalRange = PhysicalRange::new("nu", 0.0, 1.0);

/// Number of steps in which each day is divided
pub const STEPS_PER_DAY: PhysicalRange = PhysicalRange::new("steps per day", 1.0, 1440.0);

/// Volumetric specific heat of soil constituents (J/m3/K)
pub const VOLUMETRIC_SPECIFIC_HEAT: PhysicalRange =
    PhysicalRange::new("volumetric specific heat", 1e6, 1e7);

/// Hour of the day (h)
pub const HOUR_OF_DAY: PhysicalRange = PhysicalRange::new("hour of the day", 0.0, 24.0);

/// Wind speed used when the weather does not provide one (m/s)
pub const DEFAULT_WIND_SPEED: PhysicalRange = PhysicalRange::new("default wind speed", 0.0, 10.0);

/// Altitude of the site (m)
pub const ALTITUDE: PhysicalRange = PhysicalRange::new("altitude", -100.0, 1200.0);

/// Height at which the weather is measured (m)
pub const INSTRUMENT_HEIGHT: PhysicalRange = PhysicalRange::new("instrument height", 0.0, 5.0);

/// Height of the roughness elements of a bare soil (mm)
pub const BARE_SOIL_HEIGHT: PhysicalRange = PhysicalRange::new("bare soil roughness height", 0.0, 150.0);

/// Conductance between the soil surface and the air (W/m2/K)
pub const BOUNDARY_LAYER_CONDUCTANCE: PhysicalRange =
    PhysicalRange::new("boundary layer conductance", 10.0, 40.0);

/// Conductance between the soil surface and the air, as calculated
/// from the wind speed and the atmospheric stability (W/m2/K)
pub const CALCULATED_CONDUCTANCE: PhysicalRange =
    PhysicalRange::new("calculated boundary layer conductance", 0.0, 10000.0);

/// Number of times the boundary layer conductance is recalculated per step
pub const CONDUCTANCE_ITERATIONS: PhysicalRange =
    PhysicalRange::new("boundary layer conductance iterations", 0.0, 10.0);

/// Atmospheric pressure (hPa)
pub const AIR_PRESSURE: PhysicalRange = PhysicalRange::new("air pressure", 800.0, 1200.0);

/// Daily maximum or minimum air temperature (C)
pub const AIR_TEMPERATURE: PhysicalRange = PhysicalRange::new("air temperature", -100.0, 100.0);

/// Long-term annual average air temperature (C)
pub const AVERAGE_TEMPERATURE: PhysicalRange =
    PhysicalRange::new("annual average temperature", -30.0, 40.0);

/// Potential evapotranspiration, potential and actual soil evaporation (mm)
pub const EVAPORATION: PhysicalRange = PhysicalRange::new("evaporation", -30.0, 40.0);

/// Daily mean wind speed (m/s)
pub const WIND_SPEED: PhysicalRange = PhysicalRange::new("wind speed", 0.0, 1000.0);

/// Height of the canopy or residue above the soil (m)
pub const CANOPY_HEIGHT: PhysicalRange = PhysicalRange::new("canopy height", 0.0, 20.0);

/// Fraction of the incident shortwave radiation that is reflected
pub const ALBEDO: PhysicalRange = PhysicalRange::new("albedo", 0.0, 1.0);

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn check_tags_quantity() {
        match SOIL_TEMPERATURE.check_at(3, -60.0) {
            Err(SoilError::OutOfRange {
                quantity,
                value,
                lower,
                upper,
            }) => {
                assert_eq!(quantity, "soil temperature [3]");
                assert_eq!(value, -60.0);
                assert_eq!(lower, -50.0);
                assert_eq!(upper, 100.0);
            }
            other => panic!("expected OutOfRange, found {:?}", other),
        }
    }

    #[test]
    fn margins_and_nan() -> Result<(), String> {
        assert_eq!(ALBEDO.check(1.000001).map_err(|e| e.to_string())?, 1.000001);
        assert!(ALBEDO.check(1.001).is_err());
        assert!(!ALBEDO.contains(Float::NAN));
        assert!(BULK_DENSITY.check(2.7).is_err());
        Ok(())
    }

    #[test]
    fn check_all() {
        assert!(WATER_CONTENT.check_all(&[0.1, 0.2, 0.45]).is_ok());
        let e = WATER_CONTENT.check_all(&[0.1, 1.2]).unwrap_err();
        assert!(e.to_string().contains("[1]"), "{}", e);
    }
}
