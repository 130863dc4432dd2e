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

use crate::physical_range::{
    ALTITUDE, BARE_SOIL_HEIGHT, BOUNDARY_LAYER_CONDUCTANCE, CONDUCTANCE_ITERATIONS,
    DEFAULT_WIND_SPEED, HOUR_OF_DAY, INSTRUMENT_HEIGHT, NU, STEPS_PER_DAY,
    VOLUMETRIC_SPECIFIC_HEAT,
};
use crate::{Float, SoilError, SoilResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the conductance between the soil surface and the air is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoundaryLayerConductanceSource {
    /// Calculated every step from wind speed, roughness and
    /// atmospheric stability
    #[default]
    Calc,

    /// A constant value, given in the options
    Constant,
}

impl FromStr for BoundaryLayerConductanceSource {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calc" => Ok(Self::Calc),
            "constant" => Ok(Self::Constant),
            _ => Err(SoilError::UnsupportedSource {
                option: "boundary layer conductance source",
                value: s.to_string(),
                expected: "'calc', 'constant'",
            }),
        }
    }
}

impl TryFrom<String> for BoundaryLayerConductanceSource {
    type Error = SoilError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for BoundaryLayerConductanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calc => write!(f, "calc"),
            Self::Constant => write!(f, "constant"),
        }
    }
}

impl From<BoundaryLayerConductanceSource> for String {
    fn from(s: BoundaryLayerConductanceSource) -> Self {
        s.to_string()
    }
}

/// Where the radiation term of the surface energy balance comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NetRadiationSource {
    /// Calculated from the daily radiation, cloudiness and temperatures
    #[default]
    Calc,

    /// Assumed equal to the energy needed to evaporate the
    /// potential soil evaporation
    Eos,
}

impl FromStr for NetRadiationSource {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calc" => Ok(Self::Calc),
            "eos" => Ok(Self::Eos),
            _ => Err(SoilError::UnsupportedSource {
                option: "net radiation source",
                value: s.to_string(),
                expected: "'calc', 'eos'",
            }),
        }
    }
}

impl TryFrom<String> for NetRadiationSource {
    type Error = SoilError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for NetRadiationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calc => write!(f, "calc"),
            Self::Eos => write!(f, "eos"),
        }
    }
}

impl From<NetRadiationSource> for String {
    fn from(s: NetRadiationSource) -> Self {
        s.to_string()
    }
}

/// The options of the soil temperature simulation. Every field
/// has a default, so an empty object is a valid set of options.
///
/// ```
/// use model::SoilTemperatureOptions;
///
/// let options : SoilTemperatureOptions = json5::from_str("{ nu: 0.5 }").unwrap();
/// assert_eq!(options.nu, 0.5);
/// assert_eq!(options.steps_per_day, 48);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoilTemperatureOptions {
    /// Time weighting of the heat equation: 0 is fully explicit,
    /// 1 is fully implicit and 0.5 is Crank-Nicolson
    pub nu: Float,

    /// Number of steps in which each day is divided
    pub steps_per_day: usize,

    /// How to obtain the conductance between the air and the soil surface
    pub boundary_layer_conductance_source: BoundaryLayerConductanceSource,

    /// The conductance used when the source is `constant` (W/m2/K)
    pub boundary_layer_conductance: Float,

    /// Number of times the calculated conductance is refreshed with
    /// the newly solved surface temperature, on each step
    pub boundary_layer_conductance_iterations: usize,

    /// Where the radiation driving the surface comes from
    pub net_radiation_source: NetRadiationSource,

    /// Hour of the day at which the maximum air temperature happens
    pub max_temperature_hour: Float,

    /// Wind speed used when the weather provides none (m/s)
    pub default_wind_speed: Float,

    /// Altitude of the site (m), used when the weather provides none
    pub default_altitude: Float,

    /// Height at which the wind speed and air temperature are measured (m)
    pub instrument_height: Float,

    /// Height of the roughness elements of the bare soil (mm)
    pub bare_soil_height: Float,

    /// Volumetric specific heat of the mineral solids (J/m3/K)
    pub clay_specific_heat: Float,

    /// Volumetric specific heat of water (J/m3/K)
    pub water_specific_heat: Float,

    /// Hour of the day at which the temperature profile is stored
    /// as the morning profile
    pub morning_hour: Float,
}

impl std::default::Default for SoilTemperatureOptions {
    fn default() -> Self {
        Self {
            nu: 0.6,
            steps_per_day: 48,
            boundary_layer_conductance_source: BoundaryLayerConductanceSource::Calc,
            boundary_layer_conductance: 20.0,
            boundary_layer_conductance_iterations: 1,
            net_radiation_source: NetRadiationSource::Calc,
            max_temperature_hour: 14.0,
            default_wind_speed: 3.0,
            default_altitude: 18.0,
            instrument_height: 1.2,
            bare_soil_height: 57.0,
            clay_specific_heat: 2.39e6,
            water_specific_heat: 4.18e6,
            morning_hour: 5.0,
        }
    }
}

impl SoilTemperatureOptions {
    /// Checks that every option is within its valid range
    pub fn validate(&self) -> SoilResult<()> {
        NU.check(self.nu)?;
        STEPS_PER_DAY.check(self.steps_per_day as Float)?;
        BOUNDARY_LAYER_CONDUCTANCE.check(self.boundary_layer_conductance)?;
        CONDUCTANCE_ITERATIONS.check(self.boundary_layer_conductance_iterations as Float)?;
        HOUR_OF_DAY.check(self.max_temperature_hour)?;
        DEFAULT_WIND_SPEED.check(self.default_wind_speed)?;
        ALTITUDE.check(self.default_altitude)?;
        INSTRUMENT_HEIGHT.check(self.instrument_height)?;
        BARE_SOIL_HEIGHT.check(self.bare_soil_height)?;
        VOLUMETRIC_SPECIFIC_HEAT.check(self.clay_specific_heat)?;
        VOLUMETRIC_SPECIFIC_HEAT.check(self.water_specific_heat)?;
        HOUR_OF_DAY.check(self.morning_hour)?;
        Ok(())
    }

    /// The length of each step, in seconds
    pub fn dt(&self) -> Float {
        (86400.0 / self.steps_per_day as Float).round()
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let options = SoilTemperatureOptions::default();
        options.validate().map_err(|e| e.to_string())?;
        assert_eq!(options.dt(), 1800.0);

        let from_empty: SoilTemperatureOptions =
            json5::from_str("{}").map_err(|e| e.to_string())?;
        assert_eq!(options, from_empty);
        Ok(())
    }

    #[test]
    fn serde() -> Result<(), String> {
        let options: SoilTemperatureOptions = json5::from_str(
            "{
            nu: 0.5,
            boundary_layer_conductance_source: 'constant',
            boundary_layer_conductance: 25,
            net_radiation_source: 'eos',
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(
            options.boundary_layer_conductance_source,
            BoundaryLayerConductanceSource::Constant
        );
        assert_eq!(options.net_radiation_source, NetRadiationSource::Eos);
        assert_eq!(options.boundary_layer_conductance, 25.);

        // Serialize and deserialize again... check that everything matches
        let json = serde_json::to_string(&options).map_err(|e| e.to_string())?;
        assert!(json.contains("\"constant\""));
        let back: SoilTemperatureOptions =
            serde_json::from_str(&json).map_err(|e| e.to_string())?;
        assert_eq!(options, back);
        Ok(())
    }

    #[test]
    fn unsupported_sources() {
        let e = json5::from_str::<SoilTemperatureOptions>(
            "{ boundary_layer_conductance_source: 'magic' }",
        );
        assert!(e.is_err());
        let e = json5::from_str::<SoilTemperatureOptions>("{ net_radiation_source: 'sky' }");
        assert!(e.is_err());

        match "magic".parse::<BoundaryLayerConductanceSource>() {
            Err(SoilError::UnsupportedSource { value, .. }) => assert_eq!(value, "magic"),
            other => panic!("expected UnsupportedSource, found {:?}", other),
        }
        assert_eq!("eos".parse::<NetRadiationSource>().ok(), Some(NetRadiationSource::Eos));
    }

    #[test]
    fn out_of_range() {
        let options = SoilTemperatureOptions {
            nu: 1.5,
            ..SoilTemperatureOptions::default()
        };
        assert!(options.validate().is_err());

        let options = SoilTemperatureOptions {
            boundary_layer_conductance: 5.0,
            ..SoilTemperatureOptions::default()
        };
        assert!(options.validate().is_err());

        let options = SoilTemperatureOptions {
            steps_per_day: 0,
            ..SoilTemperatureOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
