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

use crate::Float;
use calendar::Date;
use model::physical_range::{ALBEDO, CANOPY_HEIGHT, EVAPORATION, WATER_CONTENT};
use model::{SoilError, SoilProfile, SoilResult};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// The state of the soil water balance (and of the surface it sees)
/// during one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilWaterState {
    /// Volumetric water content of each layer (mm/mm)
    pub water_content: Vec<Float>,

    /// Potential evapotranspiration, in mm
    pub potential_evapotranspiration: Float,

    /// Potential soil evaporation, in mm
    pub potential_soil_evaporation: Float,

    /// Actual soil evaporation, in mm
    pub soil_evaporation: Float,

    /// Albedo of the soil surface
    pub albedo: Float,

    /// Height of the canopy or residue covering the soil, in m
    #[serde(default)]
    pub canopy_height: Float,
}

impl SoilWaterState {
    /// Creates a state with the initial water contents of a profile
    /// and no evaporation at all
    pub fn from_profile(profile: &SoilProfile, albedo: Float) -> Self {
        Self {
            water_content: profile.water_content(),
            potential_evapotranspiration: 0.0,
            potential_soil_evaporation: 0.0,
            soil_evaporation: 0.0,
            albedo,
            canopy_height: 0.0,
        }
    }

    /// The fraction of the radiative exchange that reaches the bare soil,
    /// estimated as the ratio between potential soil evaporation and
    /// potential evapotranspiration
    pub fn penetration_factor(&self) -> Float {
        self.potential_soil_evaporation.max(0.1) / self.potential_evapotranspiration.max(0.1)
    }

    /// Checks that the state has one water content per layer and that
    /// all values are physically plausible
    pub fn validate(&self, n_layers: usize) -> SoilResult<()> {
        if self.water_content.len() != n_layers {
            return Err(SoilError::LengthMismatch {
                property: "water content",
                expected: n_layers,
                found: self.water_content.len(),
            });
        }
        WATER_CONTENT.check_all(&self.water_content)?;
        EVAPORATION.check(self.potential_evapotranspiration)?;
        EVAPORATION.check(self.potential_soil_evaporation)?;
        EVAPORATION.check(self.soil_evaporation)?;
        ALBEDO.check(self.albedo)?;
        CANOPY_HEIGHT.check(self.canopy_height)?;
        Ok(())
    }
}

/// The basic trait defining a soil water balance that can be
/// read by the soil temperature simulation
pub trait SoilWaterTrait: Sync {
    /// Retreives the [`SoilWaterState`] of a certain date
    fn get_soil_water(&self, date: Date) -> SoilResult<SoilWaterState>;
}

impl<T: SoilWaterTrait + ?Sized> SoilWaterTrait for &T {
    fn get_soil_water(&self, date: Date) -> SoilResult<SoilWaterState> {
        (**self).get_soil_water(date)
    }
}

/// A soil water balance that does not change
#[derive(Debug, Clone)]
pub struct ConstantSoilWater {
    /// The state returned every day
    pub state: SoilWaterState,
}

impl SoilWaterTrait for ConstantSoilWater {
    fn get_soil_water(&self, _date: Date) -> SoilResult<SoilWaterState> {
        Ok(self.state.clone())
    }
}

/// The state of the soil water balance on a specific date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedSoilWater {
    /// The date
    pub date: Date,

    /// The state
    #[serde(flatten)]
    pub state: SoilWaterState,
}

/// A series of daily soil water states, usually produced by
/// a separate water balance simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilWaterSeries {
    /// The daily states
    pub data: Vec<DatedSoilWater>,
}

impl SoilWaterTrait for SoilWaterSeries {
    fn get_soil_water(&self, date: Date) -> SoilResult<SoilWaterState> {
        match self.data.binary_search_by(|x| x.date.cmp(&date)) {
            Ok(i) => Ok(self.data[i].state.clone()),
            Err(_) => Err(SoilError::provider(
                "soil water",
                format!("there is no soil water data for date {}", date),
            )),
        }
    }
}

impl SoilWaterSeries {
    /// Parses a `SoilWaterSeries` from a JSON string. The data is sorted by date.
    pub fn from_json(json: &str) -> SoilResult<Self> {
        let mut series: SoilWaterSeries = serde_json::from_str(json)
            .map_err(|e| SoilError::parse("soil water series", e.to_string()))?;
        series.data.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(series)
    }

    /// Parses a `SoilWaterSeries` from a text file containing a JSON
    pub fn from_file<P: AsRef<Path> + Display>(filename: P) -> SoilResult<Self> {
        let s = fs::read_to_string(&filename)?;
        Self::from_json(&s)
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    fn state() -> SoilWaterState {
        SoilWaterState {
            water_content: vec![0.25, 0.3],
            potential_evapotranspiration: 5.0,
            potential_soil_evaporation: 1.0,
            soil_evaporation: 0.5,
            albedo: 0.13,
            canopy_height: 0.0,
        }
    }

    #[test]
    fn penetration() {
        let s = state();
        assert!((s.penetration_factor() - 0.2).abs() < 1e-12);

        let dry = SoilWaterState {
            potential_evapotranspiration: 0.0,
            potential_soil_evaporation: 0.0,
            ..s
        };
        assert!((dry.penetration_factor() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn validate() {
        let s = state();
        assert!(s.validate(2).is_ok());
        assert!(matches!(
            s.validate(3),
            Err(SoilError::LengthMismatch { .. })
        ));
        let s = SoilWaterState {
            albedo: 1.5,
            ..state()
        };
        assert!(matches!(s.validate(2), Err(SoilError::OutOfRange { .. })));
    }

    #[test]
    fn series() -> Result<(), String> {
        let json = r#"{
            "data": [
                {"date": {"month": 1, "day": 2}, "water_content": [0.2, 0.3], "potential_evapotranspiration": 5.0, "potential_soil_evaporation": 3.0, "soil_evaporation": 1.0, "albedo": 0.13},
                {"date": {"month": 1, "day": 1}, "water_content": [0.25, 0.3], "potential_evapotranspiration": 4.0, "potential_soil_evaporation": 2.0, "soil_evaporation": 1.5, "albedo": 0.13, "canopy_height": 0.3}
            ]
        }"#;
        let series = SoilWaterSeries::from_json(json).map_err(|e| e.to_string())?;
        let s = series
            .get_soil_water(Date { month: 1, day: 1 })
            .map_err(|e| e.to_string())?;
        assert_eq!(s.water_content, vec![0.25, 0.3]);
        assert_eq!(s.canopy_height, 0.3);

        let s = (&series)
            .get_soil_water(Date { month: 1, day: 2 })
            .map_err(|e| e.to_string())?;
        assert_eq!(s.canopy_height, 0.0);

        assert!(matches!(
            series.get_soil_water(Date { month: 3, day: 1 }),
            Err(SoilError::Provider { .. })
        ));
        Ok(())
    }

    #[test]
    fn constant() -> Result<(), String> {
        let c = ConstantSoilWater { state: state() };
        let a = c
            .get_soil_water(Date { month: 1, day: 1 })
            .map_err(|e| e.to_string())?;
        let b = c
            .get_soil_water(Date { month: 6, day: 1 })
            .map_err(|e| e.to_string())?;
        assert_eq!(a, b);
        Ok(())
    }
}
