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

#![deny(missing_docs)]

//! Functions for creating small soil models, weathers and soil water
//! balances to be used in tests and benchmarks

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
type Float = f32;

#[cfg(not(feature = "float"))]
type Float = f64;

use calendar::Date;
use communication::{ConstantSoilWater, MetaOptions, SoilWaterState};
use model::{
    BoundaryLayerConductanceSource, Layer, NetRadiationSource, SoilProfile, SoilResult,
    SoilTemperatureOptions,
};
use weather::{DailyWeather, Location, WeatherTrait};

/// A weather in which every day is the same
#[derive(Debug, Clone, Copy)]
pub struct ConstantWeather {
    /// Maximum air temperature (C)
    pub max_temperature: Float,
    /// Minimum air temperature (C)
    pub min_temperature: Float,
    /// Daily solar radiation (MJ/m2)
    pub solar_radiation: Float,
    /// Wind speed (m/s)
    pub wind_speed: Option<Float>,
}

impl WeatherTrait for ConstantWeather {
    fn get_weather_data(&self, date: Date) -> Result<DailyWeather, String> {
        Ok(DailyWeather {
            date,
            max_temperature: self.max_temperature,
            min_temperature: self.min_temperature,
            solar_radiation: self.solar_radiation,
            wind_speed: self.wind_speed,
            rain: 0.0,
        })
    }
}

/// Everything needed for building a soil temperature model
pub struct TestScenario {
    /// Site information
    pub meta_options: MetaOptions,
    /// The options of the simulation
    pub options: SoilTemperatureOptions,
    /// The soil
    pub profile: SoilProfile,
    /// The weather
    pub weather: ConstantWeather,
    /// The soil water balance
    pub soil_water: ConstantSoilWater,
}

/// A single layer of 100mm.
///
/// # Properties
/// * Bulk density: 1.3 g/cm3
/// * Water content: 0.25 mm/mm
/// * Clay: 30%
pub fn single_layer_profile() -> SoilResult<SoilProfile> {
    SoilProfile::new(vec![Layer {
        thickness: 100.,
        bulk_density: 1.3,
        water_content: 0.25,
        clay_fraction: 0.3,
        lower_limit: 0.0,
    }])
}

/// Four thin layers (50, 50, 100 and 100 mm) that get denser,
/// wetter and more clayey with depth
pub fn layered_profile() -> SoilResult<SoilProfile> {
    SoilProfile::from_columns(
        &[50., 50., 100., 100.],
        &[1.3, 1.35, 1.4, 1.45],
        &[0.2, 0.22, 0.25, 0.28],
        &[0.3, 0.32, 0.33, 0.35],
        Some(&[0.1, 0.1, 0.12, 0.14]),
    )
}

/// A subtropical location in the Southern Hemisphere, with
/// a certain annual average temperature
pub fn location(average_temperature: Float) -> Location {
    Location {
        name: "Test site".to_string(),
        latitude: -27.5,
        elevation: Some(18.),
        average_temperature,
        annual_amplitude: 8.,
    }
}

/// A soil water balance that keeps the profile at its initial
/// water content
pub fn soil_water(
    profile: &SoilProfile,
    potential_evapotranspiration: Float,
    potential_soil_evaporation: Float,
    soil_evaporation: Float,
    albedo: Float,
) -> ConstantSoilWater {
    ConstantSoilWater {
        state: SoilWaterState {
            potential_evapotranspiration,
            potential_soil_evaporation,
            soil_evaporation,
            ..SoilWaterState::from_profile(profile, albedo)
        },
    }
}

/// A single 100mm layer under a 28/16C day with 18 MJ/m2 of radiation
/// and 1.5 m/s of wind.
///
/// The soil is mostly covered: with a potential evapotranspiration of 5mm
/// and a potential soil evaporation of 1mm, only a fifth of the radiative
/// exchange reaches the soil. A bare soil under the same day swings
/// considerably more.
pub fn buffering_scenario() -> SoilResult<TestScenario> {
    let profile = single_layer_profile()?;
    let soil_water = soil_water(&profile, 5.0, 1.0, 0.5, 0.13);
    Ok(TestScenario {
        meta_options: MetaOptions::from(&location(22.)),
        options: SoilTemperatureOptions::default(),
        profile,
        weather: ConstantWeather {
            max_temperature: 28.,
            min_temperature: 16.,
            solar_radiation: 18.,
            wind_speed: Some(1.5),
        },
        soil_water,
    })
}

/// The [`layered_profile`] under a 26/12C day with 16 MJ/m2 of
/// radiation and 2 m/s of wind.
pub fn layered_scenario(average_temperature: Float) -> SoilResult<TestScenario> {
    let profile = layered_profile()?;
    let soil_water = soil_water(&profile, 5.0, 2.0, 0.5, 0.15);
    Ok(TestScenario {
        meta_options: MetaOptions::from(&location(average_temperature)),
        options: SoilTemperatureOptions::default(),
        profile,
        weather: ConstantWeather {
            max_temperature: 26.,
            min_temperature: 12.,
            solar_radiation: 16.,
            wind_speed: Some(2.),
        },
        soil_water,
    })
}

/// A scenario in which nothing should change: air, soil and deep
/// temperatures are all equal to `temperature`, and the surface receives
/// no energy (radiation comes from the potential soil evaporation,
/// which is zero, and so is the actual evaporation)
pub fn steady_scenario(
    temperature: Float,
    conductance_source: BoundaryLayerConductanceSource,
) -> SoilResult<TestScenario> {
    let profile = layered_profile()?;
    let soil_water = soil_water(&profile, 5.0, 0.0, 0.0, 0.15);
    let options = SoilTemperatureOptions {
        net_radiation_source: NetRadiationSource::Eos,
        boundary_layer_conductance_source: conductance_source,
        ..SoilTemperatureOptions::default()
    };
    Ok(TestScenario {
        meta_options: MetaOptions::from(&location(temperature)),
        options,
        profile,
        weather: ConstantWeather {
            max_temperature: temperature,
            min_temperature: temperature,
            solar_radiation: 16.,
            wind_speed: Some(2.),
        },
        soil_water,
    })
}
