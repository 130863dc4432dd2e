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

//! The main `soiltemp` crate, putting the soil description, the weather,
//! the soil water and the heat conduction model together.
//!
//! The physics live in the [`heat`] crate. This crate provides a
//! simulation driver that marches several independent soil columns
//! (zones) through the days of a weather file and reports their
//! daily temperatures.

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// A module with some useful functions to run a simulation
pub mod run_simulation;

// Re-exports
pub use calendar::{Date, DateFactory};
pub use communication::{
    ConstantSoilWater, ErrorHandling, MetaOptions, SimulationModel, SoilWaterSeries,
    SoilWaterState, SoilWaterTrait,
};
pub use heat::{
    SoilTemperatureMemory, SoilTemperatureModel, SoilTemperatureSnapshot, SoilTemperatureState,
};
pub use model::*;
pub use weather::{DailyWeather, Location, SyntheticWeather, Weather, WeatherTrait};
