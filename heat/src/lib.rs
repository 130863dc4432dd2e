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

//! A one-dimensional, implicit finite-difference model of heat
//! conduction through a layered soil.
//!
//! The soil profile is divided into a mesh of nodes: the air, the soil
//! surface, the middle of each layer and a deep node that is held at the
//! long-term average air temperature of the site. Each day is divided in a
//! number of steps (48 by default). On each step, the air temperature is
//! interpolated from the daily maximum and minimum, the net radiation
//! reaching the surface is estimated, and the conductance between the
//! surface and the air is calculated. Then, a tri-diagonal system of
//! equations is solved for the new node temperatures.
//!
//! The model keeps track of the minimum, maximum and average temperature
//! of each node throughout the day.

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

#[cfg(feature = "float")]
const PI: Float = std::f32::consts::PI;

#[cfg(not(feature = "float"))]
const PI: Float = std::f64::consts::PI;

/// Stefan-Boltzmann constant (W/m2/K4)
pub const SIGMA: Float = 5.67e-8;

/// Latent heat of vaporisation of water (J/kg)
pub const LATENT_HEAT: Float = 2.465e6;

/// Added to a temperature in C to get Kelvin
pub const KELVIN: Float = 273.18;

/// Converts a temperature in C into Kelvin
pub(crate) fn kelvin(temperature: Float) -> Float {
    temperature + KELVIN
}

/// Divides the soil profile into nodes
pub mod discretization;
pub use discretization::Discretization;

/// Conductivity and heat capacity of soil nodes
pub mod thermal_properties;
pub use thermal_properties::{CampbellCoefficients, ThermalProperties};

/// Radiation balance at the soil surface
pub mod net_radiation;
pub use net_radiation::NetRadiation;

/// Conductance between the soil surface and the air
pub mod boundary_layer;
pub use boundary_layer::{BoundaryLayer, StabilityCorrection, SurfaceRoughness};

/// The tri-diagonal system solved on every step
pub mod solver;
pub use solver::{HeatBalanceCoefficients, SolverMemory, SurfaceSources};

/// Daily temperature statistics
pub mod history;
pub use history::TemperatureHistory;

/// The temperature profile used for starting a simulation
pub mod initial_profile;

/// The model that marches through the simulation one day at a time
pub mod soil_temperature;
pub use soil_temperature::{
    air_temperature, DailyForcing, DayPhase, SoilTemperatureMemory, SoilTemperatureModel,
    SoilTemperatureSnapshot, SoilTemperatureState,
};
