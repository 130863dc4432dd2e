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

//! This library contains some standards used for communicating the soil
//! simulation modules with the rest of the world: the options shared by the
//! whole simulation, the traits every simulation module implements, and the
//! interface through which the soil water balance is read.

#[cfg(feature = "float")]
type Float = f32;
#[cfg(not(feature = "float"))]
type Float = f64;

use calendar::Date;
use model::{SoilError, SoilResult};
use weather::Location;

/// The interface to the soil water balance
pub mod soil_water;
pub use soil_water::{ConstantSoilWater, SoilWaterSeries, SoilWaterState, SoilWaterTrait};

/// A set of options that affect the whole simulation but aren't part of
/// the model itself (e.g., location)
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaOptions {
    /// The Latitude in Radians.
    ///
    /// South is negative, North is Positive.
    pub latitude: Float,

    /// The elevation of the site, in meters. If not known, the
    /// simulation modules will use a default value.
    pub elevation: Option<Float>,

    /// The long-term annual average air temperature (C)
    pub average_temperature: Float,

    /// The long-term annual amplitude of the monthly mean
    /// air temperatures (C)
    pub annual_amplitude: Float,
}

impl From<&Location> for MetaOptions {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude_radians(),
            elevation: location.elevation,
            average_temperature: location.average_temperature,
            annual_amplitude: location.annual_amplitude,
        }
    }
}

/// Helps communicating issues to user
pub trait ErrorHandling {
    /// Indicates a module name that will be used
    /// for reporting errors
    fn module_name() -> &'static str;

    /// Returns a user error
    fn user_error<T>(errmsg: String) -> SoilResult<T> {
        let module: &'static str = <Self as ErrorHandling>::module_name();
        Err(SoilError::Module {
            module,
            message: format!("User Error: {}", errmsg),
        })
    }

    /// Returns an Internal error
    fn internal_error<T>(errmsg: String) -> SoilResult<T> {
        let module: &'static str = <Self as ErrorHandling>::module_name();
        Err(SoilError::Module {
            module,
            message: format!("Internal Error: {}", errmsg),
        })
    }
}

/// Protocols for SimulationModels
///
/// The model itself stays immutable during the simulation. Everything
/// that changes from one day to the next lives in a `StateType`, owned
/// by the caller.
pub trait SimulationModel: ErrorHandling {
    /// The data that changes throughout the simulation and needs to be
    /// carried from one day to the next
    type StateType;

    /// A structure for keeping mutable data that is not considered a result
    ///
    /// For example, the tri-diagonal system solved on each step is
    /// allocated once and then reused, instead of constantly re-allocating it.
    type AllocType;

    /// Builds the state at the beginning of the simulation
    fn initial_state(&self) -> Self::StateType;

    /// Marchs forward one day in the simulation.
    /// # Arguments
    /// * The date to simulate
    /// * The state (will be modified)
    /// * The preallocated memory
    fn march(
        &self,
        date: Date,
        state: &mut Self::StateType,
        alloc: &mut Self::AllocType,
    ) -> SoilResult<()>;

    /// Allocates the memory needed to run the simulation.
    ///
    /// The purpose of this is to allocate memory once and thus save time
    /// during the simulation
    fn allocate_memory(&self) -> SoilResult<Self::AllocType>;
}

#[cfg(test)]
mod testing {
    use super::*;

    struct Dummy;
    impl ErrorHandling for Dummy {
        fn module_name() -> &'static str {
            "dummy"
        }
    }

    #[test]
    fn errors_carry_module() {
        match Dummy::user_error::<()>("bad input".to_string()) {
            Err(SoilError::Module { module, message }) => {
                assert_eq!(module, "dummy");
                assert!(message.contains("bad input"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Dummy::internal_error::<()>("x".to_string()).is_err());
    }

    #[test]
    fn meta_options_from_location() {
        let location = Location {
            name: "x".to_string(),
            latitude: 30.,
            elevation: Some(100.),
            average_temperature: 15.,
            annual_amplitude: 8.,
        };
        let meta = MetaOptions::from(&location);
        assert!((meta.latitude - (30. as Float).to_radians()).abs() < 1e-12);
        assert_eq!(meta.elevation, Some(100.));
        assert_eq!(meta.average_temperature, 15.);
        assert_eq!(meta.annual_amplitude, 8.);
    }
}
