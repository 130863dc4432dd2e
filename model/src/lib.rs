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

//! This crate contains the data structures utilized for describing
//! a soil column whose temperature is to be simulated, as well as
//! the options of such simulation.
//!
//! The description is static: layers (thickness, bulk density, clay
//! content and initial water content) and simulation options. Everything
//! that changes throughout the simulation (e.g., temperatures and daily
//! water contents) lives elsewhere.
//!
//! # Example
//!
//! ```
//! use model::{SoilModel, BoundaryLayerConductanceSource};
//!
//! let s = "{
//!     options: {
//!         nu: 0.6,
//!         boundary_layer_conductance_source: 'constant',
//!     },
//!     zones: [{
//!         name: 'paddock',
//!         profile: {
//!             layers: [
//!                 {thickness: 100, bulk_density: 1.3, water_content: 0.25, clay_fraction: 0.3},
//!                 {thickness: 200, bulk_density: 1.4, water_content: 0.28, clay_fraction: 0.35},
//!             ]
//!         }
//!     }]
//! }";
//!
//! let model = SoilModel::from_json5(s).unwrap();
//! assert_eq!(model.zones.len(), 1);
//! assert_eq!(model.zones[0].profile.n_layers(), 2);
//! assert_eq!(
//!     model.options.boundary_layer_conductance_source,
//!     BoundaryLayerConductanceSource::Constant
//! );
//! ```

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

/// The errors produced when building or running a soil model
mod error;
pub use error::{SoilError, SoilResult};

/// Functions for reporting problems to the user
mod error_msgs;
pub use error_msgs::{print_error, print_warning};

/// Validation of physical quantities
pub mod physical_range;
pub use physical_range::PhysicalRange;

/// A soil layer and the profile they form
mod layer;
pub use layer::{Layer, SoilProfile};

/// Options of the soil temperature simulation
mod options;
pub use options::{BoundaryLayerConductanceSource, NetRadiationSource, SoilTemperatureOptions};

/// The whole model: options and zones
mod soil_model;
pub use soil_model::{SoilModel, Zone};
