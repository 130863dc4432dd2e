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
use thiserror::Error;

/// The result of an operation that might fail with a [`SoilError`]
pub type SoilResult<T> = Result<T, SoilError>;

/// Everything that can go wrong when building or running a soil model.
///
/// None of these are recoverable: they are meant to stop the simulation.
#[derive(Error, Debug)]
pub enum SoilError {
    /// The soil profile is malformed
    #[error("Invalid soil profile: {reason}")]
    InvalidProfile {
        /// What is wrong with it
        reason: String,
    },

    /// A per-layer property has a different number of values than
    /// the profile has layers
    #[error("Soil property '{property}' has {found} values, but the profile has {expected} layers")]
    LengthMismatch {
        /// The property with the wrong length
        property: &'static str,
        /// The number of layers in the profile
        expected: usize,
        /// The number of values found
        found: usize,
    },

    /// A physical quantity fell outside of its plausible range
    #[error("{quantity} = {value} is outside of its physical range [{lower}, {upper}]")]
    OutOfRange {
        /// The name of the quantity
        quantity: String,
        /// The offending value
        value: Float,
        /// Lower bound
        lower: Float,
        /// Upper bound
        upper: Float,
    },

    /// An option was set to a value that is not supported
    #[error("Unsupported {option} '{value}'... expected one of: {expected}")]
    UnsupportedSource {
        /// The name of the option
        option: &'static str,
        /// The value that was given
        value: String,
        /// The accepted values
        expected: &'static str,
    },

    /// A numerical method failed
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// One of the external data providers (e.g., weather) failed
    #[error("The {provider} provider failed: {message}")]
    Provider {
        /// The name of the provider
        provider: &'static str,
        /// The message it returned
        message: String,
    },

    /// An error reported by a simulation module
    #[error("Error in module '{module}': {message}")]
    Module {
        /// The name of the module
        module: &'static str,
        /// The message
        message: String,
    },

    /// A file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file or string could not be parsed
    #[error("Could not parse {source_name}: {message}")]
    Parse {
        /// What was being parsed
        source_name: String,
        /// The message given by the parser
        message: String,
    },
}

impl SoilError {
    /// Builds an [`SoilError::InvalidProfile`]
    pub fn invalid_profile(reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            reason: reason.into(),
        }
    }

    /// Builds an [`SoilError::Provider`]
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    /// Builds an [`SoilError::Parse`]
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
