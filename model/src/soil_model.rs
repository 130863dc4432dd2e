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

use crate::{SoilError, SoilProfile, SoilResult, SoilTemperatureOptions};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// A soil column to simulate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Zone {
    /// The name of the zone, used for reporting
    pub name: String,

    /// The soil profile
    pub profile: SoilProfile,
}

/// A set of independent soil columns, simulated with the same options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoilModel {
    /// The options of the simulation
    #[serde(default)]
    pub options: SoilTemperatureOptions,

    /// The soil columns
    pub zones: Vec<Zone>,
}

impl SoilModel {
    /// Checks that the options and all the profiles are valid,
    /// and that zone names are not repeated
    pub fn validate(&self) -> SoilResult<()> {
        self.options.validate()?;
        if self.zones.is_empty() {
            return Err(SoilError::invalid_profile("the model has no zones"));
        }
        for (i, zone) in self.zones.iter().enumerate() {
            zone.profile.validate()?;
            if self.zones[..i].iter().any(|z| z.name == zone.name) {
                return Err(SoilError::invalid_profile(format!(
                    "zone name '{}' is repeated",
                    zone.name
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a `SoilModel` from a JSON5 string
    pub fn from_json5(s: &str) -> SoilResult<Self> {
        let model: SoilModel =
            json5::from_str(s).map_err(|e| SoilError::parse("soil model", e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Parses and validates a `SoilModel` from a JSON5 (or JSON) file
    pub fn from_file<P: AsRef<Path> + Display>(filename: P) -> SoilResult<Self> {
        let s = fs::read_to_string(&filename)?;
        let model: SoilModel = json5::from_str(&s)
            .map_err(|e| SoilError::parse(format!("file '{}'", filename), e.to_string()))?;
        model.validate()?;
        Ok(model)
    }
}

/***********/
/* TESTING */
/***********/
