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
use serde::{Deserialize, Serialize};

/// A Location, with the long-term climate statistics that
/// soil temperature models need as boundary conditions
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Location {
    /// The name of the place (or weather station)
    #[serde(default)]
    pub name: String,

    /// The Latitude in Degrees.
    ///
    /// South is negative, North is Positive.
    pub latitude: Float,

    /// The elevation of the weather station, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<Float>,

    /// The long-term annual average air temperature (C)
    pub average_temperature: Float,

    /// The long-term annual amplitude of the monthly mean
    /// air temperatures (C)
    pub annual_amplitude: Float,
}

impl Location {
    /// The Latitude in Radians
    pub fn latitude_radians(&self) -> Float {
        self.latitude.to_radians()
    }

    /// Checks that the values in the location make sense
    pub fn validate(&self) -> Result<(), String> {
        if !(-90. ..=90.).contains(&self.latitude) {
            return Err(format!(
                "Latitude of location '{}' should be between -90 and 90 degrees... found {}",
                self.name, self.latitude
            ));
        }
        if self.annual_amplitude < 0. {
            return Err(format!(
                "Annual temperature amplitude of location '{}' should not be negative... found {}",
                self.name, self.annual_amplitude
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn serde_location() -> Result<(), String> {
        let loc: Location = json5::from_str(
            "{
            name: 'Gatton',
            latitude: -27.55,
            elevation: 89,
            average_temperature: 20.1,
            annual_amplitude: 11.2,
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(loc.elevation, Some(89.));
        assert!((loc.latitude_radians() + 0.48084).abs() < 1e-4);
        loc.validate()?;

        let bad = Location {
            latitude: 91.,
            ..loc
        };
        assert!(bad.validate().is_err());
        Ok(())
    }
}
