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
use serde::{Deserialize, Serialize};

/// The weather conditions of a single day
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DailyWeather {
    /// The date
    pub date: Date,

    /// Maximum air temperature, in C
    pub max_temperature: Float,

    /// Minimum air temperature, in C
    pub min_temperature: Float,

    /// Total global solar radiation, in MJ/m2
    pub solar_radiation: Float,

    /// Mean wind speed, in m/s. Not every weather
    /// station registers it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<Float>,

    /// Rainfall, in mm
    #[serde(default)]
    pub rain: Float,
}

impl DailyWeather {
    /// The mean between the maximum and minimum temperatures
    pub fn mean_temperature(&self) -> Float {
        0.5 * (self.max_temperature + self.min_temperature)
    }

    /// The difference between the maximum and minimum temperatures
    pub fn temperature_range(&self) -> Float {
        self.max_temperature - self.min_temperature
    }

    /// Checks that the record is physically consistent
    pub fn validate(&self) -> Result<(), String> {
        self.date.validate()?;
        if self.max_temperature < self.min_temperature {
            return Err(format!(
                "Maximum temperature ({}) is lower than minimum temperature ({}) on {}",
                self.max_temperature, self.min_temperature, self.date
            ));
        }
        if self.solar_radiation < 0. {
            return Err(format!(
                "Negative solar radiation ({}) on {}",
                self.solar_radiation, self.date
            ));
        }
        if let Some(w) = self.wind_speed {
            if w < 0. {
                return Err(format!("Negative wind speed ({}) on {}", w, self.date));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn mean_and_range() -> Result<(), String> {
        let w = DailyWeather {
            max_temperature: 28.,
            min_temperature: 16.,
            solar_radiation: 18.,
            ..DailyWeather::default()
        };
        assert_eq!(w.mean_temperature(), 22.);
        assert_eq!(w.temperature_range(), 12.);
        w.validate()?;

        let w = DailyWeather {
            wind_speed: Some(-1.),
            ..w
        };
        assert!(w.validate().is_err());
        Ok(())
    }
}
