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

//! This library contains the daily weather data used for driving soil
//! simulations, and a trait that allows getting such data for each simulated day.

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

/// Solar geometry needed for distributing daily radiation
/// throughout the day.
///
/// Angles (inputs and outputs) are in Radians.
pub mod solar;
pub use self::solar::DailyInsolation;

/// Data associated to a specific Location
pub mod location;
pub use crate::location::Location;

/// Data associated to the weather conditions of a specific day
pub mod daily_weather;
pub use crate::daily_weather::DailyWeather;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Allows creating weathers that can be used for highly-specific
/// simulation. E.g., an annual cycle of temperatures with a constant
/// diurnal range.
pub mod synthetic_weather;
pub use crate::synthetic_weather::SyntheticWeather;
pub use calendar::Date;

/// The basic trait defining a Weather that can be used in
/// soil simulations
pub trait WeatherTrait: Sync {
    /// Retreives a [`DailyWeather`] object based on the date.
    fn get_weather_data(&self, date: Date) -> Result<DailyWeather, String>;
}

impl<T: WeatherTrait + ?Sized> WeatherTrait for &T {
    fn get_weather_data(&self, date: Date) -> Result<DailyWeather, String> {
        (**self).get_weather_data(date)
    }
}

/// A structure containing a series of daily weather records
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Weather {
    /// The weather data
    pub data: Vec<DailyWeather>,

    /// Information about the location of the weather
    pub location: Location,
}

impl WeatherTrait for Weather {
    fn get_weather_data(&self, date: Date) -> Result<DailyWeather, String> {
        self.find_weather_line(date)
    }
}

impl Weather {
    /// Gets the record corresponding to a specific [`Date`].
    ///
    /// Data needs to be sorted (see [`Weather::sort_data`]).
    pub fn find_weather_line(&self, date: Date) -> Result<DailyWeather, String> {
        match self.data.binary_search_by(|x| x.date.cmp(&date)) {
            Ok(i) => Ok(self.data[i]),
            Err(_) => Err(format!("There is no weather data for date {}", date)),
        }
    }

    /// Sorts the data by date
    pub fn sort_data(&mut self) {
        self.data.sort_by(|a, b| a.date.cmp(&b.date));
    }

    /// Checks that every record is physically consistent and that
    /// no date is repeated.
    pub fn validate(&self) -> Result<(), String> {
        self.location.validate()?;
        for w in self.data.iter() {
            w.validate()?;
        }
        for pair in self.data.windows(2) {
            if pair[0].date.same_day(pair[1].date) {
                return Err(format!("Weather data for date {} is repeated", pair[0].date));
            }
        }
        Ok(())
    }

    /// Parses a `Weather` from a JSON string. The data is sorted
    /// and validated.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut weather: Weather = serde_json::from_str(json).map_err(|e| e.to_string())?;
        weather.sort_data();
        weather.validate()?;
        debug!(
            "Read {} days of weather for location '{}'",
            weather.data.len(),
            weather.location.name
        );
        Ok(weather)
    }

    /// Parses a `Weather` from a text file containing a JSON
    pub fn from_file<P: AsRef<Path> + Display>(filename: P) -> Result<Self, String> {
        let jsonstring = match fs::read_to_string(&filename) {
            Ok(v) => v,
            Err(_) => return Err(format!("Could not read weather file '{}'", filename)),
        };
        Self::from_json(&jsonstring)
    }
}

/***********/
/* TESTING */
/***********/
