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

use crate::{DailyWeather, Float, Location, WeatherTrait, PI};
use calendar::Date;

/// The day of the year in which the warmest weather is expected,
/// in the northern hemisphere.
const HOTTEST_DAY_NORTH: i32 = 200;

/// A weather that follows a smooth annual cycle around the
/// long-term statistics of a [`Location`].
///
/// The mean temperature of each day follows a cosine peaking on the
/// hottest day of the year; daily radiation follows another one. The
/// diurnal temperature range and the wind speed are constant.
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    /// The location, which provides the annual average
    /// temperature and amplitude
    pub location: Location,

    /// The difference between the maximum and minimum temperature
    /// of every day (C)
    pub diurnal_range: Float,

    /// Annual mean of the daily radiation (MJ/m2)
    pub mean_radiation: Float,

    /// Half the difference between summer and winter daily radiation (MJ/m2)
    pub radiation_amplitude: Float,

    /// Wind speed (m/s)
    pub wind_speed: Option<Float>,
}

impl SyntheticWeather {
    /// Creates a new synthetic weather for a location, with a 10C diurnal range
    /// and 16 +- 8 MJ/m2 daily radiation
    pub fn new(location: Location) -> Self {
        Self {
            location,
            diurnal_range: 10.,
            mean_radiation: 16.,
            radiation_amplitude: 8.,
            wind_speed: Some(2.),
        }
    }

    /// The angle of the year (radians) between `date` and the hottest day
    fn angle_from_hottest_day(&self, date: Date) -> Float {
        let hottest = if self.location.latitude >= 0. {
            HOTTEST_DAY_NORTH
        } else {
            HOTTEST_DAY_NORTH + 182
        };
        let n = date.offset_ordinal(-hottest) as Float;
        2. * PI * n / calendar::DAYS_IN_YEAR as Float
    }
}

impl WeatherTrait for SyntheticWeather {
    fn get_weather_data(&self, date: Date) -> Result<DailyWeather, String> {
        date.validate()?;
        let cos = self.angle_from_hottest_day(date).cos();
        let mean = self.location.average_temperature + 0.5 * self.location.annual_amplitude * cos;
        let solar_radiation = (self.mean_radiation + self.radiation_amplitude * cos).max(0.0);
        Ok(DailyWeather {
            date,
            max_temperature: mean + 0.5 * self.diurnal_range,
            min_temperature: mean - 0.5 * self.diurnal_range,
            solar_radiation,
            wind_speed: self.wind_speed,
            rain: 0.0,
        })
    }
}
