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

use crate::{Float, PI};

/// The solar constant, in W/m2
pub const SOLAR_CONSTANT: Float = 1360.0;

/// Converts a day of the year into an angle (radians) of the year
const DAY_TO_RADIANS: Float = 2.0 * PI / 365.25;

/// Calculates the sine of the solar declination for a certain
/// day of the year (1 to 365).
///
/// # The Math
///
/// ```math
/// \sin \delta = 0.3985 \sin \left( 4.869 + \omega n + 0.03345 \sin(6.224 + \omega n) \right)
/// ```
///
/// where $`\omega = 2\pi/365.25`$ and $`n`$ is the day of the year.
pub fn sin_declination(day_of_year: Float) -> Float {
    let n = day_of_year * DAY_TO_RADIANS;
    0.3985 * (4.869 + n + 0.03345 * (6.224 + n).sin()).sin()
}

/// The fraction of the extraterrestrial radiation that is expected to
/// reach a horizontal surface during each step of a day.
///
/// Each step is weighted by the cosine of the solar zenith angle at
/// the end of the step (night-time steps get zero), so the weights
/// measure equivalent hours of full sun.
#[derive(Debug, Clone)]
pub struct DailyInsolation {
    weights: Vec<Float>,
    total: Float,
}

impl DailyInsolation {
    /// Calculates the weights for a day of the year, at a latitude
    /// (in radians), dividing the day in `n_steps`
    pub fn new(day_of_year: Float, latitude: Float, n_steps: usize) -> Self {
        let sin_dec = sin_declination(day_of_year);
        let cos_dec = (1.0 - sin_dec * sin_dec).sqrt();
        let n = n_steps as Float;
        let step_angle = 2.0 * PI / n;
        let hours_per_step = 24.0 / n;

        let weights: Vec<Float> = (1..=n_steps)
            .map(|i| {
                let hour_angle = step_angle * (i as Float - n / 2.0);
                let cos_zenith =
                    sin_dec * latitude.sin() + cos_dec * latitude.cos() * hour_angle.cos();
                (cos_zenith * hours_per_step).max(0.0)
            })
            .collect();
        let total = weights.iter().sum();

        Self { weights, total }
    }

    /// The number of steps in the day
    pub fn n_steps(&self) -> usize {
        self.weights.len()
    }

    /// The weight of step `i` (from 0 to `n_steps - 1`)
    pub fn weight(&self, i: usize) -> Float {
        self.weights[i]
    }

    /// The sum of the weights of the whole day
    pub fn total_weight(&self) -> Float {
        self.total
    }

    /// The number of hours in which the sun is above the horizon
    pub fn daylight_hours(&self) -> Float {
        let hours_per_step = 24.0 / self.n_steps() as Float;
        self.weights.iter().filter(|w| **w > 0.0).count() as Float * hours_per_step
    }

    /// The radiation that would reach a horizontal surface
    /// in the absence of atmosphere, in MJ/m2
    pub fn potential_radiation(&self) -> Float {
        self.total * SOLAR_CONSTANT * 3600.0 * 1e-6
    }

    /// Distributes a daily radiation total (MJ/m2) across the steps of
    /// the day, proportionally to each step's weight.
    ///
    /// Returns all zeroes when the sun never rises.
    pub fn distribute(&self, daily_radiation: Float) -> Vec<Float> {
        if self.total <= 0.0 {
            return vec![0.0; self.n_steps()];
        }
        self.weights
            .iter()
            .map(|w| daily_radiation * w / self.total)
            .collect()
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn declination() {
        // Close to zero around the equinoxes
        assert!(sin_declination(80.).abs() < 0.02);
        assert!(sin_declination(266.).abs() < 0.03);

        // ~ +- 23.45 degrees at the solstices
        let max = (23.45 as Float).to_radians().sin();
        assert!((sin_declination(172.) - max).abs() < 0.01);
        assert!((sin_declination(355.) + max).abs() < 0.01);
    }

    #[test]
    fn equator_at_equinox() {
        let day = DailyInsolation::new(80., 0.0, 48);
        assert_eq!(day.n_steps(), 48);
        let daylight = day.daylight_hours();
        assert!((11.0..=13.0).contains(&daylight), "daylight = {}", daylight);

        // 24/pi hours of full sun
        let found = day.potential_radiation();
        assert!((found - 37.35).abs() < 0.5, "found {}", found);

        // Midday is the last step of the first half
        let noon = day.weight(23);
        for i in 0..48 {
            assert!(day.weight(i) <= noon);
        }
    }

    #[test]
    fn distribute_keeps_total() {
        let day = DailyInsolation::new(100., (-27.5 as Float).to_radians(), 48);
        let steps = day.distribute(18.0);
        let total: Float = steps.iter().sum();
        assert!((total - 18.0).abs() < 1e-9);
        assert!(steps.iter().all(|x| *x >= 0.0));
        assert!((day.total_weight() - day.weights.iter().sum::<Float>()).abs() < 1e-12);
    }

    #[test]
    fn seasons() {
        let lat = (-35. as Float).to_radians();
        let summer = DailyInsolation::new(355., lat, 48);
        let winter = DailyInsolation::new(172., lat, 48);
        assert!(summer.daylight_hours() > winter.daylight_hours());
        assert!(summer.potential_radiation() > winter.potential_radiation());
    }

    #[test]
    fn polar_night() {
        let day = DailyInsolation::new(172., (-85. as Float).to_radians(), 48);
        assert_eq!(day.total_weight(), 0.0);
        assert_eq!(day.daylight_hours(), 0.0);
        assert!(day.distribute(1.0).iter().all(|x| *x == 0.0));
    }
}
