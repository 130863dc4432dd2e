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

use crate::{kelvin, Float, SIGMA};
use weather::DailyInsolation;

/// Emissivity of the soil surface
pub const SOIL_EMISSIVITY: Float = 0.96;

/// The water vapour concentration of the air (g/m3), estimated
/// from the minimum temperature of the day (i.e., assuming the dew point
/// is reached at night)
pub fn vapour_concentration(min_temperature: Float) -> Float {
    let tk = kelvin(min_temperature);
    (31.3716 - 6014.79 / tk - 0.00792495 * tk).exp() / tk
}

/// The emissivity of the atmosphere, which grows with the
/// cloud fraction and the vapour concentration
pub fn atmospheric_emissivity(cloud_fraction: Float, vapour_concentration: Float) -> Float {
    (1. - 0.84 * cloud_fraction) * 0.58 * vapour_concentration.powf(1. / 7.)
        + 0.84 * cloud_fraction
}

/// The fraction of the sky covered by clouds, estimated from
/// the ratio between the actual and the potential radiation of the day.
///
/// Days without potential radiation (polar night) are taken as overcast.
pub fn cloud_fraction(radiation: Float, potential_radiation: Float) -> Float {
    if potential_radiation <= 0.0 {
        return 1.0;
    }
    let fr = radiation.max(0.1) / potential_radiation;
    (2.33 - 3.33 * fr).clamp(0.0, 1.0)
}

/// The terms of the radiation balance of the soil surface that do not
/// change throughout the day.
///
/// The net radiation of each step is then
///
/// ```math
/// R_n = p \left( (1 - \alpha) S_i + \sigma \epsilon_{atm} T_a^4 \Delta t - \sigma \epsilon_s T_s^4 \Delta t \right)
/// ```
///
/// where $`p`$ is the penetration factor, $`S_i`$ is the solar radiation
/// of the step, and $`T_a`$ and $`T_s`$ are the air and surface
/// temperatures in Kelvin.
#[derive(Debug, Clone)]
pub struct NetRadiation {
    /// The solar radiation of each step, in MJ/m2
    solar: Vec<Float>,
    cloud_fraction: Float,
    vapour_concentration: Float,
    atmospheric_emissivity: Float,
    albedo: Float,
    penetration: Float,

    /// Length of the step, in seconds
    dt: Float,
}

impl NetRadiation {
    /// Calculates the terms of the balance for one day.
    ///
    /// # Arguments
    /// * `insolation`: the solar geometry of the day
    /// * `radiation`: the solar radiation of the day, in MJ/m2
    /// * `min_temperature`: minimum air temperature of the day, in C
    /// * `albedo`: albedo of the surface
    /// * `penetration`: fraction of the exchange that reaches the bare soil
    /// * `dt`: length of each step, in seconds
    pub fn new(
        insolation: &DailyInsolation,
        radiation: Float,
        min_temperature: Float,
        albedo: Float,
        penetration: Float,
        dt: Float,
    ) -> Self {
        let cloud_fraction = cloud_fraction(radiation, insolation.potential_radiation());
        let vapour_concentration = vapour_concentration(min_temperature);
        Self {
            solar: insolation.distribute(radiation.max(0.1)),
            cloud_fraction,
            vapour_concentration,
            atmospheric_emissivity: atmospheric_emissivity(cloud_fraction, vapour_concentration),
            albedo,
            penetration,
            dt,
        }
    }

    /// The net radiation (MJ/m2) received by the surface during
    /// step `i` (from 0 to `n_steps - 1`).
    pub fn at_step(&self, i: usize, air_temperature: Float, surface_temperature: Float) -> Float {
        let w2mj = self.dt * 1e-6;
        let shortwave = (1. - self.albedo) * self.solar[i];
        let longwave_in =
            SIGMA * self.atmospheric_emissivity * kelvin(air_temperature).powi(4) * w2mj;
        let longwave_out = SIGMA * SOIL_EMISSIVITY * kelvin(surface_temperature).powi(4) * w2mj;
        self.penetration * (shortwave + longwave_in - longwave_out)
    }

    /// The solar radiation (MJ/m2) reaching the surface during step `i`,
    /// before accounting for albedo and cover
    pub fn solar(&self, i: usize) -> Float {
        self.solar[i]
    }

    /// The estimated cloud fraction
    pub fn cloud_fraction(&self) -> Float {
        self.cloud_fraction
    }

    /// The estimated vapour concentration of the air
    pub fn vapour_concentration(&self) -> Float {
        self.vapour_concentration
    }

    /// The estimated emissivity of the atmosphere
    pub fn atmospheric_emissivity(&self) -> Float {
        self.atmospheric_emissivity
    }

    /// The fraction of the exchange that reaches the bare soil
    pub fn penetration(&self) -> Float {
        self.penetration
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    fn insolation() -> DailyInsolation {
        DailyInsolation::new(180., (-27.5 as Float).to_radians(), 48)
    }

    #[test]
    fn clouds() {
        // Clear days
        assert_eq!(cloud_fraction(30., 35.), 0.0);
        // Overcast
        assert_eq!(cloud_fraction(2., 35.), 1.0);
        let c = cloud_fraction(20., 35.);
        assert!((c - (2.33 - 3.33 * 20. / 35.)).abs() < 1e-12);
        // No sun at all
        assert_eq!(cloud_fraction(0.0, 0.0), 1.0);
        assert_eq!(cloud_fraction(5.0, 0.0), 1.0);
        assert_eq!(
            atmospheric_emissivity(cloud_fraction(5.0, 0.0), 4.0),
            atmospheric_emissivity(1.0, 4.0)
        );
    }

    #[test]
    fn polar_night_is_overcast() {
        let night = DailyInsolation::new(172., (-85. as Float).to_radians(), 48);
        let rad = NetRadiation::new(&night, 0.0, -30., 0.6, 1.0, 1800.);
        assert_eq!(rad.cloud_fraction(), 1.0);
        let clear = atmospheric_emissivity(0.0, rad.vapour_concentration());
        assert!(rad.atmospheric_emissivity() > clear);
    }

    #[test]
    fn vapour() {
        let a = vapour_concentration(5.);
        let b = vapour_concentration(15.);
        assert!(b > a);
        // roughly 6.8 g/m3 at 5C and 12.8 g/m3 at 15C
        assert!((a - 6.8).abs() < 0.5, "a = {}", a);
        assert!((b - 12.8).abs() < 0.5, "b = {}", b);

        let e = atmospheric_emissivity(0.0, a);
        assert!(e > 0.6 && e < 0.9, "e = {}", e);
        assert!((atmospheric_emissivity(1.0, a) - 1.0).abs() < 0.2);
    }

    #[test]
    fn daily_balance() {
        let day = insolation();
        let rad = NetRadiation::new(&day, 16., 10., 0.15, 1.0, 1800.);
        let total_solar: Float = (0..48).map(|i| rad.solar(i)).sum();
        assert!((total_solar - 16.).abs() < 1e-9);

        // At night, the surface loses energy
        assert!(rad.at_step(0, 12., 12.) < 0.0);
        // At noon, it gains
        assert!(rad.at_step(23, 20., 25.) > 0.0);

        // A hotter surface emits more
        assert!(rad.at_step(23, 20., 40.) < rad.at_step(23, 20., 25.));
    }

    #[test]
    fn penetration_scales() {
        let day = insolation();
        let full = NetRadiation::new(&day, 16., 10., 0.15, 1.0, 1800.);
        let partial = NetRadiation::new(&day, 16., 10., 0.15, 0.2, 1800.);
        for i in 0..48 {
            let a = full.at_step(i, 18., 22.);
            let b = partial.at_step(i, 18., 22.);
            assert!((0.2 * a - b).abs() < 1e-12);
        }
        assert_eq!(partial.penetration(), 0.2);
    }
}
