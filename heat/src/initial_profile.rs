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

//! Before the first day, the temperature of each node is estimated from
//! the annual temperature wave of the site, which is damped and delayed
//! with depth.

use crate::discretization::Discretization;
use crate::{Float, PI};
use calendar::Date;

/// The day of the year with the warmest soil, in the Northern Hemisphere
pub const HOTTEST_DAY_NORTH: i32 = 200;

/// The day of the year with the warmest soil, in the Southern Hemisphere
pub const HOTTEST_DAY_SOUTH: i32 = 382;

const DAY_TO_RADIANS: Float = 2. * PI / 365.25;

/// The weather and site information needed for estimating
/// the initial temperatures
#[derive(Debug, Clone, Copy)]
pub struct InitialConditions {
    /// The first day of the simulation
    pub date: Date,
    /// Latitude, in radians
    pub latitude: Float,
    /// Maximum air temperature of the first day (C)
    pub max_temperature: Float,
    /// Minimum air temperature of the first day (C)
    pub min_temperature: Float,
    /// Solar radiation of the first day (MJ/m2)
    pub radiation: Float,
    /// Albedo of the surface
    pub albedo: Float,
    /// Annual average air temperature (C)
    pub average_temperature: Float,
    /// Annual amplitude of the monthly mean temperatures (C)
    pub annual_amplitude: Float,
}

/// An estimate of the average temperature of the soil surface
/// during a day
pub fn surface_temperature(
    max_temperature: Float,
    min_temperature: Float,
    radiation: Float,
    albedo: Float,
) -> Float {
    let ave = (max_temperature + min_temperature) * 0.5;
    let f = (radiation.max(0.1) * 23.8846 / 800.).sqrt();
    (1. - albedo) * (ave + (max_temperature - ave) * f) + albedo * ave
}

/// The angle (radians) of the year between the hottest day and `date`
pub fn year_angle(date: Date, latitude: Float) -> Float {
    let hottest = if latitude > 0.0 {
        HOTTEST_DAY_NORTH
    } else {
        HOTTEST_DAY_SOUTH
    };
    DAY_TO_RADIANS * date.offset_ordinal(-hottest) as Float
}

/// The temperature at a depth with a certain lag (in radians of a
/// year). `delta` is the difference between the actual and the
/// expected temperature of the surface.
pub fn layer_temperature(
    average_temperature: Float,
    annual_amplitude: Float,
    depth_lag: Float,
    year_angle: Float,
    delta: Float,
) -> Float {
    average_temperature
        + (annual_amplitude / 2. * (year_angle - depth_lag).cos() + delta) * (-depth_lag).exp()
}

/// The temperature damping depth (mm per radian of a year).
///
/// Grows with the bulk density of the soil and with the water it holds
/// above the lower limit, from 500 mm up to almost 3500 mm. Only the
/// layers of the profile are considered (not the extra one below it).
pub fn damping_depth(mesh: &Discretization, water_content: &[Float]) -> Float {
    let layers = &mesh.layers()[..mesh.n_layers()];
    let total_depth: Float = layers.iter().map(|l| l.thickness).sum();
    let ave_bd = layers
        .iter()
        .map(|l| l.bulk_density * l.thickness)
        .sum::<Float>()
        / total_depth;

    let favbd = ave_bd / (ave_bd + 686. * (-5.63 * ave_bd).exp());
    let max_depth = (1000. + 2500. * favbd).max(0.0);
    let ww = (0.356 - 0.144 * ave_bd).max(0.0);

    let water: Float = layers
        .iter()
        .zip(water_content.iter())
        .map(|(l, theta)| theta * l.thickness)
        .sum();
    let lower_limit: Float = layers.iter().map(|l| l.lower_limit * l.thickness).sum();
    let available = (water - lower_limit).max(0.01);

    let wc = if ww * total_depth > 0.0 {
        (available / (ww * total_depth)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let wcf = (1. - wc) / (1. + wc);
    let b = (500. / max_depth).ln();
    max_depth * (b * wcf * wcf).exp()
}

/// Estimates the temperature of every node before the first day.
///
/// The air gets the mean temperature of the day, the surface gets
/// [`surface_temperature`], each layer follows the damped annual wave
/// evaluated at the depth of its bottom, and the deep node gets the
/// annual average.
pub fn initial_profile(
    mesh: &Discretization,
    water_content: &[Float],
    conditions: &InitialConditions,
) -> Vec<Float> {
    let c = conditions;
    let mut temps = vec![0.0; mesh.n_nodes()];
    temps[0] = (c.max_temperature + c.min_temperature) * 0.5;

    let surface = surface_temperature(c.max_temperature, c.min_temperature, c.radiation, c.albedo);
    temps[1] = surface;

    let alx = year_angle(c.date, c.latitude);
    let delta =
        surface - layer_temperature(c.average_temperature, c.annual_amplitude, 0.0, alx, 0.0);
    let damp = damping_depth(mesh, water_content);

    for layer in 1..=mesh.n_layers() {
        let lag = mesh.depth_to_bottom(layer) / damp;
        temps[layer + 1] =
            layer_temperature(c.average_temperature, c.annual_amplitude, lag, alx, delta);
    }
    temps[mesh.deep_node()] = c.average_temperature;
    temps
}

/***********/
/* TESTING */
/***********/
