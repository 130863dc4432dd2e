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

use crate::discretization::Discretization;
use crate::Float;
use model::physical_range::WATER_CONTENT;
use model::{SoilError, SoilResult};

/// The density of the mineral particles of the soil (g/cm3)
pub const PARTICLE_DENSITY: Float = 2.65;

/// The empirical coefficients of Campbell's (1985) model for the
/// thermal conductivity of soils.
///
/// The conductivity of a soil with volumetric water content $`\theta`$ is
///
/// ```math
/// \lambda = C_1 + C_2 \theta - (C_1 - C_4) \exp\left( -(C_3 \theta)^4 \right)
/// ```
///
/// Where
///
/// ```math
/// C_1 = 0.65 - 0.78 \rho + 0.6 \rho^2 \\
/// C_2 = 1.06 \rho \\
/// C_3 = 1 + \frac{2.6}{\sqrt{clay}} \\
/// C_4 = 0.03 + 0.1 \rho^2
/// ```
///
/// and $`\rho`$ is the bulk density in g/cm3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampbellCoefficients {
    /// $`C_1`$
    pub c1: Float,
    /// $`C_2`$
    pub c2: Float,
    /// $`C_3`$
    pub c3: Float,
    /// $`C_4`$, which is the conductivity of the dry soil
    pub c4: Float,
}

impl CampbellCoefficients {
    /// Calculates the coefficients of a soil
    pub fn new(bulk_density: Float, clay_fraction: Float) -> Self {
        let rho = bulk_density;
        Self {
            c1: 0.65 - 0.78 * rho + 0.6 * rho * rho,
            c2: 1.06 * rho,
            c3: 1. + 2.6 / clay_fraction.sqrt(),
            c4: 0.03 + 0.1 * rho * rho,
        }
    }

    /// The thermal conductivity (W/m/K) at a certain volumetric water content
    pub fn conductivity(&self, water_content: Float) -> Float {
        self.c1 + self.c2 * water_content
            - (self.c1 - self.c4) * (-(self.c3 * water_content).powi(4)).exp()
    }
}

/// The volumetric heat capacity (J/m3/K) of a soil, as the sum of
/// the contributions of the mineral solids and of the water
pub fn heat_capacity(
    bulk_density: Float,
    water_content: Float,
    clay_specific_heat: Float,
    water_specific_heat: Float,
) -> Float {
    clay_specific_heat * bulk_density / PARTICLE_DENSITY + water_specific_heat * water_content
}

/// The thermal conductivity and heat capacity of each node.
///
/// These depend on the water content, so they need to be updated
/// every day (see [`ThermalProperties::update`]).
#[derive(Debug, Clone)]
pub struct ThermalProperties {
    /// One per layer, including the extra one below the profile
    coefficients: Vec<CampbellCoefficients>,

    clay_specific_heat: Float,
    water_specific_heat: Float,

    /// The conductivity of each layer, including the extra one
    layer_conductivity: Vec<Float>,

    /// The conductivity of each node, in W/m/K. The air
    /// and deep nodes are zero.
    conductivity: Vec<Float>,

    /// The volumetric heat capacity of each node, in J/m3/K. The air
    /// and deep nodes are zero.
    heat_capacity: Vec<Float>,
}

impl ThermalProperties {
    /// Calculates the coefficients of every layer in the mesh. Conductivities
    /// and heat capacities are all zero until [`ThermalProperties::update`] is called.
    pub fn new(mesh: &Discretization, clay_specific_heat: Float, water_specific_heat: Float) -> Self {
        let coefficients = mesh
            .layers()
            .iter()
            .map(|l| CampbellCoefficients::new(l.bulk_density, l.clay_fraction))
            .collect::<Vec<_>>();
        let n_nodes = mesh.n_nodes();
        Self {
            layer_conductivity: vec![0.0; coefficients.len()],
            coefficients,
            clay_specific_heat,
            water_specific_heat,
            conductivity: vec![0.0; n_nodes],
            heat_capacity: vec![0.0; n_nodes],
        }
    }

    /// Recalculates the properties of each node for a new set of
    /// water contents (one per layer in the profile)
    pub fn update(&mut self, mesh: &Discretization, water_content: &[Float]) -> SoilResult<()> {
        let n_layers = mesh.n_layers();
        if water_content.len() != n_layers {
            return Err(SoilError::LengthMismatch {
                property: "water content",
                expected: n_layers,
                found: water_content.len(),
            });
        }
        WATER_CONTENT.check_all(water_content)?;

        // The extra layer is as wet as the bottom one
        for (i, coef) in self.coefficients.iter().enumerate() {
            let theta = water_content[i.min(n_layers - 1)];
            self.layer_conductivity[i] = coef.conductivity(theta);
        }

        // Heat capacity of the middle of each layer
        for layer in 1..=n_layers {
            self.heat_capacity[layer + 1] = heat_capacity(
                mesh.layer(layer).bulk_density,
                water_content[layer - 1],
                self.clay_specific_heat,
                self.water_specific_heat,
            );
        }
        self.heat_capacity[1] = self.heat_capacity[2];

        // Conductivity: the surface gets the one of the top layer, and
        // the rest interpolate between the layer they sit in and the one below.
        self.conductivity[1] = self.layer_conductivity[0];
        for node in 2..=mesh.last_solved_node() {
            let layer = node - 1;
            let boundary = mesh.depth_to_bottom(layer);
            let d1 = boundary - 1000. * mesh.depth(node);
            let d2 = 1000. * mesh.depth(node + 1) - boundary;
            self.conductivity[node] = (self.layer_conductivity[layer - 1] * d1
                + self.layer_conductivity[layer] * d2)
                / (d1 + d2);
        }

        Ok(())
    }

    /// The thermal conductivity (W/m/K) of each node
    pub fn conductivity(&self) -> &[Float] {
        &self.conductivity
    }

    /// The volumetric heat capacity (J/m3/K) of each node
    pub fn heat_capacity(&self) -> &[Float] {
        &self.heat_capacity
    }

    /// The thermal conductivity (W/m/K) of each layer, including
    /// the extra one below the profile
    pub fn layer_conductivity(&self) -> &[Float] {
        &self.layer_conductivity
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use model::{Layer, SoilProfile};

    fn mesh(layers: &[(Float, Float)]) -> Result<Discretization, String> {
        let layers = layers
            .iter()
            .map(|(thickness, bulk_density)| Layer {
                thickness: *thickness,
                bulk_density: *bulk_density,
                water_content: 0.25,
                clay_fraction: 0.3,
                lower_limit: 0.1,
            })
            .collect();
        let profile = SoilProfile::new(layers).map_err(|e| e.to_string())?;
        Discretization::new(&profile).map_err(|e| e.to_string())
    }

    #[test]
    fn coefficients() {
        let c = CampbellCoefficients::new(1.3, 0.3);
        assert!((c.c1 - 0.65).abs() < 1e-12);
        assert!((c.c2 - 1.378).abs() < 1e-12);
        assert!((c.c3 - (1. + 2.6 / (0.3 as Float).sqrt())).abs() < 1e-12);
        assert!((c.c4 - 0.199).abs() < 1e-12);

        // Dry soil conducts as C4, and wetter soils conduct more
        assert!((c.conductivity(0.0) - c.c4).abs() < 1e-12);
        let mut last = c.conductivity(0.0);
        for i in 1..=50 {
            let k = c.conductivity(i as Float / 100.);
            assert!(k > last);
            last = k;
        }
    }

    #[test]
    fn capacity() {
        let found = heat_capacity(1.3, 0.25, 2.39e6, 4.18e6);
        let expected = 2.39e6 * 1.3 / 2.65 + 4.18e6 * 0.25;
        assert!((found - expected).abs() < 1e-6);
    }

    #[test]
    fn uniform_profile() -> Result<(), String> {
        let mesh = mesh(&[(100., 1.3), (100., 1.3), (200., 1.3)])?;
        let mut props = ThermalProperties::new(&mesh, 2.39e6, 4.18e6);
        props
            .update(&mesh, &[0.25, 0.25, 0.25])
            .map_err(|e| e.to_string())?;

        let expected_k = CampbellCoefficients::new(1.3, 0.3).conductivity(0.25);
        let expected_c = heat_capacity(1.3, 0.25, 2.39e6, 4.18e6);
        for node in 1..=mesh.last_solved_node() {
            assert!((props.conductivity()[node] - expected_k).abs() < 1e-9);
            assert!((props.heat_capacity()[node] - expected_c).abs() < 1e-6);
        }
        assert_eq!(props.conductivity()[0], 0.0);
        assert_eq!(props.conductivity()[mesh.deep_node()], 0.0);
        Ok(())
    }

    #[test]
    fn interpolation() -> Result<(), String> {
        let mesh = mesh(&[(100., 1.2), (300., 1.5)])?;
        let mut props = ThermalProperties::new(&mesh, 2.39e6, 4.18e6);
        props.update(&mesh, &[0.1, 0.3]).map_err(|e| e.to_string())?;

        let k1 = CampbellCoefficients::new(1.2, 0.3).conductivity(0.1);
        let k2 = CampbellCoefficients::new(1.5, 0.3).conductivity(0.3);
        assert!((props.conductivity()[1] - k1).abs() < 1e-12);

        // Node 2 sits 50mm above the boundary, and node 3 150mm below it
        let expected = (k1 * 50. + k2 * 150.) / 200.;
        assert!((props.conductivity()[2] - expected).abs() < 1e-12);

        // Surface copies the top layer's heat capacity
        assert_eq!(props.heat_capacity()[1], props.heat_capacity()[2]);
        assert!(props.heat_capacity()[3] > props.heat_capacity()[2]);
        Ok(())
    }

    #[test]
    fn wrong_water_content() -> Result<(), String> {
        let mesh = mesh(&[(100., 1.2), (300., 1.5)])?;
        let mut props = ThermalProperties::new(&mesh, 2.39e6, 4.18e6);
        assert!(matches!(
            props.update(&mesh, &[0.1]),
            Err(SoilError::LengthMismatch { .. })
        ));
        assert!(matches!(
            props.update(&mesh, &[0.1, 1.3]),
            Err(SoilError::OutOfRange { .. })
        ));
        Ok(())
    }
}
