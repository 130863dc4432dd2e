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
use crate::thermal_properties::ThermalProperties;
use crate::Float;
use matrix::TriDiagonal;
use model::physical_range::SOIL_TEMPERATURE;
use model::{SoilError, SoilResult};

/// The energy sources at the soil surface, in W/m2
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SurfaceSources {
    /// Net radiation absorbed by the surface
    pub net_radiation: Float,

    /// Latent heat lost through evaporation
    pub latent_heat: Float,
}

/// The terms of the heat balance of each node that stay constant
/// throughout a day.
#[derive(Debug, Clone)]
pub struct HeatBalanceCoefficients {
    /// Heat storage of each node over a step (W/m2/K)
    storage: Vec<Float>,

    /// Conductance between each node and the one below (W/m2/K)
    conductance: Vec<Float>,
}

impl HeatBalanceCoefficients {
    /// Creates a set of zeroed coefficients for a mesh
    pub fn new(mesh: &Discretization) -> Self {
        Self {
            storage: vec![0.0; mesh.n_nodes()],
            conductance: vec![0.0; mesh.n_nodes()],
        }
    }

    /// Recalculates the coefficients from the thermal properties of the
    /// nodes and the length of the step (`dt`, in seconds)
    pub fn update(&mut self, mesh: &Discretization, properties: &ThermalProperties, dt: Float) {
        let z = mesh.depths();
        let cv = properties.heat_capacity();
        let k = properties.conductivity();
        for node in 1..=mesh.last_solved_node() {
            self.storage[node] = cv[node] * 0.5 * (z[node + 1] - z[node - 1]) / dt;
            self.conductance[node] = k[node] / (z[node + 1] - z[node]);
        }
    }

    /// The heat storage of each node (W/m2/K). The air and the deep
    /// node have none.
    pub fn storage(&self) -> &[Float] {
        &self.storage
    }

    /// The conductance (W/m2/K) between each node and the next one. The
    /// conductance between the air and the surface is calculated every step,
    /// so the value of the air node is zero.
    pub fn conductance(&self) -> &[Float] {
        &self.conductance
    }
}

/// The memory needed for solving the heat balance of a profile
#[derive(Debug, Clone)]
pub struct SolverMemory {
    system: TriDiagonal,
    rhs: Vec<Float>,
    solution: Vec<Float>,
}

impl SolverMemory {
    /// Allocates memory for a mesh
    pub fn new(mesh: &Discretization) -> Self {
        let n = mesh.last_solved_node();
        Self {
            system: TriDiagonal::new(n),
            rhs: vec![0.0; n],
            solution: vec![0.0; n],
        }
    }
}

/// Marches the node temperatures one step forward.
///
/// The heat balance of node $`k`$ is discretised as
///
/// ```math
/// -\nu K_{k-1} T^*_{k-1} + \left( \nu (K_k + K_{k-1}) + H_k \right) T^*_k - \nu K_k T^*_{k+1} =
/// g K_{k-1} T_{k-1} + \left( H_k - g (K_k + K_{k-1}) \right) T_k + g K_k T_{k+1}
/// ```
///
/// where $`g = 1 - \nu`$, $`T`$ are the temperatures at the beginning of the
/// step and $`T^*`$ are those at its end. The surface node also receives the
/// net radiation and loses the latent heat of evaporation.
///
/// # Arguments
/// * `coefficients`: heat storage and conductances of each node
/// * `nu`: the time weighting (0 is explicit, 1 is fully implicit)
/// * `boundary_conductance`: conductance between the air and the surface (W/m2/K)
/// * `sources`: the energy sources at the surface
/// * `old`: the temperatures of every node at the beginning of the step
/// * `new`: the temperatures at the end of the step. The values of the air and
///   deep nodes are read, and all the others are overwritten
/// * `memory`: preallocated memory
///
/// Fails if any of the resulting temperatures is not physically plausible.
pub fn solve_step(
    coefficients: &HeatBalanceCoefficients,
    nu: Float,
    boundary_conductance: Float,
    sources: SurfaceSources,
    old: &[Float],
    new: &mut [Float],
    memory: &mut SolverMemory,
) -> SoilResult<()> {
    let n_nodes = coefficients.storage.len();
    let last = n_nodes - 2;
    if old.len() != n_nodes || new.len() != n_nodes || memory.rhs.len() != last {
        return Err(SoilError::Numerical(format!(
            "heat balance of {} nodes received {} old and {} new temperatures, with memory for {} unknowns",
            n_nodes,
            old.len(),
            new.len(),
            memory.rhs.len()
        )));
    }

    let g = 1. - nu;
    let h = &coefficients.storage;
    for node in 1..=last {
        let k_above = if node == 1 {
            boundary_conductance
        } else {
            coefficients.conductance[node - 1]
        };
        let k_below = coefficients.conductance[node];

        memory
            .system
            .set_row(
                node - 1,
                -nu * k_above,
                nu * (k_below + k_above) + h[node],
                -nu * k_below,
            )
            .map_err(SoilError::Numerical)?;
        memory.rhs[node - 1] = g * k_above * old[node - 1]
            + (h[node] - g * (k_below + k_above)) * old[node]
            + g * k_below * old[node + 1];
    }

    // Boundary conditions
    memory.rhs[0] +=
        nu * boundary_conductance * new[0] + sources.net_radiation - sources.latent_heat;
    memory.rhs[last - 1] += nu * coefficients.conductance[last] * new[last + 1];

    memory
        .system
        .mut_solve_into(&mut memory.rhs, &mut memory.solution)
        .map_err(SoilError::Numerical)?;

    for node in 1..=last {
        new[node] = SOIL_TEMPERATURE.check_at(node, memory.solution[node - 1])?;
    }
    Ok(())
}

/***********/
/* TESTING */
/***********/
