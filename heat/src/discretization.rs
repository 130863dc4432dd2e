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
use model::{Layer, SoilError, SoilProfile, SoilResult};

/// The depth (mm) that the deep node should reach, where neither the
/// daily nor the annual temperature waves are noticeable
pub const DEEP_NODE_DEPTH: Float = 10000.0;

/// The minimum distance (mm) between the bottom of the profile and
/// the deep node
pub const MIN_DEPTH_BELOW_PROFILE: Float = 1000.0;

/// The mesh of nodes in which a soil profile is divided.
///
/// For a profile of `N` layers, there are `N + 3` nodes:
/// * Node `0` is the air
/// * Node `1` is the soil surface
/// * Nodes `2..=N+1` sit at the middle of each layer
/// * Node `N+2` is the deep node, held at a constant temperature
///
/// An extra layer is added below the profile so that the deep node
/// sits at the middle of it. This layer copies the properties of the
/// bottom layer of the profile.
#[derive(Debug, Clone)]
pub struct Discretization {
    /// The layers of the profile plus the extra layer below it
    layers: Vec<Layer>,

    /// The depth of each node, in m
    depth: Vec<Float>,
}

impl Discretization {
    /// Builds the mesh for a profile
    pub fn new(profile: &SoilProfile) -> SoilResult<Self> {
        profile.validate()?;

        let mut layers = profile.layers().to_vec();
        let below_profile = (DEEP_NODE_DEPTH - profile.total_depth()).max(MIN_DEPTH_BELOW_PROFILE);
        let mut bottom = *layers
            .last()
            .ok_or_else(|| SoilError::invalid_profile("the profile has no layers"))?;
        bottom.thickness = 2.0 * below_profile;
        layers.push(bottom);

        // Air and surface are both at depth 0
        let mut depth = vec![0.0; layers.len() + 2];
        let mut above = 0.0;
        for (i, layer) in layers.iter().enumerate() {
            depth[i + 2] = (above + 0.5 * layer.thickness) / 1000.;
            above += layer.thickness;
        }

        Ok(Self { layers, depth })
    }

    /// The number of layers in the original profile
    pub fn n_layers(&self) -> usize {
        self.layers.len() - 1
    }

    /// The total number of nodes, including air and the deep node
    pub fn n_nodes(&self) -> usize {
        self.depth.len()
    }

    /// The index of the deepest node whose temperature is solved
    /// (i.e., the one just above the deep node)
    pub fn last_solved_node(&self) -> usize {
        self.n_nodes() - 2
    }

    /// The index of the deep node
    pub fn deep_node(&self) -> usize {
        self.n_nodes() - 1
    }

    /// The depth (m) of each node
    pub fn depths(&self) -> &[Float] {
        &self.depth
    }

    /// The depth (m) of a node
    pub fn depth(&self, node: usize) -> Float {
        self.depth[node]
    }

    /// The layers of the profile, including the extra one
    /// at the bottom
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Gets layer number `layer`, counting from 1 (so that layer `k`
    /// corresponds to node `k + 1`). Layer `N + 1` is the extra one.
    pub fn layer(&self, layer: usize) -> &Layer {
        &self.layers[layer - 1]
    }

    /// The distance (mm) from the surface to the bottom of
    /// layer `layer`, counting from 1. Layer `0` gives zero.
    pub fn depth_to_bottom(&self, layer: usize) -> Float {
        self.layers[..layer].iter().map(|l| l.thickness).sum()
    }

    /// The thickness (mm) of the extra layer added below the profile
    pub fn extra_layer_thickness(&self) -> Float {
        self.layers[self.n_layers()].thickness
    }
}

/***********/
/* TESTING */
/***********/
