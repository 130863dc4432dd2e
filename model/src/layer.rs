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

use crate::physical_range::{
    BULK_DENSITY, CLAY_FRACTION, LAYER_THICKNESS, LOWER_LIMIT, WATER_CONTENT,
};
use crate::{Float, SoilError, SoilResult};
use serde::{Deserialize, Serialize};

/// A horizontal layer of soil
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    /// Thickness, in mm
    pub thickness: Float,

    /// Bulk density, in g/cm3
    pub bulk_density: Float,

    /// Volumetric water content (mm/mm). Daily values are provided
    /// by the soil water balance; this one is used when there is
    /// no such balance and for initialising the temperatures.
    pub water_content: Float,

    /// Clay content, as a fraction of the mineral particles (0-1)
    pub clay_fraction: Float,

    /// Volumetric water content at -15 bar (mm/mm)
    #[serde(default)]
    pub lower_limit: Float,
}

impl Layer {
    /// Checks the physical plausibility of the layer, which sits
    /// at position `index` in the profile
    pub fn validate(&self, index: usize) -> SoilResult<()> {
        if !(self.thickness > 0.0) {
            return Err(SoilError::invalid_profile(format!(
                "layer {} has a non-positive thickness ({} mm)",
                index, self.thickness
            )));
        }
        if !(self.bulk_density > 0.0) {
            return Err(SoilError::invalid_profile(format!(
                "layer {} has a non-positive bulk density ({} g/cm3)",
                index, self.bulk_density
            )));
        }
        LAYER_THICKNESS.check_at(index, self.thickness)?;
        BULK_DENSITY.check_at(index, self.bulk_density)?;
        WATER_CONTENT.check_at(index, self.water_content)?;
        CLAY_FRACTION.check_at(index, self.clay_fraction)?;
        LOWER_LIMIT.check_at(index, self.lower_limit)?;
        Ok(())
    }
}

/// An ordered set of [`Layer`]s, from the surface downwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoilProfile {
    layers: Vec<Layer>,
}

impl SoilProfile {
    /// Creates a new profile, checking that it is valid
    pub fn new(layers: Vec<Layer>) -> SoilResult<Self> {
        let ret = Self { layers };
        ret.validate()?;
        Ok(ret)
    }

    /// Creates a profile from one array per property, as soil
    /// descriptions are often given.
    ///
    /// ```
    /// use model::SoilProfile;
    ///
    /// let profile = SoilProfile::from_columns(
    ///     &[100., 200.],
    ///     &[1.3, 1.4],
    ///     &[0.25, 0.28],
    ///     &[0.3, 0.35],
    ///     None,
    /// ).unwrap();
    /// assert_eq!(profile.n_layers(), 2);
    ///
    /// // Arrays need to be of the same length
    /// assert!(SoilProfile::from_columns(&[100.], &[1.3, 1.4], &[0.25], &[0.3], None).is_err());
    /// ```
    pub fn from_columns(
        thickness: &[Float],
        bulk_density: &[Float],
        water_content: &[Float],
        clay_fraction: &[Float],
        lower_limit: Option<&[Float]>,
    ) -> SoilResult<Self> {
        let n = thickness.len();
        let check_len = |property: &'static str, found: usize| -> SoilResult<()> {
            if found == n {
                Ok(())
            } else {
                Err(SoilError::LengthMismatch {
                    property,
                    expected: n,
                    found,
                })
            }
        };
        check_len("bulk density", bulk_density.len())?;
        check_len("water content", water_content.len())?;
        check_len("clay fraction", clay_fraction.len())?;
        if let Some(ll) = lower_limit {
            check_len("lower limit", ll.len())?;
        }

        let layers = (0..n)
            .map(|i| Layer {
                thickness: thickness[i],
                bulk_density: bulk_density[i],
                water_content: water_content[i],
                clay_fraction: clay_fraction[i],
                lower_limit: lower_limit.map(|ll| ll[i]).unwrap_or(0.0),
            })
            .collect();
        Self::new(layers)
    }

    /// Checks that the profile has at least one layer and that
    /// all of them are valid
    pub fn validate(&self) -> SoilResult<()> {
        if self.layers.is_empty() {
            return Err(SoilError::invalid_profile(
                "a profile needs at least one layer",
            ));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(i)?;
        }
        Ok(())
    }

    /// The layers, from the top down
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The number of layers
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    /// The depth of the bottom of the profile, in mm
    pub fn total_depth(&self) -> Float {
        self.layers.iter().map(|l| l.thickness).sum()
    }

    /// The volumetric water content of each layer
    pub fn water_content(&self) -> Vec<Float> {
        self.layers.iter().map(|l| l.water_content).collect()
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    fn layer() -> Layer {
        Layer {
            thickness: 100.,
            bulk_density: 1.3,
            water_content: 0.25,
            clay_fraction: 0.3,
            lower_limit: 0.1,
        }
    }

    #[test]
    fn empty_profile() {
        match SoilProfile::new(vec![]) {
            Err(SoilError::InvalidProfile { .. }) => {}
            other => panic!("expected InvalidProfile, found {:?}", other),
        }
    }

    #[test]
    fn non_positive_thickness() {
        let mut l = layer();
        l.thickness = 0.0;
        assert!(matches!(
            SoilProfile::new(vec![layer(), l]),
            Err(SoilError::InvalidProfile { .. })
        ));
        l.thickness = -5.0;
        assert!(SoilProfile::new(vec![l]).is_err());
    }

    #[test]
    fn non_positive_bulk_density() {
        let mut l = layer();
        for bd in [0.0, -1e-6, Float::NAN] {
            l.bulk_density = bd;
            assert!(matches!(
                SoilProfile::new(vec![layer(), l]),
                Err(SoilError::InvalidProfile { .. })
            ));
        }
        l.bulk_density = 1e-3;
        assert!(SoilProfile::new(vec![l]).is_ok());
    }

    #[test]
    fn out_of_range_properties() {
        let mut l = layer();
        l.bulk_density = 2.8;
        match SoilProfile::new(vec![l]) {
            Err(SoilError::OutOfRange {
                quantity, value, ..
            }) => {
                assert!(quantity.starts_with("bulk density"));
                assert_eq!(value, 2.8);
            }
            other => panic!("expected OutOfRange, found {:?}", other),
        }

        let mut l = layer();
        l.clay_fraction = 0.0;
        assert!(SoilProfile::new(vec![l]).is_err());
    }

    #[test]
    fn mismatched_columns() {
        match SoilProfile::from_columns(&[100., 100.], &[1.3, 1.3], &[0.2], &[0.3, 0.3], None) {
            Err(SoilError::LengthMismatch {
                property,
                expected,
                found,
            }) => {
                assert_eq!(property, "water content");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected LengthMismatch, found {:?}", other),
        }
    }

    #[test]
    fn depth_and_water() -> Result<(), String> {
        let p = SoilProfile::new(vec![layer(), layer(), layer()]).map_err(|e| e.to_string())?;
        assert_eq!(p.n_layers(), 3);
        assert!((p.total_depth() - 300.).abs() < 1e-9);
        assert_eq!(p.water_content(), vec![0.25; 3]);
        Ok(())
    }

    #[test]
    fn serde_layer() -> Result<(), String> {
        let l: Layer = json5::from_str(
            "{thickness: 100, bulk_density: 1.3, water_content: 0.25, clay_fraction: 0.3}",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(l.lower_limit, 0.0);
        assert!(json5::from_str::<Layer>("{thickness: 100, colour: 'red'}").is_err());
        Ok(())
    }
}
