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

/// The minimum, maximum and average temperature of each node
/// throughout a day.
///
/// Averages are accumulated as sums and only calculated when
/// the day is completed.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureHistory {
    minimum: Vec<Float>,
    maximum: Vec<Float>,
    sum: Vec<Float>,
    average: Vec<Float>,
    conductance_sum: Float,
    average_conductance: Float,
    n_records: usize,
}

impl TemperatureHistory {
    /// Creates an empty history for a number of nodes
    pub fn new(n_nodes: usize) -> Self {
        Self {
            minimum: vec![0.0; n_nodes],
            maximum: vec![0.0; n_nodes],
            sum: vec![0.0; n_nodes],
            average: vec![0.0; n_nodes],
            conductance_sum: 0.0,
            average_conductance: 0.0,
            n_records: 0,
        }
    }

    /// Forgets everything, so that a new day can be recorded
    pub fn reset(&mut self) {
        for v in [
            &mut self.minimum,
            &mut self.maximum,
            &mut self.sum,
            &mut self.average,
        ] {
            v.iter_mut().for_each(|x| *x = 0.0);
        }
        self.conductance_sum = 0.0;
        self.average_conductance = 0.0;
        self.n_records = 0;
    }

    /// Adds the temperatures at the end of a step, together with the
    /// conductance between the air and the surface used in it.
    pub fn record(&mut self, temperatures: &[Float], boundary_conductance: Float) {
        debug_assert_eq!(temperatures.len(), self.sum.len());
        if self.n_records == 0 {
            self.minimum.copy_from_slice(temperatures);
            self.maximum.copy_from_slice(temperatures);
        }
        for (i, t) in temperatures.iter().enumerate() {
            self.minimum[i] = self.minimum[i].min(*t);
            self.maximum[i] = self.maximum[i].max(*t);
            self.sum[i] += t;
        }
        self.conductance_sum += boundary_conductance;
        self.n_records += 1;
    }

    /// Calculates the averages of what has been recorded.
    ///
    /// Rounding errors are not allowed to push an average out of
    /// the range between the minimum and the maximum.
    pub fn complete(&mut self) {
        if self.n_records == 0 {
            return;
        }
        let n = self.n_records as Float;
        for (i, avg) in self.average.iter_mut().enumerate() {
            *avg = (self.sum[i] / n).clamp(self.minimum[i], self.maximum[i]);
        }
        self.average_conductance = self.conductance_sum / n;
    }

    /// The number of steps recorded
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// The minimum temperature of each node
    pub fn minimum(&self) -> &[Float] {
        &self.minimum
    }

    /// The maximum temperature of each node
    pub fn maximum(&self) -> &[Float] {
        &self.maximum
    }

    /// The average temperature of each node. Only meaningful
    /// after calling [`TemperatureHistory::complete`]
    pub fn average(&self) -> &[Float] {
        &self.average
    }

    /// The average conductance between the air and the surface. Only
    /// meaningful after calling [`TemperatureHistory::complete`]
    pub fn average_boundary_layer_conductance(&self) -> Float {
        self.average_conductance
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn statistics() {
        let mut h = TemperatureHistory::new(3);
        h.record(&[10., 20., 30.], 10.);
        h.record(&[14., 18., 30.], 20.);
        h.record(&[12., 22., 30.], 30.);
        h.complete();

        assert_eq!(h.n_records(), 3);
        assert_eq!(h.minimum(), &[10., 18., 30.]);
        assert_eq!(h.maximum(), &[14., 22., 30.]);
        assert_eq!(h.average(), &[12., 20., 30.]);
        assert_eq!(h.average_boundary_layer_conductance(), 20.);
    }

    #[test]
    fn constant_values_average_exactly() {
        let mut h = TemperatureHistory::new(1);
        for _ in 0..48 {
            h.record(&[0.1], 20.);
        }
        h.complete();
        assert_eq!(h.average_boundary_layer_conductance(), 20.);
        assert!(h.minimum()[0] <= h.average()[0] && h.average()[0] <= h.maximum()[0]);
    }

    #[test]
    fn reset() {
        let mut h = TemperatureHistory::new(2);
        h.record(&[-5., 5.], 12.);
        h.complete();
        h.reset();
        assert_eq!(h.n_records(), 0);
        assert_eq!(h.average(), &[0., 0.]);

        // The first record after a reset sets min and max
        h.record(&[3., 4.], 12.);
        assert_eq!(h.minimum(), &[3., 4.]);
        assert_eq!(h.maximum(), &[3., 4.]);
    }
}
