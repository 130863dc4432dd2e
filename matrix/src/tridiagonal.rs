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
use std::fmt;

/// Pivots smaller than this are considered zero
const TINY: Float = 1e-26;

/// A square tri-diagonal matrix
///
/// ```text
/// | b0  c0   0   0 |
/// | a1  b1  c1   0 |
/// |  0  a2  b2  c2 |
/// |  0   0  a3  b3 |
/// ```
///
/// Element `lower[0]` and `upper[n-1]` fall outside of the matrix; they
/// are kept at zero so that every row has the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TriDiagonal {
    lower: Vec<Float>,
    diagonal: Vec<Float>,
    upper: Vec<Float>,
}

impl fmt::Display for TriDiagonal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        for row in 0..n {
            write!(f, "\n\t")?;
            for col in 0..n {
                let v = self.get(row, col).map_err(|_| fmt::Error)?;
                write!(f, "{}, ", v)?;
            }
        }
        Ok(())
    }
}

impl TriDiagonal {
    /// Creates a new `n` by `n` `TriDiagonal` matrix full of zeroes
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diagonal: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// The number of rows (and columns) in the matrix
    pub fn len(&self) -> usize {
        self.diagonal.len()
    }

    /// Checks whether the matrix has no rows at all
    pub fn is_empty(&self) -> bool {
        self.diagonal.is_empty()
    }

    /// Resets every coefficient to zero, keeping the allocation
    pub fn clear(&mut self) {
        self.lower.iter_mut().for_each(|x| *x = 0.0);
        self.diagonal.iter_mut().for_each(|x| *x = 0.0);
        self.upper.iter_mut().for_each(|x| *x = 0.0);
    }

    /// Sets the three coefficients of a row. The `lower` value is ignored
    /// for the first row and `upper` is ignored for the last one.
    pub fn set_row(
        &mut self,
        row: usize,
        lower: Float,
        diagonal: Float,
        upper: Float,
    ) -> Result<(), String> {
        let n = self.len();
        if row >= n {
            return Err(format!(
                "Row {} out of bounds in a {}x{} tri-diagonal matrix.",
                row, n, n
            ));
        }
        self.lower[row] = if row == 0 { 0.0 } else { lower };
        self.diagonal[row] = diagonal;
        self.upper[row] = if row + 1 == n { 0.0 } else { upper };
        Ok(())
    }

    /// Gets an element from the matrix
    pub fn get(&self, row: usize, col: usize) -> Result<Float, String> {
        let n = self.len();
        if row >= n || col >= n {
            return Err("Row or Column out of bounds.".to_string());
        }
        let v = if col == row {
            self.diagonal[row]
        } else if col + 1 == row {
            self.lower[row]
        } else if col == row + 1 {
            self.upper[row]
        } else {
            0.0
        };
        Ok(v)
    }

    /// Multiplies the matrix by the column vector `x`, putting the
    /// results into `into`
    pub fn prod_into(&self, x: &[Float], into: &mut [Float]) -> Result<(), String> {
        let n = self.len();
        if x.len() != n || into.len() != n {
            return Err(format!(
                "Size mismatch when multiplying a {}x{} tri-diagonal matrix by a vector of length {} (into a vector of length {})",
                n,
                n,
                x.len(),
                into.len()
            ));
        }
        for row in 0..n {
            let mut v = self.diagonal[row] * x[row];
            if row > 0 {
                v += self.lower[row] * x[row - 1];
            }
            if row + 1 < n {
                v += self.upper[row] * x[row + 1];
            }
            into[row] = v;
        }
        Ok(())
    }

    /// Solves $`A \times x = d`$ through the Thomas algorithm, putting the
    /// results into `x`.
    ///
    /// Each row is divided by its pivot and then subtracted into the
    /// next one (forward elimination); the solution is then recovered
    /// from the last row upwards (back substitution).
    ///
    /// Both `self` and `rhs` are modified in the process, so the matrix
    /// needs to be filled again before solving another system.
    ///
    /// Returns an error if a pivot is zero (the algorithm does not swap rows)
    pub fn mut_solve_into(&mut self, rhs: &mut [Float], x: &mut [Float]) -> Result<(), String> {
        let n = self.len();
        if rhs.len() != n || x.len() != n {
            return Err(format!(
                "Size mismatch when solving a {}x{} tri-diagonal system: right-hand side has length {} and solution has length {}",
                n,
                n,
                rhs.len(),
                x.len()
            ));
        }
        if n == 0 {
            return Ok(());
        }

        // Forward elimination
        for row in 0..n - 1 {
            let pivot = self.diagonal[row];
            if pivot.abs() < TINY {
                return Err(format!("Found a zero pivot in row {} of tri-diagonal system", row));
            }
            self.upper[row] /= pivot;
            rhs[row] /= pivot;
            self.diagonal[row + 1] -= self.lower[row + 1] * self.upper[row];
            rhs[row + 1] -= self.lower[row + 1] * rhs[row];
        }

        // Back substitution
        let last = n - 1;
        let pivot = self.diagonal[last];
        if pivot.abs() < TINY {
            return Err(format!("Found a zero pivot in row {} of tri-diagonal system", last));
        }
        x[last] = rhs[last] / pivot;
        for row in (0..last).rev() {
            x[row] = rhs[row] - self.upper[row] * x[row + 1];
        }

        Ok(())
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    fn heat_like(n: usize) -> Result<TriDiagonal, String> {
        let mut a = TriDiagonal::new(n);
        for row in 0..n {
            a.set_row(row, -1.0, 4.0, -1.0)?;
        }
        Ok(a)
    }

    #[test]
    fn get_and_set() -> Result<(), String> {
        let mut a = TriDiagonal::new(3);
        a.set_row(0, 9.0, 1.0, 2.0)?;
        a.set_row(1, 3.0, 4.0, 5.0)?;
        a.set_row(2, 6.0, 7.0, 9.0)?;

        // Out of the band
        assert_eq!(a.get(0, 2)?, 0.0);
        assert_eq!(a.get(2, 0)?, 0.0);

        assert_eq!(a.get(0, 0)?, 1.0);
        assert_eq!(a.get(0, 1)?, 2.0);
        assert_eq!(a.get(1, 0)?, 3.0);
        assert_eq!(a.get(1, 1)?, 4.0);
        assert_eq!(a.get(1, 2)?, 5.0);
        assert_eq!(a.get(2, 1)?, 6.0);
        assert_eq!(a.get(2, 2)?, 7.0);

        assert!(a.get(3, 0).is_err());
        assert!(a.set_row(3, 0.0, 1.0, 0.0).is_err());
        Ok(())
    }

    #[test]
    fn prod() -> Result<(), String> {
        let a = heat_like(4)?;
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let mut into = vec![0.0; 4];
        a.prod_into(&x, &mut into)?;
        assert_eq!(into, vec![2.0, 4.0, 6.0, 13.0]);

        let mut short = vec![0.0; 3];
        assert!(a.prod_into(&x, &mut short).is_err());
        Ok(())
    }

    #[test]
    fn solve_known_system() -> Result<(), String> {
        // | 2 -1  0 | x = | 1 |
        // |-1  2 -1 |     | 0 |
        // | 0 -1  2 |     | 1 |
        // Solution is x = [1, 1, 1]
        let mut a = TriDiagonal::new(3);
        a.set_row(0, 0.0, 2.0, -1.0)?;
        a.set_row(1, -1.0, 2.0, -1.0)?;
        a.set_row(2, -1.0, 2.0, 0.0)?;
        let mut rhs = vec![1.0, 0.0, 1.0];
        let mut x = vec![0.0; 3];
        a.mut_solve_into(&mut rhs, &mut x)?;
        for v in x {
            assert!((v - 1.0).abs() < 1e-12, "v = {}", v);
        }
        Ok(())
    }

    #[test]
    fn solve_reproduces_product() -> Result<(), String> {
        let n = 12;
        let a = heat_like(n)?;
        let expected: Vec<Float> = (0..n).map(|i| (i as Float * 0.7).sin() + 20.0).collect();
        let mut rhs = vec![0.0; n];
        a.prod_into(&expected, &mut rhs)?;

        let mut solver = a.clone();
        let mut x = vec![0.0; n];
        solver.mut_solve_into(&mut rhs, &mut x)?;
        for (found, exp) in x.iter().zip(expected.iter()) {
            assert!((found - exp).abs() < 1e-9, "found {}, expected {}", found, exp);
        }
        Ok(())
    }

    #[test]
    fn single_row() -> Result<(), String> {
        let mut a = TriDiagonal::new(1);
        a.set_row(0, 3.0, 4.0, 5.0)?;
        let mut rhs = vec![2.0];
        let mut x = vec![0.0];
        a.mut_solve_into(&mut rhs, &mut x)?;
        assert!((x[0] - 0.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn zero_pivot() -> Result<(), String> {
        let mut a = TriDiagonal::new(2);
        a.set_row(0, 0.0, 0.0, 1.0)?;
        a.set_row(1, 1.0, 1.0, 0.0)?;
        let mut rhs = vec![1.0, 1.0];
        let mut x = vec![0.0; 2];
        assert!(a.mut_solve_into(&mut rhs, &mut x).is_err());
        Ok(())
    }

    #[test]
    fn clear() -> Result<(), String> {
        let mut a = heat_like(3)?;
        a.clear();
        assert_eq!(a, TriDiagonal::new(3));
        assert!(!a.is_empty());
        assert_eq!(a.len(), 3);
        let s = format!("{}", a);
        assert!(s.contains("0, "));
        Ok(())
    }
}
