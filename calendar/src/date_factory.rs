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

use crate::date::Date;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// a struct that will give us consecutive days, wrapping around
/// the end of the year
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateFactory {
    /// Next date to be returned by the iterator
    current: Date,

    /// The number of days left
    remaining: usize,
}

impl DateFactory {
    /// Creates a new Factory starting on `start` and returning
    /// `n_days` consecutive days.
    pub fn new(start: Date, n_days: usize) -> Self {
        Self {
            current: start,
            remaining: n_days,
        }
    }

    /// Creates a new Factory going from `start` to `end`, both
    /// included. If `end` is earlier than `start`, the period is assumed
    /// to go through new year.
    pub fn between(start: Date, end: Date) -> Self {
        let n_days = end.offset_ordinal(-(start.ordinal() as i32 - 1)) as usize;
        Self::new(start, n_days)
    }
}

impl Iterator for DateFactory {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ret = self.current;
        self.current.add_days(1);
        self.remaining -= 1;
        Some(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterate_full_year() {
        let start = Date { month: 1, day: 1 };
        let dates: Vec<Date> = DateFactory::new(start, 365).collect();
        assert_eq!(dates.len(), 365);
        assert_eq!(dates[0], start);
        assert_eq!(dates[364], Date { month: 12, day: 31 });
    }

    #[test]
    fn test_between() {
        let start = Date { month: 12, day: 30 };
        let end = Date { month: 1, day: 2 };
        let dates: Vec<Date> = DateFactory::between(start, end).collect();
        assert_eq!(
            dates,
            vec![
                Date { month: 12, day: 30 },
                Date { month: 12, day: 31 },
                Date { month: 1, day: 1 },
                Date { month: 1, day: 2 },
            ]
        );

        let same: Vec<Date> = DateFactory::between(start, start).collect();
        assert_eq!(same, vec![start]);
    }
}
