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
use std::cmp::{Ordering, PartialOrd};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of days in every year
pub const DAYS_IN_YEAR: u16 = 365;

const N_DAYS_PER_MONTH: [u8; 12] = [
    31, // Jan
    28, // Feb
    31, // March
    30, // Apr
    31, // May
    30, // Jun
    31, // Jul
    31, // Aug
    30, // Sept
    31, // Oct
    30, // Nov
    31, // Dec
];

const CUMULATED_DAYS_BEFORE_MONTH: [u16; 12] = [
    0,   // Jan
    31,  // Feb
    59,  // Mar
    90,  // Apr
    120, // May
    151, // Jun
    181, // Jul
    212, // Aug
    243, // Sept
    273, // Oct
    304, // Nov
    334, // Dec
];

/// An extremely simple Date object.
/// It does not consider years at all!
/// Days and Months are counted from 1
/// (e.g. January is 1, not 0)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Date {
    /// Months of the year, from 1 to 12
    pub month: u8,

    /// Day of the month, from 1 to N
    pub day: u8,
}

impl std::default::Default for Date {
    fn default() -> Self {
        Self { month: 1, day: 1 }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.month.cmp(&other.month) {
            Ordering::Equal => self.day.cmp(&other.day),
            ord => ord,
        }
    }
}

impl Date {
    /// Builds a date, checking that the month and day exist
    pub fn new(month: u8, day: u8) -> Result<Self, String> {
        let d = Self { month, day };
        d.validate()?;
        Ok(d)
    }

    /// Checks that the month is within 1 and 12, and that the day
    /// exists in that month
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err(format!("Impossible month '{}' in date", self.month));
        }
        let n = N_DAYS_PER_MONTH[self.month as usize - 1];
        if self.day == 0 || self.day > n {
            return Err(format!(
                "Impossible day '{}' for month '{}' in date",
                self.day, self.month
            ));
        }
        Ok(())
    }

    /// Transforms an ordinal day of the year (1 being January 1st
    /// and 365 being December 31st) into a date.
    pub fn from_ordinal(n: u16) -> Result<Self, String> {
        if !(1..=DAYS_IN_YEAR).contains(&n) {
            return Err(format!(
                "Impossible day of the year '{}' when building a date",
                n
            ));
        }
        let month = CUMULATED_DAYS_BEFORE_MONTH
            .iter()
            .rposition(|before| *before < n)
            .unwrap_or(0);
        let day = n - CUMULATED_DAYS_BEFORE_MONTH[month];
        Ok(Date {
            month: month as u8 + 1,
            day: day as u8,
        })
    }

    /// Retrieves the ordinal day of the year corresponding
    /// to the date, from 1 (January 1st) to 365 (December 31st)
    pub fn ordinal(&self) -> u16 {
        CUMULATED_DAYS_BEFORE_MONTH[self.month as usize - 1] + self.day as u16
    }

    /// Retrieves the day of the year as a floating point number
    pub fn day_of_year(&self) -> Float {
        self.ordinal() as Float
    }

    /// Gets the ordinal day of the year that results from moving
    /// `offset` days from this date, wrapping around the year.
    ///
    /// ```
    /// use calendar::Date;
    ///
    /// let d = Date{ month: 1, day: 10};
    /// assert_eq!(d.offset_ordinal(-20), 355);
    /// assert_eq!(d.offset_ordinal(5), 15);
    /// ```
    pub fn offset_ordinal(&self, offset: i32) -> u16 {
        let zero_based = self.ordinal() as i32 - 1 + offset;
        zero_based.rem_euclid(DAYS_IN_YEAR as i32) as u16 + 1
    }

    /// Adds a certain number of days to a date.
    pub fn add_days(&mut self, n_days: usize) {
        // Lets recursively consume n_days month by month.
        let n_days = n_days % DAYS_IN_YEAR as usize;
        if n_days > 0 {
            let would_be_day = self.day as usize + n_days;
            let n_days_this_month = N_DAYS_PER_MONTH[self.month as usize - 1] as usize;

            if would_be_day > n_days_this_month {
                // Add one month, considering that this might be a change in year
                self.month += 1;
                if self.month == 13 {
                    self.month = 1;
                }

                // reset the day
                self.day = 1;
                // And try again with the remaining days
                self.add_days(would_be_day - n_days_this_month - 1);
            } else {
                // No change in month.
                self.day += n_days as u8;
            }
        }
    }

    /// Checks whether two dates have same day and month
    pub fn same_day(&self, other: Self) -> bool {
        self.month == other.month && self.day == other.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal() {
        assert_eq!(Date { month: 1, day: 1 }.ordinal(), 1);
        assert_eq!(Date { month: 2, day: 1 }.ordinal(), 32);
        assert_eq!(Date { month: 3, day: 1 }.ordinal(), 60);
        assert_eq!(Date { month: 12, day: 31 }.ordinal(), 365);
    }

    #[test]
    fn test_from_ordinal() -> Result<(), String> {
        for n in 1..=DAYS_IN_YEAR {
            let d = Date::from_ordinal(n)?;
            d.validate()?;
            assert_eq!(d.ordinal(), n);
        }
        assert_eq!(Date::from_ordinal(32)?, Date { month: 2, day: 1 });
        assert!(Date::from_ordinal(0).is_err());
        assert!(Date::from_ordinal(366).is_err());
        Ok(())
    }

    #[test]
    fn test_offset_ordinal() {
        let d = Date { month: 7, day: 19 }; // 200
        assert_eq!(d.ordinal(), 200);
        assert_eq!(d.offset_ordinal(-200), 365);
        assert_eq!(d.offset_ordinal(-199), 1);
        assert_eq!(d.offset_ordinal(-382), 183);
        assert_eq!(d.offset_ordinal(365), 200);
    }

    #[test]
    fn test_add_days() {
        let mut d = Date { month: 1, day: 30 };
        d.add_days(2);
        assert_eq!(d, Date { month: 2, day: 1 });

        let mut d = Date { month: 12, day: 31 };
        d.add_days(1);
        assert_eq!(d, Date { month: 1, day: 1 });

        let mut d = Date { month: 3, day: 15 };
        d.add_days(365);
        assert_eq!(d, Date { month: 3, day: 15 });

        let mut d = Date { month: 1, day: 1 };
        d.add_days(364);
        assert_eq!(d, Date { month: 12, day: 31 });
    }

    #[test]
    fn test_validate() {
        assert!(Date::new(2, 29).is_err());
        assert!(Date::new(13, 1).is_err());
        assert!(Date::new(4, 0).is_err());
        assert!(Date::new(4, 30).is_ok());
    }

    #[test]
    fn test_order_and_display() {
        let a = Date { month: 3, day: 2 };
        let b = Date { month: 3, day: 11 };
        let c = Date { month: 4, day: 1 };
        assert!(a < b);
        assert!(b < c);
        assert!(a.same_day(Date { month: 3, day: 2 }));
        assert_eq!(format!("{}", a), "03/02");
    }
}
