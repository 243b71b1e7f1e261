use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::error::SimError;

pub type Quanta = u64;

/// Virtual clock value, in abstract simulation time units.
///
/// Never negative: the only way to build one from a signed value is
/// [`Time::from_units`], which rejects negatives.
#[derive(Copy, Clone, Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Default)]
pub struct Time(Quanta);

impl Time {
    pub const ZERO: Time = Time(0);

    pub const fn new(units: Quanta) -> Self {
        Self(units)
    }

    /// Build a time from a signed unit count.
    pub fn from_units(units: i64) -> Result<Self, SimError> {
        Quanta::try_from(units)
            .map(Self)
            .map_err(|_| SimError::NegativeTime(units))
    }

    pub fn as_units(&self) -> Quanta {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// `None` if the sum does not fit the clock.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

impl Add for Time {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Time(self.0 + rhs.0)
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Time {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Time::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_units_are_rejected() {
        assert_eq!(Time::from_units(-1), Err(SimError::NegativeTime(-1)));
        assert_eq!(Time::from_units(0), Ok(Time::ZERO));
        assert_eq!(Time::from_units(10), Ok(Time::new(10)));
    }

    #[test]
    fn addition() {
        let mut t = Time::new(10) + Time::new(20);
        t += Time::new(30);
        assert_eq!(t.as_units(), 60);
        assert_eq!([Time::new(1), Time::new(2)].into_iter().sum::<Time>(), Time::new(3));
    }

    #[test]
    fn checked_addition_stops_at_the_clock_limit() {
        let last = Time::new(Quanta::MAX);
        assert_eq!(Time::new(1).checked_add(Time::new(2)), Some(Time::new(3)));
        assert_eq!(last.checked_add(Time::ZERO), Some(last));
        assert_eq!(last.checked_add(Time::new(1)), None);
        assert_eq!(last.saturating_add(Time::new(1)), last);
    }
}
