//! Tick-counting sub-state that divides the tick rate down to the ramp
//! step rate, e.g. 250 Hz down to the once-per-second divisor advance.

use super::Error;
use crate::time::Hertz;

/// Fires once every `limit` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Prescaler {
    limit: u32,
    count: u32,
}

impl Prescaler {
    pub fn new(limit: u32) -> Result<Self, Error> {
        if limit == 0 {
            return Err(Error::WrongRatio);
        }
        Ok(Self { limit, count: 0 })
    }

    /// Prescaler firing at `step` when ticked at `tick`.
    ///
    /// The ratio is truncated to whole ticks; a step rate above the tick
    /// rate has no whole-tick period and is rejected.
    pub fn from_rates(tick: Hertz, step: Hertz) -> Result<Self, Error> {
        if step.raw() == 0 {
            return Err(Error::WrongRatio);
        }
        Self::new(tick.raw() / step.raw())
    }

    /// Counts one tick; true on every `limit`-th call
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.limit {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_every_limit_ticks() {
        let mut psc = Prescaler::new(250).unwrap();
        for second in 0..4 {
            for _ in 0..249 {
                assert!(!psc.tick(), "early fire in second {}", second);
            }
            assert!(psc.tick());
        }
    }

    #[test]
    fn derives_limit_from_rates() {
        let psc = Prescaler::from_rates(Hertz::from_raw(250), Hertz::from_raw(1)).unwrap();
        assert_eq!(psc.limit(), 250);

        // the original "speed control" variant: advance every half second
        let psc = Prescaler::from_rates(Hertz::from_raw(250), Hertz::from_raw(2)).unwrap();
        assert_eq!(psc.limit(), 125);
    }

    #[test]
    fn rejects_zero_ratio() {
        assert_eq!(
            Prescaler::from_rates(Hertz::from_raw(250), Hertz::from_raw(0)).err(),
            Some(Error::WrongRatio)
        );
        assert_eq!(
            Prescaler::from_rates(Hertz::from_raw(250), Hertz::from_raw(500)).err(),
            Some(Error::WrongRatio)
        );
        assert_eq!(Prescaler::new(0).err(), Some(Error::WrongRatio));
    }
}
