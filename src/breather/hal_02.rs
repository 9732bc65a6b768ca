//! `embedded-hal` 0.2 trait implementations.
//!
//! The duty scale is inverted relative to the divisor so that a larger duty
//! means brighter, as `PwmPin` users expect: duty `k` in `1..=max` selects
//! divisor `dim + 1 - k`, and duty 0 disables the output entirely.

use crate::hal::digital::OutputPin;
use embedded_hal_02::PwmPin;

use super::Breather;

impl<PIN: OutputPin, const TICK_HZ: u32> PwmPin for Breather<PIN, TICK_HZ> {
    type Duty = u8;

    /// `PwmPin` has no error channel, so a pin failure while parking the
    /// output low is dropped here. Use [`Breather::disable`] to observe it.
    fn disable(&mut self) {
        self.enabled = false;
        self.channel.rewind();
        let _ = self.pin.set_low();
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn get_duty(&self) -> u8 {
        if !self.enabled {
            return 0;
        }
        let (_, dim) = self.channel.bounds();
        // a sawtooth divisor of 0 is fully on, i.e. maximum duty
        let duty = (dim as u16 + 1).saturating_sub(self.channel.divisor() as u16);
        duty.min(self.get_max_duty() as u16) as u8
    }

    fn get_max_duty(&self) -> u8 {
        let (bright, dim) = self.channel.bounds();
        dim - bright + 1
    }

    fn set_duty(&mut self, duty: u8) {
        if duty == 0 {
            PwmPin::disable(self);
            return;
        }
        let (_, dim) = self.channel.bounds();
        let duty = duty.min(self.get_max_duty());
        // dim + 1 - duty lands inside the bounds after the clamp above
        let _ = self
            .channel
            .set_divisor((dim as u16 + 1 - duty as u16) as u8);
    }
}
