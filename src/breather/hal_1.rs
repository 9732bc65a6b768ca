//! `embedded-hal` 1.0 trait implementations.

use crate::hal::digital::OutputPin;
use crate::hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

use super::Breather;

/// Output pin error surfaced through the `embedded_hal::pwm` error channel
#[derive(Debug)]
pub struct PwmError<E>(pub E);

impl<E: core::fmt::Debug> crate::hal::pwm::Error for PwmError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl<PIN: OutputPin, const TICK_HZ: u32> ErrorType for Breather<PIN, TICK_HZ> {
    type Error = PwmError<PIN::Error>;
}

impl<PIN: OutputPin, const TICK_HZ: u32> SetDutyCycle for Breather<PIN, TICK_HZ> {
    fn max_duty_cycle(&self) -> u16 {
        let (bright, dim) = self.channel.bounds();
        (dim - bright + 1) as u16
    }

    /// Duty 0 disables the output; any other duty enables it and selects
    /// the matching divisor (larger duty = brighter), clamped to the scale.
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if duty == 0 {
            self.enabled = false;
            self.channel.rewind();
            return self.pin.set_low().map_err(PwmError);
        }
        let (_, dim) = self.channel.bounds();
        let duty = duty.min(self.max_duty_cycle());
        self.enabled = true;
        let _ = self.channel.set_divisor((dim as u16 + 1 - duty) as u8);
        Ok(())
    }
}
