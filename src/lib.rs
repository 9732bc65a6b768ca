//! # Software-timed PWM brightness control
//!
//! This crate drives an LED (or any binary output) at a fraction of full
//! brightness without hardware PWM support: a fixed-rate periodic tick turns
//! the output on for one tick and off for `divisor - 1` ticks, giving a duty
//! cycle of `1/divisor`. A built-in ramp steps the divisor up and down once
//! per second, producing a slow "breathing" effect.
//!
//! The driver is generic over [`embedded_hal::digital::OutputPin`] and over
//! the tick frequency, so the same state machine can run from a timer
//! interrupt on any microcontroller, from a blocking main loop through
//! [`fugit_timer::Timer`], or from a plain test loop on the host.
//!
//! # Usage
//!
//! Call [`Breather::tick`](breather::Breather::tick) from the periodic timer
//! interrupt handler (the original target invoked it at 250 Hz from the
//! watchdog interval interrupt). Everything else is bookkeeping inside the
//! driver.
//!
//! ```
//! use softpwm::{Breather250, Config};
//!
//! struct Led(bool);
//! impl embedded_hal::digital::ErrorType for Led {
//!     type Error = core::convert::Infallible;
//! }
//! impl embedded_hal::digital::OutputPin for Led {
//!     fn set_low(&mut self) -> Result<(), Self::Error> {
//!         self.0 = false;
//!         Ok(())
//!     }
//!     fn set_high(&mut self) -> Result<(), Self::Error> {
//!         self.0 = true;
//!         Ok(())
//!     }
//! }
//!
//! // 250 Hz tick, starting at full brightness, dimming one step per second.
//! let mut led = Breather250::new(Led(false), Config::default()).unwrap();
//! for _ in 0..250 {
//!     led.tick().unwrap();
//! }
//! assert_eq!(led.divisor(), 2);
//! ```

#![cfg_attr(not(test), no_std)]

use embedded_hal as hal;

pub mod breather;
pub mod prelude;
pub mod time;

pub use breather::{
    Breather, Breather250, Channel, Config, Direction, Error, Event, Prescaler, Ramp,
};
