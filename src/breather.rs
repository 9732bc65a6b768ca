/*!
  # Breathing LED driver

  [`Breather`] ties the duty-cycle state machine to a real output pin. Each
  call to [`Breather::tick`] emits one binary output decision; every
  `TICK_HZ / step` ticks the duty-cycle divisor is advanced one step along
  the configured [`Ramp`].

  The tick can come from anywhere that runs at a fixed rate: a timer
  interrupt handler, an RTOS task, or a blocking loop over a
  [`fugit_timer::Timer`] via [`Breather::run_on`].
*/
#![allow(non_upper_case_globals)]

use crate::hal::digital::OutputPin;
use fugit::TimerDurationU32;

use crate::time::Hertz;

pub mod channel;
pub use channel::*;
pub mod prescaler;
pub use prescaler::*;

mod hal_02;
mod hal_1;
pub use hal_1::PwmError;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bright bound of zero, or bounds out of order
    WrongBounds,
    /// Divisor outside the configured bounds
    WrongDivisor,
    /// Step rate is zero or faster than the tick rate
    WrongRatio,
}

/// Error returned by [`Breather::run_on`]
#[derive(Debug)]
pub enum RunError<T, P> {
    /// The tick source failed
    Timer(T),
    /// The output pin failed
    Pin(P),
}

bitflags::bitflags! {
    /// Ramp events, accumulated by [`Breather::tick`]
    pub struct Event: u32 {
        /// The divisor advanced one step
        const Step = 1 << 0;
        /// The direction reversed at a bound
        const Reverse = 1 << 1;
        /// The sawtooth ramp wrapped past the dim bound back to 0
        const Wrap = 1 << 2;
    }
}

/// Breather configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Initial duty-cycle divisor
    pub divisor: u8,
    /// Initial ramp direction
    pub direction: Direction,
    /// Ramp shape
    pub ramp: Ramp,
    /// `(bright, dim)` divisor bounds
    pub bounds: (u8, u8),
    /// Ramp step rate
    pub step: Hertz,
}

impl Config {
    pub fn divisor(mut self, divisor: u8) -> Self {
        self.divisor = divisor;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn ramp(mut self, ramp: Ramp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn bounds(mut self, bright: u8, dim: u8) -> Self {
        self.bounds = (bright, dim);
        self
    }

    pub fn step(mut self, step: Hertz) -> Self {
        self.step = step;
        self
    }
}

impl Default for Config {
    /// Full brightness, dimming one divisor step per second over `[1, 7]`
    fn default() -> Self {
        Self {
            divisor: BRIGHT,
            direction: Direction::Dimmer,
            ramp: Ramp::Triangle,
            bounds: (BRIGHT, DIM),
            step: Hertz::from_raw(1),
        }
    }
}

/// Software PWM driver for one output pin, ticked at `TICK_HZ`
pub struct Breather<PIN, const TICK_HZ: u32> {
    pin: PIN,
    channel: Channel,
    prescaler: Prescaler,
    flags: Event,
    enabled: bool,
}

/// [`Breather`] at the original 250 Hz interrupt rate
pub type Breather250<PIN> = Breather<PIN, 250>;

impl<PIN: OutputPin, const TICK_HZ: u32> Breather<PIN, TICK_HZ> {
    /// Creates an enabled breather. The pin is not driven until the first
    /// [`tick`](Self::tick).
    pub fn new(pin: PIN, config: Config) -> Result<Self, Error> {
        let channel = Channel::from_config(&config)?;
        let prescaler = Prescaler::from_rates(Hertz::from_raw(TICK_HZ), config.step)?;
        Ok(Self {
            pin,
            channel,
            prescaler,
            flags: Event::empty(),
            enabled: true,
        })
    }

    /// Advances the state machines by one tick and drives the pin.
    ///
    /// Call this once per tick period, typically from the periodic timer
    /// interrupt handler. Does nothing while disabled.
    pub fn tick(&mut self) -> Result<(), PIN::Error> {
        if !self.enabled {
            return Ok(());
        }
        let state = self.channel.tick();
        self.pin.set_state(state)?;
        if self.prescaler.tick() {
            self.flags |= self.channel.advance();
        }
        Ok(())
    }

    /// Runs the breather for `ticks` tick periods on a blocking timer.
    ///
    /// An alternative to interrupt dispatch: the caller sleeps on the timer
    /// between ticks. The timer frequency must be the breather's `TICK_HZ`.
    pub fn run_on<T>(&mut self, timer: &mut T, ticks: u32) -> Result<(), RunError<T::Error, PIN::Error>>
    where
        T: fugit_timer::Timer<TICK_HZ>,
    {
        let period = TimerDurationU32::<TICK_HZ>::from_ticks(1);
        for _ in 0..ticks {
            timer.start(period).map_err(RunError::Timer)?;
            nb::block!(timer.wait()).map_err(RunError::Timer)?;
            self.tick().map_err(RunError::Pin)?;
        }
        timer.cancel().map_err(RunError::Timer)
    }

    /// Resumes ticking. The cycle restarts from the rewound position.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops ticking, parks the pin low and rewinds the cycle position.
    pub fn disable(&mut self) -> Result<(), PIN::Error> {
        self.enabled = false;
        self.channel.rewind();
        self.pin.set_low()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pending ramp events
    pub fn flags(&self) -> Event {
        self.flags
    }

    pub fn clear_flags(&mut self, flags: Event) {
        self.flags.remove(flags);
    }

    /// Changes the ramp step rate
    pub fn set_step(&mut self, step: Hertz) -> Result<(), Error> {
        self.prescaler = Prescaler::from_rates(Hertz::from_raw(TICK_HZ), step)?;
        Ok(())
    }

    /// Current duty-cycle divisor
    pub fn divisor(&self) -> u8 {
        self.channel.divisor()
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut Channel {
        &mut self.channel
    }

    /// Releases the output pin
    pub fn release(self) -> PIN {
        self.pin
    }
}
