//! Duty-cycle state machine for one output channel.
//!
//! A [`Channel`] is plain integer state owned by the caller; several can run
//! side by side off the same tick source (the original target breathed two
//! LEDs in opposite phase this way).

pub use crate::hal::digital::PinState;

use super::{Config, Error, Event};

/// Brightest divisor: the output is high every tick
pub const BRIGHT: u8 = 1;
/// Dimmest divisor: the output is high one tick in seven
pub const DIM: u8 = 7;

/// Which way the ramp is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Raising the divisor, lowering the duty cycle
    Dimmer,
    /// Lowering the divisor, raising the duty cycle
    Brighter,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Dimmer => Direction::Brighter,
            Direction::Brighter => Direction::Dimmer,
        }
    }
}

/// Ramp shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ramp {
    /// Reflect at both bounds: bright -> dim -> bright, period
    /// `2 * (dim - bright)` steps
    Triangle,
    /// Dim one step at a time and wrap past the dim bound back to a divisor
    /// of 0, i.e. fully on.
    ///
    /// Note the wrap lands one below the bright bound: a divisor of 0 drives
    /// the output high on every tick, and the next step moves it to 1 before
    /// the sawtooth continues. Callers depending on the legacy wrap sequence
    /// get it unchanged here rather than a clamp to the bright bound.
    Sawtooth,
}

/// Per-LED duty-cycle state: divisor, cycle position and ramp direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    divisor: u8,
    position: u8,
    direction: Direction,
    ramp: Ramp,
    bright: u8,
    dim: u8,
}

impl Channel {
    /// Channel at full brightness, dimming, triangle ramp over `[1, 7]`
    pub const fn new() -> Self {
        Self {
            divisor: BRIGHT,
            position: 0,
            direction: Direction::Dimmer,
            ramp: Ramp::Triangle,
            bright: BRIGHT,
            dim: DIM,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let (bright, dim) = config.bounds;
        if bright == 0 || bright > dim {
            return Err(Error::WrongBounds);
        }
        if config.divisor < bright || config.divisor > dim {
            return Err(Error::WrongDivisor);
        }
        Ok(Self {
            divisor: config.divisor,
            position: 0,
            direction: config.direction,
            ramp: config.ramp,
            bright,
            dim,
        })
    }

    /// Emits one output decision.
    ///
    /// The position counter cycles through `0..divisor`; the output is high
    /// for exactly the one tick per cycle on which it wraps, giving a duty
    /// cycle of `1/divisor`.
    pub fn tick(&mut self) -> PinState {
        self.position += 1;
        if self.position >= self.divisor {
            self.position = 0;
            PinState::High
        } else {
            PinState::Low
        }
    }

    /// Moves the divisor one ramp step and reports what happened.
    ///
    /// Meant to run once per second (or whatever the prescaler divides the
    /// tick rate down to). The divisor never leaves `[bright, dim]` on the
    /// triangle ramp, nor `[0, dim]` on the sawtooth.
    pub fn advance(&mut self) -> Event {
        let mut event = Event::Step;
        match self.ramp {
            Ramp::Triangle => {
                match self.direction {
                    Direction::Dimmer => self.divisor = self.divisor.saturating_add(1),
                    Direction::Brighter => self.divisor = self.divisor.saturating_sub(1),
                }
                if self.divisor >= self.dim {
                    self.divisor = self.dim;
                    if self.direction == Direction::Dimmer {
                        self.direction = Direction::Brighter;
                        event |= Event::Reverse;
                    }
                } else if self.divisor <= self.bright {
                    self.divisor = self.bright;
                    if self.direction == Direction::Brighter {
                        self.direction = Direction::Dimmer;
                        event |= Event::Reverse;
                    }
                }
            }
            Ramp::Sawtooth => {
                self.divisor = self.divisor.saturating_add(1);
                if self.divisor > self.dim {
                    self.divisor = 0;
                    event |= Event::Wrap;
                }
            }
        }
        if self.position >= self.divisor {
            self.position = 0;
        }
        event
    }

    /// Sets the divisor directly, keeping the ramp state otherwise untouched
    pub fn set_divisor(&mut self, divisor: u8) -> Result<(), Error> {
        if divisor < self.bright || divisor > self.dim {
            return Err(Error::WrongDivisor);
        }
        self.divisor = divisor;
        if self.position >= divisor {
            self.position = 0;
        }
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_ramp(&mut self, ramp: Ramp) {
        self.ramp = ramp;
    }

    /// Rewinds the cycle position without touching the ramp state
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn divisor(&self) -> u8 {
        self.divisor
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn ramp(&self) -> Ramp {
        self.ramp
    }

    /// `(bright, dim)` divisor bounds
    pub fn bounds(&self) -> (u8, u8) {
        (self.bright, self.dim)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(divisor: u8, direction: Direction) -> Channel {
        Channel::from_config(
            &Config::default().divisor(divisor).direction(direction),
        )
        .unwrap()
    }

    #[test]
    fn position_stays_below_divisor() {
        let mut ch = channel(5, Direction::Dimmer);
        for _ in 0..1000 {
            ch.tick();
            assert!(ch.position() < ch.divisor());
        }
    }

    #[test]
    fn one_high_tick_per_cycle() {
        for divisor in 1..=7 {
            let mut ch = channel(divisor, Direction::Dimmer);
            for _ in 0..20 {
                let highs = (0..divisor)
                    .filter(|_| ch.tick() == PinState::High)
                    .count();
                assert_eq!(highs, 1, "divisor {}", divisor);
            }
        }
    }

    #[test]
    fn triangle_reaches_dim_bound_in_six_steps() {
        let mut ch = channel(1, Direction::Dimmer);
        for _ in 0..5 {
            let event = ch.advance();
            assert_eq!(event, Event::Step);
        }
        assert_eq!(ch.divisor(), 6);
        let event = ch.advance();
        assert_eq!(ch.divisor(), 7);
        assert_eq!(ch.direction(), Direction::Brighter);
        assert!(event.contains(Event::Reverse));
    }

    #[test]
    fn triangle_period_is_twelve() {
        let mut ch = channel(1, Direction::Dimmer);
        for _ in 0..12 {
            ch.advance();
        }
        assert_eq!(ch.divisor(), 1);
        assert_eq!(ch.direction(), Direction::Dimmer);
    }

    #[test]
    fn divisor_stays_in_bounds_forever() {
        let mut ch = channel(3, Direction::Brighter);
        for _ in 0..100 {
            ch.advance();
            assert!((1..=7).contains(&ch.divisor()));
        }
    }

    #[test]
    fn step_away_from_dim_bound_keeps_direction() {
        let mut ch = channel(7, Direction::Brighter);
        let event = ch.advance();
        assert_eq!(ch.divisor(), 6);
        assert_eq!(ch.direction(), Direction::Brighter);
        assert!(!event.contains(Event::Reverse));
    }

    #[test]
    fn custom_bounds_reflect() {
        let mut ch = Channel::from_config(
            &Config::default().divisor(2).bounds(2, 5),
        )
        .unwrap();
        for _ in 0..3 {
            ch.advance();
        }
        assert_eq!(ch.divisor(), 5);
        assert_eq!(ch.direction(), Direction::Brighter);
    }

    #[test]
    fn sawtooth_wraps_past_dim_bound_to_zero() {
        let mut ch = Channel::from_config(
            &Config::default().divisor(7).ramp(Ramp::Sawtooth),
        )
        .unwrap();
        let event = ch.advance();
        assert_eq!(ch.divisor(), 0);
        assert!(event.contains(Event::Wrap));

        // divisor 0 drives the output high on every tick
        for _ in 0..10 {
            assert_eq!(ch.tick(), PinState::High);
        }

        ch.advance();
        assert_eq!(ch.divisor(), 1);
    }

    #[test]
    fn rejects_divisor_outside_bounds() {
        let mut ch = channel(4, Direction::Dimmer);
        assert_eq!(ch.set_divisor(0), Err(Error::WrongDivisor));
        assert_eq!(ch.set_divisor(8), Err(Error::WrongDivisor));
        assert_eq!(ch.set_divisor(7), Ok(()));
    }

    #[test]
    fn rejects_bad_bounds() {
        assert_eq!(
            Channel::from_config(&Config::default().bounds(0, 7)).err(),
            Some(Error::WrongBounds)
        );
        assert_eq!(
            Channel::from_config(&Config::default().divisor(5).bounds(5, 3)).err(),
            Some(Error::WrongBounds)
        );
    }
}
