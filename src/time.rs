//! Time units
//!
//! Frequencies come from [`fugit`]; `2.Hz()` style constructors are available
//! through [`fugit::RateExtU32`], re-exported in the [`prelude`](crate::prelude).

pub use fugit::{HertzU32 as Hertz, TimerDurationU32 as TimerDuration};
