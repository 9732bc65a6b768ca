pub use crate::hal::digital::OutputPin as _embedded_hal_digital_OutputPin;
pub use crate::hal::digital::StatefulOutputPin as _embedded_hal_digital_StatefulOutputPin;
pub use crate::hal::pwm::SetDutyCycle as _embedded_hal_pwm_SetDutyCycle;
pub use embedded_hal_02::PwmPin as _embedded_hal_02_PwmPin;
pub use fugit::RateExtU32 as _fugit_RateExtU32;
