use core::convert::Infallible;

use embedded_hal::{digital, pwm};
use thiserror::Error;

/// Failure reported by a digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// The pin is not configured as an output.
    #[error("pin is not configured as an output")]
    InvalidMode,
}

impl digital::Error for GpioError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Failure reported by a PWM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Duty value above the channel maximum.
    #[error("duty cycle exceeds the channel maximum")]
    InvalidDutyCycle,
    /// Carrier frequency of zero.
    #[error("carrier frequency must be non-zero")]
    InvalidFrequency,
    /// Resolution outside 1..=16 bits.
    #[error("resolution must be between 1 and 16 bits")]
    InvalidResolution,
    /// The channel has no pin binding.
    #[error("channel is not attached to a pin")]
    NotAttached,
}

impl pwm::Error for PwmError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

/// Error type for motor controller operations.
///
/// Out-of-range speed input is clamped and never reported here; only
/// failures surfaced by the underlying outputs are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    #[error(transparent)]
    Gpio(#[from] GpioError),
    #[error(transparent)]
    Pwm(#[from] PwmError),
}

impl From<Infallible> for MotorError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}
