//! Mock hardware for tests and host-side simulation.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::error::{GpioError, PwmError};
use crate::traits::PwmChannel;

/// A digital output recording its level.
#[derive(Debug)]
pub struct MockPin {
    pin: u8,
    level: bool,
}

impl MockPin {
    pub fn new(pin: u8) -> Self {
        Self { pin, level: false }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn is_set_high(&self) -> bool {
        self.level
    }
}

impl digital::ErrorType for MockPin {
    type Error = GpioError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level = true;
        Ok(())
    }
}

/// A PWM channel recording its duty, carrier and binding state.
///
/// Starts detached with an 8-bit duty range. [`PwmChannel::attach`]
/// validates the carrier parameters the way a real peripheral driver
/// would.
#[derive(Debug)]
pub struct MockPwmChannel {
    channel: u8,
    frequency_hz: u32,
    resolution_bits: u8,
    duty: u16,
    attached: bool,
}

impl MockPwmChannel {
    pub fn new() -> Self {
        Self {
            channel: 0,
            frequency_hz: 0,
            resolution_bits: 8,
            duty: 0,
            attached: false,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Default for MockPwmChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl pwm::ErrorType for MockPwmChannel {
    type Error = PwmError;
}

impl SetDutyCycle for MockPwmChannel {
    fn max_duty_cycle(&self) -> u16 {
        ((1u32 << self.resolution_bits) - 1) as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if duty > self.max_duty_cycle() {
            return Err(PwmError::InvalidDutyCycle);
        }
        self.duty = duty;
        Ok(())
    }
}

impl PwmChannel for MockPwmChannel {
    fn attach(
        &mut self,
        channel: u8,
        frequency_hz: u32,
        resolution_bits: u8,
    ) -> Result<(), Self::Error> {
        if frequency_hz == 0 {
            return Err(PwmError::InvalidFrequency);
        }
        if resolution_bits == 0 || resolution_bits > 16 {
            return Err(PwmError::InvalidResolution);
        }
        self.channel = channel;
        self.frequency_hz = frequency_hz;
        self.resolution_bits = resolution_bits;
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        if !self.attached {
            return Err(PwmError::NotAttached);
        }
        self.attached = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_records_its_level() {
        let mut pin = MockPin::new(9);
        assert_eq!(pin.pin(), 9);
        assert!(!pin.is_set_high());
        pin.set_high().unwrap();
        assert!(pin.is_set_high());
        pin.set_low().unwrap();
        assert!(!pin.is_set_high());
    }

    #[test]
    fn channel_rejects_out_of_range_duty() {
        let mut ch = MockPwmChannel::new();
        assert_eq!(ch.max_duty_cycle(), 255);
        assert_eq!(ch.set_duty_cycle(256), Err(PwmError::InvalidDutyCycle));
        ch.set_duty_cycle(255).unwrap();
        assert_eq!(ch.duty(), 255);
    }

    #[test]
    fn attach_validates_the_carrier() {
        let mut ch = MockPwmChannel::new();
        assert_eq!(ch.attach(0, 0, 8), Err(PwmError::InvalidFrequency));
        assert_eq!(ch.attach(0, 25_000, 0), Err(PwmError::InvalidResolution));
        assert_eq!(ch.attach(0, 25_000, 17), Err(PwmError::InvalidResolution));
        ch.attach(1, 25_000, 10).unwrap();
        assert!(ch.is_attached());
        assert_eq!(ch.channel(), 1);
        assert_eq!(ch.max_duty_cycle(), 1023);
    }

    #[test]
    fn detach_requires_an_attached_channel() {
        let mut ch = MockPwmChannel::new();
        assert_eq!(ch.detach(), Err(PwmError::NotAttached));
        ch.attach(0, 25_000, 8).unwrap();
        ch.detach().unwrap();
        assert!(!ch.is_attached());
    }
}
