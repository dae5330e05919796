use core::convert::Infallible;

use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_stm32::timer::GeneralInstance4Channel;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use ponte_motor::PwmChannel;

/// One hardware timer channel behind the [`PwmChannel`] capability set.
///
/// The carrier frequency is fixed on the timer when the `SimplePwm` is
/// built and the duty range comes from the timer's auto-reload value, so
/// attach ignores the carrier parameters and only gates the channel
/// output.
pub struct TimerPwmChannel<T: GeneralInstance4Channel> {
    ch: SimplePwmChannel<'static, T>,
}

impl<T: GeneralInstance4Channel> TimerPwmChannel<T> {
    pub fn new(ch: SimplePwmChannel<'static, T>) -> Self {
        Self { ch }
    }
}

impl<T: GeneralInstance4Channel> ErrorType for TimerPwmChannel<T> {
    type Error = Infallible;
}

impl<T: GeneralInstance4Channel> SetDutyCycle for TimerPwmChannel<T> {
    fn max_duty_cycle(&self) -> u16 {
        self.ch.max_duty_cycle()
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.ch.set_duty_cycle(duty);
        Ok(())
    }
}

impl<T: GeneralInstance4Channel> PwmChannel for TimerPwmChannel<T> {
    fn attach(
        &mut self,
        _channel: u8,
        _frequency_hz: u32,
        _resolution_bits: u8,
    ) -> Result<(), Self::Error> {
        self.ch.set_duty_cycle(0);
        self.ch.enable();
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        self.ch.set_duty_cycle(0);
        self.ch.disable();
        Ok(())
    }
}
