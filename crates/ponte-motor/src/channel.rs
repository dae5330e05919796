use crate::config::PwmConfig;
use crate::traits::{Line, OutputDriver, PwmChannel};

/// Output backend for channel-based PWM peripherals.
///
/// Owns one [`PwmChannel`] per H-bridge input. `attach` configures both
/// channels with the carrier from [`PwmConfig`] and binds them to their
/// pins; `detach` releases both bindings. The duty range is whatever the
/// channels natively report.
pub struct ChannelPwmDriver<A, B>
where
    A: PwmChannel,
    B: PwmChannel<Error = A::Error>,
{
    line_a: A,
    line_b: B,
    config: PwmConfig,
}

impl<A, B> ChannelPwmDriver<A, B>
where
    A: PwmChannel,
    B: PwmChannel<Error = A::Error>,
{
    pub fn new(line_a: A, line_b: B, config: PwmConfig) -> Self {
        Self {
            line_a,
            line_b,
            config,
        }
    }

    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    pub fn line_a(&self) -> &A {
        &self.line_a
    }

    pub fn line_b(&self) -> &B {
        &self.line_b
    }
}

impl<A, B> OutputDriver for ChannelPwmDriver<A, B>
where
    A: PwmChannel,
    B: PwmChannel<Error = A::Error>,
{
    type Error = A::Error;

    fn attach(&mut self) -> Result<(), Self::Error> {
        self.line_a.attach(
            self.config.channel_a,
            self.config.frequency_hz,
            self.config.resolution_bits,
        )?;
        self.line_b.attach(
            self.config.channel_b,
            self.config.frequency_hz,
            self.config.resolution_bits,
        )
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        self.line_a.detach()?;
        self.line_b.detach()
    }

    fn set_duty(&mut self, line: Line, duty: u16) -> Result<(), Self::Error> {
        match line {
            Line::A => self.line_a.set_duty_cycle(duty),
            Line::B => self.line_b.set_duty_cycle(duty),
        }
    }

    fn max_duty(&self) -> u16 {
        self.line_a.max_duty_cycle()
    }
}
