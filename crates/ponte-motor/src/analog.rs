use embedded_hal::pwm::SetDutyCycle;

use crate::traits::{Line, OutputDriver};

/// Output backend for plain duty-cycle pins.
///
/// For platforms without a channel-based PWM peripheral. There is no
/// binding lifecycle: `attach` drives both lines fully off and `detach`
/// does nothing. Both pins must share the same duty range.
pub struct AnalogWriteDriver<A, B>
where
    A: SetDutyCycle,
    B: SetDutyCycle<Error = A::Error>,
{
    line_a: A,
    line_b: B,
}

impl<A, B> AnalogWriteDriver<A, B>
where
    A: SetDutyCycle,
    B: SetDutyCycle<Error = A::Error>,
{
    pub fn new(line_a: A, line_b: B) -> Self {
        Self { line_a, line_b }
    }

    pub fn line_a(&self) -> &A {
        &self.line_a
    }

    pub fn line_b(&self) -> &B {
        &self.line_b
    }
}

impl<A, B> OutputDriver for AnalogWriteDriver<A, B>
where
    A: SetDutyCycle,
    B: SetDutyCycle<Error = A::Error>,
{
    type Error = A::Error;

    fn attach(&mut self) -> Result<(), Self::Error> {
        self.line_a.set_duty_cycle_fully_off()?;
        self.line_b.set_duty_cycle_fully_off()
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        Ok(())
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
