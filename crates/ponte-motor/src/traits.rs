use embedded_hal::pwm::SetDutyCycle;

/// The two control lines of a dual-input H-bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Input A, active for forward rotation.
    A,
    /// Input B, active for reverse rotation.
    B,
}

/// Output backend driving the two control lines of an H-bridge.
///
/// Implementations own the physical resources for both lines.
/// [`OutputDriver::attach`] and [`OutputDriver::detach`] bracket the window
/// in which `set_duty` may be called; the electrical pin state outside that
/// window is backend specific.
pub trait OutputDriver {
    type Error;

    /// Binds peripheral resources and puts both lines into their idle state.
    fn attach(&mut self) -> Result<(), Self::Error>;

    /// Releases the resources bound by `attach`.
    ///
    /// Detaching a backend that is not attached is backend-defined
    /// behavior.
    fn detach(&mut self) -> Result<(), Self::Error>;

    /// Drives one control line at the given duty, `0..=max_duty()`.
    fn set_duty(&mut self, line: Line, duty: u16) -> Result<(), Self::Error>;

    /// Highest duty value accepted by `set_duty`.
    fn max_duty(&self) -> u16;
}

/// A PWM output generated by a named peripheral channel.
///
/// Extends [`SetDutyCycle`] with the channel lifecycle of peripherals such
/// as the ESP32 LEDC: a logical channel is configured with a carrier
/// frequency and resolution, then bound to its physical pin. Which physical
/// pin a channel drives is fixed by the implementation.
pub trait PwmChannel: SetDutyCycle {
    /// Configures the channel and binds it to its pin.
    fn attach(
        &mut self,
        channel: u8,
        frequency_hz: u32,
        resolution_bits: u8,
    ) -> Result<(), Self::Error>;

    /// Releases the channel-to-pin binding.
    fn detach(&mut self) -> Result<(), Self::Error>;
}
