use embedded_hal::digital::OutputPin;

use crate::error::MotorError;
use crate::traits::{Line, OutputDriver};

/// Snapshot of a controller's commanded state.
///
/// Reflects the last commands issued, not measurements taken from the
/// motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    /// Whether the driver chip is enabled.
    ///
    /// Without an enable pin the chip is permanently enabled and this
    /// field tracks what the pin would carry.
    pub enabled: bool,
    /// Commanded rotation direction, `true` for forward.
    pub direction: bool,
    /// Last commanded speed percentage, -100..=100.
    pub speed_percent: i16,
    /// Duty driven on the active line.
    pub duty_cycle: u16,
    /// Highest duty value the output backend accepts.
    pub max_duty_cycle: u16,
}

/// Controls one DC motor behind a dual-input H-bridge.
///
/// Speed is commanded as a percentage from -100 (full reverse) to 100
/// (full forward). The controller owns an output backend for the two
/// control lines and, optionally, the driver chip's enable pin.
/// Construction performs no I/O; [`MotorController::initialize`] must run
/// before the first `set_speed`, and calls before that are not detected at
/// this layer.
///
/// Every operation is a synchronous pin or peripheral write. The
/// controller is not designed for concurrent access; a caller invoking it
/// from both an interrupt handler and a main loop must supply its own
/// mutual exclusion.
pub struct MotorController<DRV, EN>
where
    DRV: OutputDriver,
    EN: OutputPin,
{
    driver: DRV,
    enable: Option<EN>,
    reversed: bool,
    speed: i16,
    duty: u16,
    direction: bool,
    enabled: bool,
}

impl<DRV, EN> MotorController<DRV, EN>
where
    DRV: OutputDriver,
    EN: OutputPin,
    DRV::Error: Into<MotorError>,
    EN::Error: Into<MotorError>,
{
    /// Creates a controller without an enable pin.
    ///
    /// The driver chip behaves as permanently enabled.
    pub fn new(driver: DRV, reversed: bool) -> Self {
        Self::build(driver, None, reversed)
    }

    /// Creates a controller that gates the driver chip through `enable`.
    pub fn with_enable(driver: DRV, enable: EN, reversed: bool) -> Self {
        Self::build(driver, Some(enable), reversed)
    }

    fn build(driver: DRV, enable: Option<EN>, reversed: bool) -> Self {
        Self {
            driver,
            enable,
            reversed,
            speed: 0,
            duty: 0,
            direction: true,
            enabled: false,
        }
    }

    /// Prepares the outputs for `set_speed`.
    ///
    /// Drives the enable pin low and attaches the output backend: channel
    /// PWM backends configure and bind both channels, analog-write
    /// backends drive both lines low. Pin assignments are not validated
    /// here; a wrong one shows up only at the hardware.
    pub fn initialize(&mut self) -> Result<(), MotorError> {
        if let Some(ref mut pin) = self.enable {
            pin.set_low().map_err(Into::into)?;
        }
        self.enabled = false;
        self.driver.attach().map_err(Into::into)
    }

    /// Releases the output backend's peripheral bindings.
    ///
    /// A no-op for backends without a binding lifecycle. The electrical
    /// pin state is undefined until the next `initialize`.
    pub fn shutdown(&mut self) -> Result<(), MotorError> {
        self.driver.detach().map_err(Into::into)
    }

    /// Sets the motor speed.
    ///
    /// `percent` runs from -100 (full reverse) to 100 (full forward) and
    /// is clamped to that range. The enable pin, if present, is driven
    /// high even for a commanded zero. Zero puts both control lines at
    /// zero duty; otherwise the active line carries a duty proportional to
    /// the magnitude and the other line stays at zero.
    pub fn set_speed(&mut self, percent: i16) -> Result<(), MotorError> {
        if let Some(ref mut pin) = self.enable {
            pin.set_high().map_err(Into::into)?;
        }
        self.enabled = true;

        let percent = percent.clamp(-100, 100);
        self.speed = percent;

        let mut forward = percent >= 0;
        if self.reversed {
            forward = !forward;
        }

        let duty = self.duty_for(percent.unsigned_abs());
        self.duty = duty;

        if percent == 0 {
            self.driver.set_duty(Line::A, 0).map_err(Into::into)?;
            self.driver.set_duty(Line::B, 0).map_err(Into::into)?;
        } else if forward {
            self.direction = true;
            self.driver.set_duty(Line::A, duty).map_err(Into::into)?;
            self.driver.set_duty(Line::B, 0).map_err(Into::into)?;
        } else {
            self.direction = false;
            self.driver.set_duty(Line::A, 0).map_err(Into::into)?;
            self.driver.set_duty(Line::B, duty).map_err(Into::into)?;
        }
        Ok(())
    }

    /// Returns the last speed set via `set_speed`.
    ///
    /// This is the commanded value, not a measurement; the driver has no
    /// feedback sensing.
    pub fn current_speed(&self) -> i16 {
        self.speed
    }

    /// Idles the motor.
    ///
    /// Drives the enable pin low when one is configured, cutting the
    /// driver chip's output entirely; both control lines go to zero duty
    /// either way and the stored speed resets to 0. Whether the motor
    /// coasts or brakes from here depends on the driver chip.
    pub fn stop(&mut self) -> Result<(), MotorError> {
        if let Some(ref mut pin) = self.enable {
            pin.set_low().map_err(Into::into)?;
        }
        self.enabled = false;

        self.driver.set_duty(Line::A, 0).map_err(Into::into)?;
        self.driver.set_duty(Line::B, 0).map_err(Into::into)?;
        self.speed = 0;
        self.duty = 0;
        Ok(())
    }

    /// Returns a snapshot of the commanded state.
    pub fn state(&self) -> MotorState {
        MotorState {
            enabled: self.enabled,
            direction: self.direction,
            speed_percent: self.speed,
            duty_cycle: self.duty,
            max_duty_cycle: self.driver.max_duty(),
        }
    }

    /// Shared access to the output backend.
    pub fn driver(&self) -> &DRV {
        &self.driver
    }

    #[cfg(test)]
    fn enable_pin(&self) -> Option<&EN> {
        self.enable.as_ref()
    }

    // Nearest-integer map from 0..=100 onto 0..=max_duty.
    fn duty_for(&self, magnitude: u16) -> u16 {
        let max = self.driver.max_duty() as u32;
        ((u32::from(magnitude) * max + 50) / 100) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analog::AnalogWriteDriver;
    use crate::channel::ChannelPwmDriver;
    use crate::config::PwmConfig;
    use crate::error::PwmError;
    use crate::mock::{MockPin, MockPwmChannel};

    type MockDriver = ChannelPwmDriver<MockPwmChannel, MockPwmChannel>;

    fn motor(reversed: bool) -> MotorController<MockDriver, MockPin> {
        let driver = ChannelPwmDriver::new(
            MockPwmChannel::new(),
            MockPwmChannel::new(),
            PwmConfig::default(),
        );
        let mut motor = MotorController::with_enable(driver, MockPin::new(9), reversed);
        motor.initialize().unwrap();
        motor
    }

    fn duties(motor: &MotorController<MockDriver, MockPin>) -> (u16, u16) {
        (
            motor.driver().line_a().duty(),
            motor.driver().line_b().duty(),
        )
    }

    #[test]
    fn initialize_configures_both_channels() {
        let motor = motor(false);
        let a = motor.driver().line_a();
        let b = motor.driver().line_b();
        assert!(a.is_attached());
        assert!(b.is_attached());
        assert_eq!(a.channel(), 0);
        assert_eq!(b.channel(), 1);
        assert_eq!(a.frequency_hz(), 25_000);
        assert_eq!(a.resolution_bits(), 8);
        assert!(!motor.enable_pin().unwrap().is_set_high());
    }

    #[test]
    fn speed_is_clamped_to_percent_range() {
        let mut motor = motor(false);
        motor.set_speed(150).unwrap();
        assert_eq!(motor.current_speed(), 100);
        motor.set_speed(-999).unwrap();
        assert_eq!(motor.current_speed(), -100);
        motor.set_speed(42).unwrap();
        assert_eq!(motor.current_speed(), 42);
    }

    #[test]
    fn forward_speed_drives_line_a() {
        let mut motor = motor(false);
        motor.set_speed(50).unwrap();
        assert_eq!(duties(&motor), (128, 0));
        assert!(motor.enable_pin().unwrap().is_set_high());
        assert_eq!(motor.current_speed(), 50);
    }

    #[test]
    fn reverse_speed_drives_line_b() {
        let mut motor = motor(false);
        motor.set_speed(-75).unwrap();
        assert_eq!(duties(&motor), (0, 191));
        assert_eq!(motor.current_speed(), -75);
    }

    #[test]
    fn reversed_flag_swaps_the_lines() {
        let mut motor = motor(true);
        motor.set_speed(40).unwrap();
        assert_eq!(duties(&motor), (0, 102));
        motor.set_speed(-40).unwrap();
        assert_eq!(duties(&motor), (102, 0));
    }

    #[test]
    fn full_scale_reaches_the_duty_maximum() {
        let mut motor = motor(false);
        motor.set_speed(100).unwrap();
        assert_eq!(duties(&motor), (255, 0));
        motor.set_speed(-100).unwrap();
        assert_eq!(duties(&motor), (0, 255));
    }

    #[test]
    fn zero_speed_drives_both_lines_low() {
        for reversed in [false, true] {
            let mut motor = motor(reversed);
            motor.set_speed(60).unwrap();
            motor.set_speed(0).unwrap();
            assert_eq!(duties(&motor), (0, 0));
        }
    }

    #[test]
    fn zero_speed_still_raises_the_enable_pin() {
        let mut motor = motor(false);
        motor.set_speed(0).unwrap();
        assert!(motor.enable_pin().unwrap().is_set_high());
    }

    #[test]
    fn stop_disables_and_clears_the_outputs() {
        let mut motor = motor(false);
        motor.set_speed(80).unwrap();
        motor.stop().unwrap();
        assert!(!motor.enable_pin().unwrap().is_set_high());
        assert_eq!(duties(&motor), (0, 0));
        assert_eq!(motor.current_speed(), 0);
        assert!(!motor.state().enabled);
    }

    #[test]
    fn stop_without_enable_pin_matches_zero_speed_outputs() {
        let driver = ChannelPwmDriver::new(
            MockPwmChannel::new(),
            MockPwmChannel::new(),
            PwmConfig::default(),
        );
        let mut motor = MotorController::<_, MockPin>::new(driver, false);
        motor.initialize().unwrap();
        motor.set_speed(55).unwrap();
        motor.stop().unwrap();
        assert_eq!(duties(&motor), (0, 0));
        assert_eq!(motor.current_speed(), 0);
    }

    #[test]
    fn shutdown_releases_the_channel_bindings() {
        let mut motor = motor(false);
        motor.shutdown().unwrap();
        assert!(!motor.driver().line_a().is_attached());
        assert!(!motor.driver().line_b().is_attached());
        assert_eq!(
            motor.shutdown(),
            Err(MotorError::Pwm(PwmError::NotAttached))
        );
    }

    #[test]
    fn state_tracks_the_last_command() {
        let mut motor = motor(false);
        motor.set_speed(-30).unwrap();
        let state = motor.state();
        assert!(state.enabled);
        assert!(!state.direction);
        assert_eq!(state.speed_percent, -30);
        assert_eq!(state.duty_cycle, 77);
        assert_eq!(state.max_duty_cycle, 255);
    }

    #[test]
    fn analog_backend_mirrors_the_channel_behavior() {
        let driver = AnalogWriteDriver::new(MockPwmChannel::new(), MockPwmChannel::new());
        let mut motor = MotorController::with_enable(driver, MockPin::new(9), false);
        motor.initialize().unwrap();
        assert_eq!(
            (
                motor.driver().line_a().duty(),
                motor.driver().line_b().duty()
            ),
            (0, 0)
        );

        motor.set_speed(50).unwrap();
        assert_eq!(motor.driver().line_a().duty(), 128);
        assert_eq!(motor.driver().line_b().duty(), 0);

        motor.set_speed(-75).unwrap();
        assert_eq!(motor.driver().line_a().duty(), 0);
        assert_eq!(motor.driver().line_b().duty(), 191);

        // No binding lifecycle on this backend.
        motor.shutdown().unwrap();
        motor.shutdown().unwrap();
    }
}
