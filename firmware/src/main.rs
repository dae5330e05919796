#![no_std]
#![no_main]

mod pwm;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_time::{Instant, Timer};
use ponte_motor::{ChannelPwmDriver, MotorController, PwmConfig};
use {defmt_rtt as _, panic_probe as _};

use crate::pwm::TimerPwmChannel;

const STEP_TIME_MS: u64 = 1000; // Time between speed changes

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Starting H-bridge motor demo...");

    // Initialize peripherals
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = PwmConfig::default();

    // TIM1 CH1/CH2 on PA8/PA9 drive the H-bridge inputs.
    let ch1_pin = PwmPin::new_ch1(p.PA8, OutputType::PushPull);
    let ch2_pin = PwmPin::new_ch2(p.PA9, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM1,
        Some(ch1_pin),
        Some(ch2_pin),
        None,
        None,
        Hertz::hz(config.frequency_hz),
        Default::default(),
    );
    let channels = pwm.split();

    // PA10 gates the driver chip.
    let enable = Output::new(p.PA10, Level::Low, Speed::Low);

    let driver = ChannelPwmDriver::new(
        TimerPwmChannel::new(channels.ch1),
        TimerPwmChannel::new(channels.ch2),
        config,
    );
    let mut motor = MotorController::with_enable(driver, enable, false);
    motor.initialize().unwrap();
    info!("Motor initialized");

    loop {
        info!("Ramping forward");
        for speed in (0..=100i16).step_by(20) {
            motor.set_speed(speed).unwrap();
            let state = motor.state();
            info!(
                "speed={}% duty={}/{}",
                state.speed_percent, state.duty_cycle, state.max_duty_cycle
            );
            Timer::after_millis(STEP_TIME_MS).await;
        }

        info!("Ramping reverse");
        for speed in (-100..=0i16).rev().step_by(20) {
            motor.set_speed(speed).unwrap();
            let state = motor.state();
            info!(
                "speed={}% duty={}/{}",
                state.speed_percent, state.duty_cycle, state.max_duty_cycle
            );
            Timer::after_millis(STEP_TIME_MS).await;
        }

        info!("Stopping motor");
        motor.stop().unwrap();
        Timer::after_millis(STEP_TIME_MS).await;

        // Round-trip latency of a single speed command.
        let start = Instant::now();
        motor.set_speed(-75).unwrap();
        let elapsed = start.elapsed();
        info!("set_speed() execution time: {} us", elapsed.as_micros());

        motor.set_speed(0).unwrap();
        Timer::after_millis(500).await;
        motor.stop().unwrap();
    }
}
