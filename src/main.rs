mod config;

use std::time::{Duration, Instant};

use anyhow::Result;
use ponte_motor::mock::{MockPin, MockPwmChannel};
use ponte_motor::{ChannelPwmDriver, MotorController};
use spin_sleep::SpinSleeper;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cfg = config::load_config()?;
    info!(
        "Simulating H-bridge on pins A={} B={} (enable pin: {:?}, reversed: {})",
        cfg.motor.pin_a, cfg.motor.pin_b, cfg.motor.enable_pin, cfg.motor.reversed
    );

    let driver = ChannelPwmDriver::new(MockPwmChannel::new(), MockPwmChannel::new(), cfg.pwm);
    let mut motor = match cfg.motor.enable_pin {
        Some(pin) => MotorController::with_enable(driver, MockPin::new(pin), cfg.motor.reversed),
        None => MotorController::new(driver, cfg.motor.reversed),
    };

    motor.initialize()?;
    info!(
        "Motor initialized: {} Hz carrier, {}-bit duty",
        cfg.pwm.frequency_hz, cfg.pwm.resolution_bits
    );

    let sleeper = SpinSleeper::new(10_000);
    let step = cfg.sweep.step_percent.max(1) as usize;
    let dwell = Duration::from_millis(cfg.sweep.dwell_ms);

    // Ramp to full forward, down through zero to full reverse, and back.
    let mut sweep: Vec<i16> = (0..=100i16).step_by(step).collect();
    sweep.extend((-100..=100i16).rev().step_by(step));
    sweep.extend((-100..=0i16).step_by(step));

    for percent in sweep {
        motor.set_speed(percent)?;
        let state = motor.state();
        info!(
            "speed={}% duty={}/{} line_a={} line_b={}",
            state.speed_percent,
            state.duty_cycle,
            state.max_duty_cycle,
            motor.driver().line_a().duty(),
            motor.driver().line_b().duty()
        );
        sleeper.sleep(dwell);
    }

    motor.stop()?;
    info!("Sweep complete, motor stopped");

    // Average round-trip latency of a single speed command.
    let iterations = cfg.bench.iterations.max(1);
    let mut total = Duration::ZERO;
    for _ in 0..iterations {
        let start = Instant::now();
        motor.set_speed(-75)?;
        total += start.elapsed();
        motor.set_speed(0)?;
    }
    info!(
        "set_speed(): {} iterations, {:.0} ns average",
        iterations,
        total.as_nanos() as f64 / f64::from(iterations)
    );

    motor.stop()?;
    motor.shutdown()?;
    info!("Shutdown complete");
    Ok(())
}
