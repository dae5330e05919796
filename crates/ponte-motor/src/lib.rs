//! Driver for DC motors behind dual-input H-bridge chips.
//!
//! A [`MotorController`] maps a signed speed percentage onto the two inputs
//! of an H-bridge: the active line carries a PWM duty proportional to the
//! magnitude, the other line is held low, and an optional enable pin gates
//! the driver chip. Output backends are interchangeable: [`ChannelPwmDriver`]
//! for peripherals that allocate PWM generation to named channels, and
//! [`AnalogWriteDriver`] for plain duty-cycle pins.
//!
//! The crate is `no_std` and written against the `embedded-hal` 1.0 traits.
//! [`mock`] provides in-memory implementations for tests and host-side
//! simulation.

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod mock;
pub mod traits;

pub use analog::AnalogWriteDriver;
pub use channel::ChannelPwmDriver;
pub use config::PwmConfig;
pub use controller::{MotorController, MotorState};
pub use error::{GpioError, MotorError, PwmError};
pub use traits::{Line, OutputDriver, PwmChannel};
