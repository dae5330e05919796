use ::config::{Config, ConfigError, File, FileFormat};
use ponte_motor::PwmConfig;
use serde::Deserialize;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Deserialize)]
pub struct MotorSection {
    /// Enable pin number; omit for driver chips without one.
    pub enable_pin: Option<u8>,
    pub pin_a: u8,
    pub pin_b: u8,
    pub reversed: bool,
}

#[derive(Debug, Deserialize)]
pub struct SweepSection {
    pub step_percent: u8,
    pub dwell_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct BenchSection {
    pub iterations: u32,
}

#[derive(Debug, Deserialize)]
pub struct SimConfig {
    pub motor: MotorSection,
    #[serde(default)]
    pub pwm: PwmConfig,
    pub sweep: SweepSection,
    pub bench: BenchSection,
}

pub fn load_config() -> Result<SimConfig, ConfigError> {
    info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);

    Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true))
        .build()?
        .try_deserialize()
}
